mod catalog;
mod level;
mod progress;
mod session;
mod word;

pub use catalog::{CatalogError, WordCatalog};
pub use level::{Level, LevelParseError};
pub use progress::{
    LevelProgress, LevelProgressError, LevelProgressMap, ProgressState, ProgressStats,
    compute_level, compute_level_progress,
};
pub use session::{EmptySessionError, Session, SessionCompletion, SessionMode, SessionStep};
pub use word::Word;
