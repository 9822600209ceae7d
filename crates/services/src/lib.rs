#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod progress_store;
pub mod sessions;

pub use catalog::{load_catalog, parse_catalog};
pub use error::{CatalogLoadError, ProgressError, SessionError};
pub use progress_store::{PROGRESS_KEY, ProgressStore};

pub use sessions::{
    RunnerState, SessionPlan, SessionPlanner, SessionRunner, TrainerService, shuffle,
};
