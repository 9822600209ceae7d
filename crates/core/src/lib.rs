#![forbid(unsafe_code)]

pub mod model;

pub use model::{Level, ProgressState, Session, Word, WordCatalog};
