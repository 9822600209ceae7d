pub mod learn;
pub mod levels;
pub mod practice;
pub mod reset;
pub mod session;
pub mod stats;
