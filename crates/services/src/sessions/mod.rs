mod plan;
mod runner;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{SessionPlan, SessionPlanner, shuffle};
pub use runner::{RunnerState, SessionRunner};
pub use workflow::TrainerService;
