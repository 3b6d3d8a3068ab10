//! Turn driver, RL environment and self-play scheduler.

pub mod env;
pub mod reward;
pub mod scheduler;
pub mod session;

pub use env::{BoardEnv, StepResult, ALLOWED_MOVE_REWARD, WIN_REWARD, WRONG_MOVE_REWARD};
pub use reward::RewardMax;
pub use scheduler::{RunError, Scheduler, SchedulerStats};
pub use session::{GameSession, MoveOutcome, SessionError};

#[cfg(test)]
mod env_tests;
#[cfg(test)]
mod scheduler_tests;
#[cfg(test)]
mod session_tests;
