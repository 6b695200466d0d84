//! Disciple task subsystem for the game server.

pub mod config;
pub mod task;

pub use config::TaskConfig;
pub use task::{
    ItemReward, PlayerTaskProgress, ResetClock, TaskBook, TaskCatalog, TaskError, TaskTemplate,
    TaskTier, MAX_DAILY_TASKS,
};
