//! Disciple Task System Module
//!
//! Repeatable kill tasks at three difficulty tiers, with a per-player daily
//! acceptance quota. The catalog is immutable once built; progress records
//! are mutated only through the transitions on `PlayerTaskProgress`.

pub mod book;
pub mod catalog;
pub mod clock;
pub mod definition;
pub mod error;
pub mod events;
pub mod names;
pub mod progress;

pub use book::TaskBook;
pub use catalog::TaskCatalog;
pub use clock::ResetClock;
pub use definition::{ItemReward, TaskTemplate, TaskTier};
pub use error::TaskError;
pub use events::{TaskEvent, TaskEventOutcome};
pub use names::{describe_progress, describe_task, MapNames, MobNames, NameTable};
pub use progress::{PlayerId, PlayerTaskProgress, MAX_DAILY_TASKS};
