use thiserror::Error;

/// Outcomes that reject a task command. None of them change the player's record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The id does not name any template in the catalog.
    #[error("task {0} does not exist")]
    TaskNotFound(u32),

    /// Accept attempted while another task is in progress.
    #[error("finish or cancel your current task first")]
    TaskAlreadyActive,

    /// Every daily slot is used; clears at the next calendar day.
    #[error("daily task limit reached, come back tomorrow")]
    DailyQuotaExceeded,

    #[error("no task in progress")]
    NoActiveTask,

    /// Turn-in attempted before the kill target was reached.
    #[error("task not finished yet ({killed}/{required} kills)")]
    TaskNotYetComplete { killed: u32, required: u32 },
}
