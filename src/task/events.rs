//! Task Event Types
//!
//! Events the game layer feeds into the task book, and what came of them.

use serde::{Deserialize, Serialize};

use super::definition::ItemReward;
use super::error::TaskError;
use super::progress::PlayerId;

/// Events that can move a player's disciple task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskEvent {
    /// Player killed a mob
    MobKilled {
        player_id: PlayerId,
        mob_id: u32,
        /// Map the kill happened on
        map_id: u32,
    },

    /// Player asked to take a task from the board
    AcceptRequested {
        player_id: PlayerId,
        task_id: u32,
    },

    /// Player tried to turn in their task
    CompleteRequested {
        player_id: PlayerId,
    },

    /// Player gave up their task
    CancelRequested {
        player_id: PlayerId,
    },
}

impl TaskEvent {
    /// Get the player ID associated with this event
    pub fn player_id(&self) -> PlayerId {
        match self {
            TaskEvent::MobKilled { player_id, .. } => *player_id,
            TaskEvent::AcceptRequested { player_id, .. } => *player_id,
            TaskEvent::CompleteRequested { player_id } => *player_id,
            TaskEvent::CancelRequested { player_id } => *player_id,
        }
    }

    /// Get event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            TaskEvent::MobKilled { .. } => "mob_killed",
            TaskEvent::AcceptRequested { .. } => "accept_requested",
            TaskEvent::CompleteRequested { .. } => "complete_requested",
            TaskEvent::CancelRequested { .. } => "cancel_requested",
        }
    }
}

/// Result of processing a task event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEventOutcome {
    Accepted {
        task_id: u32,
        /// Daily slots still free after this accept
        remaining_daily_slots: u32,
    },
    KillRecorded {
        task_id: u32,
        kill_count: u32,
        kill_target: u32,
        /// Whether the task can now be turned in
        ready: bool,
    },
    /// Rewards for the inventory service to credit
    Completed {
        task_id: u32,
        rewards: Vec<ItemReward>,
    },
    Cancelled {
        task_id: u32,
    },
    /// Kill did not count toward the active task (or there was none)
    Ignored,
    Rejected(TaskError),
}

impl TaskEventOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, TaskEventOutcome::Rejected(_))
    }
}
