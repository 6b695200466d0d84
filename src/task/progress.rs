//! Player Task Progress
//!
//! Per-player record of the active disciple task, its kill count, and the
//! daily acceptance quota.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::TaskCatalog;
use super::definition::{ItemReward, TaskTemplate};
use super::error::TaskError;

/// Tasks a player may accept per calendar day
pub const MAX_DAILY_TASKS: u32 = 10;

pub type PlayerId = u64;

/// Task state for a single player.
///
/// A `current_task_id` of 0 means idle. Fields are private so the kill count
/// can only be touched through the transitions below; records read back from
/// the account store go through `RawPlayerTaskProgress` and are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayerTaskProgress")]
pub struct PlayerTaskProgress {
    player_id: PlayerId,
    current_task_id: u32,
    kill_count: u32,
    daily_accepted_count: u32,
    last_reset_date: NaiveDate,
}

/// Progress record as it comes back from the account store
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayerTaskProgress {
    pub player_id: PlayerId,
    #[serde(default)]
    pub current_task_id: u32,
    #[serde(default)]
    pub kill_count: u32,
    #[serde(default)]
    pub daily_accepted_count: u32,
    pub last_reset_date: NaiveDate,
}

impl TryFrom<RawPlayerTaskProgress> for PlayerTaskProgress {
    type Error = String;

    fn try_from(raw: RawPlayerTaskProgress) -> Result<Self, Self::Error> {
        if raw.daily_accepted_count > MAX_DAILY_TASKS {
            return Err(format!(
                "Player {} has {} daily tasks accepted, limit is {}",
                raw.player_id, raw.daily_accepted_count, MAX_DAILY_TASKS
            ));
        }
        if raw.current_task_id == 0 && raw.kill_count != 0 {
            return Err(format!(
                "Player {} has no active task but a kill count of {}",
                raw.player_id, raw.kill_count
            ));
        }

        Ok(Self {
            player_id: raw.player_id,
            current_task_id: raw.current_task_id,
            kill_count: raw.kill_count,
            daily_accepted_count: raw.daily_accepted_count,
            last_reset_date: raw.last_reset_date,
        })
    }
}

impl PlayerTaskProgress {
    /// Fresh record for a player seen for the first time
    pub fn new(player_id: PlayerId, today: NaiveDate) -> Self {
        Self {
            player_id,
            current_task_id: 0,
            kill_count: 0,
            daily_accepted_count: 0,
            last_reset_date: today,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Active task id, or None when idle
    pub fn current_task_id(&self) -> Option<u32> {
        (self.current_task_id != 0).then_some(self.current_task_id)
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    /// Accepted count as of the last refresh. May be stale across a day boundary.
    pub fn daily_accepted_count(&self) -> u32 {
        self.daily_accepted_count
    }

    pub fn last_reset_date(&self) -> NaiveDate {
        self.last_reset_date
    }

    pub fn is_active(&self) -> bool {
        self.current_task_id != 0
    }

    /// Zero the daily quota if `today` is a different calendar day
    pub fn refresh_daily_quota(&mut self, today: NaiveDate) {
        if self.last_reset_date != today {
            debug!(
                "Player {} daily task quota reset ({} -> {})",
                self.player_id, self.last_reset_date, today
            );
            self.daily_accepted_count = 0;
            self.last_reset_date = today;
        }
    }

    pub fn can_accept_task(&mut self, today: NaiveDate) -> bool {
        self.refresh_daily_quota(today);
        self.daily_accepted_count < MAX_DAILY_TASKS
    }

    /// Daily slots left after refreshing
    pub fn remaining_daily_slots(&mut self, today: NaiveDate) -> u32 {
        self.refresh_daily_quota(today);
        MAX_DAILY_TASKS.saturating_sub(self.daily_accepted_count)
    }

    /// Start a task, consuming one daily slot
    pub fn accept_task(
        &mut self,
        catalog: &TaskCatalog,
        task_id: u32,
        today: NaiveDate,
    ) -> Result<(), TaskError> {
        self.refresh_daily_quota(today);

        if self.is_active() {
            return Err(TaskError::TaskAlreadyActive);
        }
        catalog.get(task_id)?;
        if self.daily_accepted_count >= MAX_DAILY_TASKS {
            return Err(TaskError::DailyQuotaExceeded);
        }

        self.current_task_id = task_id;
        self.kill_count = 0;
        self.daily_accepted_count += 1;
        Ok(())
    }

    /// Add kills to the active task. Overshooting the target is allowed.
    pub fn record_kill(&mut self, amount: u32) -> Result<(), TaskError> {
        if !self.is_active() {
            return Err(TaskError::NoActiveTask);
        }
        self.kill_count = self.kill_count.saturating_add(amount);
        Ok(())
    }

    /// Template of the active task, if any
    pub fn active_template<'a>(&self, catalog: &'a TaskCatalog) -> Option<&'a TaskTemplate> {
        self.current_task_id()
            .and_then(|id| catalog.get(id).ok())
    }

    pub fn is_task_complete(&self, catalog: &TaskCatalog) -> bool {
        self.active_template(catalog)
            .map_or(false, |t| self.kill_count >= t.kill_target)
    }

    /// Kills still needed, or None when idle
    pub fn remaining_kills(&self, catalog: &TaskCatalog) -> Option<u32> {
        self.active_template(catalog)
            .map(|t| t.kill_target.saturating_sub(self.kill_count))
    }

    /// Turn in a finished task. Returns the rewards for the inventory service to credit.
    pub fn complete_task(&mut self, catalog: &TaskCatalog) -> Result<Vec<ItemReward>, TaskError> {
        if !self.is_active() {
            return Err(TaskError::NoActiveTask);
        }
        let template = catalog.get(self.current_task_id)?;
        if self.kill_count < template.kill_target {
            return Err(TaskError::TaskNotYetComplete {
                killed: self.kill_count,
                required: template.kill_target,
            });
        }

        let rewards = template.rewards.clone();
        self.clear_task();
        Ok(rewards)
    }

    /// Drop the active task. The daily slot it used is not given back.
    pub fn cancel_task(&mut self) -> Result<(), TaskError> {
        if !self.is_active() {
            return Err(TaskError::NoActiveTask);
        }
        self.clear_task();
        Ok(())
    }

    fn clear_task(&mut self) {
        self.current_task_id = 0;
        self.kill_count = 0;
    }
}
