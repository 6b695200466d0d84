//! Task Book
//!
//! Keyed store of every player's task progress. Each command runs while the
//! player's entry is locked, so the quota refresh, the check, and the
//! mutation happen as one step even with concurrent callers.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use super::catalog::TaskCatalog;
use super::clock::ResetClock;
use super::definition::ItemReward;
use super::error::TaskError;
use super::events::{TaskEvent, TaskEventOutcome};
use super::progress::{PlayerId, PlayerTaskProgress};

pub struct TaskBook {
    catalog: Arc<TaskCatalog>,
    clock: ResetClock,
    /// Player id -> progress
    records: DashMap<PlayerId, PlayerTaskProgress>,
}

impl TaskBook {
    pub fn new(catalog: Arc<TaskCatalog>, clock: ResetClock) -> Self {
        Self {
            catalog,
            clock,
            records: DashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<TaskCatalog> {
        &self.catalog
    }

    pub fn clock(&self) -> ResetClock {
        self.clock
    }

    /// Put a record loaded from the account store, replacing any existing one
    pub fn insert(&self, progress: PlayerTaskProgress) {
        self.records.insert(progress.player_id(), progress);
    }

    /// Copy of a player's record, if they have been seen
    pub fn snapshot(&self, player_id: PlayerId) -> Option<PlayerTaskProgress> {
        self.records.get(&player_id).map(|r| r.value().clone())
    }

    /// Copy of a player's record, creating a fresh one on first sight
    pub fn get_or_create(&self, player_id: PlayerId, now: DateTime<Utc>) -> PlayerTaskProgress {
        self.with_progress(player_id, now, |progress, _, _| progress.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run `f` against a player's record with the entry locked.
    ///
    /// `f` must not call back into this book.
    pub fn with_progress<R>(
        &self,
        player_id: PlayerId,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut PlayerTaskProgress, &TaskCatalog, NaiveDate) -> R,
    ) -> R {
        let today = self.clock.today(now);
        let mut entry = self.records.entry(player_id).or_insert_with(|| {
            debug!("Created task progress for player {}", player_id);
            PlayerTaskProgress::new(player_id, today)
        });
        f(entry.value_mut(), self.catalog.as_ref(), today)
    }

    pub fn can_accept(&self, player_id: PlayerId, now: DateTime<Utc>) -> bool {
        self.with_progress(player_id, now, |progress, _, today| {
            progress.can_accept_task(today)
        })
    }

    pub fn accept(
        &self,
        player_id: PlayerId,
        task_id: u32,
        now: DateTime<Utc>,
    ) -> Result<u32, TaskError> {
        let result = self.with_progress(player_id, now, |progress, catalog, today| {
            progress.accept_task(catalog, task_id, today)?;
            Ok(progress.remaining_daily_slots(today))
        });

        match &result {
            Ok(remaining) => info!(
                "Player {} accepted task {} ({} daily slots left)",
                player_id, task_id, remaining
            ),
            Err(e) => debug!(
                "Player {} could not accept task {}: {}",
                player_id, task_id, e
            ),
        }
        result
    }

    pub fn complete(
        &self,
        player_id: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<(u32, Vec<ItemReward>), TaskError> {
        let result = self.with_progress(player_id, now, |progress, catalog, _| {
            let task_id = progress.current_task_id().ok_or(TaskError::NoActiveTask)?;
            let rewards = progress.complete_task(catalog)?;
            Ok((task_id, rewards))
        });

        match &result {
            Ok((task_id, rewards)) => info!(
                "Player {} completed task {} ({} reward entries)",
                player_id, task_id, rewards.len()
            ),
            Err(e) => debug!("Player {} could not complete task: {}", player_id, e),
        }
        result
    }

    pub fn cancel(&self, player_id: PlayerId, now: DateTime<Utc>) -> Result<u32, TaskError> {
        let result = self.with_progress(player_id, now, |progress, _, _| {
            let task_id = progress.current_task_id().ok_or(TaskError::NoActiveTask)?;
            progress.cancel_task()?;
            Ok(task_id)
        });

        if let Ok(task_id) = &result {
            info!("Player {} cancelled task {}", player_id, task_id);
        }
        result
    }

    /// Count a kill if it matches the active task's mob
    pub fn on_mob_killed(
        &self,
        player_id: PlayerId,
        mob_id: u32,
        now: DateTime<Utc>,
    ) -> TaskEventOutcome {
        let outcome = self.with_progress(player_id, now, |progress, catalog, _| {
            let template = match progress.active_template(catalog) {
                Some(t) if t.target_mob_id == mob_id => t,
                _ => return TaskEventOutcome::Ignored,
            };

            match progress.record_kill(1) {
                Ok(()) => TaskEventOutcome::KillRecorded {
                    task_id: template.id,
                    kill_count: progress.kill_count(),
                    kill_target: template.kill_target,
                    ready: progress.kill_count() >= template.kill_target,
                },
                Err(e) => TaskEventOutcome::Rejected(e),
            }
        });

        if let TaskEventOutcome::KillRecorded {
            task_id,
            kill_count,
            kill_target,
            ready,
        } = &outcome
        {
            info!(
                "Player {} progress on task {}: {}/{}",
                player_id, task_id, kill_count, kill_target
            );
            if *ready {
                info!("Player {} task {} is ready to complete!", player_id, task_id);
            }
        }
        outcome
    }

    /// Process a task event
    pub fn handle(&self, event: &TaskEvent, now: DateTime<Utc>) -> TaskEventOutcome {
        debug!("Handling {} for player {}", event.event_type(), event.player_id());

        match *event {
            TaskEvent::MobKilled { player_id, mob_id, .. } => {
                self.on_mob_killed(player_id, mob_id, now)
            }
            TaskEvent::AcceptRequested { player_id, task_id } => {
                match self.accept(player_id, task_id, now) {
                    Ok(remaining_daily_slots) => TaskEventOutcome::Accepted {
                        task_id,
                        remaining_daily_slots,
                    },
                    Err(e) => TaskEventOutcome::Rejected(e),
                }
            }
            TaskEvent::CompleteRequested { player_id } => match self.complete(player_id, now) {
                Ok((task_id, rewards)) => TaskEventOutcome::Completed { task_id, rewards },
                Err(e) => TaskEventOutcome::Rejected(e),
            },
            TaskEvent::CancelRequested { player_id } => match self.cancel(player_id, now) {
                Ok(task_id) => TaskEventOutcome::Cancelled { task_id },
                Err(e) => TaskEventOutcome::Rejected(e),
            },
        }
    }
}
