use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use disciple_tasks::task::{TaskEvent, TaskEventOutcome};
use disciple_tasks::{
    ItemReward, PlayerTaskProgress, ResetClock, TaskBook, TaskCatalog, TaskError, TaskTemplate,
    TaskTier, MAX_DAILY_TASKS,
};

fn scenario_catalog() -> TaskCatalog {
    TaskCatalog::from_templates(vec![
        TaskTemplate::new(1, TaskTier::Easy, 1, 1, 10, vec![ItemReward::new(1519, 1)]).unwrap(),
    ])
    .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn at(d: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, d, hour, min, 0).unwrap()
}

#[test]
fn fresh_player_completes_easy_task() {
    let catalog = scenario_catalog();
    let mut progress = PlayerTaskProgress::new(1, day(1));

    progress.accept_task(&catalog, 1, day(1)).unwrap();
    assert_eq!(progress.daily_accepted_count(), 1);
    assert_eq!(progress.kill_count(), 0);

    progress.record_kill(10).unwrap();
    assert_eq!(progress.kill_count(), 10);
    assert!(progress.is_task_complete(&catalog));

    assert_eq!(
        progress.complete_task(&catalog).unwrap(),
        vec![ItemReward::new(1519, 1)]
    );
    assert_eq!(progress.current_task_id(), None);
}

#[test]
fn ten_accepts_per_day_then_reset() {
    let catalog = scenario_catalog();
    let mut progress = PlayerTaskProgress::new(1, day(1));

    for n in 1..=MAX_DAILY_TASKS {
        progress.accept_task(&catalog, 1, day(1)).unwrap();
        assert_eq!(progress.daily_accepted_count(), n);
        progress.cancel_task().unwrap();
        assert_eq!(progress.daily_accepted_count(), n);
    }

    assert_eq!(
        progress.accept_task(&catalog, 1, day(1)),
        Err(TaskError::DailyQuotaExceeded)
    );

    progress.accept_task(&catalog, 1, day(2)).unwrap();
    assert_eq!(progress.daily_accepted_count(), 1);
}

#[test]
fn reset_follows_calendar_day_not_elapsed_time() {
    let book = TaskBook::new(Arc::new(scenario_catalog()), ResetClock::utc());

    for _ in 0..MAX_DAILY_TASKS {
        book.accept(3, 1, at(1, 23, 58)).unwrap();
        book.cancel(3, at(1, 23, 58)).unwrap();
    }
    assert!(!book.can_accept(3, at(1, 23, 59)));

    // Two minutes later is a new day
    assert!(book.can_accept(3, at(2, 0, 0)));
    assert_eq!(book.accept(3, 1, at(2, 0, 1)), Ok(MAX_DAILY_TASKS - 1));
}

#[test]
fn reset_uses_configured_zone() {
    let clock = ResetClock::with_offset_hours(8).unwrap();
    let book = TaskBook::new(Arc::new(scenario_catalog()), clock);

    for _ in 0..MAX_DAILY_TASKS {
        book.accept(4, 1, at(1, 10, 0)).unwrap();
        book.cancel(4, at(1, 10, 0)).unwrap();
    }

    // 15:59 UTC is still June 1st at +8, 16:00 UTC is June 2nd
    assert!(!book.can_accept(4, at(1, 15, 59)));
    assert!(book.can_accept(4, at(1, 16, 0)));
}

#[test]
fn kill_events_drive_task_to_completion() {
    let book = TaskBook::new(Arc::new(TaskCatalog::builtin()), ResetClock::utc());
    let now = at(5, 12, 0);

    let accept = TaskEvent::AcceptRequested {
        player_id: 8,
        task_id: 2,
    };
    book.handle(&accept, now);
    let template = book.catalog().get(2).unwrap().clone();

    let wrong_mob = TaskEvent::MobKilled {
        player_id: 8,
        mob_id: template.target_mob_id + 100,
        map_id: 1,
    };
    assert_eq!(book.handle(&wrong_mob, now), TaskEventOutcome::Ignored);

    let right_mob = TaskEvent::MobKilled {
        player_id: 8,
        mob_id: template.target_mob_id,
        map_id: template.target_map_id,
    };
    let mut last = TaskEventOutcome::Ignored;
    for _ in 0..template.kill_target {
        last = book.handle(&right_mob, now);
    }
    assert_eq!(
        last,
        TaskEventOutcome::KillRecorded {
            task_id: 2,
            kill_count: template.kill_target,
            kill_target: template.kill_target,
            ready: true,
        }
    );

    assert_eq!(
        book.handle(&TaskEvent::CompleteRequested { player_id: 8 }, now),
        TaskEventOutcome::Completed {
            task_id: 2,
            rewards: template.rewards.clone()
        }
    );

    let record = book.snapshot(8).unwrap();
    assert_eq!(record.current_task_id(), None);
    assert_eq!(record.kill_count(), 0);
    assert_eq!(record.daily_accepted_count(), 1);
}
