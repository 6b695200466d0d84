use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use disciple_tasks::task::{describe_task, NameTable};
use disciple_tasks::{TaskBook, TaskCatalog, TaskConfig, TaskTier, MAX_DAILY_TASKS};

/// Loads the task catalog the way the game server does at startup and logs
/// the resulting task board, so data files can be checked before deploy.
fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Logging isn't up yet, so config errors go straight to stderr
    let config = match TaskConfig::load(Path::new(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let clock = match config.reset_clock() {
        Ok(clock) => clock,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let catalog = match TaskCatalog::load_or_builtin(&config.data_dir) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            error!("Failed to load task catalog: {}", e);
            std::process::exit(1);
        }
    };

    let names = NameTable::load_from_directory(&config.data_dir).unwrap_or_else(|e| {
        error!("Failed to load names: {}", e);
        NameTable::new()
    });

    let book = TaskBook::new(Arc::clone(&catalog), clock);
    info!(
        "Task board for {} ({} tasks, {} accepts per day)",
        book.clock().today(Utc::now()),
        catalog.len(),
        MAX_DAILY_TASKS
    );

    for tier in TaskTier::ALL {
        let tasks = catalog.list_by_tier(tier);
        info!("{} tier: {} tasks", tier.display_name(), tasks.len());

        for template in &tasks {
            let rewards = template
                .rewards
                .iter()
                .map(|r| format!("{} x{}", r.item_id, r.quantity))
                .collect::<Vec<_>>()
                .join(", ");
            info!(
                "  #{} {} -> {}",
                template.id,
                describe_task(template, &names, &names),
                rewards
            );
        }
    }
}
