//! Task Definition Structures
//!
//! Raw structures deserialized from TOML task files, plus the resolved
//! templates held by the catalog.

use serde::{Deserialize, Serialize};

/// Raw task file as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawTaskFile {
    #[serde(default, rename = "task")]
    pub tasks: Vec<RawTask>,
}

/// Raw task data as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    pub id: u32,
    pub tier: String,
    pub mob_id: u32,
    pub map_id: u32,
    pub kill_target: u32,
    #[serde(default)]
    pub rewards: Vec<RawItemReward>,
}

/// Item reward entry
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemReward {
    pub item_id: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

// ============================================================================
// Resolved Task Structures (after parsing)
// ============================================================================

/// Difficulty tier of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskTier {
    Easy,
    Normal,
    Hard,
}

impl TaskTier {
    pub const ALL: [TaskTier; 3] = [TaskTier::Easy, TaskTier::Normal, TaskTier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskTier::Easy => "easy",
            TaskTier::Normal => "normal",
            TaskTier::Hard => "hard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TaskTier::Easy => "Easy",
            TaskTier::Normal => "Normal",
            TaskTier::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(TaskTier::Easy),
            "normal" | "medium" => Some(TaskTier::Normal),
            "hard" => Some(TaskTier::Hard),
            _ => None,
        }
    }
}

/// A single item handed out when a task is turned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReward {
    pub item_id: u32,
    pub quantity: u32,
}

impl ItemReward {
    pub fn new(item_id: u32, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// A resolved kill-task template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTemplate {
    pub id: u32,
    pub tier: TaskTier,
    /// Key into the mob name registry
    pub target_mob_id: u32,
    /// Key into the map name registry
    pub target_map_id: u32,
    /// Kills required before the task can be turned in
    pub kill_target: u32,
    /// Rewards in display order
    pub rewards: Vec<ItemReward>,
}

impl TaskTemplate {
    /// Build a template, rejecting values the progress tracker can't work with
    pub fn new(
        id: u32,
        tier: TaskTier,
        target_mob_id: u32,
        target_map_id: u32,
        kill_target: u32,
        rewards: Vec<ItemReward>,
    ) -> Result<Self, String> {
        if id == 0 {
            return Err("Task id 0 is reserved for 'no active task'".to_string());
        }
        if kill_target == 0 {
            return Err(format!("Task {} has a kill target of 0", id));
        }
        if let Some(bad) = rewards.iter().find(|r| r.quantity == 0) {
            return Err(format!(
                "Task {} rewards item {} with quantity 0",
                id, bad.item_id
            ));
        }

        Ok(Self {
            id,
            tier,
            target_mob_id,
            target_map_id,
            kill_target,
            rewards,
        })
    }

    /// Create a TaskTemplate from raw TOML data
    pub fn from_raw(raw: &RawTask) -> Result<Self, String> {
        let tier = TaskTier::from_str(&raw.tier)
            .ok_or_else(|| format!("Invalid tier '{}' for task {}", raw.tier, raw.id))?;

        Self::new(
            raw.id,
            tier,
            raw.mob_id,
            raw.map_id,
            raw.kill_target,
            raw.rewards
                .iter()
                .map(|r| ItemReward::new(r.item_id, r.quantity))
                .collect(),
        )
    }
}
