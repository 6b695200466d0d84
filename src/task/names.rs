//! Mob and map name lookup for task descriptions.
//!
//! The real registries live elsewhere in the server; these traits are the
//! seam. A missing name renders as a placeholder and never fails task logic.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::definition::TaskTemplate;

/// Name of the mob/map name file inside the data directory
pub const NAMES_FILE: &str = "names.toml";

pub trait MobNames {
    fn mob_name(&self, mob_id: u32) -> Option<String>;
}

pub trait MapNames {
    fn map_name(&self, map_id: u32) -> Option<String>;
}

pub fn mob_name_or_placeholder(mobs: &impl MobNames, mob_id: u32) -> String {
    mobs.mob_name(mob_id)
        .unwrap_or_else(|| format!("Mob {}", mob_id))
}

pub fn map_name_or_placeholder(maps: &impl MapNames, map_id: u32) -> String {
    maps.map_name(map_id)
        .unwrap_or_else(|| format!("Map {}", map_id))
}

/// One-line description for a task board.
///
/// e.g. `[Easy] Slay 10 x Forest Wolf in Greenwood Vale`
pub fn describe_task(
    template: &TaskTemplate,
    mobs: &impl MobNames,
    maps: &impl MapNames,
) -> String {
    format!(
        "[{}] Slay {} x {} in {}",
        template.tier.display_name(),
        template.kill_target,
        mob_name_or_placeholder(mobs, template.target_mob_id),
        map_name_or_placeholder(maps, template.target_map_id),
    )
}

/// Progress line for an active task, e.g. `Forest Wolf 3/10`
pub fn describe_progress(
    template: &TaskTemplate,
    kill_count: u32,
    mobs: &impl MobNames,
) -> String {
    format!(
        "{} {}/{}",
        mob_name_or_placeholder(mobs, template.target_mob_id),
        kill_count.min(template.kill_target),
        template.kill_target,
    )
}

#[derive(Debug, Default, Deserialize)]
struct RawNameFile {
    #[serde(default)]
    mobs: HashMap<String, String>,
    #[serde(default)]
    maps: HashMap<String, String>,
}

/// Table-backed names, loaded from TOML for tooling and tests
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    mobs: HashMap<u32, String>,
    maps: HashMap<u32, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mob(mut self, mob_id: u32, name: &str) -> Self {
        self.mobs.insert(mob_id, name.to_string());
        self
    }

    pub fn with_map(mut self, map_id: u32, name: &str) -> Self {
        self.maps.insert(map_id, name.to_string());
        self
    }

    /// Parse `[mobs]` and `[maps]` tables keyed by numeric id
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let raw: RawNameFile = toml::from_str(content)
            .map_err(|e| format!("Failed to parse names: {}", e))?;

        Ok(Self {
            mobs: parse_id_keys(raw.mobs, "mob")?,
            maps: parse_id_keys(raw.maps, "map")?,
        })
    }

    /// Load `names.toml` from the data directory; missing file yields an empty table
    pub fn load_from_directory(data_dir: &Path) -> Result<Self, String> {
        let path = data_dir.join(NAMES_FILE);

        if !path.exists() {
            warn!("Names file does not exist: {:?}", path);
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        let table = Self::from_toml_str(&content)
            .map_err(|e| format!("{:?}: {}", path, e))?;

        info!(
            "Loaded {} mob names and {} map names",
            table.mobs.len(),
            table.maps.len()
        );
        Ok(table)
    }
}

fn parse_id_keys(
    raw: HashMap<String, String>,
    kind: &str,
) -> Result<HashMap<u32, String>, String> {
    raw.into_iter()
        .map(|(key, name)| {
            key.parse::<u32>()
                .map(|id| (id, name))
                .map_err(|_| format!("Invalid {} id '{}'", kind, key))
        })
        .collect()
}

impl MobNames for NameTable {
    fn mob_name(&self, mob_id: u32) -> Option<String> {
        self.mobs.get(&mob_id).cloned()
    }
}

impl MapNames for NameTable {
    fn map_name(&self, map_id: u32) -> Option<String> {
        self.maps.get(&map_id).cloned()
    }
}
