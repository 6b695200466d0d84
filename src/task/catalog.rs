//! Task Catalog
//!
//! Immutable registry of disciple task templates. Built once at startup,
//! either from the builtin definition list or from a TOML file, and only
//! read afterwards.

use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::definition::{ItemReward, RawTaskFile, TaskTemplate, TaskTier};
use super::error::TaskError;

/// Name of the task definition file inside the data directory
pub const TASKS_FILE: &str = "tasks.toml";

/// Registry for all task templates
#[derive(Debug, Clone)]
pub struct TaskCatalog {
    /// Templates in definition order
    templates: Vec<TaskTemplate>,
    /// Task id -> index into `templates`
    index: HashMap<u32, usize>,
}

impl TaskCatalog {
    /// Build a catalog from templates, rejecting duplicate ids
    pub fn from_templates(templates: Vec<TaskTemplate>) -> Result<Self, String> {
        let mut index = HashMap::with_capacity(templates.len());

        for (i, template) in templates.iter().enumerate() {
            if index.insert(template.id, i).is_some() {
                warn!("Duplicate task id {} in task definitions", template.id);
                return Err(format!("Duplicate task id {}", template.id));
            }
        }

        Ok(Self { templates, index })
    }

    /// The fixed definition list the server ships with
    pub fn builtin() -> Self {
        use TaskTier::{Easy, Hard, Normal};

        // (id, tier, mob, map, kills, rewards)
        let defs: [(u32, TaskTier, u32, u32, u32, &[(u32, u32)]); 9] = [
            (1, Easy, 1, 1, 10, &[(1519, 1)]),
            (2, Easy, 2, 1, 15, &[(1519, 2)]),
            (3, Easy, 3, 2, 20, &[(1519, 2), (1001, 5)]),
            (4, Normal, 11, 3, 25, &[(1520, 1), (1001, 10)]),
            (5, Normal, 12, 3, 30, &[(1520, 2)]),
            (6, Normal, 13, 4, 40, &[(1520, 2), (1002, 5)]),
            (7, Hard, 21, 5, 50, &[(1521, 1), (1002, 10)]),
            (8, Hard, 22, 6, 60, &[(1521, 2)]),
            (9, Hard, 23, 6, 80, &[(1521, 3), (1530, 1)]),
        ];

        let templates = defs
            .iter()
            .map(|&(id, tier, mob, map, kills, rewards)| TaskTemplate {
                id,
                tier,
                target_mob_id: mob,
                target_map_id: map,
                kill_target: kills,
                rewards: rewards
                    .iter()
                    .map(|&(item_id, quantity)| ItemReward::new(item_id, quantity))
                    .collect(),
            })
            .collect::<Vec<_>>();

        let index = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();

        Self { templates, index }
    }

    /// Load a catalog from a TOML file of `[[task]]` tables
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;

        let raw: RawTaskFile = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse {:?}: {}", path, e))?;

        if raw.tasks.is_empty() {
            warn!("Task file {:?} defines no tasks", path);
        }

        let templates = raw
            .tasks
            .iter()
            .map(TaskTemplate::from_raw)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                warn!("Invalid task definition in {:?}: {}", path, e);
                format!("{:?}: {}", path, e)
            })?;

        let catalog = Self::from_templates(templates)
            .map_err(|e| format!("{:?}: {}", path, e))?;

        info!("Loaded {} task definitions from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Load `tasks.toml` from the data directory, or fall back to the builtin list
    pub fn load_or_builtin(data_dir: &Path) -> Result<Self, String> {
        let path = data_dir.join(TASKS_FILE);

        if !path.exists() {
            info!("No task file at {:?}, using builtin task list", path);
            return Ok(Self::builtin());
        }

        Self::load_from_file(&path)
    }

    /// Every template in definition order
    pub fn list_all(&self) -> Vec<TaskTemplate> {
        self.templates.clone()
    }

    /// Templates of one tier, preserving definition order
    pub fn list_by_tier(&self, tier: TaskTier) -> Vec<TaskTemplate> {
        self.templates
            .iter()
            .filter(|t| t.tier == tier)
            .cloned()
            .collect()
    }

    /// Get a template by ID
    pub fn get(&self, id: u32) -> Result<&TaskTemplate, TaskError> {
        self.index
            .get(&id)
            .map(|&i| &self.templates[i])
            .ok_or(TaskError::TaskNotFound(id))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Get the number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_lookup_and_tiers() {
        let catalog = TaskCatalog::builtin();
        assert_eq!(catalog.len(), 9);

        for template in catalog.list_all() {
            assert_eq!(catalog.get(template.id).unwrap(), &template);
            assert!(catalog.list_by_tier(template.tier).contains(&template));
            assert!(template.kill_target > 0);
        }

        let first = catalog.get(1).unwrap();
        assert_eq!(first.tier, TaskTier::Easy);
        assert_eq!(first.target_mob_id, 1);
        assert_eq!(first.target_map_id, 1);
        assert_eq!(first.kill_target, 10);
        assert_eq!(first.rewards, vec![ItemReward::new(1519, 1)]);
    }

    #[test]
    fn test_list_by_tier_keeps_order() {
        let catalog = TaskCatalog::builtin();
        let hard: Vec<u32> = catalog
            .list_by_tier(TaskTier::Hard)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(hard, vec![7, 8, 9]);
    }

    #[test]
    fn test_builtin_passes_validation() {
        let catalog = TaskCatalog::builtin();

        for t in catalog.list_all() {
            let rebuilt = TaskTemplate::new(
                t.id,
                t.tier,
                t.target_mob_id,
                t.target_map_id,
                t.kill_target,
                t.rewards.clone(),
            );
            assert_eq!(rebuilt, Ok(t));
        }

        let rebuilt = TaskCatalog::from_templates(catalog.list_all()).unwrap();
        assert_eq!(rebuilt.len(), catalog.len());
    }

    #[test]
    fn test_unknown_id() {
        let catalog = TaskCatalog::builtin();
        assert_eq!(catalog.get(999), Err(TaskError::TaskNotFound(999)));
        assert!(!catalog.contains(0));
    }

    #[test]
    fn test_list_all_is_a_copy() {
        let catalog = TaskCatalog::builtin();
        let mut listed = catalog.list_all();
        listed[0].kill_target = 1;
        listed.clear();
        assert_eq!(catalog.get(1).unwrap().kill_target, 10);
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let a = TaskTemplate::new(1, TaskTier::Easy, 1, 1, 5, vec![]).unwrap();
        let b = TaskTemplate::new(1, TaskTier::Hard, 2, 2, 5, vec![]).unwrap();
        assert!(TaskCatalog::from_templates(vec![a, b]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(TASKS_FILE),
            r#"
[[task]]
id = 100
tier = "hard"
mob_id = 40
map_id = 9
kill_target = 5

[[task.rewards]]
item_id = 3000
quantity = 2

[[task.rewards]]
item_id = 3001

[[task]]
id = 101
tier = "easy"
mob_id = 41
map_id = 9
kill_target = 3
"#,
        )
        .unwrap();

        let catalog = TaskCatalog::load_or_builtin(temp_dir.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let task = catalog.get(100).unwrap();
        assert_eq!(task.tier, TaskTier::Hard);
        assert_eq!(
            task.rewards,
            vec![ItemReward::new(3000, 2), ItemReward::new(3001, 1)]
        );
        assert_eq!(catalog.list_by_tier(TaskTier::Easy)[0].id, 101);
    }

    #[test]
    fn test_load_rejects_bad_tier() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(TASKS_FILE);
        std::fs::write(
            &path,
            r#"
[[task]]
id = 1
tier = "legendary"
mob_id = 1
map_id = 1
kill_target = 5
"#,
        )
        .unwrap();

        let err = TaskCatalog::load_from_file(&path).unwrap_err();
        assert!(err.contains("legendary"));
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = TaskCatalog::load_or_builtin(temp_dir.path()).unwrap();
        assert_eq!(catalog.len(), TaskCatalog::builtin().len());
    }
}
