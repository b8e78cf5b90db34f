//! Seed dataset loading.
//!
//! The default dataset is compiled in; a file given by config replaces it.
//! Either source is read once, at startup.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::{Result, TaskError};
use crate::store::TaskStore;
use crate::task::Task;
use crate::validation::check_task_body;

/// Dataset used when no seed file is configured.
pub const DEFAULT_SEED: &str = include_str!("../data/tasks.json");

#[derive(Debug, Deserialize)]
struct SeedFile<T> {
    tasks: Vec<T>,
}

/// Parse a `{"tasks": [...]}` document into task records.
pub fn parse_seed(json: &str) -> Result<Vec<Task>> {
    let file: SeedFile<Task> = serde_json::from_str(json)?;
    Ok(file.tasks)
}

/// Build the startup store from `path`, or from [`DEFAULT_SEED`] when `None`.
pub fn load_store(path: Option<&Path>) -> Result<TaskStore> {
    let records = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let records = parse_seed(&json)?;
            info!("Loaded {} seed tasks from {}", records.len(), path.display());
            records
        }
        None => {
            let records = parse_seed(DEFAULT_SEED)?;
            info!("Loaded {} seed tasks from embedded dataset", records.len());
            records
        }
    };
    TaskStore::from_seed(records)
}

/// A problem found in one seed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedProblem {
    /// Position of the record in the `tasks` array.
    pub index: usize,
    pub id: Option<u64>,
    pub message: String,
}

/// Check every record of a seed document against the task body schema and
/// the identity rules. An empty result means the document is loadable.
pub fn check_seed(json: &str) -> Result<Vec<SeedProblem>> {
    let file: SeedFile<Value> = serde_json::from_str(json)
        .map_err(|e| TaskError::Seed(format!("seed document is not a task list: {e}")))?;

    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in file.tasks.iter().enumerate() {
        let id = record.get("id").and_then(Value::as_u64);
        match id {
            Some(0) | None => problems.push(SeedProblem {
                index,
                id,
                message: "id must be a positive integer".to_string(),
            }),
            Some(u64::MAX) => problems.push(SeedProblem {
                index,
                id,
                message: format!("seed id {} leaves no room for new ids", u64::MAX),
            }),
            Some(n) if !seen.insert(n) => problems.push(SeedProblem {
                index,
                id,
                message: format!("duplicate id {n}"),
            }),
            Some(_) => {}
        }

        for error in check_task_body(record).errors {
            problems.push(SeedProblem {
                index,
                id,
                message: format!("{}: {}", error.path, error.message),
            });
        }
    }

    Ok(problems)
}
