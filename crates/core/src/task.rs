//! Task record, priority levels and the validated input a mutation carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Task importance. Absent priorities default to [`Priority::Low`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Message used wherever a value outside the enum is rejected.
    pub fn membership_message() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
        format!("Priority must be one of {}", names.join(", "))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TaskError::validation(Self::membership_message()))
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Epoch milliseconds. Seed records carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Validated user-supplied fields of a task. Identity and creation time are
/// never part of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed,
            priority: Priority::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn into_task(self, id: u64, created_at: Option<i64>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            priority: self.priority,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_only_enum_members() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);

        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "Priority must be one of low, medium, high");
        assert!("HIGH".parse::<Priority>().is_err());
    }

    #[test]
    fn seed_shaped_record_defaults_priority_and_omits_created_at() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"title":"Set up environment","description":"Install git","completed":true}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.created_at, None);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "low");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn created_at_serializes_camel_case() {
        let task = TaskDraft::new("T", "D", false)
            .with_priority(Priority::High)
            .into_task(7, Some(1_700_000_000_000));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert_eq!(json["priority"], "high");
        assert_eq!(json["id"], 7);
    }
}
