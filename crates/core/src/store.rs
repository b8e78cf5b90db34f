//! [`TaskStore`] — the in-memory, insertion-ordered task collection.
//!
//! Ids come from a monotonically increasing counter seeded past the largest
//! seed id, so an id is never handed out twice even after deletions.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, TaskError};
use crate::task::{Priority, Task, TaskDraft};

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store from seed records, keeping their ids and order.
    ///
    /// Fails if two records share an id, a record uses id 0, or the largest
    /// id leaves no room for new ids.
    pub fn from_seed(records: Vec<Task>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for task in &records {
            if task.id == 0 {
                return Err(TaskError::Seed(format!(
                    "task '{}' has id 0; ids must be positive",
                    task.title
                )));
            }
            if !seen.insert(task.id) {
                return Err(TaskError::Seed(format!("duplicate task id {}", task.id)));
            }
        }

        let largest = records.iter().map(|t| t.id).max().unwrap_or(0);
        let next_id = largest.checked_add(1).ok_or_else(|| {
            TaskError::Seed(format!("seed id {largest} leaves no room for new ids"))
        })?;
        Ok(Self {
            tasks: records,
            next_id,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Insert a new task stamped with the current time.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        self.create_at(draft, now_millis())
    }

    /// `u64::MAX` is never handed out; the counter must always have a successor.
    pub(crate) fn create_at(&mut self, draft: TaskDraft, created_at: i64) -> Result<Task> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(TaskError::IdsExhausted)?;

        let task = draft.into_task(id, Some(created_at));
        self.tasks.push(task.clone());
        debug!(id, "task inserted");
        Ok(task)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks, ordered by creation time.
    pub fn list(&self) -> Vec<Task> {
        sorted_by_creation(self.tasks.iter())
    }

    /// Tasks whose `completed` flag equals `completed`, ordered by creation time.
    pub fn filter_by_completed(&self, completed: bool) -> Vec<Task> {
        sorted_by_creation(self.tasks.iter().filter(|t| t.completed == completed))
    }

    /// Tasks at the given priority, in store order.
    pub fn filter_by_priority(&self, priority: Priority) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.priority == priority)
            .cloned()
            .collect()
    }

    /// Replace every user field of task `id`. Identity and creation time are kept.
    pub fn replace(&mut self, id: u64, draft: TaskDraft) -> Option<Task> {
        let slot = self.tasks.iter_mut().find(|t| t.id == id)?;
        let replaced = draft.into_task(slot.id, slot.created_at);
        *slot = replaced.clone();
        debug!(id, "task replaced");
        Some(replaced)
    }

    /// Remove task `id`. Returns `false` if no such task exists.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.tasks.remove(idx);
                debug!(id, "task removed");
                true
            }
            None => false,
        }
    }
}

/// Stable sort by `created_at`. Records without a timestamp sort first and
/// keep their relative order.
fn sorted_by_creation<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.cloned().collect();
    out.sort_by_key(|t| t.created_at);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_task(id: u64, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            completed,
            priority: Priority::Low,
            created_at: None,
        }
    }

    fn seeded() -> TaskStore {
        TaskStore::from_seed(vec![
            seed_task(1, "one", true),
            seed_task(2, "two", false),
            seed_task(3, "three", false),
        ])
        .unwrap()
    }

    #[test]
    fn create_assigns_next_id_and_timestamp() {
        let mut store = seeded();
        let task = store.create(TaskDraft::new("T", "D", false)).unwrap();
        assert_eq!(task.id, 4);
        assert!(task.created_at.is_some());
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(store.find_by_id(4), Some(&task));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn ids_stay_unique_after_deletion() {
        let mut store = seeded();
        assert!(store.remove(2));

        let a = store.create(TaskDraft::new("a", "a", false)).unwrap();
        let b = store.create(TaskDraft::new("b", "b", false)).unwrap();
        assert_ne!(a.id, b.id);

        let mut ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
        assert!(store.find_by_id(2).is_none());
    }

    #[test]
    fn deleting_the_newest_task_does_not_recycle_its_id() {
        let mut store = TaskStore::new();
        let first = store.create(TaskDraft::new("a", "a", false)).unwrap();
        assert!(store.remove(first.id));
        let second = store.create(TaskDraft::new("b", "b", false)).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn list_sorts_by_creation_keeping_untimed_seed_first() {
        let mut store = seeded();
        let late = store.create_at(TaskDraft::new("late", "l", false), 2_000).unwrap();
        let early = store.create_at(TaskDraft::new("early", "e", true), 1_000).unwrap();

        let ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, early.id, late.id]);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let mut store = TaskStore::new();
        let a = store.create_at(TaskDraft::new("a", "a", false), 500).unwrap();
        let b = store.create_at(TaskDraft::new("b", "b", false), 500).unwrap();
        let ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn filter_by_completed_is_exact_and_sorted() {
        let mut store = seeded();
        let newer = store.create_at(TaskDraft::new("n", "n", true), 9_000).unwrap();
        let older = store.create_at(TaskDraft::new("o", "o", true), 1_000).unwrap();

        let done = store.filter_by_completed(true);
        let ids: Vec<u64> = done.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, older.id, newer.id]);
        assert!(store.filter_by_completed(false).iter().all(|t| !t.completed));
    }

    #[test]
    fn filter_by_priority_keeps_store_order() {
        let mut store = seeded();
        let high = store
            .create(TaskDraft::new("h", "h", false).with_priority(Priority::High))
            .unwrap();
        assert_eq!(store.filter_by_priority(Priority::High), vec![high]);
        assert_eq!(store.filter_by_priority(Priority::Low).len(), 3);
        assert!(store.filter_by_priority(Priority::Medium).is_empty());
    }

    #[test]
    fn replace_preserves_identity_and_creation_time() {
        let mut store = TaskStore::new();
        let original = store
            .create_at(
                TaskDraft::new("a", "a", false).with_priority(Priority::High),
                1_234,
            )
            .unwrap();

        let updated = store
            .replace(original.id, TaskDraft::new("b", "b", true))
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, Some(1_234));
        assert_eq!(updated.title, "b");
        assert!(updated.completed);
        // Full replace: omitted priority falls back to the default.
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(store.find_by_id(original.id), Some(&updated));
    }

    #[test]
    fn replace_and_remove_report_unknown_ids() {
        let mut store = seeded();
        assert!(store.replace(99, TaskDraft::new("x", "x", false)).is_none());
        assert!(!store.remove(99));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn from_seed_rejects_duplicate_ids() {
        let err = TaskStore::from_seed(vec![seed_task(1, "a", false), seed_task(1, "b", true)])
            .unwrap_err();
        assert!(matches!(err, TaskError::Seed(_)));
    }

    #[test]
    fn from_seed_rejects_zero_id() {
        assert!(TaskStore::from_seed(vec![seed_task(0, "zero", false)]).is_err());
    }

    #[test]
    fn next_id_follows_largest_seed_id() {
        let mut store =
            TaskStore::from_seed(vec![seed_task(10, "a", false), seed_task(4, "b", false)])
                .unwrap();
        assert_eq!(store.create(TaskDraft::new("c", "c", false)).unwrap().id, 11);
    }

    #[test]
    fn from_seed_rejects_id_at_u64_max() {
        let err = TaskStore::from_seed(vec![seed_task(u64::MAX, "last", false)]).unwrap_err();
        match err {
            TaskError::Seed(message) => assert_eq!(
                message,
                format!("seed id {} leaves no room for new ids", u64::MAX)
            ),
            other => panic!("expected seed error, got {other:?}"),
        }
    }

    #[test]
    fn create_refuses_once_the_id_space_is_spent() {
        let mut store = TaskStore::from_seed(vec![seed_task(u64::MAX - 1, "a", false)]).unwrap();
        let err = store.create(TaskDraft::new("b", "b", false)).unwrap_err();
        assert!(matches!(err, TaskError::IdsExhausted));
        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(u64::MAX).is_none());
    }
}
