use factgraph_core::TaskStatus;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const TASK_ID_LEN: usize = 8;
pub const DEFAULT_MAX_FINISHED: usize = 10_000;

/// In-memory task table, `task_id -> status`.
///
/// Tasks still `processing` are never dropped; once more than
/// `max_finished` tasks have settled, the oldest settled ones are evicted.
#[derive(Clone)]
pub struct TaskTable {
    inner: Arc<RwLock<Inner>>,
    max_finished: usize,
}

#[derive(Default)]
struct Inner {
    statuses: HashMap<String, TaskStatus>,
    finished: VecDeque<String>,
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::with_max_finished(DEFAULT_MAX_FINISHED)
    }
}

impl TaskTable {
    pub fn with_max_finished(max_finished: usize) -> Self {
        Self {
            inner: Arc::default(),
            max_finished,
        }
    }

    /// Registers a fresh task in `processing` and returns its id.
    pub async fn create(&self) -> String {
        let mut inner = self.inner.write().await;
        loop {
            let id = short_id(TASK_ID_LEN);
            if !inner.statuses.contains_key(&id) {
                inner.statuses.insert(id.clone(), TaskStatus::Processing);
                return id;
            }
        }
    }

    pub async fn set(&self, task_id: &str, status: TaskStatus) {
        let mut inner = self.inner.write().await;
        let was_finished = inner
            .statuses
            .insert(task_id.to_string(), status)
            .is_some_and(TaskStatus::is_terminal);
        if status.is_terminal() && !was_finished {
            inner.finished.push_back(task_id.to_string());
            while inner.finished.len() > self.max_finished {
                let Some(old) = inner.finished.pop_front() else {
                    break;
                };
                if inner.statuses.get(&old).is_some_and(|s| s.is_terminal()) {
                    inner.statuses.remove(&old);
                }
            }
        }
    }

    pub async fn get(&self, task_id: &str) -> Option<TaskStatus> {
        self.inner.read().await.statuses.get(task_id).copied()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.statuses.len()
    }
}

/// Leading `len` hex digits of a v4 UUID.
pub fn short_id(len: usize) -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ids_are_hex() {
        let id = short_id(TASK_ID_LEN);
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn create_then_update() {
        let table = TaskTable::default();
        let id = table.create().await;
        assert_eq!(table.get(&id).await, Some(TaskStatus::Processing));
        table.set(&id, TaskStatus::Done).await;
        assert_eq!(table.get(&id).await, Some(TaskStatus::Done));
        assert_eq!(table.get("missing").await, None);
        assert_eq!(table.len().await, 1);
    }

    #[tokio::test]
    async fn oldest_finished_tasks_are_evicted() {
        let table = TaskTable::with_max_finished(2);
        let running = table.create().await;
        let a = table.create().await;
        let b = table.create().await;
        let c = table.create().await;

        table.set(&a, TaskStatus::Done).await;
        table.set(&b, TaskStatus::Error).await;
        // A repeated terminal update does not count twice.
        table.set(&b, TaskStatus::Error).await;
        assert_eq!(table.len().await, 4);

        table.set(&c, TaskStatus::Done).await;
        assert_eq!(table.get(&a).await, None);
        assert_eq!(table.get(&b).await, Some(TaskStatus::Error));
        assert_eq!(table.get(&c).await, Some(TaskStatus::Done));
        assert_eq!(table.get(&running).await, Some(TaskStatus::Processing));
        assert_eq!(table.len().await, 3);
    }
}
