use std::sync::Arc;

use tokio::sync::RwLock;

use taskhub_core::TaskStore;

pub type SharedStore = Arc<RwLock<TaskStore>>;

pub struct AppState {
    /// Sole owner of the task collection. Mutations hold the write lock for
    /// one store call; validation always finishes before the lock is taken.
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
