use crate::pipeline::Verifier;
use crate::tasks::TaskTable;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskTable,
    pub verifier: Arc<dyn Verifier>,
}

impl AppState {
    pub fn new(verifier: Arc<dyn Verifier>) -> Self {
        Self {
            tasks: TaskTable::default(),
            verifier,
        }
    }

    pub fn with_tasks(mut self, tasks: TaskTable) -> Self {
        self.tasks = tasks;
        self
    }
}
