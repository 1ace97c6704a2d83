use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskStatus, UpdateTaskData};

/// The live, ordered task list for the open day.
///
/// Ids are unique within the cache. Insertion order is the default display
/// order and is what gets persisted as `position`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentDayCache {
    tasks: Vec<Task>,
}

impl CurrentDayCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, data: NewTaskData) -> Task {
        let mut id = Task::generate_id();
        while self.get(&id).is_some() {
            id = Task::generate_id();
        }

        let task = Task {
            id,
            title: data.title,
            status: data.status,
            task_type: data.task_type,
            priority: data.priority,
        };
        self.tasks.push(task.clone());
        task
    }

    pub fn update_fields(&mut self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError> {
        let task = self.find_mut(id)?;
        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(task_type) = data.task_type {
            task.task_type = task_type;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        Ok(task.clone())
    }

    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<Task, CoreError> {
        let task = self.find_mut(id)?;
        task.status = status;
        Ok(task.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Task, CoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))?;
        Ok(self.tasks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task, CoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))
    }
}

fn task_not_found(id: &str) -> CoreError {
    CoreError::NotFound(format!("Task not found: {id}"))
}
