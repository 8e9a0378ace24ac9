use std::fmt;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TaskError};
use crate::id::generate_task_id;
use crate::store::{split_record, FileStore, DIVIDER};
use crate::task::Task;

const HEADER: &str = "[YOUR TASKS]";
const EMPTY_SENTINEL: &str = "Empty list";

/// In-memory task list mirrored to a flat save file.
///
/// Changes are written to disk first and only applied in memory once the
/// write has been committed, so a failed operation leaves both sides as
/// they were.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
    store: FileStore,
    skipped: Vec<String>,
}

impl TaskList {
    /// Load the save file named by `config`. A missing file gives an empty list.
    pub fn load(config: &Config) -> Result<Self> {
        Self::from_store(FileStore::new(config.tasks_file()))
    }

    /// An empty list backed by `store`, without reading it.
    pub fn new(store: FileStore) -> Self {
        Self {
            tasks: Vec::new(),
            store,
            skipped: Vec::new(),
        }
    }

    pub fn from_store(store: FileStore) -> Result<Self> {
        let mut list = Self::new(store);

        for line in list.store.read_lines()? {
            let parsed = split_record(&line)
                .and_then(|(id, description, deadline)| Task::new(id, description, deadline).ok());
            match parsed {
                Some(task) => list.insert(task),
                None => {
                    let line = String::from_utf8_lossy(&line).into_owned();
                    warn!(path = %list.store.path().display(), %line, "Skipping invalid task entry");
                    list.skipped.push(line);
                }
            }
        }

        debug!(
            count = list.tasks.len(),
            skipped = list.skipped.len(),
            "Loaded tasks"
        );
        Ok(list)
    }

    // Later duplicates overwrite earlier ones but keep the first position.
    fn insert(&mut self, task: Task) {
        match self.position(task.id()) {
            Some(index) => self.tasks[index] = task,
            None => self.tasks.push(task),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    /// Lines from the save file that could not be parsed during load.
    ///
    /// Lines that are not UTF-8 appear here lossily decoded; the save file
    /// itself keeps their original bytes.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add_task(&mut self, description: &str, deadline: &str) -> Result<&Task> {
        check_field("description", description)?;
        check_field("deadline", deadline)?;

        let id = generate_task_id(|candidate| self.get(candidate).is_some());
        let task = Task::new(id, description, deadline)?;

        let mut lines = self.store.read_lines()?;
        lines.push(task.to_record(DIVIDER).into_bytes());
        self.store.replace(&lines)?;

        debug!(id = task.id(), "Added task");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Remove the task with `id` from the save file and then from memory.
    ///
    /// Unparseable lines in the save file are carried over untouched.
    pub fn remove_task(&mut self, id: &str) -> Result<Task> {
        let id = id.trim();
        let index = self
            .position(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        let mut lines = self.store.read_lines()?;
        let before = lines.len();
        lines.retain(|line| !matches!(split_record(line), Some((line_id, _, _)) if line_id == id));
        if lines.len() == before {
            warn!(id, "Task missing from save file, leaving list unchanged");
            return Err(TaskError::NotFound(id.to_string()));
        }
        self.store.replace(&lines)?;

        debug!(id, "Removed task");
        Ok(self.tasks.remove(index))
    }

    pub fn render(&self) -> String {
        let mut out = format!("{HEADER}\n");
        if self.tasks.is_empty() {
            out.push_str(EMPTY_SENTINEL);
            out.push('\n');
        } else {
            for task in &self.tasks {
                out.push_str(&task.to_string());
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn check_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains(DIVIDER) {
        return Err(TaskError::ReservedDivider {
            field,
            divider: DIVIDER,
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(TaskError::LineBreak { field });
    }
    Ok(())
}
