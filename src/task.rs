use std::fmt;

use crate::error::{Result, TaskError};

/// Separator used when a task is shown to the user.
pub const DISPLAY_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: String,
    description: String,
    deadline: String,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(TaskError::EmptyId);
        }
        Ok(Self {
            id,
            description: description.into(),
            deadline: deadline.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> &str {
        &self.deadline
    }

    /// The save-file line for this task, without the trailing newline.
    pub fn to_record(&self, divider: char) -> String {
        format!(
            "{}{divider}{}{divider}{}",
            self.id, self.description, self.deadline
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DISPLAY_SEPARATOR}{}{DISPLAY_SEPARATOR}{}",
            self.id, self.description, self.deadline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_pipe_separator() {
        let task = Task::new("abc", "buy milk", "friday").unwrap();
        assert_eq!(task.to_string(), "abc | buy milk | friday");
    }

    #[test]
    fn test_record_uses_divider() {
        let task = Task::new("abc", "buy milk", "friday").unwrap();
        assert_eq!(task.to_record('¤'), "abc¤buy milk¤friday");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(matches!(
            Task::new("", "buy milk", "friday"),
            Err(TaskError::EmptyId)
        ));
    }

    #[test]
    fn test_empty_description_and_deadline_allowed() {
        let task = Task::new("abc", "", "").unwrap();
        assert_eq!(task.description(), "");
        assert_eq!(task.deadline(), "");
        assert_eq!(task.id(), "abc");
    }
}
