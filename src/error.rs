//! Error types for the task list.

/// Errors reported back to the menu loop by task list operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A user-supplied field contains the save-file divider.
    #[error("may not use '{divider}' in task {field}, it is used as a divider in the save file")]
    ReservedDivider {
        /// Which field was rejected.
        field: &'static str,
        /// The reserved character.
        divider: char,
    },

    /// A user-supplied field spans more than one line.
    #[error("task {field} may not contain line breaks")]
    LineBreak {
        /// Which field was rejected.
        field: &'static str,
    },

    /// A task was constructed without an id.
    #[error("task id may not be empty")]
    EmptyId,

    /// No task with this id exists.
    #[error("no task with id '{0}'")]
    NotFound(String),

    /// Reading or writing the save file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Swapping the rewritten save file into place failed.
    #[error("could not replace save file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A specialized Result type for task list operations.
pub type Result<T> = std::result::Result<T, TaskError>;
