use std::path::{Path, PathBuf};

/// Name of the save file inside the data directory.
pub const FILE_NAME: &str = "tasks.txt";

/// Setting this variable turns on debug logging to stderr.
pub const DEBUG_ENV_VAR: &str = "TASKLIST_DEBUG";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(FILE_NAME)
    }

    /// Diagnostics only: turns on stderr logging and changes nothing else.
    pub fn debug_logging() -> bool {
        std::env::var_os(DEBUG_ENV_VAR).is_some()
    }
}
