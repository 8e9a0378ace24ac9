//! Flat-file persistence for the task list.
//!
//! One record per line, fields joined by [`DIVIDER`]. Every change goes
//! through [`FileStore::replace`], which writes the full contents to a temp
//! file in the same directory and renames it over the save file, so readers
//! only ever see the old file or the new one.
//!
//! Lines are handled as raw bytes so that a line which is not valid UTF-8
//! can be skipped on load and still written back unchanged.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// Field divider inside the save file.
pub const DIVIDER: char = '¤';

/// Split a raw save-file line into its three fields.
///
/// Returns `None` when the line is not UTF-8 or does not hold exactly three
/// fields.
pub fn split_record(line: &[u8]) -> Option<(&str, &str, &str)> {
    let line = std::str::from_utf8(line).ok()?;
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.split(DIVIDER);
    let record = (fields.next()?, fields.next()?, fields.next()?);
    match fields.next() {
        Some(_) => None,
        None => Some(record),
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines currently in the save file, without their `\n`.
    /// A missing file reads as empty.
    pub fn read_lines(&self) -> Result<Vec<Vec<u8>>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let mut lines: Vec<Vec<u8>> = content.split(|b| *b == b'\n').map(<[u8]>::to_vec).collect();
        if content.ends_with(b"\n") {
            lines.pop();
        }
        Ok(lines)
    }

    /// Atomically replace the save file with `lines`.
    pub fn replace(&self, lines: &[Vec<u8>]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let file = temp.as_file_mut();
            for line in lines {
                file.write_all(line)?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
        }
        temp.persist(&self.path)?;
        debug!(path = %self.path.display(), lines = lines.len(), "Committed save file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<Vec<u8>> {
        items.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split_record("a¤b¤c".as_bytes()), Some(("a", "b", "c")));
        assert_eq!(split_record("a¤b¤c\r\n".as_bytes()), Some(("a", "b", "c")));
        assert_eq!(split_record("a¤¤".as_bytes()), Some(("a", "", "")));
        assert_eq!(split_record("a¤b".as_bytes()), None);
        assert_eq!(split_record("a¤b¤c¤d".as_bytes()), None);
        assert_eq!(split_record(b""), None);
    }

    #[test]
    fn test_split_record_rejects_invalid_utf8() {
        // Latin-1 encoded "a¤b¤c"
        assert_eq!(split_record(b"a\xa4b\xa4c"), None);
    }

    #[test]
    fn test_missing_file_reads_empty() -> Result<()> {
        let temp = TempDir::new()?;
        let store = FileStore::new(temp.path().join("tasks.txt"));
        assert!(store.read_lines()?.is_empty());
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn test_replace_then_read() -> Result<()> {
        let temp = TempDir::new()?;
        let store = FileStore::new(temp.path().join("tasks.txt"));

        store.replace(&lines(&["one", "two"]))?;
        assert_eq!(fs::read_to_string(store.path())?, "one\ntwo\n");
        assert_eq!(store.read_lines()?, lines(&["one", "two"]));

        store.replace(&[])?;
        assert_eq!(fs::read_to_string(store.path())?, "");
        assert!(store.read_lines()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_keeps_last_line_without_newline() -> Result<()> {
        let temp = TempDir::new()?;
        let store = FileStore::new(temp.path().join("tasks.txt"));
        fs::write(store.path(), "one\n\ntwo")?;

        assert_eq!(store.read_lines()?, lines(&["one", "", "two"]));
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_round_trips_verbatim() -> Result<()> {
        let temp = TempDir::new()?;
        let store = FileStore::new(temp.path().join("tasks.txt"));
        fs::write(store.path(), b"a\xa4b\xa4c\nok\n")?;

        let read = store.read_lines()?;
        assert_eq!(read, vec![b"a\xa4b\xa4c".to_vec(), b"ok".to_vec()]);
        store.replace(&read)?;
        assert_eq!(fs::read(store.path())?, b"a\xa4b\xa4c\nok\n");
        Ok(())
    }

    #[test]
    fn test_replace_leaves_no_temp_files() -> Result<()> {
        let temp = TempDir::new()?;
        let store = FileStore::new(temp.path().join("tasks.txt"));
        store.replace(&lines(&["one"]))?;

        let entries: Vec<_> = fs::read_dir(temp.path())?.collect();
        assert_eq!(entries.len(), 1);
        Ok(())
    }

    #[test]
    fn test_unreadable_path_is_an_error() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("tasks.txt");
        fs::create_dir(&path)?;

        let store = FileStore::new(path);
        assert!(store.read_lines().is_err());
        assert!(store.replace(&lines(&["one"])).is_err());
        Ok(())
    }
}
