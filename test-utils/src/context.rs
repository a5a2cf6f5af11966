use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::TestError;

/// Test context owning a temporary data directory.
///
/// The directory and everything written into it is removed when the context is
/// dropped, so each test gets an isolated set of user index and calendar files.
pub struct TestContext {
    /// Temporary directory standing in for `DATA_DIR`.
    dir: TempDir,
}

impl TestContext {
    /// Creates a new context with an empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with a fresh directory
    /// - `Err(TestError::Io)` - Failed to create the directory
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path of the temporary data directory.
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the data directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes raw contents to a file inside the data directory.
    ///
    /// Used to seed malformed or legacy files that the factories do not produce.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<(), TestError> {
        std::fs::write(self.file(name), contents)?;
        Ok(())
    }

    /// Reads a file inside the data directory to a string.
    pub fn read_file(&self, name: &str) -> Result<String, TestError> {
        Ok(std::fs::read_to_string(self.file(name))?)
    }

    /// Reads and parses a user's JSON index.
    pub fn read_index(&self, user_id: u64) -> Result<serde_json::Value, TestError> {
        let raw = self.read_file(&format!("{user_id}.json"))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
