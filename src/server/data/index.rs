use std::{io::ErrorKind, path::Path};

use crate::server::{
    data::index_path, error::AppError, model::index::TrackedEvent, util::fs::write_atomic,
};

pub struct IndexRepository<'a> {
    data_dir: &'a Path,
}

impl<'a> IndexRepository<'a> {
    pub fn new(data_dir: &'a Path) -> Self {
        Self { data_dir }
    }

    /// Loads a user's index.
    ///
    /// # Returns
    /// - `Ok(Vec<TrackedEvent>)` - Parsed records, empty when the file is missing or blank
    /// - `Err(AppError::JsonErr)` - The file exists but is not a valid index
    /// - `Err(AppError::IoErr)` - The file could not be read
    pub async fn load(&self, user_id: u64) -> Result<Vec<TrackedEvent>, AppError> {
        let raw = match tokio::fs::read_to_string(index_path(self.data_dir, user_id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let index: Vec<TrackedEvent> = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded index for user {}, {} entries", user_id, index.len());

        Ok(index)
    }

    pub async fn save(&self, user_id: u64, index: &[TrackedEvent]) -> Result<(), AppError> {
        let raw = serde_json::to_vec(index)?;
        write_atomic(&index_path(self.data_dir, user_id), &raw).await?;
        tracing::info!("Saved index for user {}, {} entries", user_id, index.len());

        Ok(())
    }

    pub async fn exists(&self, user_id: u64) -> Result<bool, AppError> {
        Ok(tokio::fs::try_exists(index_path(self.data_dir, user_id)).await?)
    }

    /// Lists every user with an index file, in ascending ID order.
    ///
    /// Files whose stem is not a numeric user ID are ignored.
    pub async fn list_users(&self) -> Result<Vec<u64>, AppError> {
        let mut users = Vec::new();
        let mut entries = tokio::fs::read_dir(self.data_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(user_id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                users.push(user_id);
            }
        }

        users.sort_unstable();
        Ok(users)
    }
}
