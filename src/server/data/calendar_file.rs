use std::{io::ErrorKind, path::Path};

use crate::server::{data::ics_path, error::AppError, util::fs::write_atomic};

pub struct CalendarFileRepository<'a> {
    data_dir: &'a Path,
}

impl<'a> CalendarFileRepository<'a> {
    pub fn new(data_dir: &'a Path) -> Self {
        Self { data_dir }
    }

    /// Reads a user's rendered feed.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` - The feed exists
    /// - `Ok(None)` - No feed has been written for this user
    /// - `Err(AppError::IoErr)` - The file exists but could not be read
    pub async fn read(&self, user_id: u64) -> Result<Option<Vec<u8>>, AppError> {
        match tokio::fs::read(ics_path(self.data_dir, user_id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write(&self, user_id: u64, contents: &str) -> Result<(), AppError> {
        write_atomic(&ics_path(self.data_dir, user_id), contents.as_bytes()).await?;
        Ok(())
    }

    pub async fn exists(&self, user_id: u64) -> Result<bool, AppError> {
        Ok(tokio::fs::try_exists(ics_path(self.data_dir, user_id)).await?)
    }
}
