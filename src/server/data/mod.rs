//! File-backed repository layer.
//!
//! Each user owns two files in the data directory: a JSON index of tracked scheduled
//! events (`{user_id}.json`) and the rendered calendar feed (`{user_id}.ics`). The
//! repositories here are the only code touching those files. Writes go through a
//! temp-file-and-rename so the HTTP server never serves a partial feed.

pub mod calendar_file;
pub mod index;

#[cfg(test)]
mod test;

use std::path::{Path, PathBuf};

pub use calendar_file::CalendarFileRepository;
pub use index::IndexRepository;

/// Path of a user's JSON index.
pub fn index_path(data_dir: &Path, user_id: u64) -> PathBuf {
    data_dir.join(format!("{user_id}.json"))
}

/// Path of a user's calendar feed.
pub fn ics_path(data_dir: &Path, user_id: u64) -> PathBuf {
    data_dir.join(format!("{user_id}.ics"))
}
