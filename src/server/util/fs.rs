use std::{ffi::OsString, path::Path, path::PathBuf};

/// Writes a file by writing a sibling temp file and renaming it into place.
///
/// Calendar clients may fetch a feed while it is being rebuilt; the rename keeps
/// them from ever reading a half-written file.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), std::io::Error> {
    let tmp = temp_path(path);

    tokio::fs::write(&tmp, contents).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Tests that the target is replaced and no temp file is left behind.
    #[tokio::test]
    async fn replaces_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("42.ics");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }
}
