use thiserror::Error;

/// Errors raised while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the temporary directory or write a seed file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to serialize a seed index.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
