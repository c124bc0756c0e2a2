use thiserror::Error;

/// Errors that can occur while loading or saving hackathon data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested hackathon is not in the registry, or the registry itself is missing.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed stored record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend could not be reached or refused the request.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// A registry entry names a data file outside the data directory.
    #[error("invalid data file name: {0}")]
    InvalidPath(String),
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Unavailable(err.to_string())
    }
}
