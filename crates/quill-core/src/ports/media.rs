use async_trait::async_trait;

use crate::error::DomainError;

/// Asset-storage collaborator: accepts binary image payloads and returns a
/// retrievable path. Posts store the returned path, never the bytes.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String, MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Unusable file name: {0}")]
    InvalidName(String),

    #[error("Write failed: {0}")]
    Io(String),
}

impl From<MediaError> for DomainError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidName(name) => {
                DomainError::Validation(format!("invalid image file name: {name}"))
            }
            MediaError::Io(msg) => DomainError::Internal(msg),
        }
    }
}
