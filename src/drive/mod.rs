pub mod token;
pub mod upload;

use async_trait::async_trait;
use thiserror::Error;

pub use upload::DriveClient;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("credential cache unavailable: {0}")]
    Credentials(String),
    #[error("token refresh rejected: {0}")]
    Refresh(String),
    #[error("drive api returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("credential cache is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Narrow seam in front of the cloud storage client, so handlers (and their
/// tests) never depend on the concrete Drive implementation.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Stores `bytes` under `file_name`, returning the provider's object id.
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, DriveError>;
}
