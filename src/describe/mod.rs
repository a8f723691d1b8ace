use async_trait::async_trait;

pub mod groq;

use crate::capture::ImageBlob;

/// Error type for describe operations.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    #[error("Connection failed: {0}")]
    ConnectionError(String),
    #[error("Authentication failed: {0}")]
    AuthError(String),
    #[error("Rate limited — retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for vision describe backends (Groq, Azure OpenAI, etc.).
/// Given a captured image and a prompt, produce a text description.
#[async_trait]
pub trait DescribeService: Send + Sync {
    /// Describe `image` according to `prompt`. `image.data` is encoded JPEG.
    async fn describe(&self, image: &ImageBlob, prompt: &str) -> Result<String, DescribeError>;

    /// Backend name for logging/display.
    fn name(&self) -> &str;
}
