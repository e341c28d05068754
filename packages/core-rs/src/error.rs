use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plant store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("plant store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plant not found: {0}")]
    NotFound(String),
    #[error("plant store unavailable: {0}")]
    Unavailable(String),
}
