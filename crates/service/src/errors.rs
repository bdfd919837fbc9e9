use thiserror::Error;

/// Stable machine-readable code for a missing or blank `list_id`.
pub const LIST_ID_REQUIRED: &str = "list_id_required";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input was rejected; the payload is the stable error code.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn list_id_required() -> Self { Self::InvalidArgument(LIST_ID_REQUIRED) }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ServiceError::InvalidArgument(_))
    }
}
