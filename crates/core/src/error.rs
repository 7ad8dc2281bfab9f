use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed date for {field}: '{value}' is not a YYYY-MM-DD calendar date")]
    MalformedDate { field: &'static str, value: String },

    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
