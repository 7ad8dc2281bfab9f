use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Parse a caller-supplied identifier string into a storage key.
///
/// API identifiers are opaque strings; storage keys are positive integers.
/// Anything else is [`CoreError::InvalidIdentifier`], never `NotFound`.
pub fn parse_db_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::InvalidIdentifier(raw.to_string())),
    }
}
