use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Message returned whenever a required text field is missing or blank.
pub const REQUIRED_FIELDS: &str = "All fields are required";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    /// Unique or foreign key violation, carrying the store's own message.
    #[error("{0}")]
    Constraint(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify a driver error into constraint violations vs. everything else.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Constraint(msg),
            _ => {
                let msg = err.to_string();
                if msg.contains("constraint failed") {
                    Self::Constraint(msg)
                } else {
                    Self::Db(msg)
                }
            }
        }
    }
}

/// Presence check shared by every write: each value must be non-blank.
pub fn require_present<S: AsRef<str>>(values: &[S]) -> Result<(), ModelError> {
    if values.iter().any(|v| v.as_ref().trim().is_empty()) {
        return Err(ModelError::Validation(REQUIRED_FIELDS.into()));
    }
    Ok(())
}
