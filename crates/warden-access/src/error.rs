//! Access store error types

use thiserror::Error;
use warden_kv::StorageError;

pub type AccessResult<T> = Result<T, AccessError>;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Access record not found: {0}")]
    NotFound(String),

    #[error("Access denied: {key} lacks scope {scope:?}")]
    AccessDenied { key: String, scope: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AccessError {
    /// No record exists for the key (a 404, not a 403)
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::NotFound(_))
    }

    /// The record exists but lacks a required scope
    pub fn is_access_denied(&self) -> bool {
        matches!(self, AccessError::AccessDenied { .. })
    }
}
