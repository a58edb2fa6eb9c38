//! Access records: which scopes an identity key holds

use serde::{Deserialize, Serialize};

use crate::scope::{verify_scope, verify_scopes};

/// The persisted `{key, scopes}` pair for one identity
///
/// `scopes` keeps insertion order and is not deduplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    key: String,
    scopes: Vec<String>,
}

impl AccessRecord {
    pub fn new(
        key: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            key: key.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// The identity key; fixed for the record's lifetime
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Check if a single scope is granted
    pub fn permits(&self, scope: &str) -> bool {
        verify_scope(Some(self), scope)
    }

    /// Check if every required scope is granted
    pub fn permits_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        verify_scopes(Some(self), required)
    }

    pub(crate) fn replace_scopes(&mut self, scopes: Vec<String>) {
        self.scopes = scopes;
    }
}
