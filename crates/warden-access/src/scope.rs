//! Scope verification
//!
//! Scopes are opaque strings compared by exact equality. `"site:read"` does
//! not match `"site:read:all"` or `"site"`.

use crate::record::AccessRecord;

/// Check that `scope` is one of the record's granted scopes
///
/// Returns `false` for an absent record, a record with no scopes, or an
/// empty `scope`.
pub fn verify_scope(record: Option<&AccessRecord>, scope: &str) -> bool {
    let Some(record) = record else {
        return false;
    };

    if record.scopes().is_empty() || scope.is_empty() {
        return false;
    }

    record.scopes().iter().any(|granted| granted == scope)
}

/// Check that every scope in `required` passes [`verify_scope`]
///
/// An empty `required` list is vacuously satisfied.
pub fn verify_scopes<S: AsRef<str>>(record: Option<&AccessRecord>, required: &[S]) -> bool {
    first_missing(record, required).is_none()
}

/// The first required scope (in the given order) that is not granted
pub(crate) fn first_missing<'a, S: AsRef<str>>(
    record: Option<&AccessRecord>,
    required: &'a [S],
) -> Option<&'a str> {
    required
        .iter()
        .map(AsRef::as_ref)
        .find(|scope| !verify_scope(record, scope))
}
