//! Physical key encoding shared by all storage backends.
//!
//! Key format: `{id}__{filename}`. The separator is two characters so a
//! UUID (which never contains underscores) can always be split back out by
//! taking the substring before the FIRST occurrence. If the filename itself
//! contains `__`, decoding still splits at the first occurrence; only the
//! part after it is recovered. Known lossy edge case, accepted.

use uuid::Uuid;

/// Separator between the id and the original filename inside a key.
pub const SEPARATOR: &str = "__";

/// Build the physical key for a fresh id and a sanitized filename.
pub fn encode(id: Uuid, filename: &str) -> String {
    format!("{}{}{}", id, SEPARATOR, filename)
}

/// Split a physical key back into `(id, filename)` at the first separator.
///
/// Returns `None` for keys without a separator or with an empty id or
/// filename; such objects were not written by this service and are skipped
/// during enumeration.
pub fn decode(key: &str) -> Option<(String, String)> {
    let idx = key.find(SEPARATOR)?;
    let (id, rest) = key.split_at(idx);
    let filename = &rest[SEPARATOR.len()..];
    if id.is_empty() || filename.is_empty() {
        return None;
    }
    Some((id.to_string(), filename.to_string()))
}

/// Key prefix matching every object stored under the given id.
pub fn id_prefix(id: &str) -> String {
    format!("{}{}", id, SEPARATOR)
}
