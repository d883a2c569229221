pub mod delete;
pub mod download;
pub mod list;
pub mod upload;

use mediagate_storage::keys;

/// Resolve the `{id}` path parameter to the bare id.
///
/// Retrieval URLs embed the full physical key (`{id}__{filename}`), so the
/// parameter may arrive in either form; everything from the first `__` on is
/// dropped. Ids that name no object are not rejected here, they simply fail
/// the backend lookup.
pub(crate) fn resolve_id_param(raw: &str) -> String {
    match raw.split_once(keys::SEPARATOR) {
        Some((id, _)) => id.to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bare_and_full_key_forms() {
        assert_eq!(resolve_id_param("abc"), "abc");
        assert_eq!(resolve_id_param("abc__hello.txt"), "abc");
        assert_eq!(resolve_id_param("abc__a__b.txt"), "abc");
    }
}
