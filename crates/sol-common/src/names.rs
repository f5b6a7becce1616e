//! Reserved names for built-in declarations.
//!
//! Every built-in struct/contract is declared under an *internal* name: the
//! plain name prefixed with [`RESERVED_MARKER`]. The marker cannot start an
//! identifier in user source, so a user `struct Msg` can never collide with
//! or shadow the built-in `@Msg`.

/// Marker character prepended to built-in names.
pub const RESERVED_MARKER: char = '@';

/// Render the internal name of a built-in: `Msg` -> `@Msg`.
pub fn internalise(plain: &str) -> String {
    format!("{RESERVED_MARKER}{plain}")
}

/// Whether `name` carries the reserved marker.
pub fn is_internal_name(name: &str) -> bool {
    name.starts_with(RESERVED_MARKER)
}

/// Strip the reserved marker, if present.
pub fn plain_name(name: &str) -> &str {
    name.strip_prefix(RESERVED_MARKER).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internalise_round_trips_through_plain_name() {
        assert_eq!(internalise("Msg"), "@Msg");
        assert!(is_internal_name("@Msg"));
        assert!(!is_internal_name("Msg"));
        assert_eq!(plain_name("@Block"), "Block");
        assert_eq!(plain_name("Block"), "Block");
    }
}
