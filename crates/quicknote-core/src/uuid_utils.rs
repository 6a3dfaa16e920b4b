//! UUID utilities for note identifiers.
//!
//! Note ids are UUIDv7, which embed a millisecond timestamp in the first
//! 48 bits. Ids generated later sort after ids generated earlier, so the id
//! doubles as a creation-order tie-breaker.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use quicknote_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// assert_eq!(id.get_version_num(), 7);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Parse the string form of a note id received from a client.
///
/// Surrounding whitespace is ignored. Anything that is not a UUID is
/// rejected as invalid input.
///
/// # Example
///
/// ```
/// use quicknote_core::uuid_utils::parse_note_id;
///
/// assert!(parse_note_id("not-an-id").is_err());
/// assert!(parse_note_id("01890a5d-ac96-774b-bcce-b302099a8057").is_ok());
/// ```
pub fn parse_note_id(raw: &str) -> Result<Uuid> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("id is required".to_string()));
    }
    Uuid::parse_str(trimmed)
        .map_err(|_| Error::InvalidInput(format!("'{}' is not a valid note id", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        assert_eq!(new_v7().get_version_num(), 7);
    }

    #[test]
    fn test_new_v7_unique() {
        let a = new_v7();
        let b = new_v7();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_note_id_trims() {
        let id = new_v7();
        let parsed = parse_note_id(&format!("  {}  ", id)).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_note_id_rejects_garbage() {
        let err = parse_note_id("64f1c0ffee").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_parse_note_id_rejects_empty() {
        let err = parse_note_id("   ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: id is required");
    }
}
