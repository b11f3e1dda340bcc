//! UUID utilities

use uuid::Uuid;

/// Generate a new owner id (UUIDv4, hyphenated)
///
/// Venue and artist ids are opaque strings; v4 ids are never reused.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique_uuid() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
