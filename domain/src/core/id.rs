//! Entity id generation.
//!
//! All entities are keyed by string ids so persisted state stays portable
//! across storage backends.

use uuid::Uuid;

/// Generate a fresh entity id (hyphenated UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
