//! Record identifiers.

/// Generate a fresh, globally unique record id (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
