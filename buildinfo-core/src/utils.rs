//! Shared naming helpers.

/// Check whether a name is already snake_case.
pub fn is_snake_case(s: &str) -> bool {
    !s.chars().any(|c| c.is_uppercase() || c == '-')
}
