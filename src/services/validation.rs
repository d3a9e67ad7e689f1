//! Presence checks shared by the services.

/// A field counts as present when it is set and non-empty. Whitespace is
/// content, not absence.
#[must_use]
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
