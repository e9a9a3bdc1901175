//! XML name validation.

use std::sync::LazyLock;

use regex::Regex;

/// XML `Name` production, approximated with Unicode classes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_:][\p{L}\p{M}\p{N}_:.\x{B7}-]*$").expect("valid regex")
});

/// Check if `name` is a valid XML name (element or attribute name,
/// optionally with a prefix).
///
/// # Examples
/// ```
/// use microcommons_microdom::name::is_valid_name;
///
/// assert!(is_valid_name("xs:element"));
/// assert!(is_valid_name("li.nr"));
/// assert!(!is_valid_name("1st"));
/// assert!(!is_valid_name(""));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Check if `name` is a valid name without a prefix.
pub fn is_valid_local_name(name: &str) -> bool {
    !name.contains(':') && is_valid_name(name)
}
