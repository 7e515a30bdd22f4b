//! Detection of references that are templates rather than concrete images.
//!
//! Documentation frequently shows image references with variables still in
//! them (`minaprotocol/daemon:{VERSION}`, `<image>:<tag>`, `$IMAGE`) or with a
//! tag that was cut short (`daemon:1.4.0-`). Such references can never be
//! validated and are dropped during extraction.

/// Characters that open a placeholder in the templating styles we see in docs:
/// `{var}`, `<var>`, `$var`, `${var}`, `[var]`.
const PLACEHOLDER_MARKERS: [char; 4] = ['{', '<', '$', '['];

/// Returns `true` if the reference contains any placeholder marker.
///
/// # Examples
///
/// ```
/// use tagcheck_core::has_template_placeholder;
///
/// assert!(has_template_placeholder("minaprotocol/daemon:${TAG}"));
/// assert!(!has_template_placeholder("minaprotocol/daemon:1.0.0"));
/// ```
#[must_use]
pub fn has_template_placeholder(reference: &str) -> bool {
    reference.contains(&PLACEHOLDER_MARKERS[..])
}

/// Returns `true` if the reference ends with a hyphen somewhere after a colon,
/// i.e. a tag that was truncated mid-way (`image:1.0-`).
///
/// # Examples
///
/// ```
/// use tagcheck_core::has_incomplete_tag;
///
/// assert!(has_incomplete_tag("minaprotocol/daemon:3.0.0-"));
/// assert!(!has_incomplete_tag("minaprotocol/daemon:3.0.0-beta"));
/// assert!(!has_incomplete_tag("my-image-"));
/// ```
#[must_use]
pub fn has_incomplete_tag(reference: &str) -> bool {
    reference
        .strip_suffix('-')
        .is_some_and(|head| head.contains(':'))
}

/// Returns `true` if the reference is not a concrete literal and must be skipped.
#[must_use]
pub fn is_unresolved(reference: &str) -> bool {
    has_template_placeholder(reference) || has_incomplete_tag(reference)
}
