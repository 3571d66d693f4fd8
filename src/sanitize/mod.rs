//! Segment sanitization.
//!
//! This module provides the sanitization layer of the path builder:
//!
//! - [`extension`] — extension-aware filename splitting, so transforms never
//!   touch a segment's (possibly compound) extension.
//! - [`strategy`] — the built-in strategy set, the [`SegmentSanitizer`]
//!   contract for external strategies, and the string-keyed
//!   [`StrategyRegistry`].
//! - segment-level helpers ([`trim_slashes`], [`sanitize_segment`]) applied
//!   to every segment before it is appended to a path.
//!
//! # Examples
//!
//! ```
//! use pathforge::sanitize::{apply, trim_slashes};
//! use pathforge::SanitizationStrategy;
//!
//! assert_eq!(trim_slashes("/uploads/"), "uploads");
//! assert_eq!(
//!     apply("Profile Photo.jpg", &SanitizationStrategy::Slug.into()),
//!     "profile-photo.jpg"
//! );
//! ```

pub mod extension;
pub mod strategy;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use strategy::{
    HashAlgorithm, SanitizationStrategy, SegmentSanitizer, StrategyRef, StrategyRegistry,
};

/// Apply a strategy reference to an input string.
///
/// Built-in strategies preserve the input's extension; custom strategies
/// are applied as-is.
#[must_use]
pub fn apply(input: &str, strategy: &StrategyRef<'_>) -> String {
    strategy.apply(input)
}

/// Trim leading and trailing slashes from a path segment.
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::trim_slashes;
///
/// assert_eq!(trim_slashes("/uploads/"), "uploads");
/// assert_eq!(trim_slashes("///a/b///"), "a/b");
/// assert_eq!(trim_slashes("plain"), "plain");
/// ```
#[must_use]
pub fn trim_slashes(path: &str) -> &str {
    path.trim_matches('/')
}

/// Sanitize a single path segment.
///
/// Removes harmless current-directory references (`./`) and maps a lone `.`
/// to the empty string; `..` sequences are deliberately preserved so the
/// safety check can detect them later.
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::sanitize_segment;
///
/// assert_eq!(sanitize_segment("./images"), "images");
/// assert_eq!(sanitize_segment("."), "");
/// assert_eq!(sanitize_segment(".."), "..");
/// ```
#[must_use]
pub fn sanitize_segment(segment: &str) -> String {
    let sanitized = segment.replace("./", "");

    if sanitized == "." {
        String::new()
    } else {
        sanitized
    }
}
