//! Path normalization and traversal-safety checks.
//!
//! Paths built by this crate are relative, slash-joined strings, so
//! normalization here is purely textual: collapse separator runs and strip a
//! dangling trailing separator. The safety check is a conservative substring
//! scan for traversal sequences; it is deliberately not segment-aware.

/// Normalize a path by collapsing duplicate slashes.
///
/// A single trailing slash is stripped unless the entire normalized result
/// is the root `/`. Empty input stays empty. The function is idempotent.
///
/// # Examples
///
/// ```
/// use pathforge::normalize;
///
/// assert_eq!(normalize("uploads//images///photo.jpg"), "uploads/images/photo.jpg");
/// assert_eq!(normalize("uploads/images/"), "uploads/images");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut normalized = String::with_capacity(path.len());
    let mut prev_was_slash = false;

    for ch in path.chars() {
        if ch == '/' {
            if !prev_was_slash {
                normalized.push('/');
            }
            prev_was_slash = true;
        } else {
            normalized.push(ch);
            prev_was_slash = false;
        }
    }

    if normalized != "/" && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Check whether a path is free of directory-traversal sequences.
///
/// Returns `false` if the path contains `../`, `..\` or `..` anywhere.
/// This is a substring check, not a segment-aware one: a name like
/// `notes..txt` is rejected too, which errs on the safe side.
///
/// # Examples
///
/// ```
/// use pathforge::is_safe;
///
/// assert!(is_safe("uploads/safe/path.jpg"));
/// assert!(!is_safe("uploads/../../../etc/passwd"));
/// assert!(!is_safe("..\\windows\\system32"));
/// ```
#[must_use]
pub fn is_safe(path: &str) -> bool {
    !(path.contains("../") || path.contains("..\\") || path.contains(".."))
}
