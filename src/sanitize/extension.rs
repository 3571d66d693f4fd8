//! Extension-aware filename splitting.
//!
//! Sanitization strategies must never mangle a file's extension, so every
//! strategy application first separates a segment into its name and
//! extension parts, transforms the name, and reconstructs the segment with
//! the extension untouched. The splitting rules here handle compound
//! extensions (`tar.gz`), hidden dot-files, and names with multiple or
//! trailing dots.

/// Known compound extensions that are treated as one unit.
///
/// Matched case-insensitively and before the generic last-dot rule, so
/// `archive.tar.gz` splits into `archive` + `tar.gz` rather than
/// `archive.tar` + `gz`.
pub const COMPOUND_EXTENSIONS: [&str; 6] = [
    "tar.gz",
    "tar.bz2",
    "tar.xz",
    "tar.z",
    "backup.sql",
    "backup.gz",
];

/// Maximum length of a valid extension.
const MAX_EXTENSION_LEN: usize = 10;

/// The result of splitting a filename into name and extension parts.
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::extension::separate;
///
/// let split = separate("photo.jpg");
/// assert_eq!(split.name, "photo");
/// assert_eq!(split.extension.as_deref(), Some("jpg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSplit {
    /// The filename without its extension.
    pub name: String,
    /// The extension without its leading dot, if one was recognized.
    pub extension: Option<String>,
}

impl ExtensionSplit {
    fn extensionless(filename: &str) -> Self {
        Self {
            name: filename.to_string(),
            extension: None,
        }
    }
}

/// Separate a filename into its name and extension parts.
///
/// Compound extensions are checked first; otherwise the split happens at the
/// last dot. A leading dot (hidden file), a trailing dot, or a candidate
/// extension that fails [`is_valid_extension`] all yield an extension-less
/// result with the whole input as the name.
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::extension::separate;
///
/// assert_eq!(separate("archive.tar.gz").extension.as_deref(), Some("tar.gz"));
/// assert_eq!(separate(".htaccess").extension, None);
/// assert_eq!(separate("README").extension, None);
/// assert_eq!(separate("file.").extension, None);
/// ```
#[must_use]
pub fn separate(filename: &str) -> ExtensionSplit {
    if filename.is_empty() {
        return ExtensionSplit {
            name: String::new(),
            extension: None,
        };
    }

    let lowered = filename.to_lowercase();
    for compound in COMPOUND_EXTENSIONS {
        let suffix = format!(".{compound}");
        if lowered.ends_with(&suffix) {
            let name = &filename[..filename.len() - suffix.len()];

            // Hidden-file rule takes precedence over the compound match.
            if name.is_empty() || name.starts_with('.') {
                return ExtensionSplit::extensionless(filename);
            }

            return ExtensionSplit {
                name: name.to_string(),
                extension: Some(compound.to_string()),
            };
        }
    }

    match filename.rfind('.') {
        // No dot, or dot at position 0 (hidden file).
        None | Some(0) => ExtensionSplit::extensionless(filename),
        Some(pos) => {
            let (name, dotted_extension) = filename.split_at(pos);
            let extension = &dotted_extension[1..];

            if !is_valid_extension(extension) {
                return ExtensionSplit::extensionless(filename);
            }

            ExtensionSplit {
                name: name.to_string(),
                extension: Some(extension.to_string()),
            }
        }
    }
}

/// Check whether a string is a valid file extension.
///
/// Extensions are non-empty, purely alphanumeric ASCII, and at most ten
/// characters long (`jpg`, `png`, `docx`, ...).
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::extension::is_valid_extension;
///
/// assert!(is_valid_extension("jpg"));
/// assert!(is_valid_extension("tar"));
/// assert!(!is_valid_extension(""));
/// assert!(!is_valid_extension("j pg"));
/// assert!(!is_valid_extension("verylongextension"));
/// ```
#[must_use]
pub fn is_valid_extension(extension: &str) -> bool {
    !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Reconstruct a filename from its name and extension parts.
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::extension::reconstruct;
///
/// assert_eq!(reconstruct("photo", Some("jpg")), "photo.jpg");
/// assert_eq!(reconstruct("README", None), "README");
/// ```
#[must_use]
pub fn reconstruct(name: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{name}.{ext}"),
        None => name.to_string(),
    }
}

/// Apply a transform to the name part of a filename, preserving the
/// extension verbatim.
///
/// # Examples
///
/// ```
/// use pathforge::sanitize::extension::sanitize_with_extension;
///
/// let upper = sanitize_with_extension("photo.jpg", |name| name.to_uppercase());
/// assert_eq!(upper, "PHOTO.jpg");
/// ```
pub fn sanitize_with_extension<F>(filename: &str, transform: F) -> String
where
    F: FnOnce(&str) -> String,
{
    let split = separate(filename);
    let sanitized = transform(&split.name);
    reconstruct(&sanitized, split.extension.as_deref())
}
