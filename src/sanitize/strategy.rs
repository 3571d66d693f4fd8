//! Sanitization strategies for path segments.
//!
//! A strategy is a pure transform applied to the name portion of a segment;
//! the segment's extension (including compound extensions like `tar.gz`) is
//! preserved verbatim by routing every built-in strategy through
//! [`sanitize_with_extension`](super::extension::sanitize_with_extension).
//!
//! The built-in set is closed ([`SanitizationStrategy`]); external strategies
//! plug in through the [`SegmentSanitizer`] contract, either passed directly
//! at a call site or resolved by symbolic key from a [`StrategyRegistry`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result, StrategyErrorReason};
use crate::sanitize::extension::sanitize_with_extension;

/// Hash algorithms available for hashed directory names and the hashed
/// sanitization strategy.
///
/// Digests are rendered as lowercase hex.
///
/// # Examples
///
/// ```
/// use pathforge::HashAlgorithm;
///
/// let digest = HashAlgorithm::Md5.digest("user@example.com");
/// assert_eq!(digest.len(), 32);
///
/// let digest = HashAlgorithm::Sha256.digest("user@example.com");
/// assert_eq!(digest.len(), 64);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit). The default, matching the builder's hashed-directory
    /// operations.
    #[default]
    Md5,
    /// SHA-256 (256-bit).
    Sha256,
    /// SHA-512 (512-bit).
    Sha512,
}

impl HashAlgorithm {
    /// Hash `input` and return the lowercase hex digest.
    #[must_use]
    pub fn digest(self, input: &str) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(input.as_bytes())),
            Self::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            Self::Sha512 => hex::encode(Sha512::digest(input.as_bytes())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => write!(f, "md5"),
            Self::Sha256 => write!(f, "sha256"),
            Self::Sha512 => write!(f, "sha512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::InvalidArgument {
                argument: "algorithm".to_string(),
                reason: format!("unknown hash algorithm '{s}'"),
            }),
        }
    }
}

/// Contract for sanitization strategies.
///
/// A strategy is a single pure function from segment to segment. The four
/// built-ins satisfy this contract; external implementations can be passed
/// wherever a strategy is accepted, or registered by name in a
/// [`StrategyRegistry`].
///
/// Implementors that need extension preservation should route their
/// transform through
/// [`sanitize_with_extension`](super::extension::sanitize_with_extension);
/// the contract itself receives the full segment.
pub trait SegmentSanitizer: Send + Sync {
    /// Apply the transform to a segment.
    fn apply(&self, input: &str) -> String;
}

/// The closed set of built-in sanitization strategies.
///
/// Every variant preserves the segment's extension: the transform runs on
/// the name part only and the extension is reattached unchanged.
///
/// # Examples
///
/// ```
/// use pathforge::SanitizationStrategy;
///
/// assert_eq!(
///     SanitizationStrategy::Slug.apply("My Amazing File!.pdf"),
///     "my-amazing-file.pdf"
/// );
/// assert_eq!(
///     SanitizationStrategy::Snake.apply("CamelCase Name"),
///     "camel_case_name"
/// );
/// assert_eq!(SanitizationStrategy::Hashed.apply("test.jpg").len(), 36);
/// assert!(SanitizationStrategy::Timestamp.apply("session").starts_with("session_"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizationStrategy {
    /// Replace the name with its MD5 hex digest.
    Hashed,
    /// Reduce the name to a lowercase, hyphen-separated slug.
    Slug,
    /// Convert the name to `snake_case`.
    Snake,
    /// Append `_<unix timestamp>` to the name.
    Timestamp,
}

impl SanitizationStrategy {
    /// Apply this strategy to a segment, preserving its extension.
    #[must_use]
    pub fn apply(self, input: &str) -> String {
        sanitize_with_extension(input, |name| self.transform_name(name))
    }

    /// The transform for the name part of a segment.
    fn transform_name(self, name: &str) -> String {
        match self {
            Self::Hashed => HashAlgorithm::Md5.digest(name),
            Self::Slug => slugify(name),
            Self::Snake => snakeify(name),
            Self::Timestamp => format!("{name}_{}", Utc::now().timestamp()),
        }
    }
}

impl fmt::Display for SanitizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashed => write!(f, "hashed"),
            Self::Slug => write!(f, "slug"),
            Self::Snake => write!(f, "snake"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl FromStr for SanitizationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hashed" => Ok(Self::Hashed),
            "slug" => Ok(Self::Slug),
            "snake" => Ok(Self::Snake),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(Error::InvalidStrategy {
                name: s.to_string(),
                reason: StrategyErrorReason::NotFound,
            }),
        }
    }
}

impl SegmentSanitizer for SanitizationStrategy {
    fn apply(&self, input: &str) -> String {
        SanitizationStrategy::apply(*self, input)
    }
}

/// A reference to a sanitization strategy at a call site.
///
/// Fluent builder operations accept `impl Into<StrategyRef>`, so call sites
/// can pass a built-in variant or any [`SegmentSanitizer`] implementor
/// directly:
///
/// ```
/// use pathforge::{PathBuilder, SanitizationStrategy};
///
/// let path = PathBuilder::base("uploads")
///     .add_sanitized("My Folder", SanitizationStrategy::Slug)
///     .unwrap()
///     .to_string();
/// assert_eq!(path, "uploads/my-folder");
/// ```
#[derive(Clone, Copy)]
pub enum StrategyRef<'a> {
    /// One of the built-in strategies.
    Builtin(SanitizationStrategy),
    /// An externally supplied strategy. Applied as-is; extension
    /// preservation is the implementor's concern.
    Custom(&'a dyn SegmentSanitizer),
}

impl StrategyRef<'_> {
    /// Apply the referenced strategy to a segment.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Builtin(strategy) => strategy.apply(input),
            Self::Custom(sanitizer) => sanitizer.apply(input),
        }
    }
}

impl fmt::Debug for StrategyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(strategy) => f.debug_tuple("Builtin").field(strategy).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").field(&"..").finish(),
        }
    }
}

impl From<SanitizationStrategy> for StrategyRef<'_> {
    fn from(strategy: SanitizationStrategy) -> Self {
        Self::Builtin(strategy)
    }
}

impl<'a> From<&'a dyn SegmentSanitizer> for StrategyRef<'a> {
    fn from(sanitizer: &'a dyn SegmentSanitizer) -> Self {
        Self::Custom(sanitizer)
    }
}

impl<'a, S: SegmentSanitizer> From<&'a S> for StrategyRef<'a> {
    fn from(sanitizer: &'a S) -> Self {
        Self::Custom(sanitizer)
    }
}

/// String-keyed registry for externally supplied sanitization strategies.
///
/// Resolution is a per-call lookup plus capability check: built-in keys
/// resolve to the corresponding built-in, registered keys resolve to their
/// entry if (and only if) it satisfies the [`SegmentSanitizer`] contract.
/// Nothing is cached between calls.
///
/// # Examples
///
/// ```
/// use pathforge::{SegmentSanitizer, StrategyRegistry};
///
/// struct Reversed;
///
/// impl SegmentSanitizer for Reversed {
///     fn apply(&self, input: &str) -> String {
///         input.chars().rev().collect()
///     }
/// }
///
/// let mut registry = StrategyRegistry::new();
/// registry.register("reversed", Reversed);
///
/// let strategy = registry.resolve("reversed").unwrap();
/// assert_eq!(strategy.apply("abc"), "cba");
///
/// // Built-in keys resolve without registration.
/// assert!(registry.resolve("slug").is_ok());
/// assert!(registry.resolve("nonsense").is_err());
/// ```
#[derive(Default)]
pub struct StrategyRegistry {
    entries: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy under a symbolic key.
    ///
    /// A later registration under the same key replaces the earlier one.
    pub fn register<S>(&mut self, key: impl Into<String>, strategy: S)
    where
        S: SegmentSanitizer + 'static,
    {
        let entry: Arc<dyn SegmentSanitizer> = Arc::new(strategy);
        self.entries.insert(key.into(), Box::new(entry));
    }

    /// Register an arbitrary entry under a symbolic key.
    ///
    /// Entries that do not satisfy the [`SegmentSanitizer`] contract stay
    /// in the registry but fail [`resolve`](Self::resolve) with a
    /// missing-contract error.
    pub fn register_entry(&mut self, key: impl Into<String>, entry: Box<dyn Any + Send + Sync>) {
        self.entries.insert(key.into(), entry);
    }

    /// Resolve a symbolic key to a strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStrategy`] when the key names neither a
    /// built-in nor a registered entry, or when the registered entry does
    /// not satisfy the [`SegmentSanitizer`] contract. The two cases carry
    /// distinct messages.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn SegmentSanitizer>> {
        if let Ok(builtin) = key.parse::<SanitizationStrategy>() {
            return Ok(Arc::new(builtin));
        }

        match self.entries.get(key) {
            None => Err(Error::InvalidStrategy {
                name: key.to_string(),
                reason: StrategyErrorReason::NotFound,
            }),
            Some(entry) => entry
                .downcast_ref::<Arc<dyn SegmentSanitizer>>()
                .cloned()
                .ok_or_else(|| Error::InvalidStrategy {
                    name: key.to_string(),
                    reason: StrategyErrorReason::MissingContract,
                }),
        }
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Reduce a name to a lowercase, hyphen-separated slug.
///
/// Characters other than ASCII letters, digits, whitespace and hyphens are
/// stripped first; whitespace runs and repeated hyphens collapse to a
/// single hyphen; leading and trailing hyphens are trimmed.
fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator {
                out.push('-');
                pending_separator = false;
            }
            out.push(ch.to_ascii_lowercase());
        } else if (ch.is_whitespace() || ch == '-') && !out.is_empty() {
            pending_separator = true;
        }
        // Everything else is stripped.
    }

    out
}

/// Convert a name to `snake_case`.
///
/// An underscore is inserted where a lowercase letter or digit is followed
/// by an uppercase letter; whitespace runs become a single underscore;
/// the result is lowercased.
fn snakeify(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev = None;
        } else if ch.is_uppercase() {
            if matches!(prev, Some(p) if p.is_lowercase() || p.is_ascii_digit())
                && !out.ends_with('_')
            {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev = Some(ch);
        } else {
            out.push(ch);
            prev = Some(ch);
        }
    }

    out
}
