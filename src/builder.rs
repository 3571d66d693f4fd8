//! The fluent path builder and its hierarchy state machine.
//!
//! [`PathBuilder`] accumulates path segments and enforces one structural
//! invariant: a file segment, once added, must remain the last segment.
//! Directory-appending operations after a file fail with
//! [`Error::HierarchyViolation`].
//!
//! Ownership follows a documented split: `base`, `add` and
//! `replace_extension` take `&self` and return a new builder (the receiver
//! is never changed), while `add_file`, `add_timestamped_dir`,
//! `add_hashed_dir` and the trailing-slash operations consume and return
//! the same builder.
//!
//! # Examples
//!
//! ```
//! use pathforge::{PathBuilder, SanitizationStrategy};
//!
//! let path = PathBuilder::base("uploads")
//!     .add("users")
//!     .unwrap()
//!     .add_sanitized("Profile Photos", SanitizationStrategy::Slug)
//!     .unwrap()
//!     .add_file("avatar.jpg")
//!     .to_string();
//!
//! assert_eq!(path, "uploads/users/profile-photos/avatar.jpg");
//! ```

use std::fmt;

use chrono::Utc;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::normalize::{is_safe, normalize};
use crate::sanitize::extension;
use crate::sanitize::{sanitize_segment, trim_slashes, HashAlgorithm, StrategyRef};
use crate::storage::Disk;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// Fluent builder for normalized, slash-joined relative paths.
///
/// Created by [`PathBuilder::base`], transformed by chained calls, and
/// consumed by [`Display`](fmt::Display) (`to_string`) or one of the
/// storage-delegating operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    segments: Vec<String>,
    file_added: bool,
}

impl PathBuilder {
    /// Create a builder from a base path.
    ///
    /// The path is split on `/`; empty pieces are dropped and each
    /// remaining piece is sanitized (`./` references removed, a lone `.`
    /// becomes empty and is filtered at join time).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// assert_eq!(PathBuilder::base("uploads").to_string(), "uploads");
    /// assert_eq!(PathBuilder::base("/uploads/images/").to_string(), "uploads/images");
    /// ```
    #[must_use]
    pub fn base(path: &str) -> Self {
        Self::base_inner(path, None)
    }

    /// Create a builder from a base path, sanitizing the whole raw path
    /// with a strategy before splitting.
    ///
    /// Note that strategies run before the split, so a slugging strategy
    /// collapses a multi-segment path into one segment.
    #[must_use]
    pub fn base_sanitized<'a>(path: &str, strategy: impl Into<StrategyRef<'a>>) -> Self {
        Self::base_inner(path, Some(strategy.into()))
    }

    fn base_inner(path: &str, strategy: Option<StrategyRef<'_>>) -> Self {
        let sanitized = match strategy {
            Some(s) => s.apply(path),
            None => path.to_string(),
        };

        let mut builder = Self::default();
        for piece in trim_slashes(&sanitized).split('/') {
            if !piece.is_empty() {
                builder.segments.push(sanitize_segment(piece));
            }
        }

        builder
    }

    /// Append a directory segment, returning a new builder.
    ///
    /// The receiver is unchanged; only the returned builder carries the new
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyViolation`] if a file has already been
    /// added.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// let base = PathBuilder::base("uploads");
    /// let images = base.add("images").unwrap();
    ///
    /// assert_eq!(base.to_string(), "uploads");
    /// assert_eq!(images.to_string(), "uploads/images");
    /// ```
    pub fn add(&self, name: &str) -> Result<Self> {
        self.add_inner(name, None)
    }

    /// Append a directory segment sanitized by a strategy, returning a new
    /// builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyViolation`] if a file has already been
    /// added.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::{PathBuilder, SanitizationStrategy};
    ///
    /// let path = PathBuilder::base("uploads")
    ///     .add_sanitized("user@email.com", SanitizationStrategy::Hashed)
    ///     .unwrap()
    ///     .to_string();
    /// // ".com" parses as an extension and is preserved; the name part is hashed.
    /// assert!(path.ends_with(".com"));
    /// ```
    pub fn add_sanitized<'a>(
        &self,
        name: &str,
        strategy: impl Into<StrategyRef<'a>>,
    ) -> Result<Self> {
        self.add_inner(name, Some(strategy.into()))
    }

    fn add_inner(&self, name: &str, strategy: Option<StrategyRef<'_>>) -> Result<Self> {
        if self.file_added {
            return Err(Error::HierarchyViolation);
        }

        let mut appended = self.clone();
        appended.segments.push(prepare_segment(name, strategy));
        Ok(appended)
    }

    /// Append a file segment in place.
    ///
    /// This is the terminal operation of the hierarchy: after it, every
    /// directory-appending call fails. Unlike [`add`](Self::add), it
    /// consumes and returns the same builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// let path = PathBuilder::base("uploads").add_file("document.pdf").to_string();
    /// assert_eq!(path, "uploads/document.pdf");
    /// ```
    #[must_use]
    pub fn add_file(self, filename: &str) -> Self {
        self.add_file_inner(filename, None)
    }

    /// Append a file segment sanitized by a strategy, in place.
    ///
    /// The strategy runs on the name part only; the extension (including
    /// compound extensions like `tar.gz`) is preserved.
    #[must_use]
    pub fn add_file_sanitized<'a>(
        self,
        filename: &str,
        strategy: impl Into<StrategyRef<'a>>,
    ) -> Self {
        self.add_file_inner(filename, Some(strategy.into()))
    }

    fn add_file_inner(mut self, filename: &str, strategy: Option<StrategyRef<'_>>) -> Self {
        self.segments.push(prepare_segment(filename, strategy));
        self.file_added = true;
        self
    }

    /// Append the current Unix timestamp as a directory segment, in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyViolation`] if a file has already been
    /// added.
    pub fn add_timestamped_dir(mut self) -> Result<Self> {
        if self.file_added {
            return Err(Error::HierarchyViolation);
        }

        self.segments.push(Utc::now().timestamp().to_string());
        Ok(self)
    }

    /// Append a hashed directory segment, in place.
    ///
    /// The input is slash-trimmed and hashed with the given algorithm; the
    /// lowercase hex digest becomes the segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyViolation`] if a file has already been
    /// added.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::{HashAlgorithm, PathBuilder};
    ///
    /// let path = PathBuilder::base("uploads")
    ///     .add_hashed_dir("user123", HashAlgorithm::Md5)
    ///     .unwrap()
    ///     .to_string();
    /// assert_eq!(path, "uploads/6ad14ba9986e3615423dfca256d04e3f");
    /// ```
    pub fn add_hashed_dir(mut self, input: &str, algorithm: HashAlgorithm) -> Result<Self> {
        if self.file_added {
            return Err(Error::HierarchyViolation);
        }

        self.segments.push(algorithm.digest(trim_slashes(input)));
        Ok(self)
    }

    /// Replace the extension of the last segment, returning a new builder.
    ///
    /// A leading dot on the new extension is stripped. If the builder is
    /// empty or the last segment has no recognized extension, the returned
    /// builder is an unchanged copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// let path = PathBuilder::base("files/video.mp4")
    ///     .replace_extension("webm")
    ///     .to_string();
    /// assert_eq!(path, "files/video.webm");
    /// ```
    #[must_use]
    pub fn replace_extension(&self, new_ext: &str) -> Self {
        let mut replaced = self.clone();

        if let Some(last) = replaced.segments.last_mut() {
            let split = extension::separate(last);
            if split.extension.is_some() {
                let new_ext = new_ext.trim_start_matches('.');
                *last = extension::reconstruct(&split.name, Some(new_ext));
            }
        }

        replaced
    }

    /// The extension of the last segment, or the empty string.
    ///
    /// Compound extensions like `tar.gz` are reported whole.
    #[must_use]
    pub fn extension(&self) -> String {
        match self.segments.last() {
            Some(last) => extension::separate(last).extension.unwrap_or_default(),
            None => String::new(),
        }
    }

    /// The last segment, or the empty string.
    #[must_use]
    pub fn filename(&self) -> String {
        self.segments.last().cloned().unwrap_or_default()
    }

    /// The last segment without its extension, or the empty string.
    #[must_use]
    pub fn filename_without_extension(&self) -> String {
        match self.segments.last() {
            Some(last) => extension::separate(last).name,
            None => String::new(),
        }
    }

    /// The directory part of the joined path, or the empty string when the
    /// path has no directory part.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// assert_eq!(PathBuilder::base("files/video.mp4").directory_path(), "files");
    /// assert_eq!(PathBuilder::base("video.mp4").directory_path(), "");
    /// ```
    #[must_use]
    pub fn directory_path(&self) -> String {
        Self::directory_of(&self.to_string())
    }

    /// The raw accumulated segments, in insertion order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Mark the last segment with a trailing slash, in place.
    ///
    /// The marker is visible through [`segments`](Self::segments) and
    /// [`debug`](Self::debug) only; join-time normalization strips it from
    /// the canonical string.
    #[must_use]
    pub fn ensure_trailing(mut self) -> Self {
        if let Some(last) = self.segments.last_mut() {
            let trimmed = last.trim_end_matches('/');
            *last = format!("{trimmed}/");
        }

        self
    }

    /// Remove any trailing slash marker from the last segment, in place.
    #[must_use]
    pub fn remove_trailing(mut self) -> Self {
        if let Some(last) = self.segments.last_mut() {
            *last = last.trim_end_matches('/').to_string();
        }

        self
    }

    /// Validate the joined path for traversal safety.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsafePath`] if the joined path contains a
    /// traversal sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// assert!(PathBuilder::base("uploads").add_file("safe.txt").validate().is_ok());
    /// assert!(PathBuilder::base("../uploads").validate().is_err());
    /// ```
    pub fn validate(self) -> Result<Self> {
        let path = self.to_string();

        if !is_safe(&path) {
            log::warn!("rejected unsafe path: {path}");
            return Err(Error::UnsafePath { path });
        }

        Ok(self)
    }

    /// Check whether the joined path exists on a storage disk.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure unchanged.
    pub fn exists(&self, disk: &dyn Disk) -> Result<bool> {
        disk.exists(&self.to_string())
    }

    /// The size in bytes of the file at the joined path on a storage disk.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure unchanged.
    pub fn size(&self, disk: &dyn Disk) -> Result<u64> {
        disk.size(&self.to_string())
    }

    /// Delete the file at the joined path on a storage disk.
    ///
    /// Returns `false` when there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure unchanged.
    pub fn delete(&self, disk: &dyn Disk) -> Result<bool> {
        disk.delete(&self.to_string())
    }

    /// The public URL for the joined path on a cloud-capable disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlUnsupported`] for disks without URL support;
    /// otherwise propagates the collaborator's failure unchanged.
    pub fn url(&self, disk: &dyn Disk) -> Result<String> {
        disk.url(&self.to_string())
    }

    /// Require the joined path to exist on a storage disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] carrying the path and disk
    /// identifier when the path does not exist.
    pub fn must_exist(self, disk: &dyn Disk) -> Result<Self> {
        let path = self.to_string();

        if disk.exists(&path)? {
            Ok(self)
        } else {
            Err(Error::PathNotFound {
                path,
                disk: disk.name().to_string(),
            })
        }
    }

    /// Require the joined path not to exist on a storage disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathAlreadyExists`] carrying the path and disk
    /// identifier when the path exists.
    pub fn must_not_exist(self, disk: &dyn Disk) -> Result<Self> {
        let path = self.to_string();

        if disk.exists(&path)? {
            Err(Error::PathAlreadyExists {
                path,
                disk: disk.name().to_string(),
            })
        } else {
            Ok(self)
        }
    }

    /// Snapshot of the builder state for introspection.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// let debug = PathBuilder::base("files/video.mp4").debug();
    /// assert_eq!(debug.final_path, "files/video.mp4");
    /// assert_eq!(debug.extension, "mp4");
    /// assert!(debug.is_safe);
    /// ```
    #[must_use]
    pub fn debug(&self) -> PathDebug {
        let final_path = self.to_string();

        PathDebug {
            segments: self.segments.clone(),
            is_safe: is_safe(&final_path),
            extension: self.extension(),
            filename: self.filename(),
            filename_without_ext: self.filename_without_extension(),
            directory: self.directory_path(),
            final_path,
        }
    }

    // Static helpers requiring no builder instance.

    /// Build a path from a list of segments.
    ///
    /// Each segment is slash-trimmed; blank segments are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// let path = PathBuilder::build(["uploads", "/images/", "avatar.jpg"]);
    /// assert_eq!(path, "uploads/images/avatar.jpg");
    /// ```
    pub fn build<I, S>(segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = segments
            .into_iter()
            .map(|segment| trim_slashes(segment.as_ref()).to_string())
            .filter(|segment| !segment.is_empty())
            .collect();

        parts.join("/")
    }

    /// Join path segments with forward slashes (alias for
    /// [`build`](Self::build)).
    pub fn join<I, S>(segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(segments)
    }

    /// Create a secure hash-based directory name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::{HashAlgorithm, PathBuilder};
    ///
    /// let name = PathBuilder::create_secure_directory_name("user123", HashAlgorithm::Md5);
    /// assert_eq!(name, "6ad14ba9986e3615423dfca256d04e3f");
    /// ```
    #[must_use]
    pub fn create_secure_directory_name(input: &str, algorithm: HashAlgorithm) -> String {
        algorithm.digest(input)
    }

    /// Extract the filename (basename) from a path.
    ///
    /// Trailing slashes are ignored, so `a/b/` yields `b`.
    #[must_use]
    pub fn extract_filename(path: &str) -> String {
        let trimmed = path.trim_end_matches('/');

        match trimmed.rfind('/') {
            Some(pos) => trimmed[pos + 1..].to_string(),
            None => trimmed.to_string(),
        }
    }

    /// The part of a path after the last `/`, verbatim.
    ///
    /// Unlike [`extract_filename`](Self::extract_filename), a trailing
    /// slash yields the empty string.
    #[must_use]
    pub fn last_segment(path: &str) -> String {
        match path.rfind('/') {
            Some(pos) => path[pos + 1..].to_string(),
            None => path.to_string(),
        }
    }

    /// Build a relative path by stripping a base prefix from an absolute
    /// path.
    ///
    /// Both inputs are slash-trimmed first. When the absolute path does not
    /// start with the base, the trimmed absolute path is returned
    /// unchanged. Matching is plain string-prefix matching, not
    /// segment-aware.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::PathBuilder;
    ///
    /// let relative = PathBuilder::build_relative_path("/var/www/uploads/image.jpg", "/var/www");
    /// assert_eq!(relative, "uploads/image.jpg");
    /// ```
    #[must_use]
    pub fn build_relative_path(absolute: &str, base: &str) -> String {
        let base = trim_slashes(base);
        let absolute = trim_slashes(absolute);

        match absolute.strip_prefix(base) {
            Some(rest) => rest.trim_start_matches('/').to_string(),
            None => absolute.to_string(),
        }
    }

    /// The extension of a path's filename, or the empty string.
    ///
    /// Extension detection matches the builder getters: compound
    /// extensions are reported whole.
    #[must_use]
    pub fn file_extension(path: &str) -> String {
        extension::separate(&Self::extract_filename(path))
            .extension
            .unwrap_or_default()
    }

    /// A path's filename without its extension, or the empty string.
    #[must_use]
    pub fn file_stem(path: &str) -> String {
        extension::separate(&Self::extract_filename(path)).name
    }

    /// The directory part of a path, or the empty string when the path has
    /// no directory part.
    #[must_use]
    pub fn directory_of(path: &str) -> String {
        let normalized = normalize(path);

        match normalized.rfind('/') {
            None => String::new(),
            Some(0) => "/".to_string(),
            Some(pos) => normalized[..pos].to_string(),
        }
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/");

        write!(f, "{}", normalize(&joined))
    }
}

/// Introspection snapshot returned by [`PathBuilder::debug`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathDebug {
    /// The raw accumulated segments, including empty ones and trailing
    /// slash markers.
    pub segments: Vec<String>,
    /// The joined, normalized path.
    pub final_path: String,
    /// Whether the joined path passes the traversal-safety check.
    pub is_safe: bool,
    /// The extension of the last segment, or the empty string.
    pub extension: String,
    /// The last segment, or the empty string.
    pub filename: String,
    /// The last segment without its extension, or the empty string.
    pub filename_without_ext: String,
    /// The directory part of the joined path, or the empty string.
    pub directory: String,
}

fn prepare_segment(name: &str, strategy: Option<StrategyRef<'_>>) -> String {
    let sanitized = match strategy {
        Some(s) => s.apply(name),
        None => name.to_string(),
    };

    sanitize_segment(trim_slashes(&sanitized))
}
