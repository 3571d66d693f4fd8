//! The storage collaborator boundary.
//!
//! The builder never touches a filesystem itself; existence checks, size
//! queries, deletion and URL generation are delegated to a [`Disk`]. Disks
//! are addressed by a string identifier through a caller-owned
//! [`StorageRouter`]; the default identifier is
//! [`StorageRouter::DEFAULT_DISK`] (`"local"`).
//!
//! [`LocalDisk`] is the filesystem-backed reference implementation, rooted
//! at a directory and resolving the builder's relative path strings beneath
//! it.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A storage backend addressed by the builder's joined path strings.
///
/// Each method performs one blocking call; failures propagate to the caller
/// unchanged, with no retries.
pub trait Disk: Send + Sync {
    /// The identifier of this disk, used in error messages.
    fn name(&self) -> &str;

    /// Check whether a path exists on this disk.
    ///
    /// # Errors
    ///
    /// Returns the backend's failure unchanged.
    fn exists(&self, path: &str) -> Result<bool>;

    /// The size in bytes of the file at a path.
    ///
    /// # Errors
    ///
    /// Returns the backend's failure unchanged.
    fn size(&self, path: &str) -> Result<u64>;

    /// Delete the file at a path, returning `false` when there was nothing
    /// to delete.
    ///
    /// # Errors
    ///
    /// Returns the backend's failure unchanged.
    fn delete(&self, path: &str) -> Result<bool>;

    /// The public URL for a path.
    ///
    /// Only cloud-capable disks support this; the default implementation
    /// fails with [`Error::UrlUnsupported`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlUnsupported`] unless overridden.
    fn url(&self, path: &str) -> Result<String> {
        let _ = path;
        Err(Error::UrlUnsupported {
            disk: self.name().to_string(),
        })
    }
}

/// String-keyed registry of storage disks.
///
/// The router is a plain value owned by the caller; there is no global
/// disk state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tempfile::tempdir;
/// use pathforge::{LocalDisk, StorageRouter};
///
/// let root = tempdir().unwrap();
/// let router = StorageRouter::new()
///     .with_disk(Arc::new(LocalDisk::new(root.path())));
///
/// let disk = router.default_disk().unwrap();
/// assert_eq!(disk.name(), "local");
/// assert!(router.disk("s3").is_err());
/// ```
#[derive(Default)]
pub struct StorageRouter {
    disks: HashMap<String, Arc<dyn Disk>>,
}

impl StorageRouter {
    /// The disk identifier used when none is specified.
    pub const DEFAULT_DISK: &'static str = "local";

    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a disk under its own name, consuming and returning the
    /// router for chained construction.
    #[must_use]
    pub fn with_disk(mut self, disk: Arc<dyn Disk>) -> Self {
        self.register(disk);
        self
    }

    /// Register a disk under its own name.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, disk: Arc<dyn Disk>) {
        self.disks.insert(disk.name().to_string(), disk);
    }

    /// Resolve a disk identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDisk`] for unregistered identifiers.
    pub fn disk(&self, name: &str) -> Result<&Arc<dyn Disk>> {
        self.disks.get(name).ok_or_else(|| {
            log::debug!("disk identifier '{name}' is not registered");
            Error::UnknownDisk {
                name: name.to_string(),
            }
        })
    }

    /// Resolve the default disk (`"local"`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDisk`] when no default disk is registered.
    pub fn default_disk(&self) -> Result<&Arc<dyn Disk>> {
        self.disk(Self::DEFAULT_DISK)
    }
}

impl fmt::Debug for StorageRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageRouter")
            .field("disks", &self.disks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Filesystem-backed disk rooted at a directory.
///
/// The builder's relative path strings are resolved beneath the root; the
/// disk never creates the root itself.
#[derive(Debug, Clone)]
pub struct LocalDisk {
    name: String,
    root: PathBuf,
}

impl LocalDisk {
    /// Create a local disk rooted at a directory, registered under the
    /// default identifier `"local"`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            name: StorageRouter::DEFAULT_DISK.to_string(),
            root: root.into(),
        }
    }

    /// Override the disk identifier.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The root directory of this disk.
    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Disk for LocalDisk {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path).try_exists()?)
    }

    fn size(&self, path: &str) -> Result<u64> {
        Ok(fs::metadata(self.resolve(path))?.len())
    }

    fn delete(&self, path: &str) -> Result<bool> {
        let target = self.resolve(path);
        log::debug!("deleting {}", target.display());

        match fs::remove_file(&target) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
