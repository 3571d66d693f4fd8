#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathforge
//!
//! A library for fluent construction and sanitization of relative paths.
//!
//! Paths are built segment by segment from a base, with optional
//! sanitization strategies (hashing, slugs, snake_case, timestamps) applied
//! to each segment's name while its extension — including compound
//! extensions like `tar.gz` — is preserved verbatim. The builder enforces
//! one structural invariant: a file segment, once added, stays the last
//! segment.
//!
//! ## Core Types
//!
//! - [`PathBuilder`]: the fluent segment accumulator and hierarchy state
//!   machine
//! - [`SanitizationStrategy`] and [`SegmentSanitizer`]: the built-in
//!   strategy set and the contract for external ones
//! - [`Disk`] and [`StorageRouter`]: the storage collaborator boundary
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use pathforge::{HashAlgorithm, PathBuilder, SanitizationStrategy};
//!
//! let path = PathBuilder::base("uploads")
//!     .add("users")
//!     .unwrap()
//!     .add_hashed_dir("user@example.com", HashAlgorithm::Md5)
//!     .unwrap()
//!     .add_file_sanitized("Profile Photo.jpg", SanitizationStrategy::Slug)
//!     .validate()
//!     .unwrap()
//!     .to_string();
//!
//! assert_eq!(
//!     path,
//!     "uploads/users/b58996c504c5638798eb6b511e6f49af/profile-photo.jpg"
//! );
//! ```

pub mod builder;
pub mod error;
pub mod filesize;
pub mod normalize;
pub mod sanitize;
pub mod storage;

// Re-export key types at crate root for convenience
pub use builder::{PathBuilder, PathDebug};
pub use error::{Error, Result, StrategyErrorReason};
pub use normalize::{is_safe, normalize};
pub use sanitize::{
    HashAlgorithm, SanitizationStrategy, SegmentSanitizer, StrategyRef, StrategyRegistry,
};
pub use storage::{Disk, LocalDisk, StorageRouter};
