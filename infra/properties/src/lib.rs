//! Flat key/value files (`*.properties`) as ordered, diff-stable stores.
//!
//! # Core Features
//!
//! - **Always fresh**: every call re-reads the backing file; there is no cache to go stale.
//! - **Canonical output**: every mutation rewrites the whole file with keys in ascending order,
//!   so rewriting equal content yields identical bytes and version-control diffs stay minimal.
//! - **Atomic rewrites**: file-backed stores write a temp sibling, `fsync` it and rename it
//!   over the target.
//! - **Compatible format**: reads what `java.util.Properties` reads (comments, continuations,
//!   `\uXXXX` escapes) and writes plain ASCII.
//!
//! # Architectural Overview
//!
//! 1.  **[`PropertiesFile`]**: the CRUD handle (`get`, `put`, `put_all`, `replace_all`,
//!     `remove`, `keys`, `list_entries`).
//! 2.  **[`Resource`]**: where the bytes live. [`FsResource`] for real files,
//!     [`MemoryResource`] for previews and tests.
//! 3.  **[`EntryResource`]**: one addressable `key=value` child of a file.
//!
//! # Examples
//!
//! ```rust
//! use kiln_properties::{MemoryResource, PropertiesError, PropertiesFile};
//!
//! # fn main() -> Result<(), PropertiesError> {
//! let resource = MemoryResource::with_content("app.properties", "b=0\nc=3\n");
//! let store = PropertiesFile::with_resource(resource.clone());
//!
//! store.put_all([("a", "1"), ("b", "2")])?;
//!
//! assert_eq!(resource.content().unwrap(), b"a=1\nb=2\nc=3\n");
//! assert_eq!(store.remove("c")?, Some("3".to_owned()));
//! # Ok(())
//! # }
//! ```
//!
//! # Malformed content
//!
//! A file that cannot be decoded (a broken `\uXXXX` escape or an unpaired surrogate) fails the
//! whole load with [`PropertiesError::Malformed`]; no partial snapshot is ever used or written
//! back. [`PropertiesFile::replace_all`] does not read the old content and can overwrite such a
//! file.

mod codec;
mod entry;
mod error;
mod resource;
mod store;

pub use entry::EntryResource;
pub use error::{PropertiesError, PropertiesErrorExt};
pub use resource::{AtomicFile, Commit, FsResource, MemoryResource, MemoryWriter, Resource};
pub use store::PropertiesFile;
