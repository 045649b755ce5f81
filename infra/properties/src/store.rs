//! The properties file handle and its CRUD surface.

use crate::codec;
use crate::entry::EntryResource;
use crate::error::{PropertiesError, PropertiesErrorExt};
use crate::resource::{Commit, FsResource, Resource};
use fxhash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSION: &str = "properties";

type Snapshot = FxHashMap<String, String>;

/// A flat key/value file exposed as a mutable store.
///
/// Every call reads the backing resource afresh, so callers always observe what is on disk.
/// Every mutating call rewrites the whole file exactly once, with keys in ascending order and
/// the optional header as the first line, so logically equal content is byte-for-byte equal.
/// A missing file behaves as an empty store; the first mutation creates it.
///
/// The load-modify-rewrite cycle is not guarded against concurrent writers: two mutators on
/// the same file must be serialized by the caller, otherwise the later rewrite drops the
/// earlier one's changes.
///
/// # Example
///
/// ```rust
/// use kiln_properties::PropertiesFile;
///
/// # fn main() -> Result<(), kiln_properties::PropertiesError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let messages = PropertiesFile::open(tmp.path().join("messages.properties"));
///
/// messages.put_all([("greeting", "Hello"), ("farewell", "Bye")])?;
/// assert_eq!(messages.put("greeting", "Hi")?, Some("Hello".to_owned()));
///
/// let written = std::fs::read_to_string(messages.path()).unwrap();
/// assert_eq!(written, "farewell=Bye\ngreeting=Hi\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesFile<R: Resource = FsResource> {
    resource: R,
    header: Option<String>,
}

impl PropertiesFile<FsResource> {
    /// A store backed by the file at `path`. Nothing is read until the first call.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_resource(FsResource::new(path))
    }

    /// Whether `path` looks like a file this store handles (`*.properties`).
    #[must_use]
    pub fn handles(path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext == EXTENSION)
    }

    /// A store for another file in the same directory, sharing this store's header.
    #[must_use]
    pub fn sibling(&self, file_name: impl AsRef<Path>) -> Self {
        let dir = self.path().parent().unwrap_or_else(|| Path::new(""));
        Self { resource: FsResource::new(dir.join(file_name)), header: self.header.clone() }
    }
}

impl<R: Resource> PropertiesFile<R> {
    pub const fn with_resource(resource: R) -> Self {
        Self { resource, header: None }
    }

    /// Writes `header` as a single `#` comment line on top of every rewrite.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.resource.path()
    }

    #[must_use]
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Looks up `key`. Never writes.
    ///
    /// # Errors
    /// Returns [`PropertiesError::Unavailable`] or [`PropertiesError::Malformed`] if the file
    /// cannot be loaded.
    pub fn get(&self, key: &str) -> Result<Option<String>, PropertiesError> {
        Ok(self.load()?.remove(key))
    }

    /// Sets `key` to `value` and rewrites the file. Returns the previous value, if any.
    ///
    /// # Errors
    /// Returns [`PropertiesError::Unavailable`] if the file cannot be read or rewritten, and
    /// [`PropertiesError::Malformed`] if the current content cannot be parsed.
    pub fn put(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, PropertiesError> {
        let mut snapshot = self.load()?;
        let previous = snapshot.insert(key.into(), value.into());
        self.store(&snapshot)?;
        Ok(previous)
    }

    /// Merges `entries` into the file (new values win on collisions) with a single rewrite.
    ///
    /// # Errors
    /// Same as [`PropertiesFile::put`].
    pub fn put_all<I, K, V>(&self, entries: I) -> Result<(), PropertiesError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut snapshot = self.load()?;
        snapshot.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.store(&snapshot)
    }

    /// Replaces the whole content with `entries`. Keys not in `entries` are gone afterwards.
    ///
    /// The current content is not read, so this also recovers a file that fails to parse.
    ///
    /// # Errors
    /// Returns [`PropertiesError::Unavailable`] if the file cannot be rewritten.
    pub fn replace_all<I, K, V>(&self, entries: I) -> Result<(), PropertiesError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let snapshot: Snapshot = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.store(&snapshot)
    }

    /// Removes `key` and rewrites the file, even when the key was absent.
    /// Returns the removed value, if any.
    ///
    /// # Errors
    /// Same as [`PropertiesFile::put`].
    pub fn remove(&self, key: &str) -> Result<Option<String>, PropertiesError> {
        let mut snapshot = self.load()?;
        let previous = snapshot.remove(key);
        self.store(&snapshot)?;
        Ok(previous)
    }

    /// All keys currently in the file.
    ///
    /// # Errors
    /// Same as [`PropertiesFile::get`].
    pub fn keys(&self) -> Result<BTreeSet<String>, PropertiesError> {
        Ok(self.load()?.into_keys().collect())
    }

    /// All pairs currently in the file, ordered by key.
    ///
    /// # Errors
    /// Same as [`PropertiesFile::get`].
    pub fn entries(&self) -> Result<BTreeMap<String, String>, PropertiesError> {
        Ok(self.load()?.into_iter().collect())
    }

    /// One [`EntryResource`] per pair, ordered by key.
    ///
    /// # Errors
    /// Same as [`PropertiesFile::get`].
    pub fn list_entries(&self) -> Result<Vec<EntryResource>, PropertiesError> {
        let file = self.path().to_path_buf();
        Ok(self
            .entries()?
            .into_iter()
            .map(|(key, value)| EntryResource::new(file.clone(), key, value))
            .collect())
    }

    /// The [`EntryResource`] for `key`, if present.
    ///
    /// # Errors
    /// Same as [`PropertiesFile::get`].
    pub fn entry(&self, key: &str) -> Result<Option<EntryResource>, PropertiesError> {
        Ok(self
            .get(key)?
            .map(|value| EntryResource::new(self.path().to_path_buf(), key.to_owned(), value)))
    }

    fn load(&self) -> Result<Snapshot, PropertiesError> {
        let path = self.path();

        let Some(mut reader) = self
            .resource
            .open_read()
            .context(format!("Failed to open {}", path.display()))?
        else {
            debug!(path = %path.display(), "Properties file absent, treating as empty");
            return Ok(Snapshot::default());
        };

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).context(format!("Failed to read {}", path.display()))?;

        let snapshot: Snapshot = codec::decode(&codec::text(bytes))
            .context(path.display().to_string())?
            .into_iter()
            .collect();

        debug!(path = %path.display(), entries = snapshot.len(), "Properties loaded");
        Ok(snapshot)
    }

    fn store(&self, snapshot: &Snapshot) -> Result<(), PropertiesError> {
        let path = self.path();

        let mut sorted: Vec<(&str, &str)> =
            snapshot.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
        let content = codec::encode(self.header.as_deref(), sorted);

        let mut writer =
            self.resource.open_write().context(format!("Failed to open {}", path.display()))?;
        writer
            .write_all(content.as_bytes())
            .context(format!("Failed to write {}", path.display()))?;
        writer.commit().context(format!("Failed to persist {}", path.display()))?;

        debug!(path = %path.display(), entries = snapshot.len(), "Properties persisted");
        Ok(())
    }
}

impl<R: Resource> fmt::Display for PropertiesFile<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path().file_name() {
            Some(name) => write!(f, "{}", name.to_string_lossy()),
            None => write!(f, "{}", self.path().display()),
        }
    }
}
