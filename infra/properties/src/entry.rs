use std::fmt;
use std::path::{Path, PathBuf};

/// One `key=value` pair of a properties file, addressable on its own.
///
/// Produced by [`PropertiesFile::list_entries`](crate::PropertiesFile::list_entries) for
/// callers that browse a file's pairs as children of the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryResource {
    file: PathBuf,
    key: String,
    value: String,
}

impl EntryResource {
    pub(crate) const fn new(file: PathBuf, key: String, value: String) -> Self {
        Self { file, key, value }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The properties file this entry was read from.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// A stable address for this entry: `<file>#<key>`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}#{}", self.file.display(), self.key)
    }

    #[must_use]
    pub fn into_pair(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl fmt::Display for EntryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
