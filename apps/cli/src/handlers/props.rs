use crate::models::config::PropertiesSettings;
use crate::services::output::render_table;
use anyhow::{Context, Result, ensure};
use kiln_properties::{MemoryResource, PropertiesError, PropertiesFile, Resource};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A change to apply to one properties file, either for real or as a preview.
#[derive(Debug)]
pub enum Mutation {
    Set { key: String, value: String },
    Remove { key: String },
    Merge(BTreeMap<String, String>),
    Replace(BTreeMap<String, String>),
}

impl Mutation {
    /// Builds a `Merge` or `Replace` from the entries of `source`.
    ///
    /// # Errors
    /// Returns an error if `source` does not exist or cannot be read.
    pub fn from_file(source: &Path, replace: bool) -> Result<Self> {
        ensure!(source.is_file(), "Source file {} does not exist", source.display());
        let entries = PropertiesFile::open(source).entries()?;
        Ok(if replace { Self::Replace(entries) } else { Self::Merge(entries) })
    }

    fn apply<R: Resource>(self, store: &PropertiesFile<R>) -> Result<(), PropertiesError> {
        match self {
            Self::Set { key, value } => {
                store.put(key, value)?;
            },
            Self::Remove { key } => {
                store.remove(&key)?;
            },
            Self::Merge(entries) => store.put_all(entries)?,
            Self::Replace(entries) => store.replace_all(entries)?,
        }
        Ok(())
    }
}

fn with_header<R: Resource>(store: PropertiesFile<R>, settings: &PropertiesSettings) -> PropertiesFile<R> {
    match &settings.header {
        Some(header) => store.with_header(header.as_str()),
        None => store,
    }
}

fn open(file: &Path, settings: &PropertiesSettings) -> PropertiesFile {
    with_header(PropertiesFile::open(file), settings)
}

/// Prints the value of `key`. Returns `false` when the key is absent.
///
/// # Errors
/// Returns an error if the file cannot be loaded.
pub fn get(file: &Path, key: &str) -> Result<bool> {
    match PropertiesFile::open(file).get(key)? {
        Some(value) => {
            println!("{value}");
            Ok(true)
        },
        None => Ok(false),
    }
}

/// Prints every entry as `key=value`, in key order.
///
/// # Errors
/// Returns an error if the file cannot be loaded.
pub fn list(file: &Path) -> Result<()> {
    for entry in PropertiesFile::open(file).list_entries()? {
        println!("{entry}");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the file cannot be loaded.
pub fn keys(file: &Path) -> Result<()> {
    for key in PropertiesFile::open(file).keys()? {
        println!("{key}");
    }
    Ok(())
}

/// Applies `mutation` to `file`, or prints the would-be content when `dry_run` is set.
///
/// # Errors
/// Returns an error if the file cannot be loaded or rewritten.
pub fn mutate(file: &Path, mutation: Mutation, dry_run: bool, settings: &PropertiesSettings) -> Result<()> {
    let store = open(file, settings);

    if dry_run {
        let preview = with_header(PropertiesFile::with_resource(snapshot(store.resource())?), settings);
        mutation.apply(&preview)?;
        let content = preview.resource().content().unwrap_or_default();
        print!("{}", String::from_utf8_lossy(&content));
        return Ok(());
    }

    mutation.apply(&store)?;
    info!(file = %store.path().display(), "Properties file updated");
    Ok(())
}

/// Copies the current bytes behind `resource` into memory; a missing file stays missing.
fn snapshot<R: Resource>(resource: &R) -> Result<MemoryResource> {
    let path = resource.path();
    let reader = resource.open_read().with_context(|| format!("Failed to open {}", path.display()))?;

    Ok(match reader {
        Some(mut reader) => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).with_context(|| format!("Failed to read {}", path.display()))?;
            MemoryResource::with_content(path, bytes)
        },
        None => MemoryResource::new(path),
    })
}

/// Lists `*.properties` files below `dir` with their entry counts.
///
/// # Errors
/// Returns an error if `dir` is not a directory.
pub fn scan(dir: Option<PathBuf>) -> Result<()> {
    let root = dir.unwrap_or_else(|| PathBuf::from("."));
    ensure!(root.is_dir(), "{} is not a directory", root.display());

    let mut rows = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable path");
                continue;
            },
        };
        if !entry.file_type().is_file() || !PropertiesFile::handles(entry.path()) {
            continue;
        }

        let shown = entry.path().strip_prefix(&root).unwrap_or(entry.path()).display().to_string();
        let keys = match PropertiesFile::open(entry.path()).keys() {
            Ok(keys) => keys.len().to_string(),
            Err(e) => {
                warn!(file = %shown, error = %e, "Unreadable properties file");
                "unreadable".to_owned()
            },
        };
        rows.push((shown, keys));
    }

    if rows.is_empty() {
        println!("No .properties files found under '{}'.", root.display());
        return Ok(());
    }

    render_table("Properties files", ["File", "Keys"], &rows);
    Ok(())
}
