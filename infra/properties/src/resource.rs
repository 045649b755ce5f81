//! The byte-level seam between a [`PropertiesFile`](crate::PropertiesFile) and where its
//! content actually lives.

use parking_lot::Mutex;
use std::fmt::Debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

const TMP_MARKER: &str = ".kilntmp.";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A writer whose output only becomes visible once [`Commit::commit`] succeeds.
pub trait Commit: Write {
    /// Publishes everything written so far, replacing the previous content.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the content cannot be made durable.
    fn commit(self) -> io::Result<()>;
}

/// A readable and rewritable byte source addressed by a path.
pub trait Resource: Debug {
    type Reader: Read;
    type Writer: Commit;

    /// The path this resource represents. In-memory resources use it only as a name.
    fn path(&self) -> &Path;

    /// Opens the current content, or returns `None` if the resource does not exist yet.
    ///
    /// # Errors
    /// Returns any I/O error other than "not found".
    fn open_read(&self) -> io::Result<Option<Self::Reader>>;

    /// Opens a writer that replaces the whole content on commit.
    ///
    /// # Errors
    /// Returns the I/O error raised while preparing the writer.
    fn open_write(&self) -> io::Result<Self::Writer>;
}

/// A file on the local filesystem, rewritten with an atomic swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsResource {
    path: PathBuf,
}

impl FsResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Resource for FsResource {
    type Reader = BufReader<File>;
    type Writer = AtomicFile;

    fn path(&self) -> &Path {
        &self.path
    }

    fn open_read(&self) -> io::Result<Option<Self::Reader>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes go to a unique sibling temp file (`<name>.kilntmp.<pid>.<n>`); missing parent
    /// directories are created first.
    fn open_write(&self) -> io::Result<Self::Writer> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = unique_tmp_path(&self.path);
        let file = OpenOptions::new().write(true).create_new(true).open(&temp)?;

        Ok(AtomicFile {
            target: self.path.clone(),
            temp,
            file: Some(BufWriter::new(file)),
            committed: false,
        })
    }
}

/// Pending rewrite of an [`FsResource`].
///
/// Commit flushes, `fsync`s, and renames the temp file over the target, so the target is
/// never observed half-written. Dropping without a successful commit removes the temp file.
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    temp: PathBuf,
    file: Option<BufWriter<File>>,
    committed: bool,
}

impl AtomicFile {
    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.file.as_mut().ok_or_else(|| io::Error::other("atomic file already committed"))
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Commit for AtomicFile {
    fn commit(mut self) -> io::Result<()> {
        let Some(buffered) = self.file.take() else {
            return Err(io::Error::other("atomic file already committed"));
        };
        let file = buffered.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()?;
        drop(file);

        if let Err(err) = fs::rename(&self.temp, &self.target) {
            if err.kind() != io::ErrorKind::AlreadyExists {
                return Err(err);
            }
            fs::remove_file(&self.target)?;
            fs::rename(&self.temp, &self.target)?;
        }
        self.committed = true;

        if let Some(parent) = self.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            sync_dir(parent);
        }

        debug!(path = %self.target.display(), "File replaced atomically");
        Ok(())
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.file.take();
        if let Err(err) = fs::remove_file(&self.temp) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.temp.display(), error = %err, "Failed to remove temp file");
            }
        }
    }
}

fn unique_tmp_path(target: &Path) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("properties");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}

fn sync_dir(path: &Path) {
    // Not every platform can sync a directory handle.
    match File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                debug!(path = %path.display(), error = %err, "Directory sync skipped");
            }
        },
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Directory open skipped");
        },
    }
}

/// A resource held in memory. Clones share the same buffer.
///
/// Useful for previewing a rewrite without touching the disk.
#[derive(Debug, Clone)]
pub struct MemoryResource {
    path: PathBuf,
    content: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryResource {
    /// An empty (not yet existing) resource.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), content: Arc::new(Mutex::new(None)) }
    }

    /// A resource that already holds `content`.
    pub fn with_content(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into(), content: Arc::new(Mutex::new(Some(content.into()))) }
    }

    /// The committed bytes, if anything was ever written or seeded.
    #[must_use]
    pub fn content(&self) -> Option<Vec<u8>> {
        self.content.lock().clone()
    }
}

impl Resource for MemoryResource {
    type Reader = Cursor<Vec<u8>>;
    type Writer = MemoryWriter;

    fn path(&self) -> &Path {
        &self.path
    }

    fn open_read(&self) -> io::Result<Option<Self::Reader>> {
        Ok(self.content.lock().clone().map(Cursor::new))
    }

    fn open_write(&self) -> io::Result<Self::Writer> {
        Ok(MemoryWriter { buffer: Vec::new(), target: Arc::clone(&self.content) })
    }
}

/// Pending rewrite of a [`MemoryResource`].
#[derive(Debug)]
pub struct MemoryWriter {
    buffer: Vec<u8>,
    target: Arc<Mutex<Option<Vec<u8>>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Commit for MemoryWriter {
    fn commit(self) -> io::Result<()> {
        *self.target.lock() = Some(self.buffer);
        Ok(())
    }
}
