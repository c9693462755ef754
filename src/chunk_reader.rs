//! Positional byte-range reads against the paged file
//!
//! The scanner never reads through a stream cursor of its own: every read is
//! a self-contained `(offset, len)` request, so forward and backward scans
//! can interleave freely against the single open file handle.

use crate::error::{PagerError, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Source of raw bytes for the line scanner
pub trait ChunkReader {
    /// Read up to `len` bytes starting at `offset`.
    ///
    /// Returns fewer than `len` bytes only when the end of the data is
    /// reached. Failures are returned as-is and never retried here.
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>>;

    /// Current size of the underlying data in bytes
    fn size(&mut self) -> io::Result<u64>;
}

/// Chunk reader backed by a file opened once for the process lifetime
#[derive(Debug)]
pub struct FileChunkReader {
    file: File,
}

impl FileChunkReader {
    /// Open `path` for paging
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source: io::Error| PagerError::FileOpen {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).map_err(open_err)?;
        let metadata = file.metadata().map_err(open_err)?;
        if metadata.is_dir() {
            return Err(open_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }

        tracing::info!("Opened {:?} ({} bytes)", path, metadata.len());
        Ok(Self { file })
    }
}

impl ChunkReader for FileChunkReader {
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf = Vec::with_capacity(len);
        // `take` + `read_to_end` keeps reading through short reads until
        // either `len` bytes arrived or the file ended.
        (&mut self.file).take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn size(&mut self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}

/// In-memory chunk reader.
///
/// Clones share the same bytes, so a test can keep one handle to append to
/// or truncate the "file" while the pager reads through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryChunkReader {
    data: Arc<Mutex<Vec<u8>>>,
    failing: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
}

impl MemoryChunkReader {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data.into())),
            ..Self::default()
        }
    }

    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append bytes to the end of the data (simulates a writer process)
    pub fn append(&self, more: &[u8]) {
        self.bytes().extend_from_slice(more);
    }

    /// Cut the data down to `len` bytes
    pub fn truncate(&self, len: usize) {
        self.bytes().truncate(len);
    }

    /// Replace the whole contents
    pub fn set_contents(&self, data: impl Into<Vec<u8>>) {
        *self.bytes() = data.into();
    }

    /// Make every subsequent read and stat fail until switched off again
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `read_at` calls served so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> io::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected read failure"));
        }
        Ok(())
    }
}

impl ChunkReader for MemoryChunkReader {
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.check_failure()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let data = self.bytes();
        let start = (offset as usize).min(data.len());
        let end = start.saturating_add(len).min(data.len());
        Ok(data[start..end].to_vec())
    }

    fn size(&mut self) -> io::Result<u64> {
        self.check_failure()?;
        Ok(self.bytes().len() as u64)
    }
}
