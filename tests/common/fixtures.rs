// Test file fixtures

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

/// Lines in the shared big log
pub const BIG_LOG_LINES: usize = 300_000;

/// One line of the shared big log, without its newline
pub fn big_log_line(index: usize) -> String {
    format!("entry {:08} {}", index, "x".repeat(60))
}

/// Lines reading "line N" for every N in `range`
pub fn numbered_lines(range: std::ops::Range<usize>) -> String {
    range.map(|i| format!("line {i}\n")).collect()
}

/// Manages temporary test files
pub struct TestFixture {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestFixture {
    /// Create a new temporary file with given content
    pub fn new(filename: &str, content: &str) -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join(filename);

        let mut file = fs::File::create(&path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        Ok(TestFixture {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Create an empty temporary file
    pub fn empty(filename: &str) -> std::io::Result<Self> {
        Self::new(filename, "")
    }

    /// A log of `count` numbered lines
    pub fn numbered_log(filename: &str, count: usize) -> std::io::Result<Self> {
        Self::new(filename, &numbered_lines(0..count))
    }

    /// Append to the file the way a logging process would
    pub fn append(&self, content: &str) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    }

    /// Replace the whole file (truncate and write, like log rotation)
    pub fn rewrite(&self, content: &str) -> std::io::Result<()> {
        fs::write(&self.path, content)
    }

    /// Read the current content of the file
    pub fn read_content(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// Get or create a shared large log (about 23MB) for all tests.
    /// Uses locking to ensure only one test creates the file, even when tests run in parallel.
    ///
    /// The file persists across test runs in the system temp directory and is reused.
    pub fn big_log() -> std::io::Result<PathBuf> {
        static BIG_LOG_INIT: OnceLock<Mutex<PathBuf>> = OnceLock::new();

        let path_mutex = BIG_LOG_INIT.get_or_init(|| {
            let path = std::env::temp_dir().join("fresh-pager-test-BIG.log");
            Mutex::new(path)
        });

        // Hold the lock while generating so other tests wait for a complete file
        let path = path_mutex.lock().unwrap();
        let expected_len = (big_log_line(0).len() + 1) * BIG_LOG_LINES;

        let up_to_date = fs::metadata(&*path)
            .map(|meta| meta.len() == expected_len as u64)
            .unwrap_or(false);
        if !up_to_date {
            eprintln!("Generating shared large test log (one-time)...");
            let mut file = std::io::BufWriter::new(fs::File::create(&*path)?);
            for i in 0..BIG_LOG_LINES {
                writeln!(file, "{}", big_log_line(i))?;
            }
            file.flush()?;
            eprintln!("Generated shared large test log at {path:?}");
        }

        Ok(path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_new() {
        let fixture = TestFixture::new("test.txt", "hello world").unwrap();
        assert_eq!(fixture.read_content().unwrap(), "hello world");
    }

    #[test]
    fn test_fixture_empty() {
        let fixture = TestFixture::empty("empty.txt").unwrap();
        assert_eq!(fixture.read_content().unwrap(), "");
    }

    #[test]
    fn test_fixture_append_and_rewrite() {
        let fixture = TestFixture::numbered_log("app.log", 2).unwrap();
        fixture.append("line 2\n").unwrap();
        assert_eq!(fixture.read_content().unwrap(), "line 0\nline 1\nline 2\n");

        fixture.rewrite("new\n").unwrap();
        assert_eq!(fixture.read_content().unwrap(), "new\n");
    }
}
