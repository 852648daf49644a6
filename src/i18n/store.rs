//! File store: the filesystem capability the cache polls on each access.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of locale file metadata and content.
///
/// Implementations own no cache state. `modified` returns the modification
/// time in whole seconds since the Unix epoch; a missing file is reported as
/// an `io::Error` of kind `NotFound`.
pub trait FileStore: Send + Sync {
    fn modified(&self, path: &str) -> io::Result<i64>;

    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// `FileStore` backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FileStore for FsStore {
    fn modified(&self, path: &str) -> io::Result<i64> {
        let modified = std::fs::metadata(path)?.modified()?;
        Ok(unix_seconds(modified))
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Convert a `SystemTime` to whole seconds relative to the Unix epoch.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_unix_seconds_after_epoch() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(unix_seconds(time), 1_700_000_000);
    }

    #[test]
    fn test_unix_seconds_before_epoch() {
        let time = UNIX_EPOCH - Duration::from_secs(60);
        assert_eq!(unix_seconds(time), -60);
    }

    #[test]
    fn test_fs_store_reads_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("en");
        std::fs::write(&path, r#"{"hi":"hello"}"#).expect("Failed to write locale");

        let store = FsStore;
        let path = path.to_str().unwrap();
        assert_eq!(store.read(path).unwrap(), br#"{"hi":"hello"}"#.to_vec());
        assert!(store.modified(path).unwrap() > 0);
    }

    #[test]
    fn test_fs_store_reports_modified_time() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("fr");
        std::fs::write(&path, "{}").expect("Failed to write locale");

        let file = std::fs::File::options()
            .write(true)
            .open(&path)
            .expect("Failed to open locale");
        file.set_modified(UNIX_EPOCH + Duration::from_secs(1_000))
            .expect("Failed to set mtime");

        assert_eq!(FsStore.modified(path.to_str().unwrap()).unwrap(), 1_000);
    }

    #[test]
    fn test_fs_store_missing_file_is_not_found() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("xx");
        let path = path.to_str().unwrap();

        let stat = FsStore.modified(path).unwrap_err();
        assert_eq!(stat.kind(), io::ErrorKind::NotFound);
        let read = FsStore.read(path).unwrap_err();
        assert_eq!(read.kind(), io::ErrorKind::NotFound);
    }
}
