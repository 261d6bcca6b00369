//! File access behind a trait so config, record and rule loading can be
//! exercised against an in-memory store.

use std::io;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or replace the file at `path`.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

pub fn default_fs() -> &'static OsFs {
    static INSTANCE: OsFs = OsFs;
    &INSTANCE
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory files keyed by path.
    #[derive(Debug, Default)]
    pub struct MockFs {
        files: Mutex<BTreeMap<PathBuf, String>>,
    }

    impl MockFs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.into(), content.into());
            self
        }

        pub fn content(&self, path: &Path) -> Option<String> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl FileSystem for MockFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.content(path).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })
        }

        fn write(&self, path: &Path, content: &str) -> io::Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_missing_file_is_not_found() {
            let fs = MockFs::new();
            let err = fs.read_to_string(Path::new("records.json")).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::NotFound);
            assert!(!fs.exists(Path::new("records.json")));
        }

        #[test]
        fn test_write_replaces_content() {
            let fs = MockFs::new().with_file("rules.toml", "old");
            fs.write(Path::new("rules.toml"), "new").unwrap();
            assert_eq!(fs.read_to_string(Path::new("rules.toml")).unwrap(), "new");
        }
    }
}
