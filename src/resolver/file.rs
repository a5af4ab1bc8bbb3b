use super::Resolver;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolves a locator as a local file path, absolute or relative to the
/// working directory.
///
/// A missing file is not an error here: the locator may well be a URL or a
/// repository shorthand meant for a later resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResolver;

impl FileResolver {
    fn absolute(locator: &str) -> Result<PathBuf> {
        std::path::absolute(Path::new(locator)).map_err(|e| Error::fetch_failed(locator, e))
    }
}

impl Resolver for FileResolver {
    fn resolve(&self, locator: &str) -> Result<Vec<u8>> {
        if locator.is_empty() {
            return Err(Error::NotApplicable);
        }

        let path = Self::absolute(locator)?;
        match std::fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Err(Error::NotApplicable)
            }
            Err(e) => Err(Error::fetch_failed(path.display().to_string(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\nBody\n").unwrap();

        let content = FileResolver.resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(content, b"# Title\nBody\n");
    }

    #[test]
    fn test_missing_file_is_not_applicable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = FileResolver.resolve(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::NotApplicable));
    }

    #[test]
    fn test_path_through_a_file_is_not_applicable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.md");
        std::fs::write(&file, "text").unwrap();

        let nested = file.join("child.md");
        let err = FileResolver.resolve(nested.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::NotApplicable));
    }

    #[test]
    fn test_empty_locator_is_not_applicable() {
        let err = FileResolver.resolve("").unwrap_err();
        assert!(matches!(err, Error::NotApplicable));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_is_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();

        let err = FileResolver.resolve(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::FetchFailed { .. }));
    }
}
