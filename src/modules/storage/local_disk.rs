use std::path::PathBuf;

use tracing::debug;

use crate::core::error::{AppError, Result};

/// Local-disk storage for uploaded files.
///
/// Files land under a single root directory keyed by their sanitized
/// original name. Writing the same name twice truncates the previous
/// content; callers that need both versions must record them separately.
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    /// Create a storage handle rooted at `root`. No filesystem access
    /// happens until `ensure_root_exists` or the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it is missing. No-op when present.
    pub async fn ensure_root_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write `data` to `<root>/<sanitized file_name>`, creating or
    /// truncating the target, and return the location recorded for later
    /// reads.
    pub async fn write(&self, file_name: &str, data: &[u8]) -> Result<String> {
        let safe_name = sanitize_file_name(file_name)?;
        self.ensure_root_exists().await?;

        let path = self.root.join(&safe_name);
        tokio::fs::write(&path, data).await?;

        debug!("Wrote {} bytes to {}", data.len(), path.display());

        Ok(path.to_string_lossy().into_owned())
    }

    /// Read a previously written file back as bytes. A location whose file
    /// was removed externally surfaces as an I/O error.
    pub async fn read(&self, location: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(location).await?)
    }
}

/// Reduce a caller-supplied filename to its base name.
///
/// Uploaded filenames are attacker-controlled; only the final path segment
/// is honored so a crafted name cannot escape the upload directory.
pub fn sanitize_file_name(file_name: &str) -> Result<String> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(AppError::BadRequest(format!(
            "Invalid filename: '{}'",
            file_name
        )));
    }

    Ok(base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name("photo.jpg").unwrap(), "photo.jpg");
        assert_eq!(sanitize_file_name(" photo.jpg ").unwrap(), "photo.jpg");
        assert_eq!(sanitize_file_name(".hidden").unwrap(), ".hidden");
    }

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_file_name("a/b/c.txt").unwrap(), "c.txt");
        assert_eq!(sanitize_file_name("..\\..\\boot.ini").unwrap(), "boot.ini");
    }

    #[test]
    fn sanitize_rejects_empty_and_dot_names() {
        assert!(sanitize_file_name("").is_err());
        assert!(sanitize_file_name("uploads/").is_err());
        assert!(sanitize_file_name(".").is_err());
        assert!(sanitize_file_name("..").is_err());
        assert!(sanitize_file_name("a/b/").is_err());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path().join("uploads"));

        let location = storage.write("photo.jpg", b"jpeg bytes").await.unwrap();

        assert!(location.ends_with("photo.jpg"));
        assert_eq!(storage.read(&location).await.unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn write_same_name_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path().join("uploads"));

        let first = storage.write("photo.jpg", b"first").await.unwrap();
        let second = storage.write("photo.jpg", b"second").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(storage.read(&second).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn traversal_names_stay_inside_the_root() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path().join("uploads"));

        let location = storage.write("../../escape.bin", b"data").await.unwrap();

        assert!(dir.path().join("uploads").join("escape.bin").exists());
        assert!(!dir.path().join("escape.bin").exists());
        assert!(location.ends_with("escape.bin"));
    }

    #[tokio::test]
    async fn read_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path().join("uploads"));

        let missing = dir.path().join("uploads").join("nope.bin");
        let err = storage
            .read(missing.to_str().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
    }
}
