//! File storage for uploaded blobs (course covers, certificates).
//!
//! Accepts bytes and returns a stable reference path relative to the media
//! root. Filenames are sanitized and prefixed with a short random id so
//! re-uploads of the same name never collide. No content validation is
//! performed here.

use std::path::PathBuf;

use uuid::Uuid;

/// Filesystem-backed blob store rooted at the configured media directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    /// Store `bytes` under `subdir` and return the relative reference path.
    pub async fn save(
        &self,
        subdir: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, std::io::Error> {
        let prefix = Uuid::new_v4().simple().to_string();
        let name = format!("{}_{}", &prefix[..8], sanitize_filename(filename));

        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), bytes).await?;

        Ok(format!("{subdir}/{name}"))
    }
}

/// Strip path separators and control characters from an uploaded filename.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_filename("cert-01.pdf"), "cert-01.pdf");
    }

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._.._etc_passwd");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[tokio::test]
    async fn save_returns_relative_path_and_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let path = store
            .save("courses/7", "cover.png", b"not-a-real-png")
            .await
            .unwrap();
        assert!(path.starts_with("courses/7/"));
        assert!(path.ends_with("_cover.png"));

        let on_disk = tokio::fs::read(dir.path().join(&path)).await.unwrap();
        assert_eq!(on_disk, b"not-a-real-png");
    }

    #[tokio::test]
    async fn save_never_collides_on_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let a = store.save("certs", "cert.pdf", b"a").await.unwrap();
        let b = store.save("certs", "cert.pdf", b"b").await.unwrap();
        assert_ne!(a, b);
    }
}
