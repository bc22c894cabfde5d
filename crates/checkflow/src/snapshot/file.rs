//! Snapshot file transfer.
//!
//! Import reads the whole file asynchronously before anything is decoded, so
//! a read failure or a malformed document never touches the graph. Export
//! uses the temp-file-then-rename pattern:
//!
//! 1. The document is written to `<name>.tmp` next to the target
//! 2. The temporary file is flushed
//! 3. The temporary file is renamed over the target
//!
//! If the process dies before step 3 the previous export stays intact.

use super::{decode, Snapshot};
use crate::error::{Result, SnapshotError};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// Default file name offered for exports
pub const EXPORT_FILE_NAME: &str = "flow-state.json";

/// Reject paths that do not end in `.json` (case-insensitive).
///
/// # Errors
///
/// Returns `SnapshotError::UnsupportedFile` for any other extension.
pub fn ensure_json_extension(path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(SnapshotError::UnsupportedFile(path.to_path_buf()).into())
    }
}

/// Read and decode a snapshot file.
///
/// # Errors
///
/// - `SnapshotError::UnsupportedFile` if the path is not a `.json` file
/// - `SnapshotError::Read` if the file cannot be read as UTF-8 text
/// - `SnapshotError::Malformed` if the content is not a valid snapshot
pub async fn read_snapshot(path: &Path) -> Result<Snapshot> {
    ensure_json_extension(path)?;

    let text = fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = text.len(), "Read snapshot file");

    decode(&text)
}

/// Atomically write an encoded snapshot to `path`.
///
/// # Errors
///
/// - `SnapshotError::UnsupportedFile` if the path is not a `.json` file
/// - `SnapshotError::Write` if the temporary file cannot be written or renamed
pub async fn write_snapshot_atomic(path: &Path, document: &str) -> Result<()> {
    ensure_json_extension(path)?;

    let temp_path = path.with_extension("json.tmp");
    let write_err = |source: std::io::Error| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(&temp_path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(document.as_bytes())
        .await
        .map_err(write_err)?;
    writer.write_all(b"\n").await.map_err(write_err)?;
    writer.flush().await.map_err(write_err)?;
    drop(writer);

    fs::rename(&temp_path, path).await.map_err(write_err)?;
    debug!(path = %path.display(), "Wrote snapshot file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[rstest]
    #[case::lowercase("flow-state.json", true)]
    #[case::uppercase("FLOW.JSON", true)]
    #[case::jsonl("flow.jsonl", false)]
    #[case::text("notes.txt", false)]
    #[case::no_extension("flow", false)]
    fn test_ensure_json_extension(#[case] name: &str, #[case] accepted: bool) {
        assert_eq!(ensure_json_extension(&PathBuf::from(name)).is_ok(), accepted);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(EXPORT_FILE_NAME);

        write_snapshot_atomic(&path, r#"{"nodes": []}"#).await.unwrap();
        let snapshot = read_snapshot(&path).await.unwrap();

        assert!(snapshot.nodes.is_empty());
        assert!(!temp_dir.path().join("flow-state.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_snapshot(&temp_dir.path().join("absent.json")).await;
        assert!(matches!(
            result,
            Err(Error::Snapshot(SnapshotError::Read { .. }))
        ));
    }

    #[tokio::test]
    async fn test_read_rejects_non_json_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flow.txt");
        tokio::fs::write(&path, r#"{"nodes": []}"#).await.unwrap();

        let result = read_snapshot(&path).await;
        assert!(matches!(
            result,
            Err(Error::Snapshot(SnapshotError::UnsupportedFile(_)))
        ));
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        tokio::fs::write(&path, "old").await.unwrap();

        write_snapshot_atomic(&path, r#"{"nodes": []}"#).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "{\"nodes\": []}\n");
    }
}
