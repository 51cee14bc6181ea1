use std::path::PathBuf;
use std::sync::Arc;

use rfd::AsyncFileDialog;
use thiserror::Error;

pub const DEFAULT_FILE_NAME: &str = "untitled.apbl";

#[derive(Debug, Clone, Error)]
pub enum FileError {
    #[error("dialog closed")]
    Cancelled,

    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

fn apbl_dialog() -> AsyncFileDialog {
    AsyncFileDialog::new()
        .add_filter("APBL source", &["apbl"])
        .add_filter("All files", &["*"])
}

pub async fn open_file() -> Result<(PathBuf, String), FileError> {
    let handle = apbl_dialog()
        .set_title("Open File")
        .pick_file()
        .await
        .ok_or(FileError::Cancelled)?;
    let path = handle.path().to_path_buf();
    let contents = read_file(path.clone()).await?;
    Ok((path, contents))
}

pub async fn read_file(path: PathBuf) -> Result<String, FileError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| FileError::Io {
            path,
            source: Arc::new(e),
        })
}

/// Writes to `path`, asking for a destination first when there is none.
pub async fn save_file(path: Option<PathBuf>, contents: String) -> Result<PathBuf, FileError> {
    let path = match path {
        Some(path) => path,
        None => apbl_dialog()
            .set_title("Save")
            .set_file_name(DEFAULT_FILE_NAME)
            .save_file()
            .await
            .map(|h| h.path().to_path_buf())
            .ok_or(FileError::Cancelled)?,
    };
    write_file(path, contents).await
}

pub async fn write_file(path: PathBuf, contents: String) -> Result<PathBuf, FileError> {
    match tokio::fs::write(&path, contents).await {
        Ok(()) => Ok(path),
        Err(e) => Err(FileError::Io {
            path,
            source: Arc::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booking.apbl");
        let written = write_file(path.clone(), "book(1).".into()).await.unwrap();
        assert_eq!(written, path);
        assert_eq!(read_file(path).await.unwrap(), "book(1).");
    }

    #[tokio::test]
    async fn read_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.apbl");
        match read_file(path.clone()).await {
            Err(FileError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
