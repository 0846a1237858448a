//! Delivery collaborators: where finished artifacts and links go.
//!
//! The binaries plug in OS-backed implementations such as save dialogs. Core
//! ships a directory sink, in-memory doubles and, with the `system-clipboard`
//! feature, the OS clipboard.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use crate::error::{CardError, CardResult};
use crate::export::ExportArtifact;

/// Receives a finished artifact and hands it to the user
#[async_trait]
pub trait FileSink: Send + Sync {
    async fn save(&self, artifact: ExportArtifact) -> CardResult<()>;
}

/// Writes text to a clipboard
pub trait Clipboard {
    fn set_text(&self, text: &str) -> CardResult<()>;
}

/// Saves artifacts into a directory under their suggested filename
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where an artifact with this filename ends up
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn save(&self, artifact: ExportArtifact) -> CardResult<()> {
        let path = self.path_for(&artifact.filename);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CardError::DeliveryFailed(format!("{}: {}", self.dir.display(), e)))?;

        // write next to the target, then rename, so a failed write leaves no partial file
        let partial = self.dir.join(format!(".{}.part", artifact.filename));
        if let Err(e) = tokio::fs::write(&partial, &artifact.bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(CardError::DeliveryFailed(format!("{}: {}", path.display(), e)));
        }
        tokio::fs::rename(&partial, &path)
            .await
            .map_err(|e| CardError::DeliveryFailed(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), mime = artifact.mime_type, "Saved card");
        Ok(())
    }
}

/// Keeps delivered artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<ExportArtifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<ExportArtifact> {
        self.saved.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.saved.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.lock().is_empty()
    }
}

#[async_trait]
impl FileSink for MemorySink {
    async fn save(&self, artifact: ExportArtifact) -> CardResult<()> {
        self.saved.lock().push(artifact);
        Ok(())
    }
}

/// In-memory clipboard, optionally refusing writes
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write, like a denied permission
    pub fn denied() -> Self {
        Self {
            text: Mutex::new(None),
            deny: true,
        }
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> CardResult<()> {
        if self.deny {
            return Err(CardError::DeliveryFailed("Clipboard permission denied".to_string()));
        }
        *self.text.lock() = Some(text.to_string());
        Ok(())
    }
}

/// OS clipboard via arboard
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> CardResult<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|e| CardError::DeliveryFailed(format!("Clipboard: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            bytes: vec![1, 2, 3],
            mime_type: "image/png",
            filename: "valentine-card-2026-02-14.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));

        sink.save(artifact()).await.unwrap();

        let path = sink.path_for("valentine-card-2026-02-14.png");
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
        let leftovers: Vec<_> = std::fs::read_dir(sink.dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_directory_sink_reports_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let err = DirectorySink::new(&blocker).save(artifact()).await.unwrap_err();
        assert!(matches!(err, CardError::DeliveryFailed(_)));
    }

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        clipboard.set_text("hello").unwrap();
        assert_eq!(clipboard.text().as_deref(), Some("hello"));

        let denied = MemoryClipboard::denied();
        assert!(matches!(
            denied.set_text("hello").unwrap_err(),
            CardError::DeliveryFailed(_)
        ));
        assert_eq!(denied.text(), None);
    }

    #[cfg(feature = "system-clipboard")]
    #[test]
    fn test_system_clipboard_is_shared_clipboard() {
        fn copy_with<C: Clipboard + ?Sized>(_: &C) {}
        copy_with(&SystemClipboard);
        let boxed: Box<dyn Clipboard> = Box::new(SystemClipboard);
        copy_with(boxed.as_ref());
    }
}
