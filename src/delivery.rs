//! OS-backed delivery: the native save dialog.

use async_trait::async_trait;
use rfd::FileDialog;
use valentine_core::{CardError, CardResult, ExportArtifact, FileSink};

/// Asks the user where to save, then writes the artifact there
pub struct SaveDialogSink;

#[async_trait]
impl FileSink for SaveDialogSink {
    async fn save(&self, artifact: ExportArtifact) -> CardResult<()> {
        let filename = artifact.filename.clone();
        let extension = filename.rsplit('.').next().unwrap_or_default().to_string();

        // Open save dialog (blocking, but in spawn so UI stays responsive)
        let path = tokio::task::spawn_blocking(move || {
            let mut dialog = FileDialog::new()
                .set_title("Save card")
                .set_file_name(&filename)
                .add_filter(&extension, &[extension.as_str()]);
            if let Some(dir) = dirs::download_dir() {
                dialog = dialog.set_directory(dir);
            }
            dialog.save_file()
        })
        .await
        .map_err(|e| CardError::DeliveryFailed(format!("Save dialog failed: {}", e)))?;

        let Some(path) = path else {
            return Err(CardError::DeliveryFailed("Save cancelled".to_string()));
        };

        tokio::fs::write(&path, &artifact.bytes)
            .await
            .map_err(|e| CardError::DeliveryFailed(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), mime = artifact.mime_type, "Saved card");
        Ok(())
    }
}
