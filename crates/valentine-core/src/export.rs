//! Export pipeline: card → off-screen surface → raster → artifact → delivery.
//!
//! Every export renders and attaches its own surface, so two exports in
//! flight never share one. The attached surface is held until the encoder
//! has read the raster and is detached on every exit path.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use chrono::NaiveDate;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use tracing::{debug, info, warn};

use crate::card::CardState;
use crate::config::CardConfig;
use crate::delivery::FileSink;
use crate::document;
use crate::error::{CardError, CardResult};
use crate::raster::{Rasterizer, SoftwareRasterizer};
use crate::render::{CardRenderer, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::stage::Stage;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
    /// Single-page PDF
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Document];

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Document => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Document => "pdf",
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, ExportFormat::Document)
    }

    /// Suggested filename. Images carry the export date; the document does not.
    pub fn filename(&self, card_title: &str, date: NaiveDate) -> String {
        match self {
            ExportFormat::Png | ExportFormat::Jpeg => format!(
                "{}-{}.{}",
                card_title,
                date.format("%Y-%m-%d"),
                self.extension()
            ),
            ExportFormat::Document => format!("{}.{}", card_title, self.extension()),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "pdf" | "document" => Ok(ExportFormat::Document),
            other => Err(CardError::InvalidOperation(format!(
                "Unknown export format '{}'. Must be one of: png, jpeg, pdf",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encoded card ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: String,
}

/// Drives rendering, rasterization and encoding for one card at a time.
pub struct ExportPipeline<R = SoftwareRasterizer> {
    rasterizer: R,
    stage: Stage,
    config: CardConfig,
}

impl ExportPipeline<SoftwareRasterizer> {
    /// Pipeline with the built-in rasterizer and default configuration
    pub fn new() -> Self {
        Self::with_rasterizer(SoftwareRasterizer)
    }
}

impl Default for ExportPipeline<SoftwareRasterizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rasterizer> ExportPipeline<R> {
    pub fn with_rasterizer(rasterizer: R) -> Self {
        Self {
            rasterizer,
            stage: Stage::new(),
            config: CardConfig::default(),
        }
    }

    /// Use a shared stage (builder pattern)
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Use a specific configuration (builder pattern)
    pub fn with_config(mut self, config: CardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Export a card, dating image filenames with today's local date.
    pub async fn export(&self, card: &CardState, format: ExportFormat) -> CardResult<ExportArtifact> {
        self.export_on(card, format, chrono::Local::now().date_naive()).await
    }

    /// Export a card with an explicit date for the filename.
    ///
    /// # Errors
    ///
    /// - `CardError::RenderUnavailable` if the rasterizer fails or returns no pixels
    /// - `CardError::Encoding` if the image or document encoder fails
    pub async fn export_on(
        &self,
        card: &CardState,
        format: ExportFormat,
        date: NaiveDate,
    ) -> CardResult<ExportArtifact> {
        let attached = self.stage.attach(CardRenderer::render(card));
        debug!(surface = %attached.id(), %format, "Rasterizing card");

        let raster = self
            .rasterizer
            .rasterize(attached.surface(), self.config.scale())
            .await?;
        if raster.width() == 0 || raster.height() == 0 || raster.as_raw().is_empty() {
            warn!(%format, "Rasterizer returned no data");
            return Err(CardError::RenderUnavailable(
                "Rasterizer returned an empty buffer".to_string(),
            ));
        }

        let bytes = match format {
            ExportFormat::Png => encode_png(&raster)?,
            ExportFormat::Jpeg => encode_jpeg(&raster, self.config.jpeg_quality)?,
            ExportFormat::Document => {
                document::single_page_pdf(&raster, SURFACE_WIDTH, SURFACE_HEIGHT)?
            }
        };
        // encoders are done with the raster; release the surface
        drop(attached);

        let artifact = ExportArtifact {
            bytes,
            mime_type: format.mime_type(),
            filename: format.filename(&self.config.card_title, date),
        };
        info!(filename = %artifact.filename, len = artifact.bytes.len(), "Exported card");
        Ok(artifact)
    }

    /// Export and hand the artifact to `sink`, in that order.
    pub async fn deliver<S>(&self, card: &CardState, format: ExportFormat, sink: &S) -> CardResult<String>
    where
        S: FileSink + ?Sized,
    {
        let artifact = self.export(card, format).await?;
        let filename = artifact.filename.clone();
        sink.save(artifact).await?;
        Ok(filename)
    }
}

fn encode_png(raster: &RgbImage) -> CardResult<Vec<u8>> {
    let mut buffer = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| CardError::Encoding(format!("Failed to encode PNG: {}", e)))?;
    Ok(buffer)
}

fn encode_jpeg(raster: &RgbImage, quality: u8) -> CardResult<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(raster)
        .map_err(|e| CardError::Encoding(format!("Failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}
