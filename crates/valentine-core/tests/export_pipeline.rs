//! Export pipeline integration tests
//!
//! Exercises rendering, rasterization, encoding and delivery end to end,
//! including failure paths and concurrent exports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use image::RgbImage;
use tokio::sync::Barrier;
use valentine_core::{
    Alignment, CardError, CardResult, CardState, ExportArtifact, ExportFormat, ExportPipeline,
    FileSink, MemorySink, OffscreenSurface, Rasterizer, SoftwareRasterizer, Theme,
    WizardController, WizardStep,
};

fn valentines_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
}

fn sample_card() -> CardState {
    CardState::new("Alex", "Hi & bye", Theme::Dark, Alignment::Right, "serif")
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Raw image stream bytes of the single embedded image
fn pdf_image_stream(pdf: &[u8], len: usize) -> &[u8] {
    let image_dict = find(pdf, b"/Subtype /Image").expect("image xobject");
    let marker = b"stream\n";
    let offset = find(&pdf[image_dict..], marker).expect("image stream");
    let start = image_dict + offset + marker.len();
    &pdf[start..start + len]
}

// ============================================================================
// Test Doubles
// ============================================================================

/// Rasterizer that returns an image without pixels
struct EmptyRasterizer;

#[async_trait]
impl Rasterizer for EmptyRasterizer {
    async fn rasterize(&self, _surface: &OffscreenSurface, _scale: f32) -> CardResult<RgbImage> {
        Ok(RgbImage::new(0, 0))
    }
}

/// Rasterizer that always fails
struct FailingRasterizer;

#[async_trait]
impl Rasterizer for FailingRasterizer {
    async fn rasterize(&self, _surface: &OffscreenSurface, _scale: f32) -> CardResult<RgbImage> {
        Err(CardError::RenderUnavailable("no graphics context".to_string()))
    }
}

/// Rasterizer that waits at a shared barrier before painting
struct GatedRasterizer {
    gate: Arc<Barrier>,
}

#[async_trait]
impl Rasterizer for GatedRasterizer {
    async fn rasterize(&self, surface: &OffscreenSurface, scale: f32) -> CardResult<RgbImage> {
        self.gate.wait().await;
        SoftwareRasterizer.rasterize(surface, scale).await
    }
}

/// Sink that rejects every artifact
struct RejectingSink;

#[async_trait]
impl FileSink for RejectingSink {
    async fn save(&self, _artifact: ExportArtifact) -> CardResult<()> {
        Err(CardError::DeliveryFailed("save dialog cancelled".to_string()))
    }
}

// ============================================================================
// Artifact Tests
// ============================================================================

#[tokio::test]
async fn test_png_and_pdf_show_same_pixels() {
    let pipeline = ExportPipeline::new();
    let card = CardState::new("Sam", "Always", Theme::Pastel, Alignment::Center, "serif");

    let png = pipeline
        .export_on(&card, ExportFormat::Png, valentines_day())
        .await
        .unwrap();
    let pdf = pipeline
        .export_on(&card, ExportFormat::Document, valentines_day())
        .await
        .unwrap();

    assert_eq!(png.filename, "valentine-card-2026-02-14.png");
    assert_eq!(pdf.filename, "valentine-card.pdf");
    assert_eq!(pdf.mime_type, "application/pdf");
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert!(find(&pdf.bytes, b"/MediaBox [0 0 400 500]").is_some());

    let decoded = image::load_from_memory(&png.bytes).unwrap().to_rgb8();
    assert_eq!((decoded.width(), decoded.height()), (800, 1000));
    let embedded = pdf_image_stream(&pdf.bytes, decoded.as_raw().len());
    assert!(embedded == decoded.as_raw().as_slice(), "PDF pixels differ from PNG");
}

#[tokio::test]
async fn test_export_is_deterministic() {
    let pipeline = ExportPipeline::new();
    let card = sample_card();

    let first = pipeline
        .export_on(&card, ExportFormat::Png, valentines_day())
        .await
        .unwrap();
    let second = pipeline
        .export_on(&card, ExportFormat::Png, valentines_day())
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_theme_changes_pixels() {
    let pipeline = ExportPipeline::new();
    let mut corners = Vec::new();
    for theme in Theme::ALL {
        let card = sample_card().with_theme(theme);
        let png = pipeline
            .export_on(&card, ExportFormat::Png, valentines_day())
            .await
            .unwrap();
        let decoded = image::load_from_memory(&png.bytes).unwrap().to_rgb8();
        corners.push(*decoded.get_pixel(0, 0));
    }
    assert_ne!(corners[0], corners[1]);
    assert_ne!(corners[1], corners[2]);
    assert_ne!(corners[0], corners[2]);
}

#[tokio::test]
async fn test_deliver_hands_artifact_to_sink() {
    let pipeline = ExportPipeline::new();
    let sink = MemorySink::new();

    let filename = pipeline
        .deliver(&sample_card(), ExportFormat::Jpeg, &sink)
        .await
        .unwrap();

    let saved = sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].filename, filename);
    assert_eq!(saved[0].mime_type, "image/jpeg");
    assert!(filename.starts_with("valentine-card-") && filename.ends_with(".jpeg"));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_empty_raster_is_render_unavailable() {
    let pipeline = ExportPipeline::with_rasterizer(EmptyRasterizer);
    let sink = MemorySink::new();

    for format in ExportFormat::ALL {
        let err = pipeline
            .deliver(&sample_card(), format, &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, CardError::RenderUnavailable(_)));
        assert_eq!(err.user_notice(), "Failed to download card. Please try again.");
    }
    assert!(sink.is_empty());
    assert_eq!(pipeline.stage().attached_count(), 0);
}

#[tokio::test]
async fn test_failing_rasterizer_detaches_surface() {
    let _ = tracing_subscriber::fmt::try_init();
    let pipeline = ExportPipeline::with_rasterizer(FailingRasterizer);
    let err = pipeline
        .export(&sample_card(), ExportFormat::Png)
        .await
        .unwrap_err();

    assert!(matches!(err, CardError::RenderUnavailable(_)));
    assert_eq!(pipeline.stage().attached_count(), 0);
    assert_eq!(pipeline.stage().peak_attached(), 1);
}

#[tokio::test]
async fn test_wizard_recovers_from_failed_export() {
    let pipeline = ExportPipeline::with_rasterizer(EmptyRasterizer);
    let sink = MemorySink::new();
    let mut wizard = WizardController::new();
    wizard.set_recipient("Alex");
    wizard.set_message("Hi").unwrap();
    wizard.next().unwrap();

    let err = wizard
        .export(&pipeline, &sink, ExportFormat::Document)
        .await
        .unwrap_err();

    assert!(matches!(err, CardError::RenderUnavailable(_)));
    assert_eq!(wizard.step(), WizardStep::Preview);
    assert_eq!(wizard.exporting(), None);
    assert!(!wizard.is_delivered());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_rejected_save_is_delivery_failed() {
    let pipeline = ExportPipeline::new();
    let mut wizard = WizardController::new();
    wizard.load(sample_card());
    wizard.next().unwrap();

    let err = wizard
        .export(&pipeline, &RejectingSink, ExportFormat::Png)
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::DeliveryFailed(_)));
    assert!(!wizard.is_delivered());
    assert_eq!(pipeline.stage().attached_count(), 0);
}

#[tokio::test]
async fn test_wizard_export_marks_delivered() {
    let pipeline = ExportPipeline::new();
    let sink = MemorySink::new();
    let mut wizard = WizardController::new();
    wizard.load(sample_card());
    wizard.next().unwrap();

    let filename = wizard
        .export(&pipeline, &sink, ExportFormat::Png)
        .await
        .unwrap();
    assert_eq!(sink.saved()[0].filename, filename);
    assert!(wizard.is_delivered());
    assert_eq!(wizard.exporting(), None);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_exports_use_separate_surfaces() {
    let _ = tracing_subscriber::fmt::try_init();
    let gate = Arc::new(Barrier::new(2));
    let pipeline = ExportPipeline::with_rasterizer(GatedRasterizer { gate });
    let left = sample_card().with_alignment(Alignment::Left);
    let right = sample_card().with_alignment(Alignment::Right);

    let (a, b) = tokio::join!(
        pipeline.export_on(&left, ExportFormat::Png, valentines_day()),
        pipeline.export_on(&right, ExportFormat::Png, valentines_day()),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    // both surfaces were attached at the barrier
    assert_eq!(pipeline.stage().peak_attached(), 2);
    assert_eq!(pipeline.stage().attached_count(), 0);
    assert_ne!(a.bytes, b.bytes);

    // each result matches what a solo export of the same card produces
    let solo = ExportPipeline::new();
    let solo_left = solo
        .export_on(&left, ExportFormat::Png, valentines_day())
        .await
        .unwrap();
    let solo_right = solo
        .export_on(&right, ExportFormat::Png, valentines_day())
        .await
        .unwrap();
    assert_eq!(a, solo_left);
    assert_eq!(b, solo_right);
}
