//! Valentine Card Studio Core Library
//!
//! Compose a greeting card, share it as a self-contained link, and export it
//! as PNG, JPEG or a single-page PDF.
//!
//! ## Overview
//!
//! A card is a small value ([`CardState`]): recipient, message, theme,
//! alignment and font. Everything else is derived from it:
//!
//! - **Links**: [`LinkCodec`] maps a card to query parameters and back
//! - **Rendering**: [`CardRenderer`] lays the card out on a 400×500 surface
//! - **Export**: [`ExportPipeline`] rasterizes at 2× and encodes the result
//! - **Wizard**: [`WizardController`] drives compose → preview → share
//!
//! ## Quick Start
//!
//! ```ignore
//! use valentine_core::{CardState, DirectorySink, ExportFormat, ExportPipeline, WizardController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut wizard = WizardController::new();
//!     wizard.set_recipient("Alex");
//!     wizard.set_message("Hi & bye")?;
//!     wizard.next()?;
//!
//!     let pipeline = ExportPipeline::new();
//!     let sink = DirectorySink::new(".");
//!     wizard.export(&pipeline, &sink, ExportFormat::Png).await?;
//!
//!     wizard.next()?;
//!     println!("{}", wizard.share_link());
//!     Ok(())
//! }
//! ```

pub mod card;
pub mod config;
pub mod delivery;
pub mod document;
pub mod error;
pub mod export;
pub mod link;
pub mod raster;
pub mod render;
pub mod stage;
pub mod wizard;

// Re-exports
pub use card::{Alignment, CardState, Face, FontFamily, Theme, MAX_MESSAGE_LEN};
pub use config::CardConfig;
pub use delivery::{Clipboard, DirectorySink, FileSink, MemoryClipboard, MemorySink};
#[cfg(feature = "system-clipboard")]
pub use delivery::SystemClipboard;
pub use error::{CardError, CardResult};
pub use export::{ExportArtifact, ExportFormat, ExportPipeline};
pub use link::{LinkCodec, ShareLink};
pub use raster::{Rasterizer, SoftwareRasterizer, RENDER_SCALE};
pub use render::{CardRenderer, OffscreenSurface, SURFACE_HEIGHT, SURFACE_WIDTH};
pub use stage::{AttachedSurface, Stage, SurfaceId};
pub use wizard::{WizardController, WizardStep, ACK_DURATION};
