//! Error types for Valentine Card Studio

use thiserror::Error;

use crate::export::ExportFormat;

/// Main error type for card operations
#[derive(Error, Debug)]
pub enum CardError {
    /// Theme name outside the closed theme set
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// Alignment name outside the closed alignment set
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    /// Share link could not be parsed
    #[error("Decode error: {0}")]
    Decode(String),

    /// Rasterization produced no usable surface, or the surface was missing
    #[error("Render unavailable: {0}")]
    RenderUnavailable(String),

    /// File save or clipboard write was rejected
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// Edit would push the message past its limit
    #[error("Message too long: {len} of {max} characters")]
    MessageTooLong { len: usize, max: usize },

    /// Wizard transition guard refused the step
    #[error("Guard rejected: {0}")]
    GuardRejected(String),

    /// Another export is still running
    #[error("Export already in progress: {0}")]
    ExportInProgress(ExportFormat),

    /// Action is not available in the current wizard step
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Image or document encoder failure
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CardError {
    /// The single notice shown to the user when an export fails.
    pub fn user_notice(&self) -> &'static str {
        match self {
            CardError::ExportInProgress(_) => "An export is already running. Please wait.",
            CardError::GuardRejected(_) => "Add a recipient and a message first.",
            _ => "Failed to download card. Please try again.",
        }
    }
}

/// Result type alias using CardError
pub type CardResult<T> = Result<T, CardError>;
