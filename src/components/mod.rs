//! UI Components for Valentine Card Studio.
//!
//! One component per wizard step, plus the step indicator and QR code.

mod compose;
mod preview;
mod qr_code;
mod share;
mod step_indicator;

pub use compose::ComposeStep;
pub use preview::PreviewStep;
pub use qr_code::QrCodeDisplay;
pub use share::ShareStep;
pub use step_indicator::StepIndicator;
