//! Wizard context provider for Valentine Card Studio.
//!
//! Provides the wizard controller, the export pipeline and the notice line to
//! all components via use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In App component
//! use_context_provider(|| wizard);
//!
//! // In child components
//! let wizard = use_wizard();
//! ```

use std::sync::Arc;

use dioxus::prelude::*;
use valentine_core::{CardConfig, ExportPipeline, WizardController};

/// Shared pipeline type for context.
///
/// Exports run in spawned tasks that outlive a single render, so the
/// pipeline is reference counted.
pub type SharedPipeline = Arc<ExportPipeline>;

/// One-line message shown under the wizard (export failures, guard hints)
#[derive(Clone, Copy)]
pub struct Notice(pub Signal<Option<String>>);

/// Get the card configuration chosen at startup.
pub fn get_card_config() -> CardConfig {
    crate::get_card_config()
}

/// Hook to access the wizard controller from context.
///
/// # Example
///
/// ```ignore
/// let mut wizard = use_wizard();
///
/// wizard.write().set_recipient("Alex");
/// let step = wizard.read().step();
/// ```
pub fn use_wizard() -> Signal<WizardController> {
    use_context::<Signal<WizardController>>()
}

/// Hook to access the export pipeline from context.
pub fn use_pipeline() -> SharedPipeline {
    use_context::<SharedPipeline>()
}

/// Hook to access the notice line from context.
pub fn use_notice() -> Signal<Option<String>> {
    use_context::<Notice>().0
}
