use std::sync::Arc;

use dioxus::prelude::*;
use valentine_core::{ExportPipeline, WizardController, WizardStep};

use crate::components::{ComposeStep, PreviewStep, ShareStep, StepIndicator};
use crate::context::{get_card_config, Notice, SharedPipeline};
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Provides global styles, the wizard context and the current step.
#[component]
pub fn App() -> Element {
    let config = get_card_config();
    let origin = config.origin.clone();

    let wizard: Signal<WizardController> =
        use_signal(move || WizardController::new().with_origin(&origin));
    let pipeline: SharedPipeline = use_hook(move || Arc::new(ExportPipeline::new().with_config(config)));
    let notice: Signal<Option<String>> = use_signal(|| None);

    // Provide wizard state to all child components
    use_context_provider(|| wizard);
    use_context_provider(|| pipeline);
    use_context_provider(|| Notice(notice));

    let step = wizard.read().step();

    rsx! {
        style { {GLOBAL_STYLES} }
        div { class: "studio",
            header { class: "studio-header",
                h1 { class: "studio-title", "Valentine Card Studio" }
                StepIndicator { step }
            }
            main { class: "studio-body",
                match step {
                    WizardStep::Compose => rsx! { ComposeStep {} },
                    WizardStep::Preview => rsx! { PreviewStep {} },
                    WizardStep::Share => rsx! { ShareStep {} },
                }
            }
            if let Some(message) = notice() {
                p { class: "notice", role: "alert", "{message}" }
            }
        }
    }
}
