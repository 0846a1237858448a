//! Wizard progress indicator
//!
//! | Step | Label |
//! |------|-------|
//! | Compose | "1 · Write" |
//! | Preview | "2 · Preview" |
//! | Share | "3 · Share" |

use dioxus::prelude::*;
use valentine_core::WizardStep;

const STEPS: [(WizardStep, &str); 3] = [
    (WizardStep::Compose, "1 · Write"),
    (WizardStep::Preview, "2 · Preview"),
    (WizardStep::Share, "3 · Share"),
];

/// Position of a step in the flow
fn ordinal(step: WizardStep) -> usize {
    match step {
        WizardStep::Compose => 0,
        WizardStep::Preview => 1,
        WizardStep::Share => 2,
    }
}

/// Three dots with labels; done and current steps are highlighted.
#[component]
pub fn StepIndicator(step: WizardStep) -> Element {
    let current = ordinal(step);

    rsx! {
        ol { class: "step-indicator",
            for (s, label) in STEPS {
                li {
                    key: "{label}",
                    class: match ordinal(s).cmp(&current) {
                        std::cmp::Ordering::Less => "step done",
                        std::cmp::Ordering::Equal => "step current",
                        std::cmp::Ordering::Greater => "step",
                    },
                    span { class: "step-dot" }
                    span { class: "step-label", "{label}" }
                }
            }
        }
    }
}
