//! Preview step: the rendered card and the export buttons.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use dioxus::prelude::*;
use valentine_core::{ExportFormat, ACK_DURATION};

use crate::context::{use_notice, use_pipeline, use_wizard};
use crate::delivery::SaveDialogSink;

/// Encode PNG bytes as a data URL usable as an img src.
fn png_data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

fn button_label(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Png => "Download PNG",
        ExportFormat::Jpeg => "Download JPEG",
        ExportFormat::Document => "Download PDF",
    }
}

/// Shows the card exactly as it exports and offers PNG, JPEG and PDF.
///
/// The preview is the PNG export itself, so what the user sees is what they
/// download. Only one export runs at a time, and the step cannot change
/// until it finishes.
#[component]
pub fn PreviewStep() -> Element {
    let mut wizard = use_wizard();
    let mut notice = use_notice();
    let pipeline = use_pipeline();

    // Re-render only when the card itself changes
    let card = use_memo(move || wizard.read().card().clone());

    let preview_pipeline = pipeline.clone();
    let preview = use_resource(move || {
        let card = card();
        let pipeline = preview_pipeline.clone();
        async move {
            pipeline
                .export(&card, ExportFormat::Png)
                .await
                .map(|artifact| png_data_url(&artifact.bytes))
        }
    });

    let export = use_callback(move |format: ExportFormat| {
        let card = match wizard.write().begin_export(format) {
            Ok(card) => card,
            Err(e) => {
                notice.set(Some(e.user_notice().to_string()));
                return;
            }
        };
        notice.set(None);

        let pipeline = pipeline.clone();
        spawn(async move {
            let result = pipeline.deliver(&card, format, &SaveDialogSink).await;
            wizard.write().finish_export(&result);
            match result {
                Ok(filename) => {
                    tracing::info!("Delivered {}", filename);
                    // Reset delivered state after the acknowledgment window
                    tokio::time::sleep(ACK_DURATION).await;
                    wizard.write().clear_expired();
                }
                Err(e) => {
                    tracing::warn!("Export failed: {}", e);
                    notice.set(Some(e.user_notice().to_string()));
                }
            }
        });
    });

    let exporting = wizard.read().exporting();
    let delivered = wizard.read().is_delivered();

    let preview_view = match &*preview.read() {
        Some(Ok(url)) => rsx! {
            img { class: "card-preview", src: "{url}", alt: "Card preview" }
        },
        Some(Err(e)) => {
            let reason = e.user_notice();
            rsx! {
                div { class: "card-preview placeholder", "{reason}" }
            }
        }
        None => rsx! {
            div { class: "card-preview placeholder", "Rendering…" }
        },
    };

    rsx! {
        section { class: "preview-step",
            div { class: "preview-frame", {preview_view} }

            div { class: "export-buttons",
                for format in ExportFormat::ALL {
                    button {
                        key: "{format}",
                        class: "btn-primary",
                        disabled: exporting.is_some(),
                        onclick: move |_| export.call(format),
                        if exporting == Some(format) { "Saving…" } else { {button_label(format)} }
                    }
                }
            }

            if delivered {
                p { class: "ack", "Card sealed & delivered" }
            }

            div { class: "actions",
                button {
                    class: "btn-secondary",
                    disabled: exporting.is_some(),
                    onclick: move |_| {
                        if let Err(e) = wizard.write().back() {
                            notice.set(Some(e.to_string()));
                        }
                    },
                    "Edit"
                }
                button {
                    class: "btn-primary",
                    disabled: exporting.is_some(),
                    onclick: move |_| {
                        if let Err(e) = wizard.write().next() {
                            notice.set(Some(e.to_string()));
                        }
                    },
                    "Share"
                }
            }
        }
    }
}
