//! QR code of the share link.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use dioxus::prelude::*;

use crate::theme::colors::{INK, PAPER};

/// Generate QR code data URL from a string.
///
/// Returns a base64-encoded SVG data URL that can be used as an img src.
/// Returns None if QR code generation fails.
fn generate_qr_data_url(data: &str) -> Option<String> {
    use qrcode::render::svg;
    use qrcode::QrCode;

    let code = QrCode::new(data.as_bytes()).ok()?;

    // Render as SVG for crisp scaling
    let svg_string = code
        .render()
        .min_dimensions(200, 200)
        .dark_color(svg::Color(INK))
        .light_color(svg::Color(PAPER))
        .build();

    Some(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg_string)))
}

/// QR code display component.
///
/// Falls back to displaying the raw text if QR generation fails (for
/// example when a long message pushes the link past QR capacity).
#[component]
pub fn QrCodeDisplay(
    /// The data to encode as a QR code
    data: String,
    /// Optional size in pixels (default: 200)
    #[props(default = 200)]
    size: u32,
) -> Element {
    let qr_url = use_memo(use_reactive!(|data| generate_qr_data_url(&data)));

    match qr_url() {
        Some(url) => rsx! {
            div { class: "qr-code-container",
                img {
                    class: "qr-code-image",
                    src: "{url}",
                    alt: "Share link QR code",
                    width: "{size}",
                    height: "{size}"
                }
            }
        },
        None => rsx! {
            div { class: "qr-code-fallback",
                p { class: "qr-fallback-label", "Link too long for a QR code" }
                code { class: "qr-fallback-text", "{data}" }
            }
        },
    }
}
