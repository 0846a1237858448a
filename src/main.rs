#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod delivery;
mod theme;

use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use valentine_core::CardConfig;

/// Global card configuration, set at startup
static CARD_CONFIG: OnceLock<CardConfig> = OnceLock::new();

/// Get the card configuration (set at startup or default)
pub fn get_card_config() -> CardConfig {
    CARD_CONFIG.get().cloned().unwrap_or_default()
}

/// Valentine Card Studio - compose, preview and share cards
#[derive(Parser, Debug)]
#[command(name = "valentine-desktop")]
#[command(about = "Valentine Card Studio - compose, preview and share cards")]
struct Args {
    /// Origin of share links (overrides VALENTINE_ORIGIN)
    #[arg(short, long)]
    origin: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = CardConfig::from_env()?;
    if let Some(origin) = args.origin {
        config = config.with_origin(&origin)?;
    }

    tracing::info!("Starting with share origin {}", config.origin);
    let _ = CARD_CONFIG.set(config);

    // Room for the form beside a full-size preview
    let window_width = 960.0;
    let window_height = 820.0;

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Valentine Card Studio")
            .with_inner_size(dioxus::desktop::LogicalSize::new(window_width, window_height))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);

    Ok(())
}
