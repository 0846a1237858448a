//! Runtime configuration for links and exports.

use crate::error::{CardError, CardResult};
use crate::raster::RENDER_SCALE;

/// Origin share links point at unless configured otherwise
pub const DEFAULT_ORIGIN: &str = "https://valentine.cards";
/// Base name of exported files
pub const DEFAULT_CARD_TITLE: &str = "valentine-card";
/// JPEG quality on the 1-100 scale
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Share-link and export settings.
///
/// The render scale is fixed so that exports never depend on the caller's
/// display.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    /// Scheme and host of share links, without trailing slash
    pub origin: String,
    /// Base name of exported files
    pub card_title: String,
    scale: f32,
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            card_title: DEFAULT_CARD_TITLE.to_string(),
            scale: RENDER_SCALE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CardConfig {
    /// Read configuration from environment variables.
    ///
    /// Optional: `VALENTINE_ORIGIN`, `VALENTINE_CARD_TITLE`,
    /// `VALENTINE_JPEG_QUALITY` (1-100). Unset variables keep their defaults.
    pub fn from_env() -> CardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CardResult<Self> {
        let mut config = Self::default();

        if let Some(origin) = lookup("VALENTINE_ORIGIN") {
            config = config.with_origin(&origin)?;
        }
        if let Some(title) = lookup("VALENTINE_CARD_TITLE") {
            config = config.with_card_title(&title)?;
        }
        if let Some(quality) = lookup("VALENTINE_JPEG_QUALITY") {
            let quality = quality.trim().parse::<u8>().map_err(|e| {
                CardError::Config(format!("VALENTINE_JPEG_QUALITY '{}': {}", quality, e))
            })?;
            config = config.with_jpeg_quality(quality)?;
        }

        Ok(config)
    }

    /// Set the share-link origin (builder pattern)
    pub fn with_origin(mut self, origin: &str) -> CardResult<Self> {
        let origin = origin.trim().trim_end_matches('/');
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(CardError::Config(format!(
                "Origin must start with http:// or https://, got '{}'",
                origin
            )));
        }
        self.origin = origin.to_string();
        Ok(self)
    }

    /// Device pixels per logical unit. Always [`RENDER_SCALE`].
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the export base name (builder pattern)
    pub fn with_card_title(mut self, title: &str) -> CardResult<Self> {
        let title = title.trim();
        if title.is_empty() || title.contains(['/', '\\']) {
            return Err(CardError::Config(format!("Invalid card title '{}'", title)));
        }
        self.card_title = title.to_string();
        Ok(self)
    }

    /// Set the JPEG quality (builder pattern)
    pub fn with_jpeg_quality(mut self, quality: u8) -> CardResult<Self> {
        if !(1..=100).contains(&quality) {
            return Err(CardError::Config(format!(
                "JPEG quality must be 1-100, got {}",
                quality
            )));
        }
        self.jpeg_quality = quality;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CardConfig::default());
        assert_eq!(config.scale(), 2.0);
        assert_eq!(config.card_title, "valentine-card");
    }

    #[test]
    fn test_overrides() {
        let config = CardConfig::from_lookup(lookup(&[
            ("VALENTINE_ORIGIN", "http://localhost:3000/"),
            ("VALENTINE_CARD_TITLE", "my-card"),
            ("VALENTINE_JPEG_QUALITY", "80"),
        ]))
        .unwrap();
        assert_eq!(config.origin, "http://localhost:3000");
        assert_eq!(config.card_title, "my-card");
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.scale(), RENDER_SCALE);
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [("VALENTINE_ORIGIN", "ftp://cards")],
            [("VALENTINE_JPEG_QUALITY", "0")],
            [("VALENTINE_JPEG_QUALITY", "high")],
            [("VALENTINE_CARD_TITLE", "../etc")],
        ] {
            let err = CardConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, CardError::Config(_)));
        }
    }
}
