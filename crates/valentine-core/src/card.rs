//! Card state and its styling vocabulary.
//!
//! A [`CardState`] is the complete description of one card: who it is for,
//! what it says, and how it looks. It carries no identity or timestamps, so
//! two cards with equal fields render and encode identically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Maximum message length in UTF-16 code units
pub const MAX_MESSAGE_LEN: usize = 500;

/// Background theme of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Romantic,
    Dark,
    Pastel,
}

impl Theme {
    /// Every theme, in display order
    pub const ALL: [Theme; 3] = [Theme::Romantic, Theme::Dark, Theme::Pastel];

    /// Wire name used in share links
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Romantic => "romantic",
            Theme::Dark => "dark",
            Theme::Pastel => "pastel",
        }
    }
}

impl FromStr for Theme {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "romantic" => Ok(Theme::Romantic),
            "dark" => Ok(Theme::Dark),
            "pastel" => Ok(Theme::Pastel),
            other => Err(CardError::InvalidStyle(format!(
                "'{}' is not one of romantic, dark, pastel",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal alignment of the card content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// Every alignment, in display order
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// Wire name used in share links
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl FromStr for Alignment {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(CardError::InvalidAlignment(format!(
                "'{}' is not one of left, center, right",
                other
            ))),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glyph style a font family is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Serif,
    Sans,
    Mono,
    Script,
    /// Fixed face for headings and signatures
    Display,
}

/// Recognized font identifiers and the face each one renders with
const KNOWN_FONTS: [(&str, Face); 9] = [
    ("serif", Face::Serif),
    ("sans-serif", Face::Sans),
    ("monospace", Face::Mono),
    ("cursive", Face::Script),
    ("georgia", Face::Serif),
    ("playfair-display", Face::Serif),
    ("dancing-script", Face::Script),
    ("arial", Face::Sans),
    ("courier-new", Face::Mono),
];

/// Default font identifier
pub const DEFAULT_FONT: &str = "serif";

/// Message font family.
///
/// Font identifiers are open-ended, so parsing never fails: anything outside
/// the recognized set becomes [`DEFAULT_FONT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FontFamily(String);

impl FontFamily {
    /// Normalize a font identifier, falling back to the default family
    pub fn parse(s: &str) -> Self {
        let wanted = s.trim().to_ascii_lowercase();
        let name = KNOWN_FONTS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(name, _)| *name)
            .unwrap_or(DEFAULT_FONT);
        Self(name.to_string())
    }

    /// Canonical identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Face used to draw this family
    pub fn face(&self) -> Face {
        KNOWN_FONTS
            .iter()
            .find(|(name, _)| *name == self.0)
            .map(|(_, face)| *face)
            .unwrap_or(Face::Serif)
    }

    /// All recognized identifiers
    pub fn known() -> impl Iterator<Item = &'static str> {
        KNOWN_FONTS.iter().map(|(name, _)| *name)
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        Self(DEFAULT_FONT.to_string())
    }
}

impl From<String> for FontFamily {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<FontFamily> for String {
    fn from(font: FontFamily) -> Self {
        font.0
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length of a string in UTF-16 code units
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Cut a string to at most `max` UTF-16 code units without splitting a character
pub fn clamp_utf16(s: &str, max: usize) -> String {
    let mut used = 0;
    let mut end = 0;
    for (idx, ch) in s.char_indices() {
        used += ch.len_utf16();
        if used > max {
            break;
        }
        end = idx + ch.len_utf8();
    }
    s[..end].to_string()
}

/// The complete description of one card.
///
/// Fields are private: build a card with [`CardState::new`] and derive edited
/// copies with the `with_*` methods, so every value obeys the message bound
/// and carries a normalized font.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawCard")]
pub struct CardState {
    recipient: String,
    message: String,
    theme: Theme,
    alignment: Alignment,
    font: FontFamily,
}

/// Unchecked wire shape; goes through [`CardState::new`] on deserialize
#[derive(Deserialize)]
struct RawCard {
    #[serde(default)]
    recipient: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    alignment: Alignment,
    #[serde(default)]
    font: String,
}

impl From<RawCard> for CardState {
    fn from(raw: RawCard) -> Self {
        CardState::new(raw.recipient, raw.message, raw.theme, raw.alignment, &raw.font)
    }
}

impl CardState {
    /// Build a card, clamping the message and normalizing the font.
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        theme: Theme,
        alignment: Alignment,
        font: &str,
    ) -> Self {
        let message = message.into();
        let message = if utf16_len(&message) > MAX_MESSAGE_LEN {
            clamp_utf16(&message, MAX_MESSAGE_LEN)
        } else {
            message
        };

        Self {
            recipient: recipient.into(),
            message,
            theme,
            alignment,
            font: FontFamily::parse(font),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn font(&self) -> &FontFamily {
        &self.font
    }

    /// Copy with a new recipient
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Copy with a new message, clamped to [`MAX_MESSAGE_LEN`]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = clamp_utf16(&message.into(), MAX_MESSAGE_LEN);
        self
    }

    /// Copy with a new theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Copy with a new alignment
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Copy with a new font (normalized)
    pub fn with_font(mut self, font: &str) -> Self {
        self.font = FontFamily::parse(font);
        self
    }

    /// Message length in UTF-16 code units
    pub fn message_len(&self) -> usize {
        utf16_len(&self.message)
    }

    /// Character counter shown under the message field
    pub fn counter_label(&self) -> String {
        format!("{} / {} characters", self.message_len(), MAX_MESSAGE_LEN)
    }

    /// Both recipient and message are filled in
    pub fn is_complete(&self) -> bool {
        !self.recipient.is_empty() && !self.message.is_empty()
    }
}
