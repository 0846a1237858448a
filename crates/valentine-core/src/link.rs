//! Share links for Valentine Card Studio
//!
//! A share link carries a whole [`CardState`] in its query string:
//!
//! ```text
//! <origin>/card/view?to=<recipient>&msg=<message>&theme=<theme>&align=<alignment>&font=<font>
//! ```
//!
//! Every value is percent-encoded with the URI-component set, so ampersands,
//! percent signs and non-ASCII text survive transport unchanged. Decoding is
//! strict for the closed enums and lenient for the open-ended font name.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use crate::card::{Alignment, CardState, Theme};
use crate::error::{CardError, CardResult};

/// Path every share link points at
pub const SHARE_PATH: &str = "/card/view";

const KEY_RECIPIENT: &str = "to";
const KEY_MESSAGE: &str = "msg";
const KEY_THEME: &str = "theme";
const KEY_ALIGN: &str = "align";
const KEY_FONT: &str = "font";

/// Characters left unescaped: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Bidirectional mapping between cards and share-link query strings.
pub struct LinkCodec;

/// Raw parameter values collected while decoding
#[derive(Default)]
struct Params {
    recipient: Option<String>,
    message: Option<String>,
    theme: Option<String>,
    align: Option<String>,
    font: Option<String>,
}

impl LinkCodec {
    /// Encode a card as a query string (without the leading `?`).
    ///
    /// Keys always appear in the order `to`, `msg`, `theme`, `align`, `font`,
    /// so equal cards produce equal strings.
    pub fn encode(card: &CardState) -> String {
        let pairs = [
            (KEY_RECIPIENT, card.recipient()),
            (KEY_MESSAGE, card.message()),
            (KEY_THEME, card.theme().as_str()),
            (KEY_ALIGN, card.alignment().as_str()),
            (KEY_FONT, card.font().as_str()),
        ];

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, COMPONENT)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decode a card from a query string or a full share link.
    ///
    /// A link or path without `?` (`https://host/card/view`, `/card/view`)
    /// decodes to the default card; anything else without `?` is read as a
    /// bare query.
    ///
    /// # Errors
    ///
    /// - `CardError::Decode` if the query is malformed (bad escape, invalid
    ///   UTF-8, segment without `=`, empty or repeated key)
    /// - `CardError::InvalidStyle` if `theme` is not a known theme
    /// - `CardError::InvalidAlignment` if `align` is not a known alignment
    ///
    /// Nothing is applied partially: any error rejects the whole link.
    pub fn decode(s: &str) -> CardResult<CardState> {
        let query = match s.split_once('?') {
            Some((_, query)) => query,
            // a share URL or path with no query carries no parameters
            None if is_url(s) => "",
            None => s,
        };
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        let mut params = Params::default();
        for segment in query.split('&').filter(|segment| !segment.is_empty()) {
            let (key, raw) = segment.split_once('=').ok_or_else(|| {
                CardError::Decode(format!("Parameter without value: '{}'", truncate(segment)))
            })?;

            let slot = match key {
                KEY_RECIPIENT => &mut params.recipient,
                KEY_MESSAGE => &mut params.message,
                KEY_THEME => &mut params.theme,
                KEY_ALIGN => &mut params.align,
                KEY_FONT => &mut params.font,
                "" => return Err(CardError::Decode("Empty parameter name".to_string())),
                other => {
                    debug!(key = other, "Ignoring unknown share link parameter");
                    continue;
                }
            };

            if slot.is_some() {
                return Err(CardError::Decode(format!("Repeated parameter: '{}'", key)));
            }
            *slot = Some(unescape(raw)?);
        }

        let theme = params
            .theme
            .as_deref()
            .map(str::parse::<Theme>)
            .transpose()?
            .unwrap_or_default();
        let alignment = params
            .align
            .as_deref()
            .map(str::parse::<Alignment>)
            .transpose()?
            .unwrap_or_default();

        Ok(CardState::new(
            params.recipient.unwrap_or_default(),
            params.message.unwrap_or_default(),
            theme,
            alignment,
            params.font.as_deref().unwrap_or_default(),
        ))
    }
}

/// Undo percent-encoding for one value, rejecting malformed escapes.
fn unescape(raw: &str) -> CardResult<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(CardError::Decode(format!(
                    "Invalid percent escape in '{}'",
                    truncate(raw)
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|value| value.into_owned())
        .map_err(|e| CardError::Decode(format!("Invalid UTF-8 in parameter: {}", e)))
}

/// Absolute path or `scheme://` URL, as opposed to a bare query
fn is_url(s: &str) -> bool {
    s.starts_with('/')
        || s.split_once("://").is_some_and(|(scheme, _)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

/// First few characters of untrusted input, for error messages
fn truncate(s: &str) -> String {
    s.chars().take(24).collect()
}

/// A complete share link: origin, fixed path and encoded card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareLink(String);

impl ShareLink {
    /// Build the share link for a card under `origin` (e.g. `https://valentine.cards`).
    pub fn new(origin: &str, card: &CardState) -> Self {
        let origin = origin.trim_end_matches('/');
        Self(format!("{}{}?{}", origin, SHARE_PATH, LinkCodec::encode(card)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Reconstruct the card this link carries
    pub fn card(&self) -> CardResult<CardState> {
        LinkCodec::decode(&self.0)
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alex_card() -> CardState {
        CardState::new("Alex", "Hi & bye", Theme::Dark, Alignment::Right, "serif")
    }

    #[test]
    fn test_encode_escapes_ampersand_and_spaces() {
        let encoded = LinkCodec::encode(&alex_card());
        assert_eq!(
            encoded,
            "to=Alex&msg=Hi%20%26%20bye&theme=dark&align=right&font=serif"
        );
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let card = alex_card();
        let decoded = LinkCodec::decode(&LinkCodec::encode(&card)).expect("Failed to decode");
        assert_eq!(decoded, card);
        assert_eq!(decoded.message(), "Hi & bye");
    }

    #[test]
    fn test_roundtrip_non_ascii_and_percent() {
        let card = CardState::new(
            "Zoë",
            "100% yours 💌\nfor ever + always",
            Theme::Pastel,
            Alignment::Left,
            "cursive",
        );
        let encoded = LinkCodec::encode(&card);
        assert!(encoded.contains("100%25"));
        assert!(encoded.contains("%2B"));
        assert_eq!(LinkCodec::decode(&encoded).unwrap(), card);
    }

    #[test]
    fn test_decode_unknown_theme() {
        let err = LinkCodec::decode("theme=neon&to=Alex").unwrap_err();
        assert!(matches!(err, CardError::InvalidStyle(_)));
    }

    #[test]
    fn test_decode_unknown_alignment() {
        let err = LinkCodec::decode("to=Alex&align=justify").unwrap_err();
        assert!(matches!(err, CardError::InvalidAlignment(_)));
    }

    #[test]
    fn test_decode_missing_fields_use_defaults() {
        let card = LinkCodec::decode("theme=pastel").unwrap();
        assert_eq!(card.recipient(), "");
        assert_eq!(card.message(), "");
        assert_eq!(card.theme(), Theme::Pastel);
        assert_eq!(card.alignment(), Alignment::Center);
        assert_eq!(card.font().as_str(), "serif");

        assert_eq!(LinkCodec::decode("").unwrap(), CardState::default());
    }

    #[test]
    fn test_decode_unknown_font_falls_back() {
        let card = LinkCodec::decode("to=Kim&font=Papyrus").unwrap();
        assert_eq!(card.font().as_str(), "serif");
    }

    #[test]
    fn test_decode_plus_is_space() {
        let card = LinkCodec::decode("msg=see+you+soon").unwrap();
        assert_eq!(card.message(), "see you soon");
    }

    #[test]
    fn test_decode_link_without_query() {
        for input in ["https://valentine.cards/card/view", "/card/view", "/card/view#top"] {
            assert_eq!(LinkCodec::decode(input).unwrap(), CardState::default(), "{}", input);
        }
        assert!(matches!(LinkCodec::decode("card/view"), Err(CardError::Decode(_))));

        let card = LinkCodec::decode("msg=http://x&to=Kim").unwrap();
        assert_eq!(card.message(), "http://x");
        assert_eq!(card.recipient(), "Kim");
    }

    #[test]
    fn test_decode_malformed() {
        for bad in ["to=Alex&msg", "msg=%zz", "msg=%4", "=value", "to=a&to=b", "msg=%FF%FE"] {
            let err = LinkCodec::decode(bad).unwrap_err();
            assert!(matches!(err, CardError::Decode(_)), "{} gave {:?}", bad, err);
        }
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let card = LinkCodec::decode("to=Alex&utm_source=mail").unwrap();
        assert_eq!(card.recipient(), "Alex");
    }

    #[test]
    fn test_decode_clamps_long_message() {
        let query = format!("msg={}", "x".repeat(700));
        let card = LinkCodec::decode(&query).unwrap();
        assert_eq!(card.message_len(), crate::card::MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_share_link_format() {
        let link = ShareLink::new("https://valentine.cards/", &alex_card());
        assert_eq!(
            link.as_str(),
            "https://valentine.cards/card/view?to=Alex&msg=Hi%20%26%20bye&theme=dark&align=right&font=serif"
        );
        assert_eq!(link.card().unwrap(), alex_card());
    }

    #[test]
    fn test_decode_full_url_matches_query() {
        let link = ShareLink::new("http://localhost:8080", &alex_card());
        let query = LinkCodec::encode(&alex_card());
        assert_eq!(
            LinkCodec::decode(link.as_str()).unwrap(),
            LinkCodec::decode(&query).unwrap()
        );
        assert_eq!(
            LinkCodec::decode(&format!("{}#top", link)).unwrap(),
            alex_card()
        );
    }
}
