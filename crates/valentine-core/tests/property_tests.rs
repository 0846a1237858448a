//! Property-based tests for cards and share links
//!
//! Uses proptest to verify the link round-trip and the message bound.

use proptest::prelude::*;
use valentine_core::card::utf16_len;
use valentine_core::{Alignment, CardState, FontFamily, LinkCodec, ShareLink, Theme, MAX_MESSAGE_LEN};

// ============================================================================
// Strategy Generators
// ============================================================================

fn theme_strategy() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

fn alignment_strategy() -> impl Strategy<Value = Alignment> {
    prop::sample::select(Alignment::ALL.to_vec())
}

fn font_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(FontFamily::known().map(str::to_string).collect::<Vec<_>>())
}

/// Arbitrary text, including reserved URL characters and non-ASCII
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 &=?#%+/,.!'\"éü♥😀\n]{0,80}").expect("valid regex")
}

fn card_strategy() -> impl Strategy<Value = CardState> {
    (
        text_strategy(),
        text_strategy(),
        theme_strategy(),
        alignment_strategy(),
        font_strategy(),
    )
        .prop_map(|(recipient, message, theme, alignment, font)| {
            CardState::new(recipient, message, theme, alignment, &font)
        })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Decoding an encoded card yields the same card
    #[test]
    fn link_roundtrip(card in card_strategy()) {
        let decoded = LinkCodec::decode(&LinkCodec::encode(&card)).unwrap();
        prop_assert_eq!(decoded, card);
    }

    /// A full share link carries the card as well
    #[test]
    fn share_link_roundtrip(card in card_strategy()) {
        let link = ShareLink::new("https://valentine.cards", &card);
        prop_assert!(link.as_str().starts_with("https://valentine.cards/card/view?to="));
        prop_assert_eq!(link.card().unwrap(), card);
    }

    /// Encoded values never contain raw separators
    #[test]
    fn encoding_escapes_separators(card in card_strategy()) {
        let query = LinkCodec::encode(&card);
        prop_assert_eq!(query.matches('&').count(), 4);
        prop_assert_eq!(query.matches('=').count(), 5);
        prop_assert!(!query.contains('#') && !query.contains(' ') && !query.contains('?'));
    }

    /// Messages never exceed the limit, however they are built
    #[test]
    fn message_bound_holds(message in prop::string::string_regex(".{0,700}").expect("valid regex")) {
        let card = CardState::default().with_message(message.clone());
        prop_assert!(card.message_len() <= MAX_MESSAGE_LEN);
        prop_assert!(message.starts_with(card.message()));
        if utf16_len(&message) <= MAX_MESSAGE_LEN {
            prop_assert_eq!(card.message(), message.as_str());
        }
    }

    /// Decoding arbitrary input never panics
    #[test]
    fn decode_never_panics(input in ".{0,200}") {
        let _ = LinkCodec::decode(&input);
    }
}
