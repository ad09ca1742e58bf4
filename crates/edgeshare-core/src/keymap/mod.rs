//! Key vocabulary shared by capture and injection.
//!
//! A [`KeyIdentifier`] is either a single printable character (`"a"`, `"7"`,
//! `"/"`) or a [`NamedKey`] for keys that have no printable form.  On the wire
//! a character travels as itself and a named key travels as `"Key.<name>"`,
//! e.g. `"Key.space"` or `"Key.f5"`.
//!
//! Parsing accepts a bare name too (`"space"`), so peers that omit the prefix
//! still interoperate.  Encoding always emits the prefixed form.

pub mod named;
#[cfg(feature = "native-keymap")]
pub mod rdev_keys;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use named::NamedKey;

/// Prefix that marks a symbolic key name on the wire.
pub const NAMED_KEY_PREFIX: &str = "Key.";

/// Errors produced when a wire string is not a known key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key identifier")]
    Empty,

    /// A single character that cannot be typed (control characters).
    #[error("key character {0:?} is not printable")]
    NotPrintable(char),

    #[error("unknown key name: {0:?}")]
    UnknownName(String),
}

/// A key as it is named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIdentifier {
    /// A printable character, case preserved.
    Char(char),
    /// A symbolic key from the fixed named set.
    Named(NamedKey),
}

impl KeyIdentifier {
    /// Parses a wire string.
    ///
    /// Exactly one non-control character becomes [`KeyIdentifier::Char`].
    /// Anything longer is looked up as a named key, with or without the
    /// `Key.` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`KeyParseError`] for empty strings, control characters and
    /// names outside the named set.
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(KeyParseError::Empty),
            (Some(c), None) if c.is_control() => Err(KeyParseError::NotPrintable(c)),
            (Some(c), None) => Ok(KeyIdentifier::Char(c)),
            _ => {
                let name = s.strip_prefix(NAMED_KEY_PREFIX).unwrap_or(s);
                NamedKey::from_name(name)
                    .map(KeyIdentifier::Named)
                    .ok_or_else(|| KeyParseError::UnknownName(s.to_string()))
            }
        }
    }

    /// Returns the canonical wire string for this key.
    pub fn to_wire(&self) -> String {
        match self {
            KeyIdentifier::Char(c) => c.to_string(),
            KeyIdentifier::Named(named) => format!("{NAMED_KEY_PREFIX}{}", named.name()),
        }
    }
}

impl FromStr for KeyIdentifier {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyIdentifier::parse(s)
    }
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<NamedKey> for KeyIdentifier {
    fn from(key: NamedKey) -> Self {
        KeyIdentifier::Named(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_character_parses_as_char() {
        assert_eq!(KeyIdentifier::parse("a"), Ok(KeyIdentifier::Char('a')));
        assert_eq!(KeyIdentifier::parse("A"), Ok(KeyIdentifier::Char('A')));
        assert_eq!(KeyIdentifier::parse("é"), Ok(KeyIdentifier::Char('é')));
    }

    #[test]
    fn test_prefixed_and_bare_names_parse_to_the_same_key() {
        let prefixed = KeyIdentifier::parse("Key.page_down");
        let bare = KeyIdentifier::parse("page_down");
        assert_eq!(prefixed, Ok(KeyIdentifier::Named(NamedKey::PageDown)));
        assert_eq!(prefixed, bare);
    }

    #[test]
    fn test_to_wire_always_uses_prefix_for_named_keys() {
        assert_eq!(KeyIdentifier::Named(NamedKey::Space).to_wire(), "Key.space");
        assert_eq!(KeyIdentifier::Char('q').to_wire(), "q");
    }

    #[test]
    fn test_rejects_empty_and_control_characters() {
        assert_eq!(KeyIdentifier::parse(""), Err(KeyParseError::Empty));
        assert_eq!(
            KeyIdentifier::parse("\n"),
            Err(KeyParseError::NotPrintable('\n'))
        );
    }

    #[test]
    fn test_rejects_unknown_names() {
        assert_eq!(
            KeyIdentifier::parse("Key.hyper"),
            Err(KeyParseError::UnknownName("Key.hyper".to_string()))
        );
    }

    #[test]
    fn test_single_char_named_lookalike_stays_a_char() {
        // "f" alone is the letter, never a truncated function key.
        assert_eq!("f".parse::<KeyIdentifier>(), Ok(KeyIdentifier::Char('f')));
    }
}
