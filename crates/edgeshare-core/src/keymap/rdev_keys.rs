//! Translation between `rdev` physical keys and [`KeyIdentifier`].
//!
//! Capture and injection share this table, so every key the master can
//! capture is one the slave can press again.  Letter and digit keys travel as
//! their unshifted character; Shift travels as its own key event.  Keypad
//! keys travel as `Key.kp_*` names so they stay distinct from the main block.
//!
//! Characters arriving from other peers are mapped to the physical key that
//! produces them on a US layout; shifted symbols map to their base key.

use rdev::Key;

use super::{KeyIdentifier, NamedKey};

/// Maps a captured physical key to its shared identifier.
///
/// Returns `None` for keys with no portable meaning (`Function`,
/// `IntlBackslash`, `Unknown`).
pub fn from_rdev(key: Key) -> Option<KeyIdentifier> {
    let c = match key {
        Key::KeyA => 'a',
        Key::KeyB => 'b',
        Key::KeyC => 'c',
        Key::KeyD => 'd',
        Key::KeyE => 'e',
        Key::KeyF => 'f',
        Key::KeyG => 'g',
        Key::KeyH => 'h',
        Key::KeyI => 'i',
        Key::KeyJ => 'j',
        Key::KeyK => 'k',
        Key::KeyL => 'l',
        Key::KeyM => 'm',
        Key::KeyN => 'n',
        Key::KeyO => 'o',
        Key::KeyP => 'p',
        Key::KeyQ => 'q',
        Key::KeyR => 'r',
        Key::KeyS => 's',
        Key::KeyT => 't',
        Key::KeyU => 'u',
        Key::KeyV => 'v',
        Key::KeyW => 'w',
        Key::KeyX => 'x',
        Key::KeyY => 'y',
        Key::KeyZ => 'z',
        Key::Num0 => '0',
        Key::Num1 => '1',
        Key::Num2 => '2',
        Key::Num3 => '3',
        Key::Num4 => '4',
        Key::Num5 => '5',
        Key::Num6 => '6',
        Key::Num7 => '7',
        Key::Num8 => '8',
        Key::Num9 => '9',
        Key::Minus => '-',
        Key::Equal => '=',
        Key::Slash => '/',
        Key::LeftBracket => '[',
        Key::RightBracket => ']',
        Key::SemiColon => ';',
        Key::Quote => '\'',
        Key::BackSlash => '\\',
        Key::Comma => ',',
        Key::Dot => '.',
        Key::BackQuote => '`',
        other => return named_from_rdev(other).map(KeyIdentifier::Named),
    };
    Some(KeyIdentifier::Char(c))
}

/// Maps a wire identifier to the physical key to press.
///
/// Returns `None` for characters with no US-layout key and for named keys
/// `rdev` cannot synthesise (menu, F13 and up, media keys).
pub fn to_rdev(key: KeyIdentifier) -> Option<Key> {
    match key {
        KeyIdentifier::Char(c) => char_to_rdev(c),
        KeyIdentifier::Named(named) => named_to_rdev(named),
    }
}

fn named_from_rdev(key: Key) -> Option<NamedKey> {
    let named = match key {
        Key::Alt => NamedKey::AltL,
        Key::AltGr => NamedKey::AltGr,
        Key::ControlLeft => NamedKey::CtrlL,
        Key::ControlRight => NamedKey::CtrlR,
        Key::ShiftLeft => NamedKey::ShiftL,
        Key::ShiftRight => NamedKey::ShiftR,
        Key::MetaLeft => NamedKey::CmdL,
        Key::MetaRight => NamedKey::CmdR,
        Key::Backspace => NamedKey::Backspace,
        Key::Delete => NamedKey::Delete,
        Key::DownArrow => NamedKey::Down,
        Key::UpArrow => NamedKey::Up,
        Key::LeftArrow => NamedKey::Left,
        Key::RightArrow => NamedKey::Right,
        Key::End => NamedKey::End,
        Key::Home => NamedKey::Home,
        Key::Insert => NamedKey::Insert,
        Key::PageDown => NamedKey::PageDown,
        Key::PageUp => NamedKey::PageUp,
        Key::Return => NamedKey::Enter,
        Key::Escape => NamedKey::Esc,
        Key::Space => NamedKey::Space,
        Key::Tab => NamedKey::Tab,
        Key::CapsLock => NamedKey::CapsLock,
        Key::NumLock => NamedKey::NumLock,
        Key::ScrollLock => NamedKey::ScrollLock,
        Key::Pause => NamedKey::Pause,
        Key::PrintScreen => NamedKey::PrintScreen,
        Key::F1 => NamedKey::F1,
        Key::F2 => NamedKey::F2,
        Key::F3 => NamedKey::F3,
        Key::F4 => NamedKey::F4,
        Key::F5 => NamedKey::F5,
        Key::F6 => NamedKey::F6,
        Key::F7 => NamedKey::F7,
        Key::F8 => NamedKey::F8,
        Key::F9 => NamedKey::F9,
        Key::F10 => NamedKey::F10,
        Key::F11 => NamedKey::F11,
        Key::F12 => NamedKey::F12,
        Key::Kp0 => NamedKey::Kp0,
        Key::Kp1 => NamedKey::Kp1,
        Key::Kp2 => NamedKey::Kp2,
        Key::Kp3 => NamedKey::Kp3,
        Key::Kp4 => NamedKey::Kp4,
        Key::Kp5 => NamedKey::Kp5,
        Key::Kp6 => NamedKey::Kp6,
        Key::Kp7 => NamedKey::Kp7,
        Key::Kp8 => NamedKey::Kp8,
        Key::Kp9 => NamedKey::Kp9,
        Key::KpMinus => NamedKey::KpMinus,
        Key::KpPlus => NamedKey::KpPlus,
        Key::KpMultiply => NamedKey::KpMultiply,
        Key::KpDivide => NamedKey::KpDivide,
        Key::KpReturn => NamedKey::KpEnter,
        Key::KpDelete => NamedKey::KpDelete,
        _ => return None,
    };
    Some(named)
}

fn char_to_rdev(c: char) -> Option<Key> {
    let key = match c.to_ascii_lowercase() {
        'a' => Key::KeyA,
        'b' => Key::KeyB,
        'c' => Key::KeyC,
        'd' => Key::KeyD,
        'e' => Key::KeyE,
        'f' => Key::KeyF,
        'g' => Key::KeyG,
        'h' => Key::KeyH,
        'i' => Key::KeyI,
        'j' => Key::KeyJ,
        'k' => Key::KeyK,
        'l' => Key::KeyL,
        'm' => Key::KeyM,
        'n' => Key::KeyN,
        'o' => Key::KeyO,
        'p' => Key::KeyP,
        'q' => Key::KeyQ,
        'r' => Key::KeyR,
        's' => Key::KeyS,
        't' => Key::KeyT,
        'u' => Key::KeyU,
        'v' => Key::KeyV,
        'w' => Key::KeyW,
        'x' => Key::KeyX,
        'y' => Key::KeyY,
        'z' => Key::KeyZ,
        '0' | ')' => Key::Num0,
        '1' | '!' => Key::Num1,
        '2' | '@' => Key::Num2,
        '3' | '#' => Key::Num3,
        '4' | '$' => Key::Num4,
        '5' | '%' => Key::Num5,
        '6' | '^' => Key::Num6,
        '7' | '&' => Key::Num7,
        '8' | '*' => Key::Num8,
        '9' | '(' => Key::Num9,
        '-' | '_' => Key::Minus,
        '=' | '+' => Key::Equal,
        '[' | '{' => Key::LeftBracket,
        ']' | '}' => Key::RightBracket,
        ';' | ':' => Key::SemiColon,
        '\'' | '"' => Key::Quote,
        '\\' | '|' => Key::BackSlash,
        ',' | '<' => Key::Comma,
        '.' | '>' => Key::Dot,
        '/' | '?' => Key::Slash,
        '`' | '~' => Key::BackQuote,
        ' ' => Key::Space,
        _ => return None,
    };
    Some(key)
}

fn named_to_rdev(named: NamedKey) -> Option<Key> {
    let key = match named {
        NamedKey::Alt | NamedKey::AltL => Key::Alt,
        NamedKey::AltR | NamedKey::AltGr => Key::AltGr,
        NamedKey::Cmd | NamedKey::CmdL => Key::MetaLeft,
        NamedKey::CmdR => Key::MetaRight,
        NamedKey::Ctrl | NamedKey::CtrlL => Key::ControlLeft,
        NamedKey::CtrlR => Key::ControlRight,
        NamedKey::Shift | NamedKey::ShiftL => Key::ShiftLeft,
        NamedKey::ShiftR => Key::ShiftRight,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Down => Key::DownArrow,
        NamedKey::End => Key::End,
        NamedKey::Enter => Key::Return,
        NamedKey::Esc => Key::Escape,
        NamedKey::Home => Key::Home,
        NamedKey::Insert => Key::Insert,
        NamedKey::Left => Key::LeftArrow,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::Right => Key::RightArrow,
        NamedKey::Space => Key::Space,
        NamedKey::Tab => Key::Tab,
        NamedKey::Up => Key::UpArrow,
        NamedKey::CapsLock => Key::CapsLock,
        NamedKey::NumLock => Key::NumLock,
        NamedKey::Pause => Key::Pause,
        NamedKey::PrintScreen => Key::PrintScreen,
        NamedKey::ScrollLock => Key::ScrollLock,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key::F2,
        NamedKey::F3 => Key::F3,
        NamedKey::F4 => Key::F4,
        NamedKey::F5 => Key::F5,
        NamedKey::F6 => Key::F6,
        NamedKey::F7 => Key::F7,
        NamedKey::F8 => Key::F8,
        NamedKey::F9 => Key::F9,
        NamedKey::F10 => Key::F10,
        NamedKey::F11 => Key::F11,
        NamedKey::F12 => Key::F12,
        NamedKey::Kp0 => Key::Kp0,
        NamedKey::Kp1 => Key::Kp1,
        NamedKey::Kp2 => Key::Kp2,
        NamedKey::Kp3 => Key::Kp3,
        NamedKey::Kp4 => Key::Kp4,
        NamedKey::Kp5 => Key::Kp5,
        NamedKey::Kp6 => Key::Kp6,
        NamedKey::Kp7 => Key::Kp7,
        NamedKey::Kp8 => Key::Kp8,
        NamedKey::Kp9 => Key::Kp9,
        NamedKey::KpMinus => Key::KpMinus,
        NamedKey::KpPlus => Key::KpPlus,
        NamedKey::KpMultiply => Key::KpMultiply,
        NamedKey::KpDivide => Key::KpDivide,
        NamedKey::KpEnter => Key::KpReturn,
        NamedKey::KpDelete => Key::KpDelete,
        // rdev has no portable key for these.
        NamedKey::Menu
        | NamedKey::F13
        | NamedKey::F14
        | NamedKey::F15
        | NamedKey::F16
        | NamedKey::F17
        | NamedKey::F18
        | NamedKey::F19
        | NamedKey::F20
        | NamedKey::MediaPlayPause
        | NamedKey::MediaVolumeMute
        | NamedKey::MediaVolumeDown
        | NamedKey::MediaVolumeUp
        | NamedKey::MediaPrevious
        | NamedKey::MediaNext => return None,
    };
    Some(key)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
