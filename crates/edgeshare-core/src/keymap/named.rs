//! Symbolic (non-printable) key names.
//!
//! The names match the `Key.<name>` strings produced by common desktop input
//! hooks, so a capture backend on one machine and an injection backend on the
//! other agree on every key without sharing a platform code table.

use std::fmt;

/// A named key from the fixed symbolic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    // Modifiers
    Alt,
    AltL,
    AltR,
    AltGr,
    Cmd,
    CmdL,
    CmdR,
    Ctrl,
    CtrlL,
    CtrlR,
    Shift,
    ShiftL,
    ShiftR,

    // Editing / navigation
    Backspace,
    Delete,
    Down,
    End,
    Enter,
    Esc,
    Home,
    Insert,
    Left,
    PageDown,
    PageUp,
    Right,
    Space,
    Tab,
    Up,

    // Lock / system
    CapsLock,
    Menu,
    NumLock,
    Pause,
    PrintScreen,
    ScrollLock,

    // Function row
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,

    // Media
    MediaPlayPause,
    MediaVolumeMute,
    MediaVolumeDown,
    MediaVolumeUp,
    MediaPrevious,
    MediaNext,

    // Keypad
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpMinus,
    KpPlus,
    KpMultiply,
    KpDivide,
    KpEnter,
    KpDelete,
}

impl NamedKey {
    /// Every named key, in declaration order.
    pub const ALL: [NamedKey; 76] = [
        NamedKey::Alt,
        NamedKey::AltL,
        NamedKey::AltR,
        NamedKey::AltGr,
        NamedKey::Cmd,
        NamedKey::CmdL,
        NamedKey::CmdR,
        NamedKey::Ctrl,
        NamedKey::CtrlL,
        NamedKey::CtrlR,
        NamedKey::Shift,
        NamedKey::ShiftL,
        NamedKey::ShiftR,
        NamedKey::Backspace,
        NamedKey::Delete,
        NamedKey::Down,
        NamedKey::End,
        NamedKey::Enter,
        NamedKey::Esc,
        NamedKey::Home,
        NamedKey::Insert,
        NamedKey::Left,
        NamedKey::PageDown,
        NamedKey::PageUp,
        NamedKey::Right,
        NamedKey::Space,
        NamedKey::Tab,
        NamedKey::Up,
        NamedKey::CapsLock,
        NamedKey::Menu,
        NamedKey::NumLock,
        NamedKey::Pause,
        NamedKey::PrintScreen,
        NamedKey::ScrollLock,
        NamedKey::F1,
        NamedKey::F2,
        NamedKey::F3,
        NamedKey::F4,
        NamedKey::F5,
        NamedKey::F6,
        NamedKey::F7,
        NamedKey::F8,
        NamedKey::F9,
        NamedKey::F10,
        NamedKey::F11,
        NamedKey::F12,
        NamedKey::F13,
        NamedKey::F14,
        NamedKey::F15,
        NamedKey::F16,
        NamedKey::F17,
        NamedKey::F18,
        NamedKey::F19,
        NamedKey::F20,
        NamedKey::MediaPlayPause,
        NamedKey::MediaVolumeMute,
        NamedKey::MediaVolumeDown,
        NamedKey::MediaVolumeUp,
        NamedKey::MediaPrevious,
        NamedKey::MediaNext,
        NamedKey::Kp0,
        NamedKey::Kp1,
        NamedKey::Kp2,
        NamedKey::Kp3,
        NamedKey::Kp4,
        NamedKey::Kp5,
        NamedKey::Kp6,
        NamedKey::Kp7,
        NamedKey::Kp8,
        NamedKey::Kp9,
        NamedKey::KpMinus,
        NamedKey::KpPlus,
        NamedKey::KpMultiply,
        NamedKey::KpDivide,
        NamedKey::KpEnter,
        NamedKey::KpDelete,
    ];

    /// Returns the wire name without the `Key.` prefix.
    pub fn name(self) -> &'static str {
        match self {
            NamedKey::Alt => "alt",
            NamedKey::AltL => "alt_l",
            NamedKey::AltR => "alt_r",
            NamedKey::AltGr => "alt_gr",
            NamedKey::Cmd => "cmd",
            NamedKey::CmdL => "cmd_l",
            NamedKey::CmdR => "cmd_r",
            NamedKey::Ctrl => "ctrl",
            NamedKey::CtrlL => "ctrl_l",
            NamedKey::CtrlR => "ctrl_r",
            NamedKey::Shift => "shift",
            NamedKey::ShiftL => "shift_l",
            NamedKey::ShiftR => "shift_r",
            NamedKey::Backspace => "backspace",
            NamedKey::Delete => "delete",
            NamedKey::Down => "down",
            NamedKey::End => "end",
            NamedKey::Enter => "enter",
            NamedKey::Esc => "esc",
            NamedKey::Home => "home",
            NamedKey::Insert => "insert",
            NamedKey::Left => "left",
            NamedKey::PageDown => "page_down",
            NamedKey::PageUp => "page_up",
            NamedKey::Right => "right",
            NamedKey::Space => "space",
            NamedKey::Tab => "tab",
            NamedKey::Up => "up",
            NamedKey::CapsLock => "caps_lock",
            NamedKey::Menu => "menu",
            NamedKey::NumLock => "num_lock",
            NamedKey::Pause => "pause",
            NamedKey::PrintScreen => "print_screen",
            NamedKey::ScrollLock => "scroll_lock",
            NamedKey::F1 => "f1",
            NamedKey::F2 => "f2",
            NamedKey::F3 => "f3",
            NamedKey::F4 => "f4",
            NamedKey::F5 => "f5",
            NamedKey::F6 => "f6",
            NamedKey::F7 => "f7",
            NamedKey::F8 => "f8",
            NamedKey::F9 => "f9",
            NamedKey::F10 => "f10",
            NamedKey::F11 => "f11",
            NamedKey::F12 => "f12",
            NamedKey::F13 => "f13",
            NamedKey::F14 => "f14",
            NamedKey::F15 => "f15",
            NamedKey::F16 => "f16",
            NamedKey::F17 => "f17",
            NamedKey::F18 => "f18",
            NamedKey::F19 => "f19",
            NamedKey::F20 => "f20",
            NamedKey::MediaPlayPause => "media_play_pause",
            NamedKey::MediaVolumeMute => "media_volume_mute",
            NamedKey::MediaVolumeDown => "media_volume_down",
            NamedKey::MediaVolumeUp => "media_volume_up",
            NamedKey::MediaPrevious => "media_previous",
            NamedKey::MediaNext => "media_next",
            NamedKey::Kp0 => "kp_0",
            NamedKey::Kp1 => "kp_1",
            NamedKey::Kp2 => "kp_2",
            NamedKey::Kp3 => "kp_3",
            NamedKey::Kp4 => "kp_4",
            NamedKey::Kp5 => "kp_5",
            NamedKey::Kp6 => "kp_6",
            NamedKey::Kp7 => "kp_7",
            NamedKey::Kp8 => "kp_8",
            NamedKey::Kp9 => "kp_9",
            NamedKey::KpMinus => "kp_minus",
            NamedKey::KpPlus => "kp_plus",
            NamedKey::KpMultiply => "kp_multiply",
            NamedKey::KpDivide => "kp_divide",
            NamedKey::KpEnter => "kp_enter",
            NamedKey::KpDelete => "kp_delete",
        }
    }

    /// Looks up a key by its wire name (without the `Key.` prefix).
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<NamedKey> {
        let key = match name {
            "alt" => NamedKey::Alt,
            "alt_l" => NamedKey::AltL,
            "alt_r" => NamedKey::AltR,
            "alt_gr" => NamedKey::AltGr,
            "cmd" => NamedKey::Cmd,
            "cmd_l" => NamedKey::CmdL,
            "cmd_r" => NamedKey::CmdR,
            "ctrl" => NamedKey::Ctrl,
            "ctrl_l" => NamedKey::CtrlL,
            "ctrl_r" => NamedKey::CtrlR,
            "shift" => NamedKey::Shift,
            "shift_l" => NamedKey::ShiftL,
            "shift_r" => NamedKey::ShiftR,
            "backspace" => NamedKey::Backspace,
            "delete" => NamedKey::Delete,
            "down" => NamedKey::Down,
            "end" => NamedKey::End,
            "enter" => NamedKey::Enter,
            "esc" => NamedKey::Esc,
            "home" => NamedKey::Home,
            "insert" => NamedKey::Insert,
            "left" => NamedKey::Left,
            "page_down" => NamedKey::PageDown,
            "page_up" => NamedKey::PageUp,
            "right" => NamedKey::Right,
            "space" => NamedKey::Space,
            "tab" => NamedKey::Tab,
            "up" => NamedKey::Up,
            "caps_lock" => NamedKey::CapsLock,
            "menu" => NamedKey::Menu,
            "num_lock" => NamedKey::NumLock,
            "pause" => NamedKey::Pause,
            "print_screen" => NamedKey::PrintScreen,
            "scroll_lock" => NamedKey::ScrollLock,
            "f1" => NamedKey::F1,
            "f2" => NamedKey::F2,
            "f3" => NamedKey::F3,
            "f4" => NamedKey::F4,
            "f5" => NamedKey::F5,
            "f6" => NamedKey::F6,
            "f7" => NamedKey::F7,
            "f8" => NamedKey::F8,
            "f9" => NamedKey::F9,
            "f10" => NamedKey::F10,
            "f11" => NamedKey::F11,
            "f12" => NamedKey::F12,
            "f13" => NamedKey::F13,
            "f14" => NamedKey::F14,
            "f15" => NamedKey::F15,
            "f16" => NamedKey::F16,
            "f17" => NamedKey::F17,
            "f18" => NamedKey::F18,
            "f19" => NamedKey::F19,
            "f20" => NamedKey::F20,
            "media_play_pause" => NamedKey::MediaPlayPause,
            "media_volume_mute" => NamedKey::MediaVolumeMute,
            "media_volume_down" => NamedKey::MediaVolumeDown,
            "media_volume_up" => NamedKey::MediaVolumeUp,
            "media_previous" => NamedKey::MediaPrevious,
            "media_next" => NamedKey::MediaNext,
            "kp_0" => NamedKey::Kp0,
            "kp_1" => NamedKey::Kp1,
            "kp_2" => NamedKey::Kp2,
            "kp_3" => NamedKey::Kp3,
            "kp_4" => NamedKey::Kp4,
            "kp_5" => NamedKey::Kp5,
            "kp_6" => NamedKey::Kp6,
            "kp_7" => NamedKey::Kp7,
            "kp_8" => NamedKey::Kp8,
            "kp_9" => NamedKey::Kp9,
            "kp_minus" => NamedKey::KpMinus,
            "kp_plus" => NamedKey::KpPlus,
            "kp_multiply" => NamedKey::KpMultiply,
            "kp_divide" => NamedKey::KpDivide,
            "kp_enter" => NamedKey::KpEnter,
            "kp_delete" => NamedKey::KpDelete,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
