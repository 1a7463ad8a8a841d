//! Key types
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Flat code reported when no input was available
pub const ERR: i32 = -1;

/// Code of a decoded key
///
/// Escape sequences are reduced to the sum of their bytes (see
/// [`decode_escape`](crate::decoder::decode_escape)), so the set of codes is
/// open: known sums have named constants, anything else is still a valid code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ESC: Self = KeyCode(27);
    pub const KEY_EOF: Self = KeyCode(4);
    pub const ARROW_UP: Self = KeyCode(156);
    pub const ARROW_DOWN: Self = KeyCode(157);
    pub const ARROW_RIGHT: Self = KeyCode(158);
    pub const ARROW_LEFT: Self = KeyCode(159);
    pub const UP_ARROW: Self = Self::ARROW_UP;
    pub const DOWN_ARROW: Self = Self::ARROW_DOWN;
    pub const RIGHT_ARROW: Self = Self::ARROW_RIGHT;
    pub const LEFT_ARROW: Self = Self::ARROW_LEFT;
    pub const HOME: Self = KeyCode(266);
    pub const INSERT: Self = KeyCode(267);
    pub const DEL: Self = KeyCode(268);
    pub const DELETE: Self = Self::DEL;
    pub const END: Self = KeyCode(269);
    pub const PAGE_UP: Self = KeyCode(270);
    pub const PAGE_DOWN: Self = KeyCode(271);
    pub const F1: Self = KeyCode(315);
    pub const F2: Self = KeyCode(316);
    pub const F3: Self = KeyCode(317);
    pub const F4: Self = KeyCode(318);
    pub const F5: Self = KeyCode(319);
    // F6 and F11 skip a code, terminals send `[17~` and `[23~`
    pub const F6: Self = KeyCode(321);
    pub const F7: Self = KeyCode(322);
    pub const F8: Self = KeyCode(323);
    pub const F9: Self = KeyCode(324);
    pub const F10: Self = KeyCode(325);
    pub const F11: Self = KeyCode(327);
    pub const F12: Self = KeyCode(328);
    pub const MOUSE_WHEEL_UP: Self = KeyCode(650);
    pub const MOUSE_WHEEL_DOWN: Self = KeyCode(658);

    /// Raw integer value of the code
    pub fn value(self) -> u32 {
        self.0
    }

    /// Name of the key if the code is one of the known constants
    pub fn name(self) -> Option<KeyName> {
        let name = match self {
            Self::ESC => KeyName::Esc,
            Self::KEY_EOF => KeyName::Eof,
            Self::ARROW_UP => KeyName::Up,
            Self::ARROW_DOWN => KeyName::Down,
            Self::ARROW_RIGHT => KeyName::Right,
            Self::ARROW_LEFT => KeyName::Left,
            Self::HOME => KeyName::Home,
            Self::INSERT => KeyName::Insert,
            Self::DELETE => KeyName::Delete,
            Self::END => KeyName::End,
            Self::PAGE_UP => KeyName::PageUp,
            Self::PAGE_DOWN => KeyName::PageDown,
            Self::F1 => KeyName::F1,
            Self::F2 => KeyName::F2,
            Self::F3 => KeyName::F3,
            Self::F4 => KeyName::F4,
            Self::F5 => KeyName::F5,
            Self::F6 => KeyName::F6,
            Self::F7 => KeyName::F7,
            Self::F8 => KeyName::F8,
            Self::F9 => KeyName::F9,
            Self::F10 => KeyName::F10,
            Self::F11 => KeyName::F11,
            Self::F12 => KeyName::F12,
            Self::MOUSE_WHEEL_UP => KeyName::MouseWheelUp,
            Self::MOUSE_WHEEL_DOWN => KeyName::MouseWheelDown,
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{:?}", name),
            None => write!(f, "code({})", self.0),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<KeyName> for KeyCode {
    fn from(name: KeyName) -> Self {
        match name {
            KeyName::Esc => Self::ESC,
            KeyName::Eof => Self::KEY_EOF,
            KeyName::Up => Self::ARROW_UP,
            KeyName::Down => Self::ARROW_DOWN,
            KeyName::Right => Self::ARROW_RIGHT,
            KeyName::Left => Self::ARROW_LEFT,
            KeyName::Home => Self::HOME,
            KeyName::Insert => Self::INSERT,
            KeyName::Delete => Self::DELETE,
            KeyName::End => Self::END,
            KeyName::PageUp => Self::PAGE_UP,
            KeyName::PageDown => Self::PAGE_DOWN,
            KeyName::F1 => Self::F1,
            KeyName::F2 => Self::F2,
            KeyName::F3 => Self::F3,
            KeyName::F4 => Self::F4,
            KeyName::F5 => Self::F5,
            KeyName::F6 => Self::F6,
            KeyName::F7 => Self::F7,
            KeyName::F8 => Self::F8,
            KeyName::F9 => Self::F9,
            KeyName::F10 => Self::F10,
            KeyName::F11 => Self::F11,
            KeyName::F12 => Self::F12,
            KeyName::MouseWheelUp => Self::MOUSE_WHEEL_UP,
            KeyName::MouseWheelDown => Self::MOUSE_WHEEL_DOWN,
        }
    }
}

/// Key name
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyName {
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
    Delete,
    Down,
    End,
    Eof,
    Esc,
    Home,
    Insert,
    Left,
    MouseWheelDown,
    MouseWheelUp,
    PageDown,
    PageUp,
    Right,
    Up,
}

impl fmt::Debug for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyName::F1 => "f1",
            KeyName::F2 => "f2",
            KeyName::F3 => "f3",
            KeyName::F4 => "f4",
            KeyName::F5 => "f5",
            KeyName::F6 => "f6",
            KeyName::F7 => "f7",
            KeyName::F8 => "f8",
            KeyName::F9 => "f9",
            KeyName::F10 => "f10",
            KeyName::F11 => "f11",
            KeyName::F12 => "f12",
            KeyName::Left => "left",
            KeyName::Right => "right",
            KeyName::Down => "down",
            KeyName::Up => "up",
            KeyName::PageUp => "pageup",
            KeyName::PageDown => "pagedown",
            KeyName::End => "end",
            KeyName::Home => "home",
            KeyName::Insert => "insert",
            KeyName::Delete => "delete",
            KeyName::Esc => "esc",
            KeyName::Eof => "eof",
            KeyName::MouseWheelDown => "mousewheeldown",
            KeyName::MouseWheelUp => "mousewheelup",
        };
        f.write_str(name)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for KeyName {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let key = match string.to_lowercase().as_ref() {
            "f1" => KeyName::F1,
            "f2" => KeyName::F2,
            "f3" => KeyName::F3,
            "f4" => KeyName::F4,
            "f5" => KeyName::F5,
            "f6" => KeyName::F6,
            "f7" => KeyName::F7,
            "f8" => KeyName::F8,
            "f9" => KeyName::F9,
            "f10" => KeyName::F10,
            "f11" => KeyName::F11,
            "f12" => KeyName::F12,
            "left" => KeyName::Left,
            "up" => KeyName::Up,
            "right" => KeyName::Right,
            "down" => KeyName::Down,
            "pageup" => KeyName::PageUp,
            "pagedown" => KeyName::PageDown,
            "end" => KeyName::End,
            "home" => KeyName::Home,
            "insert" => KeyName::Insert,
            "delete" | "del" => KeyName::Delete,
            "esc" | "escape" => KeyName::Esc,
            "eof" => KeyName::Eof,
            "mousewheelup" => KeyName::MouseWheelUp,
            "mousewheeldown" => KeyName::MouseWheelDown,
            _ => return Err(Error::ParseError("KeyName", string.to_string())),
        };
        Ok(key)
    }
}

/// Event produced by a single [`Terminal::poll`](crate::Terminal::poll)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Literal byte, including a lone escape
    Plain(u8),
    /// Reduced escape sequence
    Named(KeyCode),
}

impl InputEvent {
    /// Integer code of the event, plain bytes map to themselves
    pub fn code(self) -> i32 {
        match self {
            InputEvent::Plain(byte) => byte as i32,
            InputEvent::Named(code) => code.0 as i32,
        }
    }

    /// Flat code of a poll result, [`ERR`] when nothing was read
    pub fn code_or_err(event: Option<Self>) -> i32 {
        event.map_or(ERR, Self::code)
    }

    /// Name of the key if the event is a known special key
    pub fn name(self) -> Option<KeyName> {
        match self {
            InputEvent::Plain(byte) => match KeyCode(byte as u32) {
                code @ (KeyCode::ESC | KeyCode::KEY_EOF) => code.name(),
                _ => None,
            },
            InputEvent::Named(code) => code.name(),
        }
    }

    /// Check whether the event is the provided plain character
    pub fn is_char(self, c: char) -> bool {
        matches!(self, InputEvent::Plain(byte) if byte as u32 == c as u32)
    }
}

impl From<KeyName> for InputEvent {
    fn from(name: KeyName) -> Self {
        match name {
            KeyName::Esc => InputEvent::Plain(27),
            KeyName::Eof => InputEvent::Plain(4),
            name => InputEvent::Named(name.into()),
        }
    }
}

impl fmt::Debug for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Plain(byte) if byte.is_ascii_graphic() || *byte == b' ' => {
                write!(f, "{:?}", char::from(*byte))
            }
            InputEvent::Plain(byte) => match self.name() {
                Some(name) => write!(f, "{:?}", name),
                None => write!(f, "0x{:02x}", byte),
            },
            InputEvent::Named(code) => write!(f, "{:?}", code),
        }
    }
}
