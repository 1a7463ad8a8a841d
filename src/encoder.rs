//! Encoders
use crate::{color::RGB, error::Error};
use std::io::Write;

/// Encoder interface
pub trait Encoder {
    type Item;
    type Error: From<std::io::Error>;

    /// Encode item and write result to Write object
    fn encode<W: Write>(&mut self, out: W, item: Self::Item) -> Result<(), Self::Error>;
}

/// One of the eight basic ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicColor {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
}

/// Output commands understood by [`TTYEncoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalCommand {
    /// Basic foreground color, optionally bold
    Basic { color: BasicColor, bold: bool },
    /// 24-bit foreground color
    Foreground(RGB),
    /// 24-bit background color
    Background(RGB),
    /// Reset colors and attributes to terminal defaults
    ResetColor,
    /// Move cursor, coordinates are 1-based like the ones reported by mouse events
    CursorTo { row: usize, col: usize },
    /// Show or hide cursor
    CursorVisible(bool),
    /// Erase whole screen
    EraseScreen,
    /// Switch to/from alternate screen buffer
    AltScreen(bool),
    /// Enable/disable SGR mouse click reporting
    MouseReport(bool),
}

/// TTY encoder
///
/// References:
/// - [XTerm Control Sequences](https://www.invisible-island.net/xterm/ctlseqs/ctlseqs.html)
/// - [ANSI Escape Code](https://en.wikipedia.org/wiki/ANSI_escape_code)
#[derive(Debug, Default)]
pub struct TTYEncoder;

impl TTYEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for TTYEncoder {
    type Item = TerminalCommand;
    type Error = Error;

    fn encode<W: Write>(&mut self, mut out: W, cmd: Self::Item) -> Result<(), Self::Error> {
        use TerminalCommand::*;

        match cmd {
            Basic { color, bold } => {
                if bold {
                    out.write_all(b"\x1b[1m")?;
                }
                write!(out, "\x1b[{}m", color as u8)?;
            }
            Foreground(color) => {
                let [r, g, b] = color.rgb_u8();
                write!(out, "\x1b[38;2;{};{};{}m", r, g, b)?;
            }
            Background(color) => {
                let [r, g, b] = color.rgb_u8();
                write!(out, "\x1b[48;2;{};{};{}m", r, g, b)?;
            }
            ResetColor => out.write_all(b"\x1b[0m")?,
            CursorTo { row, col } => write!(out, "\x1b[{};{}H", row, col)?,
            CursorVisible(visible) => {
                let flag = if visible { "h" } else { "l" };
                write!(out, "\x1b[?25{}", flag)?;
            }
            EraseScreen => out.write_all(b"\x1b[2J")?,
            AltScreen(enable) => {
                let flag = if enable { "h" } else { "l" };
                write!(out, "\x1b[?1049{}", flag)?;
            }
            MouseReport(enable) => {
                // X11 press/release reporting, SGR extended coordinates, urxvt fallback
                let flag = if enable { "h" } else { "l" };
                write!(out, "\x1b[?1000;1006;1015{}", flag)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_encode_assert(cmd: TerminalCommand, reference: &str) -> Result<(), Error> {
        let mut out = Vec::new();
        TTYEncoder::new().encode(&mut out, cmd)?;
        assert_eq!(std::str::from_utf8(out.as_ref()).as_deref(), Ok(reference));
        Ok(())
    }

    #[test]
    fn test_colors() -> Result<(), Error> {
        tty_encode_assert(
            TerminalCommand::Background("#505028".parse()?),
            "\x1b[48;2;80;80;40m",
        )?;
        tty_encode_assert(
            TerminalCommand::Foreground(RGB::new(180, 0, 0)),
            "\x1b[38;2;180;0;0m",
        )?;
        tty_encode_assert(
            TerminalCommand::Basic {
                color: BasicColor::Red,
                bold: false,
            },
            "\x1b[31m",
        )?;
        tty_encode_assert(
            TerminalCommand::Basic {
                color: BasicColor::Cyan,
                bold: true,
            },
            "\x1b[1m\x1b[36m",
        )?;
        tty_encode_assert(TerminalCommand::ResetColor, "\x1b[0m")?;
        Ok(())
    }

    #[test]
    fn test_tty_encoder() -> Result<(), Error> {
        tty_encode_assert(TerminalCommand::CursorTo { row: 10, col: 40 }, "\x1b[10;40H")?;
        tty_encode_assert(TerminalCommand::CursorVisible(false), "\x1b[?25l")?;
        tty_encode_assert(TerminalCommand::EraseScreen, "\x1b[2J")?;
        tty_encode_assert(TerminalCommand::AltScreen(true), "\x1b[?1049h")?;
        tty_encode_assert(TerminalCommand::MouseReport(true), "\x1b[?1000;1006;1015h")?;
        tty_encode_assert(TerminalCommand::MouseReport(false), "\x1b[?1000;1006;1015l")?;
        Ok(())
    }
}
