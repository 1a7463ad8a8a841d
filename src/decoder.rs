//! Escape sequence decoder
//!
//! Decodes the bytes that followed an escape byte within a single poll. A
//! batch is a sequence of zero or more SGR mouse clicks optionally followed
//! by a key sequence:
//!
//! - mouse click `ESC [ < 0 ; <col> ; <row> (M|m)`, delivered to a callback
//! - anything else is reduced to the sum of its bytes and reported as [`KeyCode`]
//!
//! Reference: https://invisible-island.net/xterm/ctlseqs/ctlseqs.html#h2-Mouse-Tracking
use crate::{
    callbacks::{MouseAction, MouseEvent},
    keys::{InputEvent, KeyCode},
    terminal::{Position, Size},
};
use smallvec::SmallVec;

/// Escape byte
pub const ESC: u8 = 0x1b;

/// Prefix of a left button SGR mouse sequence, after the escape byte
pub const MOUSE_PREFIX: &[u8] = b"[<0;";

/// Bytes drained from the input after an escape byte
pub type EscapeBuffer = SmallVec<[u8; 32]>;

/// Decode bytes that followed an escape byte.
///
/// Mouse clicks are passed to `dispatch` in the order they appear in the batch.
/// Returns key event for the trailing non mouse bytes, or `None` if the batch
/// was fully consumed by mouse clicks or was dropped. Clicks outside of `bounds`
/// abort decoding of the rest of the batch, this also drops double-click and
/// drag reports which are not supported.
pub fn decode_escape<F>(batch: &[u8], bounds: Size, mut dispatch: F) -> Option<InputEvent>
where
    F: FnMut(MouseEvent),
{
    let mut input = batch;
    while input.len() > MOUSE_PREFIX.len() && input.starts_with(MOUSE_PREFIX) {
        match mouse_decode(&input[MOUSE_PREFIX.len()..], bounds) {
            MouseDecode::Event(event, rest) => {
                dispatch(event);
                // next sequence of the same batch starts with its own escape
                input = match rest {
                    [ESC, rest @ ..] if !rest.is_empty() => rest,
                    rest => rest,
                };
            }
            MouseDecode::Invalid(reason) => {
                tracing::info!(
                    "[decode_escape] dropped {}: {:?}",
                    reason,
                    String::from_utf8_lossy(batch)
                );
                return None;
            }
        }
    }

    match input {
        [] => None,
        [ESC] => Some(InputEvent::Plain(ESC)),
        seq => {
            let code = key_sum(seq);
            if code.name().is_none() {
                tracing::trace!(
                    "[decode_escape] unknown key {}: {:?}",
                    code.value(),
                    String::from_utf8_lossy(seq)
                );
            }
            Some(InputEvent::Named(code))
        }
    }
}

/// Reduce escape sequence to a key code
///
/// Sum of all bytes, F9-F12 (`[20~`, `[21~`, `[23~`, `[24~`) would collide with
/// F1-F4 (`[11~`..`[14~`) hence 4 byte sequences with `2` in the second
/// position are shifted by 9.
pub fn key_sum(seq: &[u8]) -> KeyCode {
    let sum: u32 = seq.iter().map(|byte| *byte as u32).sum();
    if seq.len() == 4 && seq[1] == b'2' {
        KeyCode(sum + 9)
    } else {
        KeyCode(sum)
    }
}

enum MouseDecode<'a> {
    /// Complete event and the rest of the input
    Event(MouseEvent, &'a [u8]),
    /// Rest of the batch must be dropped
    Invalid(&'static str),
}

/// Decode `<col>;<row>(M|m)` part of the mouse sequence
///
/// Grammar is strict, any byte other than digits, a single `;` and the
/// terminator invalidates the sequence instead of being skipped.
fn mouse_decode(input: &[u8], bounds: Size) -> MouseDecode<'_> {
    let mut reading_col = true;
    let mut col = 0usize;
    let mut row = 0usize;
    for (index, &byte) in input.iter().enumerate() {
        let action = match byte {
            b'0'..=b'9' => {
                let digit = (byte - b'0') as usize;
                if reading_col {
                    col = col * 10 + digit;
                } else {
                    row = row * 10 + digit;
                }
                if col > bounds.width || row > bounds.height {
                    return MouseDecode::Invalid("out of bounds mouse event");
                }
                continue;
            }
            b';' if reading_col => {
                reading_col = false;
                continue;
            }
            b'M' => MouseAction::Down,
            b'm' => MouseAction::Up,
            _ => return MouseDecode::Invalid("malformed mouse event"),
        };
        if reading_col {
            return MouseDecode::Invalid("malformed mouse event");
        }
        let event = MouseEvent {
            action,
            pos: Position::new(row, col),
        };
        return MouseDecode::Event(event, &input[index + 1..]);
    }
    MouseDecode::Invalid("unterminated mouse event")
}
