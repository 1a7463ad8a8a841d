//! Minimal posix terminal control
//!
//! Switches the terminal into raw mode, enables mouse click reports and
//! decodes input without blocking:
//!
//! ```no_run
//! use quick_term::{Error, InputEvent, SystemTerminal};
//!
//! fn main() -> Result<(), Error> {
//!     let mut term = SystemTerminal::new()?;
//!     term.enable_raw_mode()?;
//!     term.enable_mouse_mode()?;
//!     term.set_mouse_down(|pos| tracing::info!("click {},{}", pos.row, pos.col));
//!     loop {
//!         match term.wait()? {
//!             InputEvent::Plain(b'q') => break,
//!             event => tracing::info!("{:?}", event),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
#![allow(clippy::type_complexity)]

pub mod callbacks;
pub mod color;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod keys;
mod memory;
pub mod mode;
pub mod probe;
pub mod terminal;
mod unix;

pub use callbacks::{MouseAction, MouseEvent, MouseHandler, MouseHandlers};
pub use color::RGB;
pub use config::TerminalConfig;
pub use encoder::{BasicColor, Encoder, TTYEncoder, TerminalCommand};
pub use error::Error;
pub use keys::{InputEvent, KeyCode, KeyName, ERR};
pub use memory::{MemoryAttrs, MemoryTty};
pub use mode::ModeState;
pub use probe::InputProbe;
pub use terminal::{Position, Size, SystemTerminal, Terminal, TerminalDevice, TerminalSize};
pub use unix::UnixTty;
