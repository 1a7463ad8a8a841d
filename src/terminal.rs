//! Terminal context
use crate::{
    callbacks::MouseHandlers,
    config::TerminalConfig,
    decoder::{decode_escape, EscapeBuffer, ESC, MOUSE_PREFIX},
    encoder::{Encoder, TTYEncoder, TerminalCommand},
    error::Error,
    keys::InputEvent,
    mode::{ModeController, ModeState},
    probe::InputProbe,
    unix::UnixTty,
};
use signal_hook::{
    consts::{SIGINT, SIGQUIT, SIGTERM},
    iterator::Signals,
};
use std::{
    fmt,
    io::{Read, Write},
    time::Duration,
};

/// Position of a cell, as reported by the terminal (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Size {
    pub height: usize,
    pub width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TerminalSize {
    pub cells: Size,
    pub pixels: Size,
}

/// Device the terminal is talking to
pub trait TerminalDevice: Read + Write + InputProbe {
    /// Snapshot of the device attributes
    type Attrs: Clone;

    /// Current attributes
    fn attrs(&self) -> Result<Self::Attrs, Error>;

    /// Apply attributes immediately
    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), Error>;

    /// Raw mode attributes derived from `attrs`, with canonical mode and echo disabled
    fn raw_attrs(attrs: &Self::Attrs) -> Self::Attrs;

    /// Current size of the terminal
    fn size(&self) -> Result<TerminalSize, Error>;
}

impl<D: TerminalDevice> TerminalDevice for &mut D {
    type Attrs = D::Attrs;

    fn attrs(&self) -> Result<Self::Attrs, Error> {
        (**self).attrs()
    }

    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), Error> {
        (**self).set_attrs(attrs)
    }

    fn raw_attrs(attrs: &Self::Attrs) -> Self::Attrs {
        D::raw_attrs(attrs)
    }

    fn size(&self) -> Result<TerminalSize, Error> {
        (**self).size()
    }
}

/// Terminal backed by the controlling tty
pub type SystemTerminal = Terminal<UnixTty>;

/// Terminal context
///
/// Owns the device, current modes and mouse callbacks. Dropping the terminal
/// disables mouse reporting and restores attributes saved when raw mode was
/// enabled, which also happens when unwinding from a panic. Interrupt signals
/// are reported by [`poll`](Terminal::poll) as [`Error::Quit`], so the caller
/// can return and drop the terminal.
///
/// Signal handlers stay installed after the terminal is dropped, with no
/// action registered, so interrupts no longer terminate the process. Callers
/// are expected to exit after handling [`Error::Quit`].
pub struct Terminal<D: TerminalDevice> {
    device: D,
    modes: ModeController<D>,
    handlers: MouseHandlers,
    encoder: TTYEncoder,
    signals: Option<Signals>,
    poll_interval: Duration,
    cursor_hidden: bool,
    alt_screen: bool,
}

impl SystemTerminal {
    /// Open controlling terminal configured from the environment
    pub fn new() -> Result<Self, Error> {
        Self::with_config(TerminalConfig::from_env()?)
    }

    pub fn with_config(config: TerminalConfig) -> Result<Self, Error> {
        let device = UnixTty::open(&config.tty_path)?;
        Self::from_device(device, config)
    }
}

impl<D: TerminalDevice> Terminal<D> {
    /// Create terminal context for the device, modes are not changed
    pub fn from_device(device: D, config: TerminalConfig) -> Result<Self, Error> {
        let signals = if config.catch_signals {
            Some(Signals::new([SIGINT, SIGTERM, SIGQUIT])?)
        } else {
            None
        };
        Ok(Self {
            device,
            modes: ModeController::new(),
            handlers: MouseHandlers::new(config.mouse_reminder),
            encoder: TTYEncoder::new(),
            signals,
            poll_interval: config.poll_interval(),
            cursor_hidden: false,
            alt_screen: false,
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn modes(&self) -> ModeState {
        self.modes.state()
    }

    /// Attributes that will be restored when raw mode is disabled
    pub fn saved_attrs(&self) -> Option<&D::Attrs> {
        self.modes.saved_attrs()
    }

    pub fn enable_raw_mode(&mut self) -> Result<(), Error> {
        self.modes.enable_raw_mode(&mut self.device)
    }

    pub fn disable_raw_mode(&mut self) -> Result<(), Error> {
        self.modes.disable_raw_mode(&mut self.device)
    }

    /// Enable mouse click reports
    ///
    /// # Panics
    /// If raw mode is not enabled.
    pub fn enable_mouse_mode(&mut self) -> Result<(), Error> {
        self.modes.enable_mouse_mode(&mut self.device)
    }

    pub fn disable_mouse_mode(&mut self) -> Result<(), Error> {
        self.modes.disable_mouse_mode(&mut self.device)
    }

    /// Replace handler called when a mouse button is pressed
    pub fn set_mouse_down(&mut self, handler: impl FnMut(Position) + 'static) {
        self.handlers.set_mouse_down(handler)
    }

    /// Replace handler called when a mouse button is released
    pub fn set_mouse_up(&mut self, handler: impl FnMut(Position) + 'static) {
        self.handlers.set_mouse_up(handler)
    }

    pub fn handlers(&self) -> &MouseHandlers {
        &self.handlers
    }

    /// Number of input bytes that can be read without blocking
    ///
    /// # Panics
    /// If raw mode is not enabled.
    pub fn bytes_available(&self) -> Result<usize, Error> {
        assert!(
            self.modes.state().raw_mode,
            "input can only be queried in raw mode"
        );
        self.device.bytes_available()
    }

    /// Read single event without blocking.
    ///
    /// Returns `None` when nothing is available. Mouse clicks are delivered to
    /// the registered handlers before this function returns, in the order they
    /// were received. Escape sequences must arrive in full between two polls,
    /// the rest of a split sequence is decoded as a separate event.
    ///
    /// # Panics
    /// If raw mode is not enabled.
    pub fn poll(&mut self) -> Result<Option<InputEvent>, Error> {
        self.signals_check()?;

        if self.bytes_available()? == 0 {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        self.device.read_exact(&mut byte)?;
        if byte[0] != ESC {
            return Ok(Some(InputEvent::Plain(byte[0])));
        }

        // lone escape key press
        let available = self.device.bytes_available()?;
        if available == 0 {
            return Ok(Some(InputEvent::Plain(ESC)));
        }
        let mut batch = EscapeBuffer::from_elem(0, available);
        self.device.read_exact(&mut batch)?;

        // size is only needed to validate mouse coordinates
        let bounds = if batch.starts_with(MOUSE_PREFIX) {
            match self.device.size() {
                Ok(size) => size.cells,
                Err(error) => {
                    tracing::warn!(
                        "[Terminal.poll] dropped mouse events, size query failed: {}",
                        error
                    );
                    return Ok(None);
                }
            }
        } else {
            Size::default()
        };
        let Self {
            handlers, device, ..
        } = self;
        Ok(decode_escape(&batch, bounds, |event| {
            handlers.dispatch(event, &mut *device)
        }))
    }

    /// Wait for the next event, sleeping between polls
    pub fn wait(&mut self) -> Result<InputEvent, Error> {
        loop {
            if let Some(event) = self.poll()? {
                return Ok(event);
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    /// Delay between polls used by [`wait`](Terminal::wait)
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Current size of the terminal
    pub fn size(&self) -> Result<TerminalSize, Error> {
        self.device.size()
    }

    /// Write command to the terminal and flush it
    pub fn execute(&mut self, cmd: TerminalCommand) -> Result<(), Error> {
        match cmd {
            TerminalCommand::CursorVisible(visible) => self.cursor_hidden = !visible,
            TerminalCommand::AltScreen(enable) => self.alt_screen = enable,
            TerminalCommand::MouseReport(enable) => {
                return if enable {
                    self.enable_mouse_mode()
                } else {
                    self.disable_mouse_mode()
                };
            }
            _ => {}
        }
        self.encoder.encode(&mut self.device, cmd)?;
        self.device.flush()?;
        Ok(())
    }

    /// Return `Error::Quit` if a termination signal was delivered
    fn signals_check(&mut self) -> Result<(), Error> {
        let Some(signals) = self.signals.as_mut() else {
            return Ok(());
        };
        for signal in signals.pending() {
            if matches!(signal, SIGINT | SIGTERM | SIGQUIT) {
                tracing::debug!("[Terminal.poll] received signal: {}", signal);
                return Err(Error::Quit);
            }
        }
        Ok(())
    }

    fn dispose(&mut self) -> Result<(), Error> {
        let mut epilogue = Vec::new();
        if self.cursor_hidden {
            epilogue.push(TerminalCommand::CursorVisible(true));
        }
        if self.alt_screen {
            epilogue.push(TerminalCommand::AltScreen(false));
        }
        epilogue
            .into_iter()
            .try_for_each(|cmd| self.execute(cmd))
            .unwrap_or_else(|error| {
                tracing::warn!("[Terminal.dispose] failed to write epilogue: {}", error)
            });

        // disables mouse mode as well
        self.modes.disable_raw_mode(&mut self.device)?;

        if let Some(signals) = self.signals.take() {
            signals.handle().close();
        }
        Ok(())
    }
}

impl<D: TerminalDevice> std::ops::Drop for Terminal<D> {
    fn drop(&mut self) {
        if let Err(error) = self.dispose() {
            tracing::warn!("[Terminal.drop] failed to restore terminal: {}", error);
        }
    }
}

impl<D: TerminalDevice> Write for Terminal<D> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.device.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.device.flush()
    }
}

impl<D: TerminalDevice> fmt::Debug for Terminal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("modes", &self.modes)
            .field("handlers", &self.handlers)
            .field("catch_signals", &self.signals.is_some())
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
