//! Raw and mouse reporting modes
use crate::{
    encoder::{Encoder, TTYEncoder, TerminalCommand},
    error::Error,
    terminal::TerminalDevice,
};
use std::fmt;

/// Current terminal modes
///
/// `mouse_mode` implies `raw_mode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModeState {
    pub raw_mode: bool,
    pub mouse_mode: bool,
}

/// Tracks terminal modes and the attributes saved when raw mode was entered
///
/// There is a single slot for saved attributes, nested raw mode sessions are
/// not supported.
pub struct ModeController<D: TerminalDevice> {
    state: ModeState,
    saved: Option<D::Attrs>,
    encoder: TTYEncoder,
}

impl<D: TerminalDevice> Default for ModeController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: TerminalDevice> fmt::Debug for ModeController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeController")
            .field("state", &self.state)
            .field("saved", &self.saved.is_some())
            .finish()
    }
}

impl<D: TerminalDevice> ModeController<D> {
    pub fn new() -> Self {
        Self {
            state: ModeState::default(),
            saved: None,
            encoder: TTYEncoder::new(),
        }
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    /// Attributes saved when raw mode was entered
    pub fn saved_attrs(&self) -> Option<&D::Attrs> {
        self.saved.as_ref()
    }

    /// Disable canonical mode and echo, no-op if raw mode is already enabled
    pub fn enable_raw_mode(&mut self, device: &mut D) -> Result<(), Error> {
        if self.state.raw_mode {
            return Ok(());
        }
        // [Entering Raw Mode](https://viewsourcecode.org/snaptoken/kilo/02.enteringRawMode.html)
        let saved = device.attrs()?;
        device.set_attrs(&D::raw_attrs(&saved))?;
        self.saved = Some(saved);
        self.state.raw_mode = true;
        tracing::debug!("[ModeController] raw mode enabled");
        Ok(())
    }

    /// Restore attributes saved by [`enable_raw_mode`](Self::enable_raw_mode),
    /// no-op if raw mode is not enabled.
    ///
    /// Mouse reporting is switched off first as it is useless without raw mode.
    /// Attributes are restored even if switching mouse reporting off fails,
    /// that error is returned afterwards. A failed restore takes precedence.
    pub fn disable_raw_mode(&mut self, device: &mut D) -> Result<(), Error> {
        if !self.state.raw_mode {
            return Ok(());
        }
        let mouse_result = if self.state.mouse_mode {
            let result = self.disable_mouse_mode(device);
            self.state.mouse_mode = false;
            result
        } else {
            Ok(())
        };
        if let Some(saved) = self.saved.as_ref() {
            if let Err(error) = device.set_attrs(saved) {
                if let Err(mouse_error) = mouse_result {
                    tracing::warn!("[ModeController] failed to disable mouse: {}", mouse_error);
                }
                // snapshot is kept so that restoring can be retried
                return Err(error);
            }
        }
        self.saved = None;
        self.state.raw_mode = false;
        tracing::debug!("[ModeController] raw mode disabled");
        mouse_result
    }

    /// Ask terminal to report mouse clicks
    ///
    /// # Panics
    /// If raw mode is not enabled, reports are only delivered unbuffered.
    pub fn enable_mouse_mode(&mut self, device: &mut D) -> Result<(), Error> {
        assert!(
            self.state.raw_mode,
            "mouse mode can only be enabled in raw mode"
        );
        self.encoder
            .encode(&mut *device, TerminalCommand::MouseReport(true))?;
        device.flush()?;
        self.state.mouse_mode = true;
        tracing::debug!("[ModeController] mouse mode enabled");
        Ok(())
    }

    /// Stop mouse click reports, safe to call in any mode
    pub fn disable_mouse_mode(&mut self, device: &mut D) -> Result<(), Error> {
        self.encoder
            .encode(&mut *device, TerminalCommand::MouseReport(false))?;
        device.flush()?;
        self.state.mouse_mode = false;
        tracing::debug!("[ModeController] mouse mode disabled");
        Ok(())
    }
}
