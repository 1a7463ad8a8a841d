//! Unix tty device
use crate::{
    error::Error,
    probe::InputProbe,
    terminal::{Size, TerminalDevice, TerminalSize},
};
use rustix::termios::{self, LocalModes, OptionalActions, Termios};
use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    path::Path,
};

/// Controlling terminal opened as a file
#[derive(Debug)]
pub struct UnixTty {
    file: File,
}

impl UnixTty {
    /// Open `/dev/tty` device
    pub fn new() -> Result<Self, Error> {
        Self::open("/dev/tty")
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path.as_ref())?;
        Self::from_file(file)
    }

    /// Wrap already opened file, fails with [`Error::NotATTY`] if it is not a terminal
    pub fn from_file(file: File) -> Result<Self, Error> {
        if !termios::isatty(&file) {
            return Err(Error::NotATTY);
        }
        Ok(Self { file })
    }
}

impl Read for UnixTty {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for UnixTty {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl InputProbe for UnixTty {
    fn bytes_available(&self) -> Result<usize, Error> {
        self.file.bytes_available()
    }
}

impl TerminalDevice for UnixTty {
    type Attrs = Termios;

    fn attrs(&self) -> Result<Self::Attrs, Error> {
        Ok(termios::tcgetattr(&self.file)?)
    }

    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), Error> {
        termios::tcsetattr(&self.file, OptionalActions::Now, attrs)?;
        Ok(())
    }

    fn raw_attrs(attrs: &Self::Attrs) -> Self::Attrs {
        let mut attrs = attrs.clone();
        // turn off `canonical mode` and do not echo back typed input,
        // signals stay enabled so `ctrl-c` still interrupts
        attrs.local_modes.remove(LocalModes::ICANON | LocalModes::ECHO);
        attrs
    }

    fn size(&self) -> Result<TerminalSize, Error> {
        let winsize = termios::tcgetwinsize(&self.file)?;
        Ok(TerminalSize {
            cells: Size {
                height: winsize.ws_row as usize,
                width: winsize.ws_col as usize,
            },
            pixels: Size {
                height: winsize.ws_ypixel as usize,
                width: winsize.ws_xpixel as usize,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_tty() -> Result<(), Error> {
        let path = std::env::temp_dir().join(format!("quick_term_tty_{}", std::process::id()));
        File::create(&path)?;
        let result = UnixTty::open(&path);
        std::fs::remove_file(&path)?;
        assert!(matches!(result, Err(Error::NotATTY)));
        Ok(())
    }
}
