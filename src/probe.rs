//! Input availability probe
use crate::error::Error;

/// Non-blocking query of the input queue
pub trait InputProbe {
    /// Number of bytes that can be read right now without blocking.
    ///
    /// Never consumes any input.
    fn bytes_available(&self) -> Result<usize, Error>;
}

impl<P: InputProbe + ?Sized> InputProbe for &P {
    fn bytes_available(&self) -> Result<usize, Error> {
        (**self).bytes_available()
    }
}

impl<P: InputProbe + ?Sized> InputProbe for &mut P {
    fn bytes_available(&self) -> Result<usize, Error> {
        (**self).bytes_available()
    }
}

impl InputProbe for std::fs::File {
    fn bytes_available(&self) -> Result<usize, Error> {
        let count = rustix::io::ioctl_fionread(self)?;
        Ok(count as usize)
    }
}
