//! In-memory terminal device
use crate::{
    error::Error,
    probe::InputProbe,
    terminal::{Size, TerminalDevice, TerminalSize},
};
use std::{
    collections::VecDeque,
    io::{Read, Write},
};

/// Attributes of [`MemoryTty`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryAttrs {
    pub canonical: bool,
    pub echo: bool,
    /// Arbitrary value, used to tell snapshots apart
    pub tag: u32,
}

impl Default for MemoryAttrs {
    fn default() -> Self {
        Self {
            canonical: true,
            echo: true,
            tag: 0,
        }
    }
}

/// Terminal device that keeps input and output in memory
///
/// Input is fed with [`feed`](MemoryTty::feed) and reported as available all
/// at once, output is accumulated and can be inspected with
/// [`output`](MemoryTty::output).
#[derive(Debug, Clone)]
pub struct MemoryTty {
    input: VecDeque<u8>,
    output: Vec<u8>,
    attrs: MemoryAttrs,
    attrs_history: Vec<MemoryAttrs>,
    size: TerminalSize,
    write_failure: bool,
    size_failure: bool,
}

impl Default for MemoryTty {
    fn default() -> Self {
        Self::new(Size {
            height: 24,
            width: 80,
        })
    }
}

impl MemoryTty {
    pub fn new(cells: Size) -> Self {
        Self {
            input: VecDeque::new(),
            output: Vec::new(),
            attrs: MemoryAttrs::default(),
            attrs_history: Vec::new(),
            size: TerminalSize {
                cells,
                pixels: Size::default(),
            },
            write_failure: false,
            size_failure: false,
        }
    }

    /// Append bytes to the input queue
    pub fn feed(&mut self, bytes: impl AsRef<[u8]>) -> &mut Self {
        self.input.extend(bytes.as_ref());
        self
    }

    /// Number of input bytes that were not consumed yet
    pub fn pending(&self) -> usize {
        self.input.len()
    }

    /// Everything written so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take everything written so far
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn current_attrs(&self) -> MemoryAttrs {
        self.attrs
    }

    /// Replace attributes without recording them in the history, as if changed
    /// by another program
    pub fn replace_attrs(&mut self, attrs: MemoryAttrs) {
        self.attrs = attrs;
    }

    /// Attributes applied with [`TerminalDevice::set_attrs`], oldest first
    pub fn attrs_history(&self) -> &[MemoryAttrs] {
        &self.attrs_history
    }

    pub fn resize(&mut self, cells: Size) {
        self.size.cells = cells;
    }

    /// Make every following write fail with `BrokenPipe`
    pub fn set_write_failure(&mut self, fail: bool) {
        self.write_failure = fail;
    }

    /// Make every following size query fail
    pub fn set_size_failure(&mut self, fail: bool) {
        self.size_failure = fail;
    }
}

impl Read for MemoryTty {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MemoryTty {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.write_failure {
            return Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "memory tty write failure",
            ));
        }
        self.output.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl InputProbe for MemoryTty {
    fn bytes_available(&self) -> Result<usize, Error> {
        Ok(self.input.len())
    }
}

impl TerminalDevice for MemoryTty {
    type Attrs = MemoryAttrs;

    fn attrs(&self) -> Result<Self::Attrs, Error> {
        Ok(self.attrs)
    }

    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), Error> {
        self.attrs = *attrs;
        self.attrs_history.push(*attrs);
        Ok(())
    }

    fn raw_attrs(attrs: &Self::Attrs) -> Self::Attrs {
        MemoryAttrs {
            canonical: false,
            echo: false,
            ..*attrs
        }
    }

    fn size(&self) -> Result<TerminalSize, Error> {
        if self.size_failure {
            return Err(Error::Other("memory tty size failure".into()));
        }
        Ok(self.size)
    }
}
