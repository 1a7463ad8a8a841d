//! Error type
use std::{borrow::Cow, fmt};

#[derive(Debug)]
pub enum Error {
    /// Interrupt/termination signal was received, terminal must be disposed
    Quit,
    IOError(std::io::Error),
    Errno(rustix::io::Errno),
    JsonError(serde_json::Error),
    NotATTY,
    ParseError(&'static str, String),
    Other(Cow<'static, str>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;
        match self {
            Quit => None,
            IOError(ref error) => Some(error),
            Errno(ref error) => Some(error),
            JsonError(ref error) => Some(error),
            NotATTY => None,
            ParseError(..) => None,
            Other(..) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}

impl From<rustix::io::Errno> for Error {
    fn from(error: rustix::io::Errno) -> Self {
        Self::Errno(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error)
    }
}
