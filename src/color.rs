use crate::error::Error;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Cow, fmt, str::FromStr};

/// 24-bit sRGB color
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RGB([u8; 3]);

impl RGB {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RGB([r, g, b])
    }

    pub fn rgb_u8(self) -> [u8; 3] {
        self.0
    }

    pub fn from_str_opt(rgb: &str) -> Option<Self> {
        if rgb.len() != 7 || !rgb.starts_with('#') {
            return None;
        }
        let mut hex = hex_decode(rgb[1..].as_bytes());
        let red = hex.next()?;
        let green = hex.next()?;
        let blue = hex.next()?;
        Some(Self([red, green, blue]))
    }
}

/// Decode pairs of hex digits, stops on the first invalid pair
fn hex_decode(slice: &[u8]) -> impl Iterator<Item = u8> + '_ {
    fn digit(byte: u8) -> Option<u8> {
        char::from(byte).to_digit(16).map(|d| d as u8)
    }
    slice
        .chunks_exact(2)
        .map_while(|pair| Some((digit(pair[0])? << 4) | digit(pair[1])?))
}

impl FromStr for RGB {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::from_str_opt(string).ok_or_else(|| Error::ParseError("RGB", string.to_string()))
    }
}

impl fmt::Debug for RGB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for RGB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Serialize for RGB {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RGB {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = Cow::<'de, str>::deserialize(deserializer)?;
        RGB::from_str(color.as_ref()).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() -> Result<(), Error> {
        assert_eq!("#d3869b".parse::<RGB>()?, RGB::new(211, 134, 155));
        assert_eq!("#FB4935".parse::<RGB>()?, RGB::new(251, 73, 53));
        assert!("#d3869".parse::<RGB>().is_err());
        assert!("d3869bff".parse::<RGB>().is_err());
        assert!("#d3g69b".parse::<RGB>().is_err());
        assert_eq!(RGB::new(80, 80, 40).to_string(), "#505028");
        Ok(())
    }

    #[test]
    fn test_color_serde() -> Result<(), Error> {
        let color: RGB = serde_json::from_str("\"#b8bb26\"")?;
        assert_eq!(color, RGB::new(184, 187, 38));
        assert_eq!(serde_json::to_string(&color)?, "\"#b8bb26\"");
        Ok(())
    }
}
