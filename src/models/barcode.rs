use super::BarType;
use std::fmt;
use std::str::FromStr;

/// Number of bars in an Intelligent Mail barcode
pub const NUM_BARS: usize = 65;

/// Character emitted for every position when no barcode was found
pub const UNRESOLVED: char = ' ';

/// Result of one scan: either all 65 bar types, or the "no barcode found"
/// sentinel. Both render as exactly [`NUM_BARS`] characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeString {
    /// Every bar was classified
    Decoded([BarType; NUM_BARS]),
    /// No candidate region held exactly [`NUM_BARS`] bars
    NotFound,
}

impl BarcodeString {
    /// Build from a classified bar list; anything other than exactly
    /// [`NUM_BARS`] entries yields [`BarcodeString::NotFound`].
    pub fn from_types(types: &[BarType]) -> Self {
        match <[BarType; NUM_BARS]>::try_from(types) {
            Ok(symbols) => BarcodeString::Decoded(symbols),
            Err(_) => BarcodeString::NotFound,
        }
    }

    /// Whether a barcode was decoded
    pub fn is_found(&self) -> bool {
        matches!(self, BarcodeString::Decoded(_))
    }

    /// Decoded bar types, if any
    pub fn symbols(&self) -> Option<&[BarType]> {
        match self {
            BarcodeString::Decoded(symbols) => Some(&symbols[..]),
            BarcodeString::NotFound => None,
        }
    }
}

impl fmt::Display for BarcodeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarcodeString::Decoded(symbols) => {
                for ty in symbols {
                    write!(f, "{}", ty.as_char())?;
                }
            }
            BarcodeString::NotFound => {
                for _ in 0..NUM_BARS {
                    write!(f, "{}", UNRESOLVED)?;
                }
            }
        }
        Ok(())
    }
}

/// Error parsing a barcode string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBarcodeError {
    /// Wrong number of characters
    #[error("expected 65 characters, got {0}")]
    Length(usize),
    /// A character outside `{T, A, D, F}` (or a partially blank string)
    #[error("invalid bar character {ch:?} at position {index}")]
    Symbol {
        /// Offending character
        ch: char,
        /// Zero-based position
        index: usize,
    },
}

impl FromStr for BarcodeString {
    type Err = ParseBarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != NUM_BARS {
            return Err(ParseBarcodeError::Length(len));
        }
        if s.chars().all(|c| c == UNRESOLVED) {
            return Ok(BarcodeString::NotFound);
        }

        let mut symbols = [BarType::Tracker; NUM_BARS];
        for (index, ch) in s.chars().enumerate() {
            symbols[index] =
                BarType::from_char(ch).ok_or(ParseBarcodeError::Symbol { ch, index })?;
        }
        Ok(BarcodeString::Decoded(symbols))
    }
}
