// src/encode/symbol.rs

//! The alphabet the encoder works over: every byte value plus an
//! out-of-band end-of-stream marker.

use std::fmt;

/// Numeric id of [`Symbol::EndOfStream`]; one past the last byte value.
pub const END_OF_STREAM_ID: u16 = 256;

/// Numeric id reserved for internal tree nodes. No [`Symbol`] ever maps to it.
pub const NOT_A_SYMBOL_ID: u16 = 257;

/// An atom of the encoded stream.
///
/// Ordering places all bytes in ascending value first and the sentinel last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Byte(u8),
    EndOfStream,
}

impl Symbol {
    /// Returns the numeric id: the byte value, or [`END_OF_STREAM_ID`].
    pub fn id(self) -> u16 {
        match self {
            Symbol::Byte(b) => b as u16,
            Symbol::EndOfStream => END_OF_STREAM_ID,
        }
    }

    /// Inverse of [`Symbol::id`]. Returns `None` for [`NOT_A_SYMBOL_ID`] and
    /// anything beyond it.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0..=255 => Some(Symbol::Byte(id as u8)),
            END_OF_STREAM_ID => Some(Symbol::EndOfStream),
            _ => None,
        }
    }

    pub fn as_byte(self) -> Option<u8> {
        match self {
            Symbol::Byte(b) => Some(b),
            Symbol::EndOfStream => None,
        }
    }

    pub fn is_end_of_stream(self) -> bool {
        matches!(self, Symbol::EndOfStream)
    }
}

impl From<u8> for Symbol {
    fn from(b: u8) -> Self {
        Symbol::Byte(b)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) => write!(f, "byte 0x{:02x}", b),
            Symbol::EndOfStream => write!(f, "end-of-stream"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_stay_outside_byte_range() {
        assert_eq!(Symbol::Byte(0).id(), 0);
        assert_eq!(Symbol::Byte(255).id(), 255);
        assert_eq!(Symbol::EndOfStream.id(), END_OF_STREAM_ID);
        assert!(END_OF_STREAM_ID > u8::MAX as u16);
        assert_ne!(NOT_A_SYMBOL_ID, END_OF_STREAM_ID);
    }

    #[test]
    fn test_from_id() {
        for id in 0..=END_OF_STREAM_ID {
            let symbol = Symbol::from_id(id).unwrap();
            assert_eq!(symbol.id(), id);
        }
        assert_eq!(Symbol::from_id(NOT_A_SYMBOL_ID), None);
    }

    #[test]
    fn test_ordering_puts_sentinel_last() {
        assert!(Symbol::Byte(255) < Symbol::EndOfStream);
        assert!(Symbol::Byte(1) < Symbol::Byte(2));
        assert_eq!(Symbol::EndOfStream.as_byte(), None);
        assert_eq!(Symbol::from(b'a').as_byte(), Some(b'a'));
    }
}
