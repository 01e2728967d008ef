// src/bitstream/bit_reader.rs

use super::BitSource;
use crate::utils::error::Result;
use std::io::{ErrorKind, Read};

/// A bit-level reader for reading compressed data.
///
/// Reads one byte from the inner reader whenever its current byte runs out,
/// so the inner reader is never advanced past the byte holding the last bit
/// handed out.
pub struct BitReader<R: Read> {
    reader: R,
    current_byte: u8,
    bits_remaining: u8,
    bits_read: u64,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_byte: 0,
            bits_remaining: 0,
            bits_read: 0,
            exhausted: false,
        }
    }

    /// Number of bits handed out so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_remaining == 0 {
            if self.exhausted {
                return Ok(None);
            }
            match self.next_byte()? {
                Some(byte) => {
                    self.current_byte = byte;
                    self.bits_remaining = 8;
                }
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }

        self.bits_remaining -= 1;
        self.bits_read += 1;
        Ok(Some((self.current_byte >> self.bits_remaining) & 1 == 1))
    }
}
