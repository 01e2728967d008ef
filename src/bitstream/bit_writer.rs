// src/bitstream/bit_writer.rs

use super::BitSink;
use crate::utils::error::Result;
use std::io::Write;

/// A bit-level writer for writing compressed data.
///
/// Bits are packed MSB-first. A partially filled byte stays buffered until
/// [`BitWriter::flush`] pads it with zeros; nothing is flushed implicitly.
pub struct BitWriter<W: Write> {
    writer: W,
    current_byte: u8,
    bits_in_current: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Creates a new BitWriter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_byte: 0,
            bits_in_current: 0,
            bits_written: 0,
        }
    }

    /// Total number of bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Writes out any partial byte, zero-padded, and flushes the inner writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_current > 0 {
            self.writer.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bits_in_current = 0;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the inner writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_current);
        }
        self.bits_in_current += 1;
        self.bits_written += 1;

        if self.bits_in_current == 8 {
            self.writer.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bits_in_current = 0;
        }
        Ok(())
    }
}
