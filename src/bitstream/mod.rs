// src/bitstream/mod.rs

//! Bit-level I/O.
//!
//! The stream encoder and decoder only ever see the narrow [`BitSink`] and
//! [`BitSource`] capabilities. [`BitWriter`] and [`BitReader`] provide them
//! over any `std::io` byte stream, packing bits MSB-first.

pub mod bit_reader;
pub mod bit_writer;

pub use bit_reader::BitReader;
pub use bit_writer::BitWriter;

use crate::utils::error::Result;
use bitvec::prelude::*;

/// Something that accepts bits one at a time.
pub trait BitSink {
    fn write_bit(&mut self, bit: bool) -> Result<()>;

    /// Writes every bit of `bits` in order.
    fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }
}

/// Something that yields bits one at a time.
pub trait BitSource {
    /// Returns the next bit, or `None` once the underlying data is exhausted.
    fn read_bit(&mut self) -> Result<Option<bool>>;
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        (**self).write_bit(bit)
    }

    fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        (**self).write_bits(bits)
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn read_bit(&mut self) -> Result<Option<bool>> {
        (**self).read_bit()
    }
}

/// In-memory sink, mostly useful for measuring a payload before writing it.
impl BitSink for BitVec<u8, Msb0> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.push(bit);
        Ok(())
    }

    fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        self.extend_from_bitslice(bits);
        Ok(())
    }
}
