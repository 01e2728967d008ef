// src/format/header.rs

//! The preamble that precedes every compressed bitstream.
//!
//! Layout, with decimal ASCII integers and the symbol as one raw byte:
//!
//! ```text
//! <entryCount> ' ' ( <symbolByte><frequency> ' ' ){entryCount}
//! ```
//!
//! The end-of-stream entry is never written; its count is always 1 and the
//! reader puts it back. There is no magic number or version tag, so
//! [`write_header`] and [`read_header`] must change together.

use crate::encode::frequency::FrequencyTable;
use crate::encode::symbol::Symbol;
use crate::utils::error::{HuffError, Result};
use crate::utils::log::{debug, trace};
use std::io::{ErrorKind, Read, Write};

const SEPARATOR: u8 = b' ';

/// Upper bound on the entry count: one entry per byte value.
pub const MAX_ENTRIES: u64 = 256;

/// Writes the header for `frequencies` and returns its size in bytes.
///
/// Entries are written in ascending byte order.
pub fn write_header<W: Write>(output: &mut W, frequencies: &FrequencyTable) -> Result<usize> {
    if !frequencies.has_end_of_stream() {
        return Err(HuffError::Config(
            "missing end-of-stream sentinel".to_string(),
        ));
    }

    let mut header = Vec::new();
    write_decimal(&mut header, frequencies.distinct_bytes() as u64);
    for (symbol, count) in frequencies {
        let Symbol::Byte(b) = symbol else {
            continue;
        };
        header.push(b);
        write_decimal(&mut header, count);
        trace!("header entry {}: {}", symbol, count);
    }

    output.write_all(&header)?;
    debug!(
        "wrote header: {} entries, {} bytes",
        frequencies.distinct_bytes(),
        header.len()
    );
    Ok(header.len())
}

/// Reads a header written by [`write_header`].
///
/// Input is consumed one byte at a time and nothing past the header is
/// touched, so `input` can be handed straight to a bit reader afterwards.
pub fn read_header<R: Read>(input: &mut R) -> Result<FrequencyTable> {
    let entries = read_decimal(input, "entry count")?;
    if entries > MAX_ENTRIES {
        return Err(HuffError::MalformedHeader(format!(
            "entry count {} exceeds {}",
            entries, MAX_ENTRIES
        )));
    }

    let mut frequencies = FrequencyTable::new();
    // Starts at 1 for the end-of-stream entry.
    let mut total: u64 = 1;
    for _ in 0..entries {
        let symbol = Symbol::Byte(read_byte(input)?);
        let count = read_decimal(input, "frequency")?;
        if count == 0 {
            return Err(HuffError::MalformedHeader(format!(
                "zero frequency for {}",
                symbol
            )));
        }
        total = total.checked_add(count).ok_or_else(|| {
            HuffError::MalformedHeader("total frequency does not fit in 64 bits".to_string())
        })?;
        if frequencies.insert(symbol, count).is_some() {
            return Err(HuffError::MalformedHeader(format!(
                "duplicate entry for {}",
                symbol
            )));
        }
        trace!("header entry {}: {}", symbol, count);
    }
    frequencies.insert(Symbol::EndOfStream, 1);

    debug!("read header: {} entries, total weight {}", entries, total);
    Ok(frequencies)
}

fn write_decimal(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(value.to_string().as_bytes());
    out.push(SEPARATOR);
}

fn read_byte<R: Read>(input: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    match input.read_exact(&mut byte) {
        Ok(()) => Ok(byte[0]),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(HuffError::MalformedHeader(
            "unexpected end of input".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Reads a run of ASCII digits terminated by exactly one separator.
fn read_decimal<R: Read>(input: &mut R, field: &str) -> Result<u64> {
    let mut value: u64 = 0;
    let mut digits = 0usize;
    loop {
        let b = read_byte(input)?;
        match b {
            b'0'..=b'9' => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(b - b'0')))
                    .ok_or_else(|| {
                        HuffError::MalformedHeader(format!("{} does not fit in 64 bits", field))
                    })?;
                digits += 1;
            }
            SEPARATOR if digits > 0 => return Ok(value),
            other => {
                return Err(HuffError::MalformedHeader(format!(
                    "unexpected byte 0x{:02x} in {}",
                    other, field
                )));
            }
        }
    }
}
