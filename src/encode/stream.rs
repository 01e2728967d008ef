// src/encode/stream.rs

//! Turning raw bytes into packed codes and back.

use crate::bitstream::{BitSink, BitSource};
use crate::encode::code_table::{Code, CodeTable};
use crate::encode::symbol::Symbol;
use crate::encode::tree::EncodingTree;
use crate::utils::error::{HuffError, Result};
use crate::utils::log::debug;
use std::io::{ErrorKind, Read, Write};

const CHUNK_SIZE: usize = 8 * 1024;

/// Counters reported by one encode or decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Symbols processed, the end-of-stream marker included.
    pub symbols: u64,
    /// Bits written to the sink or read from the source.
    pub bits: u64,
}

impl StreamStats {
    /// Number of data bytes, i.e. symbols without the end-of-stream marker.
    pub fn bytes(&self) -> u64 {
        self.symbols.saturating_sub(1)
    }
}

/// Writes the codes of a byte stream to a [`BitSink`].
pub struct StreamEncoder {
    table: CodeTable,
}

impl StreamEncoder {
    pub fn new(tree: &EncodingTree) -> Self {
        Self {
            table: CodeTable::from_tree(tree),
        }
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Emits the code of a single symbol, returning its length in bits.
    pub fn encode_symbol<S: BitSink>(&self, symbol: Symbol, sink: &mut S) -> Result<usize> {
        let code = self
            .table
            .code(symbol)
            .ok_or(HuffError::UnencodableSymbol(symbol))?;
        sink.write_bits(code)?;
        Ok(code.len())
    }

    /// Encodes every byte of `input` followed by the end-of-stream code.
    ///
    /// The sink is left unflushed; padding the last byte is the caller's job.
    pub fn encode<R: Read, S: BitSink>(&self, mut input: R, sink: &mut S) -> Result<StreamStats> {
        let mut stats = StreamStats::default();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let n = match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &b in &chunk[..n] {
                stats.bits += self.encode_symbol(Symbol::Byte(b), sink)? as u64;
                stats.symbols += 1;
            }
        }
        stats.bits += self.encode_symbol(Symbol::EndOfStream, sink)? as u64;
        stats.symbols += 1;

        debug!(
            "encoded {} bytes into {} payload bits",
            stats.bytes(),
            stats.bits
        );
        Ok(stats)
    }
}

/// Reads codes from a [`BitSource`] until the end-of-stream code.
pub struct StreamDecoder {
    table: CodeTable,
    output_limit: Option<u64>,
}

impl StreamDecoder {
    pub fn new(tree: &EncodingTree) -> Self {
        Self {
            table: CodeTable::from_tree(tree),
            output_limit: None,
        }
    }

    /// Fails decoding once more than `limit` bytes would be written.
    pub fn with_output_limit(mut self, limit: Option<u64>) -> Self {
        self.output_limit = limit;
        self
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Decodes bits from `source` into `output` until the end-of-stream code
    /// is matched.
    ///
    /// Bits are accumulated one at a time; as soon as the accumulated string
    /// equals a code, that symbol is final because no code is a prefix of
    /// another. Bits after the end-of-stream code are left unread.
    pub fn decode<S: BitSource, W: Write>(&self, source: &mut S, mut output: W) -> Result<StreamStats> {
        let mut stats = StreamStats::default();
        let mut pending: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
        let mut candidate = Code::with_capacity(self.table.max_code_len());
        let mut produced = 0u64;

        loop {
            let Some(bit) = source.read_bit()? else {
                return Err(HuffError::MalformedStream(format!(
                    "bitstream ended after {} bits without an end-of-stream code",
                    stats.bits
                )));
            };
            stats.bits += 1;
            candidate.push(bit);

            let Some(symbol) = self.table.symbol(&candidate) else {
                if candidate.len() >= self.table.max_code_len() {
                    return Err(HuffError::MalformedStream(format!(
                        "no code matches {} accumulated bits",
                        candidate.len()
                    )));
                }
                continue;
            };
            candidate.clear();
            stats.symbols += 1;

            match symbol {
                Symbol::EndOfStream => break,
                Symbol::Byte(b) => {
                    if let Some(limit) = self.output_limit {
                        if produced >= limit {
                            return Err(HuffError::OutputLimitExceeded { limit });
                        }
                    }
                    produced += 1;
                    pending.push(b);
                    if pending.len() == CHUNK_SIZE {
                        output.write_all(&pending)?;
                        pending.clear();
                    }
                }
            }
        }

        output.write_all(&pending)?;
        debug!(
            "decoded {} bytes from {} payload bits",
            stats.bytes(),
            stats.bits
        );
        Ok(stats)
    }
}
