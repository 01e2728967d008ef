// src/codec.rs

//! Whole-file compression and decompression.
//!
//! # Examples
//!
//! ```
//! use huffpack::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new().with_output_limit(Some(1 << 20));
//! let packed = codec.compress_bytes(b"abracadabra")?;
//! assert_eq!(codec.decompress_bytes(&packed)?, b"abracadabra");
//! # Ok::<(), huffpack::HuffError>(())
//! ```

use crate::bitstream::{BitReader, BitWriter};
use crate::encode::{EncodingTree, FrequencyTable, StreamDecoder, StreamEncoder};
use crate::format::{read_header, write_header};
use crate::utils::error::Result;
use crate::utils::log::debug;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};

/// Tunable parameters for [`HuffmanCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecParams {
    /// Capacity of the read and write buffers wrapped around caller streams.
    pub buffer_size: usize,
    /// Maximum number of bytes decompression may produce (`None`: unlimited).
    pub output_limit: Option<u64>,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            output_limit: None,
        }
    }
}

/// Summary of one compression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub input_len: u64,
    pub header_len: u64,
    /// Payload size in bits before padding to a whole byte.
    pub payload_bits: u64,
    /// Distinct byte values in the input.
    pub distinct_bytes: usize,
}

impl CompressionStats {
    pub fn payload_len(&self) -> u64 {
        self.payload_bits.div_ceil(8)
    }

    /// Total bytes written: header plus padded payload.
    pub fn output_len(&self) -> u64 {
        self.header_len + self.payload_len()
    }

    /// Output size relative to input size; 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            0.0
        } else {
            self.output_len() as f64 / self.input_len as f64
        }
    }
}

/// Summary of one decompression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressionStats {
    /// Byte entries found in the header.
    pub header_entries: usize,
    /// Payload bits consumed, padding excluded.
    pub payload_bits: u64,
    pub output_len: u64,
}

/// Static Huffman compressor/decompressor.
///
/// Every call is independent: it builds its own frequency table, tree and
/// code table and releases them before returning.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    params: CodecParams,
}

impl HuffmanCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: CodecParams) -> Self {
        Self { params }.with_buffer_size(params.buffer_size)
    }

    /// Sets the I/O buffer capacity (clamped to at least one byte).
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.params.buffer_size = size.max(1);
        self
    }

    pub fn with_output_limit(mut self, limit: Option<u64>) -> Self {
        self.params.output_limit = limit;
        self
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Compresses everything from the current position of `input` to its
    /// end into `output`.
    ///
    /// `input` is read twice: once to count symbols, then, after seeking
    /// back to where it started, to encode them.
    pub fn compress<R: Read + Seek, W: Write>(&self, input: R, output: W) -> Result<CompressionStats> {
        let mut reader = BufReader::with_capacity(self.params.buffer_size, input);
        let start = reader.stream_position()?;

        let frequencies = FrequencyTable::from_reader(&mut reader)?;
        let tree = EncodingTree::build(&frequencies)?;

        let mut writer = BufWriter::with_capacity(self.params.buffer_size, output);
        let header_len = write_header(&mut writer, &frequencies)?;

        reader.seek(SeekFrom::Start(start))?;
        let encoder = StreamEncoder::new(&tree);
        let mut bits = BitWriter::new(&mut writer);
        let stream = encoder.encode(&mut reader, &mut bits)?;
        bits.flush()?;

        let stats = CompressionStats {
            input_len: stream.bytes(),
            header_len: header_len as u64,
            payload_bits: stream.bits,
            distinct_bytes: frequencies.distinct_bytes(),
        };
        debug!(
            "compressed {} bytes into {} ({} header + {} payload)",
            stats.input_len,
            stats.output_len(),
            stats.header_len,
            stats.payload_len()
        );
        Ok(stats)
    }

    /// Restores the original bytes from a stream produced by
    /// [`HuffmanCodec::compress`].
    ///
    /// Reading stops right after the end-of-stream code; the padding bits of
    /// the final byte are ignored.
    pub fn decompress<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecompressionStats> {
        let mut reader = BufReader::with_capacity(self.params.buffer_size, input);
        let frequencies = read_header(&mut reader)?;
        let tree = EncodingTree::build(&frequencies)?;

        let mut writer = BufWriter::with_capacity(self.params.buffer_size, output);
        let decoder = StreamDecoder::new(&tree).with_output_limit(self.params.output_limit);
        let mut bits = BitReader::new(&mut reader);
        let stream = decoder.decode(&mut bits, &mut writer)?;
        writer.flush()?;

        let stats = DecompressionStats {
            header_entries: frequencies.distinct_bytes(),
            payload_bits: stream.bits,
            output_len: stream.bytes(),
        };
        debug!(
            "decompressed {} payload bits into {} bytes",
            stats.payload_bits, stats.output_len
        );
        Ok(stats)
    }

    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.compress(Cursor::new(data), &mut output)?;
        Ok(output)
    }

    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.decompress(data, &mut output)?;
        Ok(output)
    }
}

/// Compresses `input` into `output` with default parameters.
pub fn compress<R: Read + Seek, W: Write>(input: R, output: W) -> Result<CompressionStats> {
    HuffmanCodec::new().compress(input, output)
}

/// Decompresses `input` into `output` with default parameters.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<DecompressionStats> {
    HuffmanCodec::new().decompress(input, output)
}

pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().compress_bytes(data)
}

pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().decompress_bytes(data)
}
