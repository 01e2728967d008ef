//! A lossless file compressor built on static Huffman coding.
//!
//! The input is scanned once to count byte frequencies, an optimal prefix
//! tree is built from the counts, and every byte is replaced by its code in a
//! packed bitstream. The frequency table is stored in front of the payload so
//! the decompressor can rebuild exactly the same tree.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::fs::File;
//!
//! let stats = huffpack::compress(File::open("input.txt")?, File::create("input.huf")?)?;
//! println!("{} -> {} bytes", stats.input_len, stats.output_len());
//!
//! huffpack::decompress(File::open("input.huf")?, File::create("restored.txt")?)?;
//! # Ok::<(), huffpack::HuffError>(())
//! ```
//!
//! # Layout
//!
//! - [`encode`]: symbols, frequency tables, tree construction, code tables
//!   and the bit-level stream encoder/decoder
//! - [`format`]: the header that precedes the bitstream
//! - [`bitstream`]: bit sink/source traits and their `std::io` adapters
//! - [`codec`]: whole-file entry points and their parameters
//!
//! # Features
//!
//! - **rayon**: counts in-memory buffers in parallel

// Core modules
pub mod bitstream;
pub mod codec;
pub mod encode;
pub mod format;
pub mod utils;

// Public codec API
pub use codec::{
    CodecParams, CompressionStats, DecompressionStats, HuffmanCodec, compress, compress_bytes,
    decompress, decompress_bytes,
};

// Engine types (for custom pipelines)
pub use encode::{CodeTable, EncodingTree, FrequencyTable, StreamDecoder, StreamEncoder, Symbol};

// Error types
pub use utils::error::{HuffError, Result};

// Constants
pub const HUFFPACK_VERSION: &str = env!("CARGO_PKG_VERSION");
