// src/utils/error.rs

use crate::encode::symbol::Symbol;
use thiserror::Error;

/// The primary error type for all compression and decompression operations.
#[derive(Error, Debug)]
pub enum HuffError {
    /// An error occurred in the underlying byte reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller handed over data that violates a precondition (e.g. a
    /// frequency table without the end-of-stream sentinel).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The header preceding the bitstream could not be parsed.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The bitstream ended or went astray before the end-of-stream code.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    /// The encoder met a symbol that has no code in the current tree.
    #[error("Unencodable symbol: {0}")]
    UnencodableSymbol(Symbol),

    /// The tree builder was handed a frequency table with no entries.
    #[error("Cannot build an encoding tree from an empty frequency table")]
    EmptyFrequencyTable,

    /// The frequencies sum past `u64::MAX`, so no tree weight can hold them.
    #[error("Frequency weights overflow 64 bits")]
    WeightOverflow,

    /// Decoding would produce more output than the configured limit.
    #[error("Output limit of {limit} bytes exceeded")]
    OutputLimitExceeded { limit: u64 },
}

/// A specialized `Result` type for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffError>;
