//! On-disk layout of compressed files.

pub mod header;

pub use header::{read_header, write_header};
