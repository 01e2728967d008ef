// src/utils/log.rs

//! Logging for the huffpack library.
//!
//! The crate emits records through the `log` facade and never installs a
//! logger itself. Applications pick a backend (`env_logger`, `simplelog`,
//! a `tracing` bridge, ...) and initialize it once at startup:
//!
//! ```ignore
//! env_logger::init();
//! let stats = huffpack::compress(input, output)?;
//! ```
//!
//! Levels used inside the crate:
//! - `debug!` one summary line per compress/decompress call and per table.
//! - `trace!` per-merge and per-header-entry detail.

pub use ::log::{debug, trace};
