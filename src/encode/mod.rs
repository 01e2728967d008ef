//! The encoding-tree engine: symbols, frequency counting, tree construction,
//! code tables and the bit-level stream encoder/decoder.

pub mod code_table;
pub mod frequency;
pub mod stream;
pub mod symbol;
pub mod tree;

// Re-export commonly used encoding functionality
pub use code_table::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use stream::{StreamDecoder, StreamEncoder, StreamStats};
pub use symbol::{END_OF_STREAM_ID, NOT_A_SYMBOL_ID, Symbol};
pub use tree::{EncodingTree, Node, NodeId, NodeKind};
