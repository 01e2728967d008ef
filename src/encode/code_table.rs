// src/encode/code_table.rs

//! Symbol <-> bitstring tables derived from an [`EncodingTree`].

use crate::encode::frequency::FrequencyTable;
use crate::encode::symbol::Symbol;
use crate::encode::tree::{EncodingTree, NodeKind};
use bitvec::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// A prefix code, most significant (first emitted) bit first.
pub type Code = BitVec<u8, Msb0>;

/// Both directions of the code assignment for one tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
    symbols: HashMap<Code, Symbol>,
    max_code_len: usize,
}

impl CodeTable {
    /// Walks `tree` and records the root-to-leaf path of every leaf, 0 for
    /// the zero-child and 1 for the one-child.
    ///
    /// A tree that is a lone leaf assigns that symbol the one-bit code `0`,
    /// so every symbol costs at least one bit on the wire.
    pub fn from_tree(tree: &EncodingTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(usize, Code)> = vec![(tree.root(), Code::new())];

        while let Some((id, path)) = stack.pop() {
            match tree.node(id).kind {
                NodeKind::Leaf(symbol) => {
                    let code = if path.is_empty() {
                        bitvec![u8, Msb0; 0]
                    } else {
                        path
                    };
                    codes.insert(symbol, code);
                }
                NodeKind::Internal { zero, one } => {
                    let mut one_path = path.clone();
                    one_path.push(true);
                    let mut zero_path = path;
                    zero_path.push(false);
                    stack.push((one, one_path));
                    stack.push((zero, zero_path));
                }
            }
        }

        let symbols = codes.iter().map(|(&s, c)| (c.clone(), s)).collect();
        let max_code_len = codes.values().map(|c| c.len()).max().unwrap_or(0);
        Self {
            codes,
            symbols,
            max_code_len,
        }
    }

    pub fn code(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    /// Looks up the symbol whose code is exactly `code`.
    pub fn symbol(&self, code: &Code) -> Option<Symbol> {
        self.symbols.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code in the table.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Iterates `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_bitslice()))
    }

    /// Payload size in bits for input with the given counts, or `None` if
    /// some counted symbol has no code or the size overflows `u64`.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies.iter().try_fold(0u64, |total, (symbol, count)| {
            let code = self.codes.get(&symbol)?;
            total.checked_add(count.checked_mul(code.len() as u64)?)
        })
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes[i + 1..]
                .iter()
                .all(|b| !a.starts_with(b.as_bitslice()) && !b.starts_with(a.as_bitslice()))
        })
    }
}
