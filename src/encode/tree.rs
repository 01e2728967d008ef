// src/encode/tree.rs

//! Huffman encoding tree construction.
//!
//! Nodes live in a single arena owned by [`EncodingTree`] and refer to their
//! children by index, so the whole tree is released in one step when the
//! tree is dropped.

use crate::encode::frequency::FrequencyTable;
use crate::encode::symbol::Symbol;
use crate::utils::error::{HuffError, Result};
use crate::utils::log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Position of a node inside its tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(Symbol),
    /// Internal nodes carry no symbol and always have both children.
    Internal { zero: NodeId, one: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub weight: u64,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }
}

/// A binary prefix tree built from a [`FrequencyTable`].
#[derive(Debug)]
pub struct EncodingTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl EncodingTree {
    /// Builds an optimal prefix tree over exactly the symbols in `frequencies`.
    ///
    /// The two lightest queue entries are merged repeatedly, the first one
    /// extracted becoming the zero-child. Entries of equal weight leave the
    /// queue in the order they entered it, and leaves enter in ascending
    /// symbol order, so the tree is fully determined by the table.
    ///
    /// Fails with [`HuffError::WeightOverflow`] if the weights sum past
    /// `u64::MAX`.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffError::EmptyFrequencyTable);
        }

        let mut arena = Arena::with_capacity(2 * frequencies.len() - 1);
        // (weight, insertion sequence, node)
        let mut queue: BinaryHeap<Reverse<(u64, usize, NodeId)>> = BinaryHeap::new();
        let mut seq = 0usize;

        for (symbol, weight) in frequencies {
            let id = arena.push(Node {
                weight,
                kind: NodeKind::Leaf(symbol),
            });
            queue.push(Reverse((weight, seq, id)));
            seq += 1;
        }

        loop {
            let Some(Reverse((weight_a, _, a))) = queue.pop() else {
                return Err(HuffError::EmptyFrequencyTable);
            };
            let Some(Reverse((weight_b, _, b))) = queue.pop() else {
                let tree = Self {
                    nodes: arena.into_nodes(),
                    root: a,
                };
                debug!(
                    "encoding tree: {} leaves, {} nodes, root weight {}",
                    tree.leaf_count(),
                    tree.node_count(),
                    weight_a
                );
                return Ok(tree);
            };

            let weight = weight_a
                .checked_add(weight_b)
                .ok_or(HuffError::WeightOverflow)?;
            let parent = arena.push(Node {
                weight,
                kind: NodeKind::Internal { zero: a, one: b },
            });
            trace!("merge #{} + #{} -> #{} (weight {})", a, b, parent, weight);
            queue.push(Reverse((weight, seq, parent)));
            seq += 1;
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node at `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// True when the root is itself a leaf (only one symbol in the table).
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Every leaf with its weight and depth, in depth-first order (zero
    /// branch first). The root of a single-leaf tree reports depth 0.
    pub fn leaf_depths(&self) -> Vec<(Symbol, u64, usize)> {
        let mut leaves = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            match node.kind {
                NodeKind::Leaf(symbol) => leaves.push((symbol, node.weight, depth)),
                NodeKind::Internal { zero, one } => {
                    stack.push((one, depth + 1));
                    stack.push((zero, depth + 1));
                }
            }
        }
        leaves
    }

    /// Sum of weight times depth over all leaves, which is the payload size
    /// in bits for input matching the table. A single-leaf root counts as
    /// depth 1, matching the one-bit code it is given. Saturates at
    /// `u64::MAX`.
    pub fn weighted_path_length(&self) -> u64 {
        self.leaf_depths()
            .into_iter()
            .map(|(_, weight, depth)| weight.saturating_mul(depth.max(1) as u64))
            .fold(0, u64::saturating_add)
    }
}

impl Drop for EncodingTree {
    fn drop(&mut self) {
        #[cfg(test)]
        alloc_tracker::released(self.nodes.len());
    }
}

/// Node storage used while the tree is under construction.
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        #[cfg(test)]
        alloc_tracker::allocated(1);
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn into_nodes(mut self) -> Vec<Node> {
        std::mem::take(&mut self.nodes)
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        #[cfg(test)]
        alloc_tracker::released(self.nodes.len());
    }
}

/// Per-thread count of live tree nodes, compiled into test builds only.
#[cfg(test)]
pub(crate) mod alloc_tracker {
    use std::cell::Cell;

    thread_local! {
        static LIVE_NODES: Cell<usize> = const { Cell::new(0) };
    }

    pub(crate) fn live_nodes() -> usize {
        LIVE_NODES.with(|n| n.get())
    }

    pub(super) fn allocated(count: usize) {
        LIVE_NODES.with(|n| n.set(n.get() + count));
    }

    pub(super) fn released(count: usize) {
        LIVE_NODES.with(|n| n.set(n.get() - count));
    }
}
