//! Prefix-code tree construction.
//!
//! Builds the Huffman tree with two FIFO queues instead of a priority queue.
//! Leaves wait in `source` in table order; every merge result goes to the back
//! of `merged`. Because merges are produced in non-decreasing probability
//! order, the head of each queue is always its minimum, and comparing the two
//! heads finds the globally lowest node. Ties prefer `source`, which makes the
//! shape reproducible where a heap would not be.
//!
//! # Historical Context
//!
//! Van Leeuwen (1976) observed that once the leaves are sorted, Huffman's
//! algorithm runs in linear time with two queues.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frequency::FrequencyEntry;

/// Huffman tree node.
///
/// Every internal node exclusively owns both children.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// A node carrying one symbol.
    Leaf {
        /// The symbol.
        symbol: u8,
        /// Its probability.
        probability: f64,
    },
    /// A merged cluster; `probability` is the sum of the children's.
    Internal {
        /// Subtree reached by a `0` bit.
        left: Box<TreeNode>,
        /// Subtree reached by a `1` bit.
        right: Box<TreeNode>,
        /// Combined probability.
        probability: f64,
    },
}

impl TreeNode {
    fn merge(left: TreeNode, right: TreeNode) -> Self {
        let probability = left.probability() + right.probability();
        TreeNode::Internal {
            left: Box::new(left),
            right: Box::new(right),
            probability,
        }
    }

    /// Probability of this node (summed over the subtree for internal nodes).
    pub fn probability(&self) -> f64 {
        match self {
            TreeNode::Leaf { probability, .. } => *probability,
            TreeNode::Internal { probability, .. } => *probability,
        }
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    /// The node's data as a frequency entry.
    pub fn entry(&self) -> FrequencyEntry {
        FrequencyEntry {
            symbol: self.symbol(),
            probability: self.probability(),
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Child reached by `bit`, or `None` at a leaf.
    pub fn child(&self, bit: u8) -> Option<&TreeNode> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { left, right, .. } => {
                Some(if bit == 0 { &**left } else { &**right })
            }
        }
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { .. } => out.push(node),
                TreeNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Depth of the leaf holding `symbol` (its code length), if present.
    pub fn depth_of(&self, symbol: u8) -> Option<usize> {
        match self {
            TreeNode::Leaf { symbol: s, .. } => (*s == symbol).then_some(0),
            TreeNode::Internal { left, right, .. } => left
                .depth_of(symbol)
                .or_else(|| right.depth_of(symbol))
                .map(|d| d + 1),
        }
    }
}

/// Take the lower-probability head of the two queues, preferring `source` on ties.
fn take_lowest(
    source: &mut VecDeque<TreeNode>,
    merged: &mut VecDeque<TreeNode>,
) -> Option<TreeNode> {
    match (source.front(), merged.front()) {
        (Some(s), Some(m)) if s.probability() <= m.probability() => source.pop_front(),
        (Some(_), Some(_)) => merged.pop_front(),
        (Some(_), None) => source.pop_front(),
        (None, _) => merged.pop_front(),
    }
}

/// Build the prefix-code tree from a table sorted by [`FrequencyEntry::table_cmp`].
///
/// The first node picked at each step becomes the left (`0`) child.
///
/// # Errors
/// Returns `Error::TooFewLeaves` if fewer than two entries are supplied and
/// `Error::UnlabeledEntry` if an entry carries no symbol.
pub fn build_tree(entries: &[FrequencyEntry]) -> Result<TreeNode> {
    if entries.len() < 2 {
        return Err(Error::TooFewLeaves(entries.len()));
    }

    let mut source: VecDeque<TreeNode> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| match e.symbol {
            Some(symbol) => Ok(TreeNode::Leaf {
                symbol,
                probability: e.probability,
            }),
            None => Err(Error::UnlabeledEntry(i)),
        })
        .collect::<Result<_>>()?;
    let mut merged: VecDeque<TreeNode> = VecDeque::with_capacity(entries.len());

    while !source.is_empty() || merged.len() > 1 {
        let (Some(first), Some(second)) = (
            take_lowest(&mut source, &mut merged),
            take_lowest(&mut source, &mut merged),
        ) else {
            return Err(Error::TooFewLeaves(entries.len()));
        };
        let node = TreeNode::merge(first, second);
        trace!(probability = node.probability(), pending = source.len(), "merged nodes");
        merged.push_back(node);
    }

    let root = merged.pop_front().ok_or(Error::TooFewLeaves(entries.len()))?;
    debug!(leaves = entries.len(), "built prefix-code tree");
    Ok(root)
}
