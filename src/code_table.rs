//! Code-table derivation.

use tracing::debug;

use crate::frequency::ALPHABET_SIZE;
use crate::tree::TreeNode;

/// Depth-first walk yielding `(symbol, code)` for every leaf.
///
/// Left subtrees are visited before right ones; a left edge appends `0`, a
/// right edge appends `1`. The walk is consumed once and cannot be restarted.
pub struct Codes<'a> {
    stack: Vec<(&'a TreeNode, Vec<u8>)>,
}

impl<'a> Codes<'a> {
    /// Start a walk at `root`.
    pub fn new(root: &'a TreeNode) -> Self {
        Self {
            stack: vec![(root, Vec::new())],
        }
    }
}

impl Iterator for Codes<'_> {
    type Item = (u8, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, prefix)) = self.stack.pop() {
            match node {
                TreeNode::Leaf { symbol, .. } => return Some((*symbol, prefix)),
                TreeNode::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(1);
                    self.stack.push((&**right, right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push(0);
                    self.stack.push((&**left, left_prefix));
                }
            }
        }
        None
    }
}

/// Fixed 128-slot mapping from symbol to bit code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Vec<u8>>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Derive the table by walking `root` to completion.
    pub fn from_tree(root: &TreeNode) -> Self {
        let mut codes: [Option<Vec<u8>>; ALPHABET_SIZE] = std::array::from_fn(|_| None);
        for (symbol, code) in Codes::new(root) {
            if let Some(slot) = codes.get_mut(symbol as usize) {
                *slot = Some(code);
            }
        }
        let table = Self { codes };
        debug!(assigned = table.len(), "derived code table");
        table
    }

    /// Code for `symbol`, `None` if it was never observed.
    pub fn get(&self, symbol: u8) -> Option<&[u8]> {
        self.codes.get(symbol as usize)?.as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assigned `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_deref().map(|code| (s as u8, code)))
    }

    /// Render a code as a string of `'0'`/`'1'` characters.
    pub fn code_string(&self, symbol: u8) -> Option<String> {
        self.get(symbol)
            .map(|code| code.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect())
    }
}
