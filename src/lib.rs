//! # Static Huffman Coding for 7-bit Text
//!
//! *Optimal prefix codes over the ASCII alphabet, built with two queues.*
//!
//! ## Intuition First
//!
//! Frequent symbols should cost fewer bits than rare ones. Huffman coding
//! gets there greedily: repeatedly take the two least likely things left and
//! glue them together under one parent. The finished tree gives every symbol
//! a path from the root; reading `0` for every left turn and `1` for every
//! right turn yields its code. No code is a prefix of another, so a decoder
//! can walk the tree one bit at a time without separators.
//!
//! ## The Problem
//!
//! The textbook construction uses a priority queue, and equal probabilities
//! make the resulting shape depend on the heap's internals. Two programs that
//! must agree on a tree without exchanging it (the encoded stream here carries
//! no tree) need a fully deterministic build:
//!
//! - the frequency table is sorted by probability, then by symbol value;
//! - leaves and merged clusters live in two FIFO queues, and ties prefer leaves.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon       Entropy as the lower bound on code length
//! 1952  Huffman       Optimal prefix codes by greedy merging
//! 1976  van Leeuwen   Linear-time construction with two queues
//! ```
//!
//! ## Stream Format
//!
//! ```text
//! 0* 1 | payload bits (MSB first)
//! ```
//!
//! The leading `0* 1` marker is 1 to 8 bits long and pads the stream to whole
//! bytes. It is never empty, so a decoder can always find its end in the
//! first byte.
//!
//! ## Complexity Analysis
//!
//! - **Tree build**: $O(n \log n)$ for the sort, $O(n)$ for the merges.
//! - **Encode/Decode**: $O(1)$ per bit.
//!
//! ## Example
//!
//! ```
//! use huff7::HuffmanCode;
//!
//! let text = b"abracadabra";
//! let code = HuffmanCode::from_symbols(text).unwrap();
//! let packed = code.compress(text).unwrap();
//! assert_eq!(code.decompress(&packed).unwrap(), text.to_vec());
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - van Leeuwen, J. (1976). "On the construction of Huffman trees."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod stream;
pub mod tree;

pub use bits::{pack, unpack};
pub use code_table::CodeTable;
pub use codec::{HuffmanCode, HuffmanDecoder, HuffmanEncoder};
pub use error::{Error, Result};
pub use frequency::{analyze, FrequencyEntry, ALPHABET_SIZE, MAX_SYMBOL};
pub use tree::{build_tree, TreeNode};
