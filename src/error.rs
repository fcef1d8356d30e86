//! Error types for 7-bit Huffman coding.

use thiserror::Error;

/// Error variants for frequency analysis, tree construction, packing and decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol outside the 7-bit alphabet (0..=127) was observed.
    #[error("symbol out of range: {0} (expected 0..=127)")]
    SymbolOutOfRange(u8),

    /// Frequency analysis was asked to describe an empty input.
    #[error("empty input has no symbol distribution")]
    EmptyInput,

    /// A prefix-code tree needs at least two leaves.
    #[error("too few leaves to build a tree: {0}")]
    TooFewLeaves(usize),

    /// A frequency entry handed to the tree builder had no symbol.
    #[error("frequency entry {0} has no symbol")]
    UnlabeledEntry(usize),

    /// A bit sequence contained a value other than 0 or 1.
    #[error("invalid bit value: {0}")]
    InvalidBit(u8),

    /// The code table has no entry for a symbol being encoded.
    #[error("no code for symbol {0}")]
    MissingCode(u8),

    /// The bit stream ended before reaching a leaf.
    #[error("bit stream ended mid-code after {consumed} bits")]
    TruncatedStream {
        /// Number of payload bits consumed before running out.
        consumed: usize,
    },

    /// An I/O error occurred while reading a source or writing a sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman coding operations.
pub type Result<T> = std::result::Result<T, Error>;
