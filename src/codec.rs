//! Encoding and decoding against a shared prefix-code tree.
//!
//! The encoded stream carries no tree. Both sides rebuild it from the same
//! source text (see [`HuffmanCode::from_symbols`]) or otherwise share it.

use std::io::Write;

use tracing::debug;

use crate::bits;
use crate::code_table::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::{self, FrequencyEntry, MAX_SYMBOL};
use crate::tree::{self, TreeNode};

/// Huffman encoder.
pub struct HuffmanEncoder<'a> {
    table: &'a CodeTable,
}

impl<'a> HuffmanEncoder<'a> {
    /// Create an encoder over a code table.
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Map a symbol sequence to its concatenated bit codes.
    ///
    /// # Errors
    /// Returns `Error::SymbolOutOfRange` for values above 127 and
    /// `Error::MissingCode` for symbols absent from the table.
    pub fn encode(&self, symbols: &[u8]) -> Result<Vec<u8>> {
        let mut bits = Vec::with_capacity(symbols.len() * 4);
        for &s in symbols {
            if s > MAX_SYMBOL {
                return Err(Error::SymbolOutOfRange(s));
            }
            let code = self.table.get(s).ok_or(Error::MissingCode(s))?;
            bits.extend_from_slice(code);
        }
        Ok(bits)
    }

    /// Encode and pack `symbols` into padded bytes.
    pub fn encode_packed(&self, symbols: &[u8]) -> Result<Vec<u8>> {
        bits::pack(&self.encode(symbols)?)
    }

    /// Encode `symbols` and write the packed bytes to `writer`.
    pub fn encode_to<W: Write>(&self, symbols: &[u8], writer: &mut W) -> Result<()> {
        let bits = self.encode(symbols)?;
        debug!(symbols = symbols.len(), bits = bits.len(), "encoded symbols");
        bits::write_bits(writer, &bits)
    }
}

/// Huffman decoder.
pub struct HuffmanDecoder<'a> {
    root: &'a TreeNode,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a decoder over the tree the stream was encoded with.
    pub fn new(root: &'a TreeNode) -> Self {
        Self { root }
    }

    /// Decode a payload bit stream into a symbol sequence.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if the bits end partway down the tree
    /// and `Error::InvalidBit` for values other than 0 or 1.
    pub fn decode(&self, bits: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut curr = self.root;

        for (consumed, &bit) in bits.iter().enumerate() {
            if bit > 1 {
                return Err(Error::InvalidBit(bit));
            }
            curr = curr
                .child(bit)
                .ok_or(Error::TruncatedStream { consumed })?;

            if let TreeNode::Leaf { symbol, .. } = curr {
                out.push(*symbol);
                curr = self.root;
            }
        }

        if !std::ptr::eq(curr, self.root) {
            return Err(Error::TruncatedStream {
                consumed: bits.len(),
            });
        }
        Ok(out)
    }

    /// Unpack padded bytes and decode them.
    pub fn decode_packed(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        self.decode(&bits::unpack(bytes))
    }

    /// Unpack and decode `bytes`, writing the symbols to `writer`.
    pub fn decode_to<W: Write>(&self, bytes: &[u8], writer: &mut W) -> Result<()> {
        let symbols = self.decode_packed(bytes)?;
        debug!(bytes = bytes.len(), symbols = symbols.len(), "decoded symbols");
        writer.write_all(&symbols)?;
        writer.flush()?;
        Ok(())
    }
}

/// Frequency table, tree and code table built from one source text.
#[derive(Clone, Debug)]
pub struct HuffmanCode {
    frequencies: Vec<FrequencyEntry>,
    tree: TreeNode,
    table: CodeTable,
}

impl HuffmanCode {
    /// Build the complete code for `symbols`.
    ///
    /// # Errors
    /// Propagates frequency-analysis failures (empty input, symbols above 127).
    pub fn from_symbols(symbols: &[u8]) -> Result<Self> {
        let frequencies = frequency::analyze(symbols)?;
        let tree = tree::build_tree(&frequencies)?;
        let table = CodeTable::from_tree(&tree);
        Ok(Self {
            frequencies,
            tree,
            table,
        })
    }

    /// The sorted frequency table.
    pub fn frequencies(&self) -> &[FrequencyEntry] {
        &self.frequencies
    }

    /// Root of the prefix-code tree.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// Symbol to code mapping.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Encoder over this code's table.
    pub fn encoder(&self) -> HuffmanEncoder<'_> {
        HuffmanEncoder::new(&self.table)
    }

    /// Decoder over this code's tree.
    pub fn decoder(&self) -> HuffmanDecoder<'_> {
        HuffmanDecoder::new(&self.tree)
    }

    /// Encode and pack `symbols`.
    pub fn compress(&self, symbols: &[u8]) -> Result<Vec<u8>> {
        self.encoder().encode_packed(symbols)
    }

    /// Unpack and decode `bytes`.
    pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        self.decoder().decode_packed(bytes)
    }

    /// Expected code length in bits per symbol under the analyzed distribution.
    pub fn expected_length(&self) -> f64 {
        self.frequencies
            .iter()
            .filter_map(|e| {
                let len = self.table.get(e.symbol?)?.len();
                Some(e.probability * len as f64)
            })
            .sum()
    }
}
