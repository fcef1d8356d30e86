//! Frequency analysis.
//!
//! Turns a symbol sequence into the sorted probability table the tree
//! builder consumes. The table is ordered ascending by probability, with
//! equal probabilities ordered by ascending symbol value, so that tree
//! construction is fully deterministic.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Error, Result};

/// Number of distinct symbols in the 7-bit alphabet.
pub const ALPHABET_SIZE: usize = 128;

/// Largest valid symbol value.
pub const MAX_SYMBOL: u8 = 127;

/// A symbol and its empirical probability.
///
/// `symbol` is `None` only for the entries carried by internal tree nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyEntry {
    /// The symbol, or `None` for a merged cluster.
    pub symbol: Option<u8>,
    /// Probability of occurrence in `[0, 1]`.
    pub probability: f64,
}

impl FrequencyEntry {
    /// Entry for a real symbol.
    pub fn leaf(symbol: u8, probability: f64) -> Self {
        Self {
            symbol: Some(symbol),
            probability,
        }
    }

    /// Entry for a merged cluster with no symbol.
    pub fn internal(probability: f64) -> Self {
        Self {
            symbol: None,
            probability,
        }
    }

    /// Table order: probability first, then symbol value.
    pub fn table_cmp(&self, other: &Self) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then_with(|| self.symbol.cmp(&other.symbol))
    }
}

/// Count occurrences of every symbol.
///
/// # Errors
/// Returns `Error::SymbolOutOfRange` for any value above [`MAX_SYMBOL`].
pub fn count_symbols(symbols: &[u8]) -> Result<[u64; ALPHABET_SIZE]> {
    let mut counts = [0u64; ALPHABET_SIZE];
    for &s in symbols {
        if s > MAX_SYMBOL {
            return Err(Error::SymbolOutOfRange(s));
        }
        counts[s as usize] += 1;
    }
    Ok(counts)
}

/// Build the sorted frequency table for `symbols`.
///
/// Every distinct symbol gets an entry with `probability > 0`. When only one
/// distinct symbol occurs, a zero-probability entry for the next symbol
/// (wrapping 127 to 0) is added so the tree always has two leaves.
///
/// # Errors
/// Returns `Error::EmptyInput` for an empty sequence and
/// `Error::SymbolOutOfRange` for values above [`MAX_SYMBOL`].
pub fn analyze(symbols: &[u8]) -> Result<Vec<FrequencyEntry>> {
    if symbols.is_empty() {
        return Err(Error::EmptyInput);
    }
    let counts = count_symbols(symbols)?;
    let total = symbols.len() as f64;

    let mut entries: Vec<FrequencyEntry> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(s, &c)| FrequencyEntry::leaf(s as u8, c as f64 / total))
        .collect();

    let singleton = match entries.as_slice() {
        [FrequencyEntry {
            symbol: Some(s), ..
        }] => Some(*s),
        _ => None,
    };
    if let Some(real) = singleton {
        let placeholder = if real == MAX_SYMBOL { 0 } else { real + 1 };
        debug!(symbol = real, placeholder, "single distinct symbol, adding placeholder leaf");
        entries.insert(1, FrequencyEntry::leaf(placeholder, 0.0));
    }

    entries.sort_by(FrequencyEntry::table_cmp);
    debug!(
        distinct = entries.len(),
        total = symbols.len(),
        "built frequency table"
    );
    Ok(entries)
}

/// Shannon entropy (bits per symbol) of a frequency table.
pub fn entropy(entries: &[FrequencyEntry]) -> f64 {
    entries
        .iter()
        .filter(|e| e.probability > 0.0)
        .map(|e| -e.probability * e.probability.log2())
        .sum()
}
