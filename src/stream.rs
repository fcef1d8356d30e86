//! Source and sink helpers.
//!
//! Streams are always passed in by the caller and released when they go out
//! of scope; nothing here keeps a current file.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::frequency::MAX_SYMBOL;

/// Read a source to the end, rejecting bytes outside the 7-bit alphabet.
pub fn read_symbols<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut symbols = Vec::new();
    reader.read_to_end(&mut symbols)?;
    if let Some(&bad) = symbols.iter().find(|&&s| s > MAX_SYMBOL) {
        return Err(Error::SymbolOutOfRange(bad));
    }
    Ok(symbols)
}

/// Write decoded symbols to a sink.
pub fn write_symbols<W: Write>(writer: &mut W, symbols: &[u8]) -> Result<()> {
    writer.write_all(symbols)?;
    writer.flush()?;
    Ok(())
}
