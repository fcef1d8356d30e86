//! Bit packing with a self-describing padding marker.
//!
//! A packed stream is `0* 1 payload`, MSB first, where the marker brings the
//! total to a whole number of bytes. The marker is 1 to 8 bits long: a payload
//! that is already byte-aligned still gets a full `00000001` byte, so the
//! reader can always find the terminating `1` in the first byte.

use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Number of marker bits (including the terminating `1`) for a payload of `len` bits.
pub fn padding_len(len: usize) -> usize {
    8 - (len % 8)
}

/// Pack `bits` (each 0 or 1) into bytes behind a padding marker.
///
/// The result is `(bits.len() + padding_len(bits.len())) / 8` bytes long.
///
/// # Errors
/// Returns `Error::InvalidBit` if any element is not 0 or 1.
pub fn pack(bits: &[u8]) -> Result<Vec<u8>> {
    let padding = padding_len(bits.len());
    let mut bytes = Vec::with_capacity((bits.len() + padding) / 8);

    // The marker is the low bit of the first partial byte.
    let mut current: u8 = 1;
    let mut filled = padding;
    for &bit in bits {
        if bit > 1 {
            return Err(Error::InvalidBit(bit));
        }
        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
        current = (current << 1) | bit;
        filled += 1;
    }
    bytes.push(current);

    debug!(payload_bits = bits.len(), padding, bytes = bytes.len(), "packed bit stream");
    Ok(bytes)
}

/// Recover the payload bits from a packed stream.
///
/// The marker is located in the first byte. If that byte is zero the stream
/// is malformed; exactly 8 bits are dropped and the rest is returned. An empty
/// slice yields an empty payload.
pub fn unpack(bytes: &[u8]) -> Vec<u8> {
    let Some((&first, rest)) = bytes.split_first() else {
        return Vec::new();
    };

    let mut bits = Vec::with_capacity(bytes.len() * 8);
    if first == 0 {
        warn!("padding marker missing from first byte, dropping it");
    } else {
        let marker = first.leading_zeros() as usize;
        for shift in (0..7 - marker).rev() {
            bits.push((first >> shift) & 1);
        }
    }
    for &byte in rest {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Pack `bits` and write them to `writer`.
pub fn write_bits<W: Write>(writer: &mut W, bits: &[u8]) -> Result<()> {
    let bytes = pack(bits)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read `reader` to the end and unpack its payload bits.
pub fn read_bits<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(unpack(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_partial_byte() {
        assert_eq!(pack(&[1, 1, 1, 0]).unwrap(), vec![0b0001_1110]);
        assert_eq!(pack(&[1]).unwrap(), vec![0b0000_0011]);
        assert_eq!(pack(&[0, 0, 0, 0, 0, 0, 0]).unwrap(), vec![0b1000_0000]);
    }

    #[test]
    fn test_pack_aligned_gets_full_marker_byte() {
        let bits = [1, 0, 1, 0, 1, 0, 1, 0];
        assert_eq!(pack(&bits).unwrap(), vec![0b0000_0001, 0b1010_1010]);
    }

    #[test]
    fn test_pack_empty() {
        assert_eq!(pack(&[]).unwrap(), vec![0b0000_0001]);
        assert!(unpack(&[0b0000_0001]).is_empty());
    }

    #[test]
    fn test_pack_rejects_invalid_bit() {
        assert!(matches!(pack(&[0, 1, 2]), Err(Error::InvalidBit(2))));
    }

    #[test]
    fn test_unpack_spanning_bytes() {
        let bits = [1, 0, 0, 1, 1, 0, 1, 1, 1, 0];
        let packed = pack(&bits).unwrap();
        assert_eq!(packed, vec![0b0000_0110, 0b0110_1110]);
        assert_eq!(unpack(&packed), bits.to_vec());
    }

    #[test]
    fn test_unpack_missing_marker() {
        assert_eq!(unpack(&[0, 0b1000_0001]), vec![1, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_unpack_empty() {
        assert!(unpack(&[]).is_empty());
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_helpers_report_io_errors() {
        assert!(matches!(write_bits(&mut Broken, &[1, 0]), Err(Error::Io(_))));
        assert!(matches!(read_bits(&mut Broken), Err(Error::Io(_))));
    }

    #[test]
    fn test_stream_helpers() {
        let bits = vec![0, 1, 1, 0, 1];
        let mut sink = Vec::new();
        write_bits(&mut sink, &bits).unwrap();
        assert_eq!(sink.len(), 1);
        let mut source = std::io::Cursor::new(sink);
        assert_eq!(read_bits(&mut source).unwrap(), bits);
    }

    proptest! {
        #[test]
        fn prop_pack_roundtrip(bits in prop::collection::vec(0u8..2, 0..300)) {
            let packed = pack(&bits).unwrap();
            prop_assert_eq!(packed.len(), (bits.len() + padding_len(bits.len())) / 8);
            prop_assert!(packed.len() > bits.len() / 8);
            prop_assert_eq!(unpack(&packed), bits);
        }
    }
}
