use huff7::frequency::{analyze, entropy};
use huff7::{build_tree, pack, unpack, HuffmanCode};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ascii_text() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..128, 1..400)
}

proptest! {
    #[test]
    fn test_roundtrip(input in ascii_text()) {
        let code = HuffmanCode::from_symbols(&input).unwrap();
        let packed = code.compress(&input).unwrap();
        prop_assert_eq!(code.decompress(&packed).unwrap(), input);
    }

    #[test]
    fn test_singleton_roundtrip(symbol in 0u8..128, len in 1usize..64) {
        let input = vec![symbol; len];
        let code = HuffmanCode::from_symbols(&input).unwrap();
        prop_assert_eq!(code.table().get(symbol).map(<[u8]>::len), Some(1));
        let packed = code.compress(&input).unwrap();
        prop_assert_eq!(code.decompress(&packed).unwrap(), input);
    }

    #[test]
    fn test_probability_conservation(input in ascii_text()) {
        let root = build_tree(&analyze(&input).unwrap()).unwrap();
        let sum: f64 = root.leaves().iter().map(|n| n.probability()).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_leaf_cardinality(input in ascii_text()) {
        let distinct = input.iter().collect::<BTreeSet<_>>().len();
        let root = build_tree(&analyze(&input).unwrap()).unwrap();
        let expected = if distinct == 1 { 2 } else { distinct };
        prop_assert_eq!(root.leaf_count(), expected);
    }

    #[test]
    fn test_pack_roundtrip(bits in prop::collection::vec(0u8..2, 0..200)) {
        let packed = pack(&bits).unwrap();
        prop_assert!(!packed.is_empty());
        prop_assert!(packed.len() > bits.len() / 8);
        prop_assert_eq!(unpack(&packed), bits);
    }

    #[test]
    fn test_expected_length_within_entropy_bound(input in ascii_text()) {
        let code = HuffmanCode::from_symbols(&input).unwrap();
        let h = entropy(code.frequencies());
        let l = code.expected_length();
        prop_assert!(l + 1e-9 >= h);
        // A lone real symbol still costs one bit, reaching the bound exactly.
        prop_assert!(l <= h + 1.0 + 1e-9);
    }

    #[test]
    fn test_codes_are_prefix_free(input in ascii_text()) {
        let code = HuffmanCode::from_symbols(&input).unwrap();
        let codes: Vec<&[u8]> = code.table().iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a));
                }
            }
        }
    }
}
