use proptest::prelude::*;

use faceid_types::{AccountId, Embedding, FaceSignature};

proptest! {
    /// AccountId roundtrip: bytes -> display -> parse produces the same identifier.
    #[test]
    fn account_display_parse_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let account = AccountId::new(bytes);
        let parsed = AccountId::parse(&account.to_string()).unwrap();
        prop_assert_eq!(parsed, account);
        prop_assert_eq!(parsed.as_bytes(), &bytes);
    }

    /// Uppercased hex digits parse to the same identifier.
    #[test]
    fn account_parse_is_case_insensitive(bytes in prop::array::uniform20(0u8..)) {
        let account = AccountId::new(bytes);
        let upper = format!("0x{}", hex_upper(account.as_bytes()));
        prop_assert_eq!(AccountId::parse(&upper).unwrap(), account);
    }

    /// FaceSignature hex roundtrip.
    #[test]
    fn signature_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..600)) {
        let sig = FaceSignature::new(bytes);
        prop_assert_eq!(FaceSignature::from_hex(&sig.to_hex()).unwrap(), sig);
    }

    /// bit_eq is reflexive for every float pattern, NaNs included.
    #[test]
    fn embedding_bit_eq_reflexive(bits in prop::collection::vec(any::<u32>(), 0..256)) {
        let e = Embedding::new(bits.into_iter().map(f32::from_bits).collect());
        prop_assert!(e.bit_eq(&e.clone()));
    }
}

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}
