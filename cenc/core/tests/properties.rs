use cenc_core::{
    KeyId, PsshError, WIDEVINE_SYSTEM_ID, decode, decode_strict, downgrade_to_v0, encode,
};
use proptest::prelude::*;

fn arb_system_id() -> impl Strategy<Value = [u8; 16]> {
    prop_oneof![Just(WIDEVINE_SYSTEM_ID), any::<[u8; 16]>()]
}

fn arb_key_ids(max: usize) -> impl Strategy<Value = Vec<KeyId>> {
    prop::collection::vec(any::<[u8; 16]>().prop_map(KeyId::new), 0..max)
}

fn arb_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

fn raw(b64: &str) -> Vec<u8> {
    data_encoding::BASE64.decode(b64.as_bytes()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn v0_round_trip(system_id in arb_system_id(), data in arb_payload()) {
        let pssh = decode(&encode(&data, Some(system_id), &[])).unwrap();
        prop_assert_eq!(pssh.system_id, system_id);
        prop_assert_eq!(pssh.version, 0);
        prop_assert_eq!(pssh.data, data);
        prop_assert!(pssh.key_ids.is_empty());
    }

    #[test]
    fn v1_round_trip_preserves_order(
        system_id in arb_system_id(),
        key_ids in arb_key_ids(8).prop_filter("non-empty", |k| !k.is_empty()),
        data in arb_payload(),
    ) {
        let pssh = decode(&encode(&data, Some(system_id), &key_ids)).unwrap();
        prop_assert_eq!(pssh.system_id, system_id);
        prop_assert_eq!(pssh.version, 1);
        prop_assert_eq!(pssh.data, data);
        prop_assert_eq!(pssh.key_ids, key_ids);
    }

    #[test]
    fn declared_length_matches_buffer(
        system_id in arb_system_id(),
        key_ids in arb_key_ids(8),
        data in arb_payload(),
    ) {
        let encoded = encode(&data, Some(system_id), &key_ids);
        let bytes = raw(&encoded);
        let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        prop_assert_eq!(declared as usize, bytes.len());
        prop_assert!(decode_strict(&encoded).is_ok());
    }

    #[test]
    fn downgrade_is_idempotent(
        system_id in arb_system_id(),
        key_ids in arb_key_ids(4),
        data in arb_payload(),
    ) {
        let once = downgrade_to_v0(&encode(&data, Some(system_id), &key_ids));
        prop_assert_eq!(downgrade_to_v0(&once), once);
    }

    #[test]
    fn downgrade_of_arbitrary_text_is_idempotent(input in "[A-Za-z0-9+/=]{0,64}") {
        let once = downgrade_to_v0(&input);
        prop_assert_eq!(downgrade_to_v0(&once), once);
    }

    #[test]
    fn downgrade_keeps_v0_and_foreign_boxes(
        system_id in any::<[u8; 16]>().prop_filter("not widevine", |s| *s != WIDEVINE_SYSTEM_ID),
        key_ids in arb_key_ids(4),
        data in arb_payload(),
    ) {
        let v0 = encode(&data, None, &[]);
        prop_assert_eq!(downgrade_to_v0(&v0), v0.clone());

        let foreign = encode(&data, Some(system_id), &key_ids);
        prop_assert_eq!(downgrade_to_v0(&foreign), foreign.clone());

        let empty = encode(&[], None, &key_ids);
        prop_assert_eq!(downgrade_to_v0(&empty), empty.clone());
    }

    #[test]
    fn every_proper_prefix_is_truncated(
        key_ids in arb_key_ids(3),
        data in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let bytes = raw(&encode(&data, None, &key_ids));
        for len in 0..bytes.len() {
            let prefix = data_encoding::BASE64.encode(&bytes[..len]);
            let err = decode(&prefix).unwrap_err();
            prop_assert!(matches!(err, PsshError::Truncated { .. }), "len {}: {:?}", len, err);
        }
    }
}
