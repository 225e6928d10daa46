//! Property tests for entity id encodings

use hiero_primitives::{Address, EntityId, ScheduleId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn packed_schedule_id_recovers_triple(shard in any::<u64>(), realm in any::<u64>(), num in any::<u64>()) {
        let id = ScheduleId::new(shard, realm, num);
        let bytes = id.to_bytes();
        prop_assert_eq!(bytes.len(), 24);
        prop_assert_eq!(&bytes[16..], &num.to_be_bytes()[..]);
        prop_assert_eq!(ScheduleId::from_bytes(&bytes).unwrap(), id);
    }

    #[test]
    fn long_zero_address_recovers_entity(shard in any::<u32>(), realm in any::<u64>(), num in any::<u64>()) {
        let id = EntityId::new(shard as u64, realm, num);
        let addr = id.to_evm_address().unwrap();
        prop_assert_eq!(EntityId::from_evm_address(&addr), id);
    }

    #[test]
    fn word_tail_is_last_twenty_bytes(prefix in proptest::collection::vec(any::<u8>(), 0..64), addr in any::<[u8; 20]>()) {
        let mut data = prefix;
        data.extend_from_slice(&addr);
        prop_assert_eq!(Address::from_word_tail(&data), Some(Address::from_bytes(addr)));
    }
}
