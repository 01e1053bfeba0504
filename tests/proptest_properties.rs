use bbpack::command::Command;
use proptest::prelude::*;

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 1..=127).prop_map(|data| Command::Raw { data }),
        (proptest::collection::vec(any::<u8>(), 1..=30), 0u32..=1023)
            .prop_map(|(chunk, count)| Command::Rle { chunk, count }),
        (0u32..=65535, 0u32..=1023).prop_map(|(offset, length)| Command::Lz { offset, length }),
    ]
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(
        plain in proptest::collection::vec(any::<u8>(), 1..2048)
    ) {
        let commands = bbpack::encode(&plain).unwrap();
        let packed = bbpack::serialize(&commands).unwrap();
        let (replayed, consumed) = bbpack::deserialize(&packed).unwrap();
        prop_assert_eq!(consumed, packed.len());
        prop_assert_eq!(bbpack::decode(&replayed).unwrap(), plain);
    }

    #[test]
    fn prop_serialize_deserialize_inverse(
        commands in proptest::collection::vec(command_strategy(), 0..64)
    ) {
        let packed = bbpack::serialize(&commands).unwrap();
        let (replayed, consumed) = bbpack::deserialize(&packed).unwrap();
        prop_assert_eq!(replayed, commands);
        prop_assert_eq!(consumed, packed.len());
    }

    #[test]
    fn prop_commands_cover_input_exactly(
        plain in proptest::collection::vec(any::<u8>(), 1..2048)
    ) {
        let commands = bbpack::encode(&plain).unwrap();
        let covered: usize = commands.iter().map(Command::plain_len).sum();
        prop_assert_eq!(covered, plain.len());
    }

    #[test]
    fn prop_repetitive_data_shrinks(
        chunk in proptest::collection::vec(any::<u8>(), 1..8),
        reps in 32usize..128
    ) {
        let plain: Vec<u8> = chunk.iter().copied().cycle().take(chunk.len() * reps).collect();
        let packed = bbpack::serialize(&bbpack::encode(&plain).unwrap()).unwrap();
        prop_assert!(packed.len() < plain.len(), "packed={} plain={}", packed.len(), plain.len());
    }
}
