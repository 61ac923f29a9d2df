#![no_main]

use {
    libfuzzer_sys::fuzz_target,
    serbench::{len::BincodeLen, Deserialize, Record, RecordSchema, Serialize},
};

macro_rules! fuzz_roundtrip {
    ($data:expr, $schema:ty) => {
        if let Ok((value, consumed)) = <$schema>::deserialize_prefix($data) {
            assert!(consumed <= $data.len());
            let serialized = <$schema>::serialize(&value).expect("serialize should succeed");
            // Over-long varint prefixes are accepted, so re-encoding may be shorter.
            assert!(serialized.len() <= consumed);
            let roundtrip =
                <$schema>::deserialize(&serialized).expect("roundtrip deserialize should succeed");
            assert_eq!(value, roundtrip, "roundtrip failed for {}", stringify!($schema));
        }
    };
}

fuzz_target!(|data: &[u8]| {
    fuzz_roundtrip!(data, RecordSchema<BincodeLen>);

    if let Ok((record, consumed)) = serbench::deserialize_prefix::<Record>(data) {
        assert!(consumed >= record.size());
        let mut buf = serbench::serialize_reusing(&record, data.to_vec())
            .expect("serialize should succeed");
        assert_eq!(buf.len(), record.size());

        // Decoding in place over a populated record yields the same value.
        let mut dst = Record {
            frames: vec![u64::MAX; 8],
            ..Record::default()
        };
        let reread = serbench::deserialize_in_place(&buf, &mut dst)
            .expect("roundtrip deserialize should succeed");
        assert_eq!(reread, buf.len());
        assert_eq!(dst, record);

        buf.resize(record.size(), 0);
        assert_eq!(serbench::serialize_into(&mut buf, &record), Ok(record.size()));
    }
});
