use {
    criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput},
    rand::{rngs::StdRng, Rng, SeedableRng},
    serbench::{
        harness::{validate, BincodeSerializer, SchemaSerializer, Serializer},
        len::BincodeLen,
        Deserialize, Record, RecordSchema, Serialize,
    },
};

const FRAME_COUNTS: [usize; 4] = [0, 16, 128, 1_024];

fn make_record(rng: &mut StdRng, frames: usize) -> Record {
    Record {
        id: rng.random(),
        tag: rng.random(),
        timestamp: rng.random(),
        frames: (0..frames).map(|_| rng.random()).collect(),
        group_id: rng.random(),
        transaction_id: rng.random(),
    }
}

/// this function is used for verification only and is not part of the benchmarked code.
fn verify(record: &Record) -> Vec<u8> {
    validate(SchemaSerializer::varint(), std::slice::from_ref(record)).unwrap();
    validate(SchemaSerializer::fixint(), std::slice::from_ref(record)).unwrap();
    validate(BincodeSerializer::new(), std::slice::from_ref(record)).unwrap();
    assert_eq!(
        RecordSchema::<BincodeLen>::serialize(record).unwrap(),
        bincode::serialize(record).unwrap()
    );
    record.marshal(Vec::new()).unwrap()
}

fn bench_record_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Record");
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for frames in FRAME_COUNTS {
        let record = make_record(&mut rng, frames);
        let serialized = verify(&record);
        let fixint_serialized = bincode::serialize(&record).unwrap();
        group.throughput(Throughput::Bytes(record.size() as u64));

        group.bench_with_input(BenchmarkId::new("varint/marshal", frames), &record, |b, r| {
            let mut buf = Vec::with_capacity(r.size());
            b.iter(|| {
                buf = black_box(r).marshal(std::mem::take(&mut buf)).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("varint/marshal_into", frames), &record, |b, r| {
            let mut buf = vec![0u8; r.size()];
            b.iter(|| black_box(r).marshal_into(black_box(&mut buf)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("varint/size", frames), &record, |b, r| {
            b.iter(|| black_box(r).size())
        });

        group.bench_with_input(BenchmarkId::new("fixint/serialize", frames), &record, |b, r| {
            b.iter(|| RecordSchema::<BincodeLen>::serialize(black_box(r)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("bincode/serialize", frames), &record, |b, r| {
            b.iter(|| bincode::serialize(black_box(r)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("varint/unmarshal", frames), &serialized, |b, s| {
            b.iter(|| Record::unmarshal(black_box(s)).unwrap())
        });

        group.bench_with_input(
            BenchmarkId::new("varint/unmarshal_into", frames),
            &serialized,
            |b, s| {
                let mut dst = Record::default();
                b.iter(|| dst.unmarshal_into(black_box(s)).unwrap())
            },
        );

        group.bench_with_input(
            BenchmarkId::new("fixint/deserialize", frames),
            &fixint_serialized,
            |b, s| b.iter(|| RecordSchema::<BincodeLen>::deserialize(black_box(s)).unwrap()),
        );

        group.bench_with_input(
            BenchmarkId::new("bincode/deserialize", frames),
            &fixint_serialized,
            |b, s| b.iter(|| bincode::deserialize::<Record>(black_box(s)).unwrap()),
        );
    }

    group.finish();
}

fn bench_serializer_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("Serializer roundtrip");
    group.throughput(Throughput::Elements(1));
    let mut rng = StdRng::seed_from_u64(0xF4A3E5);
    let record = make_record(&mut rng, 16);
    verify(&record);

    let serializers: Vec<Box<dyn Serializer>> = vec![
        Box::new(SchemaSerializer::varint()),
        Box::new(SchemaSerializer::fixint()),
        Box::new(BincodeSerializer::new()),
    ];
    for mut serializer in serializers {
        let name = serializer.name().to_owned();
        group.bench_function(name, |b| {
            b.iter(|| {
                let bytes = serializer.marshal(black_box(&record)).unwrap().to_vec();
                serializer.unmarshal(black_box(&bytes)).unwrap().id
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_comparison, bench_serializer_roundtrip);

criterion_main!(benches);
