use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frugen::{encode_field, FieldType, FruConfig, FruEncoder, LengthOverflow};

const CONFIG: &str = r#"{
    "internal": { "data": "000102030405060708090a0b0c0d0e0f" },
    "chassis": { "type": 23, "part-number": "CH-PN-01", "serial-number": "CH-SN-01" },
    "board": {
        "language": 25,
        "manufacturer-date": "2021/06/15 12:30:00",
        "manufacturer": "ACME",
        "product-name": "Mainboard",
        "serial-number": "MB-0001",
        "part-number": "MB-PN-7",
        "custom": [{ "type": "binary", "data": "deadbeef" }]
    },
    "product": {
        "manufacturer": "ACME",
        "product-name": "Server",
        "product-version": "1.2",
        "serial-number": "SRV-0001"
    },
    "multirecord": [
        { "record-id": "00", "record-version": "02", "data": "00112233445566778899aabbccddeeff" }
    ]
}"#;

fn bench_encode_image(c: &mut Criterion) {
    let config = FruConfig::from_json_str(CONFIG).unwrap();
    let encoder = FruEncoder::default();

    c.bench_function("encode_image", |b| {
        b.iter(|| encoder.encode(black_box(&config)).unwrap().to_bytes())
    });
}

fn bench_encode_field(c: &mut Criterion) {
    c.bench_function("encode_ascii_field", |b| {
        b.iter(|| {
            encode_field(
                FieldType::AsciiLatin1,
                black_box("Example Product Name 0123"),
                LengthOverflow::Reject,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_encode_image, bench_encode_field);
criterion_main!(benches);
