//! Property tests for checksum, alignment, and offset invariants.

use frugen::utils::is_zero_sum;
use frugen::{
    encode_field, AreaKind, BoardConfig, ChassisConfig, CustomField, FieldType, FruConfig,
    FruEncoder, InternalConfig, LengthOverflow, MultiRecordConfig, ProductConfig,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

fn text() -> impl Strategy<Value = Option<String>> {
    option::of("[ -~]{0,20}")
}

fn custom_fields() -> impl Strategy<Value = Vec<CustomField>> {
    vec(
        prop_oneof![
            "[ -~]{0,30}".prop_map(|s| CustomField::new("ascii-latin1", s)),
            vec(any::<u8>(), 0..30).prop_map(|b| CustomField::new("binary", hex::encode(b))),
            "[0-9]{0,8}".prop_map(|s| CustomField::new("bcd-plus", s)),
        ],
        0..4,
    )
}

fn chassis() -> impl Strategy<Value = ChassisConfig> {
    (option::of(any::<u8>()), text(), text(), custom_fields()).prop_map(
        |(chassis_type, part_number, serial_number, custom)| ChassisConfig {
            chassis_type,
            part_number,
            serial_number,
            custom,
        },
    )
}

fn board() -> impl Strategy<Value = BoardConfig> {
    (
        option::of(any::<u8>()),
        (1996u32..2025, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60),
        (text(), text(), text(), text(), text()),
        custom_fields(),
    )
        .prop_map(
            |(language, (y, mo, d, h, mi), (manufacturer, product_name, serial_number, part_number, file_id), custom)| {
                BoardConfig {
                    language,
                    manufacturer_date: Some(format!("{y}/{mo:02}/{d:02} {h:02}:{mi:02}:00")),
                    manufacturer,
                    product_name,
                    serial_number,
                    part_number,
                    file_id,
                    custom,
                }
            },
        )
}

fn product() -> impl Strategy<Value = ProductConfig> {
    (
        option::of(any::<u8>()),
        (text(), text(), text(), text()),
        (text(), text(), text()),
        custom_fields(),
    )
        .prop_map(
            |(language, (manufacturer, product_name, part_number, product_version), (serial_number, asset_tag, file_id), custom)| {
                ProductConfig {
                    language,
                    manufacturer,
                    product_name,
                    part_number,
                    product_version,
                    serial_number,
                    asset_tag,
                    file_id,
                    custom,
                }
            },
        )
}

fn multirecord() -> impl Strategy<Value = Vec<MultiRecordConfig>> {
    vec(
        (any::<u8>(), vec(any::<u8>(), 0..=255)).prop_map(|(id, data)| {
            MultiRecordConfig::new(format!("{id:02x}"), "02", hex::encode(data))
        }),
        0..4,
    )
}

fn fru() -> impl Strategy<Value = FruConfig> {
    (
        option::of(vec(any::<u8>(), 0..40)),
        option::of(chassis()),
        option::of(board()),
        option::of(product()),
        option::of(multirecord()),
    )
        .prop_map(|(internal, chassis, board, product, multirecord)| FruConfig {
            internal: internal.map(InternalConfig::from_bytes),
            chassis,
            board,
            product,
            multirecord,
        })
}

proptest! {
    #[test]
    fn ascii_field_length_prefix(s in "[ -~]{0,63}") {
        let field = encode_field(FieldType::AsciiLatin1, &s, LengthOverflow::Reject).unwrap();
        let bytes = field.as_bytes();
        prop_assert_eq!(bytes[0], 0xC0 | s.len() as u8);
        prop_assert_eq!(&bytes[1..], s.as_bytes());
    }

    #[test]
    fn binary_field_length_prefix(data in vec(any::<u8>(), 0..=63)) {
        let field = encode_field(FieldType::Binary, &hex::encode(&data), LengthOverflow::Reject).unwrap();
        let bytes = field.as_bytes();
        prop_assert_eq!(bytes[0], data.len() as u8);
        prop_assert_eq!(&bytes[1..], &data[..]);
    }

    #[test]
    fn info_areas_are_aligned_and_checksummed(config in fru()) {
        let image = FruEncoder::default().encode(&config).unwrap();
        for kind in [AreaKind::Chassis, AreaKind::Board, AreaKind::Product] {
            if let Some(area) = image.area(kind) {
                let bytes = area.as_bytes();
                prop_assert_eq!(bytes.len() % 8, 0);
                prop_assert_eq!(bytes[1] as usize * 8, bytes.len());
                prop_assert!(is_zero_sum(bytes));
            }
        }
        if let Some(area) = image.area(AreaKind::Internal) {
            prop_assert_eq!(area.len() % 8, 0);
        }
    }

    #[test]
    fn header_checksum_and_offsets(config in fru()) {
        let image = FruEncoder::default().encode(&config).unwrap();
        let bytes = image.to_bytes();
        let header = &bytes[..8];
        prop_assert_eq!(header[0], 1);
        prop_assert!(is_zero_sum(header));

        let present: Vec<u8> = header[1..6].iter().copied().filter(|&o| o != 0).collect();
        prop_assert!(present.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(present.len(), image.areas().len());

        for area in image.areas() {
            let start = image.header().offset(area.kind()) as usize * 8;
            prop_assert_eq!(&bytes[start..start + area.len()], area.as_bytes());
        }
    }

    #[test]
    fn multirecord_checksums(records in multirecord()) {
        let config = FruConfig { multirecord: Some(records.clone()), ..FruConfig::default() };
        let image = FruEncoder::default().encode(&config).unwrap();
        let bytes = image.area(AreaKind::MultiRecord).map(|a| a.as_bytes()).unwrap_or(&[]);

        let mut pos = 0;
        for _ in &records {
            let header = &bytes[pos..pos + 5];
            prop_assert!(is_zero_sum(header));
            let len = header[2] as usize;
            let mut payload = bytes[pos + 5..pos + 5 + len].to_vec();
            payload.push(header[3]);
            prop_assert!(is_zero_sum(&payload));
            pos += 5 + len;
        }
        prop_assert_eq!(pos, bytes.len());
    }

    #[test]
    fn encoding_is_deterministic(config in fru()) {
        let encoder = FruEncoder::default();
        prop_assert_eq!(
            encoder.encode(&config).unwrap().to_bytes(),
            encoder.encode(&config).unwrap().to_bytes()
        );
    }
}
