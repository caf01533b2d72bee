use bitstream::{ByteReader, ByteWriter, Flags};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    U8(u8),
    VarU32(u32),
    Flags { count: usize, raw: u16 },
    Str(String),
}

fn mask_flags(count: usize, raw: u16) -> u16 {
    if count >= 16 {
        raw
    } else {
        raw & ((1u16 << count) - 1)
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::U8),
        any::<u32>().prop_map(Op::VarU32),
        (0usize..=16, any::<u16>()).prop_map(|(count, raw)| Op::Flags {
            count,
            raw: mask_flags(count, raw),
        }),
        "[a-zA-Z' ]{0,24}".prop_map(Op::Str),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut writer = ByteWriter::new();

        for op in &ops {
            match op {
                Op::U8(v) => writer.write_u8(*v),
                Op::VarU32(v) => writer.write_varu32(*v),
                Op::Flags { count, raw } => {
                    writer.write_flags(Flags::from_raw(*raw), *count).unwrap();
                }
                Op::Str(s) => writer.write_str(s).unwrap(),
            }
        }

        let bytes = writer.finish();
        let mut reader = ByteReader::new(&bytes);

        for op in &ops {
            match op {
                Op::U8(v) => prop_assert_eq!(reader.read_u8().unwrap(), *v),
                Op::VarU32(v) => prop_assert_eq!(reader.read_varu32().unwrap(), *v),
                Op::Flags { count, raw } => {
                    prop_assert_eq!(reader.read_flags(*count).unwrap().raw(), *raw);
                }
                Op::Str(s) => prop_assert_eq!(&reader.read_str(64).unwrap(), s),
            }
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_varint_length_is_minimal(value in any::<u32>()) {
        let mut writer = ByteWriter::new();
        writer.write_varu32(value);
        let bytes = writer.finish();
        let expected = match value {
            0..=0x7F => 1,
            0x80..=0x3FFF => 2,
            0x4000..=0x1F_FFFF => 3,
            0x20_0000..=0x0FFF_FFFF => 4,
            _ => 5,
        };
        prop_assert_eq!(bytes.len(), expected);
        prop_assert_eq!(bytes.last().copied().unwrap_or(0x80) & 0x80, 0);
    }
}
