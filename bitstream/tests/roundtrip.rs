use bitstream::{ByteReader, ByteWriter, Flags, StreamError};

#[test]
fn writer_roundtrip_mixed() {
    let mut writer = ByteWriter::new();
    writer.write_u8(0x06);
    writer.write_flags(Flags::new().with(0, true).with(10, true), 11).unwrap();
    writer.write_varu32(300);
    writer.write_str("Berserker").unwrap();
    writer.write_bytes(&[0xFF, 0x00]);
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(reader.read_u8().unwrap(), 0x06);
    let flags = reader.read_flags(11).unwrap();
    assert!(flags.get(0));
    assert!(flags.get(10));
    assert_eq!(reader.read_varu32().unwrap(), 300);
    assert_eq!(reader.read_str(32).unwrap(), "Berserker");
    assert_eq!(reader.read_bytes(2).unwrap(), &[0xFF, 0x00]);
    assert!(reader.is_empty());
}

#[test]
fn truncated_stream_reports_eof_not_panic() {
    let mut writer = ByteWriter::new();
    writer.write_varu32(u32::MAX);
    writer.write_str("Marauder").unwrap();
    let bytes = writer.finish();

    for cut in 0..bytes.len() {
        let mut reader = ByteReader::new(&bytes[..cut]);
        let result = reader
            .read_varu32()
            .and_then(|_| reader.read_str(32).map(|_| ()));
        assert!(
            matches!(result, Err(StreamError::UnexpectedEof { .. })),
            "cut at {cut} should be a clean EOF"
        );
    }
}
