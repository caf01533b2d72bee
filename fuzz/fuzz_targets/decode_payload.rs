#![no_main]

use catalog::Specialization;
use codec::{decode_payload, encode_payload, CodecLimits, SpecializationCatalog};
use libfuzzer_sys::fuzz_target;

fn catalog() -> SpecializationCatalog {
    SpecializationCatalog::new(vec![
        Specialization::new(6, [1, 2, 3, 4, 5, 6, 7, 8, 9]),
        Specialization::new(70, [11, 12, 13, 14, 15, 16, 17, 18, 19]).elite(true),
    ])
    .unwrap()
}

fuzz_target!(|data: &[u8]| {
    let catalog = catalog();
    let limits = CodecLimits::for_testing();

    // Whatever decodes must re-encode in the same version and decode again.
    if let Ok(report) = decode_payload(data, &catalog, &limits) {
        let payload = encode_payload(&report.build, report.version, &catalog)
            .expect("decoded build re-encodes");
        let again = decode_payload(&payload.bytes, &catalog, &CodecLimits::unlimited())
            .expect("re-encoded payload decodes");
        assert_eq!(again.version, report.version);
    }

    let _ = wire::decode_transport(
        &String::from_utf8_lossy(data),
        &wire::Limits::for_testing(),
    );
});
