#![no_main]

use bitstream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 6;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let len = usize::from(data[idx.saturating_sub(1)] % 32);
                let _ = reader.read_bytes(len);
            }
            2 => {
                let _ = reader.read_varu32();
            }
            3 => {
                let count = usize::from(data[idx.saturating_sub(1)] % 20);
                let _ = reader.read_flags(count);
            }
            4 => {
                let _ = reader.read_str(64);
            }
            _ => {
                let _ = reader.peek_u8();
            }
        }
    }
});
