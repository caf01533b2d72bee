//! URL transport: zlib-framed DEFLATE, then URL-safe base64.

use std::io::Write;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::TransportError;
use crate::limits::Limits;

const INFLATE_CHUNK: usize = 4 * 1024;

/// Compresses a payload at the best compression level.
pub fn compress(payload: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(payload.len()), Compression::best());
    encoder.write_all(payload).map_err(deflate_error)?;
    encoder.finish().map_err(deflate_error)
}

/// Inflates a compressed payload of at most `limit` bytes.
///
/// A stream that ends before its final block is an error, not a short read.
pub fn inflate(compressed: &[u8], limit: usize) -> Result<Vec<u8>, TransportError> {
    let mut inflater = Decompress::new(true);
    let mut payload = Vec::with_capacity(INFLATE_CHUNK.min(limit.saturating_add(1)));
    loop {
        if payload.len() == payload.capacity() {
            payload.reserve(INFLATE_CHUNK);
        }
        let consumed = usize::try_from(inflater.total_in()).unwrap_or(compressed.len());
        let before = (inflater.total_in(), inflater.total_out());
        let status = inflater
            .decompress_vec(
                compressed.get(consumed..).unwrap_or_default(),
                &mut payload,
                FlushDecompress::Finish,
            )
            .map_err(|err| TransportError::Inflate {
                message: err.to_string(),
            })?;
        if payload.len() > limit {
            return Err(TransportError::PayloadTooLarge { limit });
        }
        match status {
            Status::StreamEnd => return Ok(payload),
            Status::Ok | Status::BufError => {
                if (inflater.total_in(), inflater.total_out()) == before {
                    return Err(TransportError::Inflate {
                        message: "compressed stream ends early".to_owned(),
                    });
                }
            }
        }
    }
}

/// Encodes bytes as unpadded URL-safe base64.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes base64 text.
///
/// Accepts the URL-safe and standard alphabets, with or without trailing `=`
/// padding, and ignores ASCII whitespace anywhere in the input.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, TransportError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let normalized: String = compact
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|err| TransportError::InvalidBase64 {
            message: err.to_string(),
        })
}

/// Turns a serialized payload into a shareable code.
pub fn encode_transport(payload: &[u8]) -> Result<String, TransportError> {
    Ok(encode_base64(&compress(payload)?))
}

/// Turns a shareable code back into its serialized payload.
pub fn decode_transport(code: &str, limits: &Limits) -> Result<Vec<u8>, TransportError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(TransportError::EmptyCode);
    }
    let len = code.chars().count();
    if len > limits.max_code_len {
        return Err(TransportError::CodeTooLong {
            len,
            limit: limits.max_code_len,
        });
    }
    let compressed = decode_base64(code)?;
    inflate(&compressed, limits.max_payload_bytes)
}

fn deflate_error(err: std::io::Error) -> TransportError {
    TransportError::Deflate {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_roundtrip() {
        let payload = [6u8, 2, 0, 0xFF, 0x80, 0x01, 0x00];
        let code = encode_transport(&payload).unwrap();
        assert!(!code.contains('+'));
        assert!(!code.contains('/'));
        assert!(!code.contains('='));
        let decoded = decode_transport(&code, &Limits::default()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn encoding_is_deterministic() {
        let payload: Vec<u8> = (0..200u8).collect();
        assert_eq!(
            encode_transport(&payload).unwrap(),
            encode_transport(&payload).unwrap()
        );
    }

    #[test]
    fn standard_alphabet_and_padding_tolerated() {
        // 0xFB 0xFF encodes to "+/8=" in the standard alphabet.
        assert_eq!(decode_base64("+/8=").unwrap(), vec![0xFB, 0xFF]);
        assert_eq!(decode_base64("-_8").unwrap(), vec![0xFB, 0xFF]);
        assert_eq!(decode_base64(" -_8\n").unwrap(), vec![0xFB, 0xFF]);
        assert_eq!(encode_base64(&[0xFB, 0xFF]), "-_8");
    }

    #[test]
    fn padding_only_at_the_end() {
        assert_eq!(decode_base64("QUFB").unwrap(), b"AAA".to_vec());
        assert_eq!(decode_base64("QQ==").unwrap(), b"A".to_vec());
        assert!(matches!(
            decode_base64("QQ=QQ"),
            Err(TransportError::InvalidBase64 { .. })
        ));
        assert!(matches!(
            decode_base64("Q=UFB"),
            Err(TransportError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn invalid_base64_rejected() {
        let err = decode_transport("not*base64", &Limits::default()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidBase64 { .. }));
    }

    #[test]
    fn corrupt_stream_rejected() {
        let code = encode_base64(&[0x78, 0xDA, 0x01, 0x02, 0x03]);
        let err = decode_transport(&code, &Limits::default()).unwrap_err();
        assert!(matches!(err, TransportError::Inflate { .. }));
    }

    #[test]
    fn truncated_stream_rejected() {
        let compressed = compress(&[1u8; 64]).unwrap();
        let code = encode_base64(&compressed[..compressed.len() / 2]);
        let err = decode_transport(&code, &Limits::default()).unwrap_err();
        assert!(matches!(err, TransportError::Inflate { .. }));
    }

    #[test]
    fn empty_code_rejected() {
        assert_eq!(
            decode_transport("   ", &Limits::default()),
            Err(TransportError::EmptyCode)
        );
    }

    #[test]
    fn code_length_limit() {
        let limits = Limits {
            max_code_len: 4,
            ..Limits::default()
        };
        let err = decode_transport("AAAAAAAA", &limits).unwrap_err();
        assert_eq!(err, TransportError::CodeTooLong { len: 8, limit: 4 });
    }

    #[test]
    fn inflate_bomb_bounded() {
        let compressed = compress(&vec![0u8; 100_000]).unwrap();
        let code = encode_base64(&compressed);
        let err = decode_transport(&code, &Limits::for_testing()).unwrap_err();
        assert_eq!(err, TransportError::PayloadTooLarge { limit: 4096 });
    }

    #[test]
    fn payload_at_limit_accepted() {
        let compressed = compress(&[7u8; 4096]).unwrap();
        let payload = inflate(&compressed, 4096).unwrap();
        assert_eq!(payload.len(), 4096);
    }
}
