// src/record/codec.rs

//! Content-sample encoding.
//!
//! Samples are base64-encoded (standard alphabet, with padding) into a
//! caller-provided buffer so that arbitrary write payloads cannot
//! inject NULs or newlines into the record framing.
//!
//! The default engine is the `base64` crate; the `vendored-base64`
//! feature substitutes an in-crate encoder with byte-identical output
//! for hosts that cannot take the dependency. Identity is covered by
//! tests over the whole sample-size domain.

#[cfg(not(feature = "vendored-base64"))]
use base64::engine::general_purpose::STANDARD;
#[cfg(not(feature = "vendored-base64"))]
use base64::Engine as _;

/// Encode `src` into `dst`, returning the number of encoded bytes.
///
/// `dst` must hold `4 * ceil(src.len() / 3)` bytes
/// ([`crate::constants::BASE64_MAX`] suffices for any sample window).
/// An undersized `dst` yields 0, which inside a probe handler degrades
/// the field to empty instead of failing the capture.
pub fn encode(src: &[u8], dst: &mut [u8]) -> usize {
    if dst.len() < encoded_len(src.len()) {
        return 0;
    }
    encode_into(src, dst)
}

/// Encoded size for `len` input bytes, padding included.
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

#[cfg(not(feature = "vendored-base64"))]
fn encode_into(src: &[u8], dst: &mut [u8]) -> usize {
    match STANDARD.encode_slice(src, dst) {
        Ok(written) => written,
        Err(_) => 0,
    }
}

#[cfg(feature = "vendored-base64")]
fn encode_into(src: &[u8], dst: &mut [u8]) -> usize {
    const ALPHABET: &[u8; 64] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut out = 0usize;
    let mut chunks = src.chunks_exact(3);

    for chunk in &mut chunks {
        let word = (u32::from(chunk[0]) << 16) | (u32::from(chunk[1]) << 8) | u32::from(chunk[2]);
        dst[out] = ALPHABET[(word >> 18) as usize & 0x3f];
        dst[out + 1] = ALPHABET[(word >> 12) as usize & 0x3f];
        dst[out + 2] = ALPHABET[(word >> 6) as usize & 0x3f];
        dst[out + 3] = ALPHABET[word as usize & 0x3f];
        out += 4;
    }

    let rest = chunks.remainder();
    match rest.len() {
        1 => {
            let word = u32::from(rest[0]) << 16;
            dst[out] = ALPHABET[(word >> 18) as usize & 0x3f];
            dst[out + 1] = ALPHABET[(word >> 12) as usize & 0x3f];
            dst[out + 2] = b'=';
            dst[out + 3] = b'=';
            out += 4;
        }
        2 => {
            let word = (u32::from(rest[0]) << 16) | (u32::from(rest[1]) << 8);
            dst[out] = ALPHABET[(word >> 18) as usize & 0x3f];
            dst[out + 1] = ALPHABET[(word >> 12) as usize & 0x3f];
            dst[out + 2] = ALPHABET[(word >> 6) as usize & 0x3f];
            dst[out + 3] = b'=';
            out += 4;
        }
        _ => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASE64_MAX, SAMPLE_SIZE};

    fn encode_str(src: &[u8]) -> alloc::string::String {
        let mut dst = [0u8; BASE64_MAX];
        let n = encode(src, &mut dst);
        alloc::string::String::from_utf8(dst[..n].to_vec()).expect("base64 output is ASCII")
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode_str(b""), "");
        assert_eq!(encode_str(b"f"), "Zg==");
        assert_eq!(encode_str(b"fo"), "Zm8=");
        assert_eq!(encode_str(b"foo"), "Zm9v");
        assert_eq!(encode_str(b"hello world"), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn full_sample_window() {
        let zeros = [0u8; SAMPLE_SIZE];
        let encoded = encode_str(&zeros);
        assert_eq!(encoded.len(), encoded_len(SAMPLE_SIZE));
        assert_eq!(encoded, "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA==");
    }

    #[test]
    fn undersized_destination_degrades_to_empty() {
        let mut dst = [0u8; 4];
        assert_eq!(encode(b"abcdef", &mut dst), 0);
    }

    #[test]
    fn encoded_len_bound_holds() {
        for len in 0..=SAMPLE_SIZE {
            assert!(encoded_len(len) <= BASE64_MAX, "len {} breaks the cap", len);
        }
    }
}
