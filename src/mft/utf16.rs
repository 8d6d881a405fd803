//! UTF-16LE name decoding with replacement, never rejection.
//!
//! File names on a damaged volume are hostile input: unpaired surrogates and
//! truncated pairs are replaced with U+FFFD so a valid UTF-8 string always
//! comes out.

use std::char::decode_utf16;

/// Decode a UTF-16LE byte slice to owned UTF-8.
///
/// A dangling trailing byte (odd-length input) also becomes U+FFFD.
pub fn decode_utf16le(raw: &[u8]) -> String {
    let (pairs, tail) = raw.split_at(raw.len() & !1);

    // ASCII fast path
    if tail.is_empty() && pairs.chunks_exact(2).all(|c| c[0] < 0x80 && c[1] == 0) {
        let mut s = String::with_capacity(pairs.len() / 2);
        for c in pairs.chunks_exact(2) {
            s.push(c[0] as char);
        }
        return s;
    }

    let units = pairs
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]));
    let mut s = String::with_capacity(pairs.len() / 2);
    for r in decode_utf16(units) {
        s.push(r.unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    if !tail.is_empty() {
        s.push(char::REPLACEMENT_CHARACTER);
    }
    s
}

/// Truncate `s` to at most `max_bytes` bytes without splitting a code point.
pub fn truncate_to_byte_boundary(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn ascii_round_trip() {
        assert_eq!(decode_utf16le(&encode("sample.txt")), "sample.txt");
    }

    #[test]
    fn bmp_code_points() {
        let raw = [0x87, 0x65, 0xF6, 0x4E, 0x2E, 0x00, 0x74, 0x00, 0x78, 0x00, 0x74, 0x00];
        assert_eq!(decode_utf16le(&raw), "文件.txt");
    }

    #[test]
    fn surrogate_pairs_combine() {
        assert_eq!(decode_utf16le(&encode("a😀b")), "a😀b");
    }

    #[test]
    fn unpaired_high_surrogate_is_replaced() {
        // High surrogate followed by 'x'
        let raw = [0x3D, 0xD8, 0x78, 0x00];
        assert_eq!(decode_utf16le(&raw), "\u{FFFD}x");
    }

    #[test]
    fn truncated_surrogate_is_replaced() {
        let raw = [0x41, 0x00, 0x3D, 0xD8];
        assert_eq!(decode_utf16le(&raw), "A\u{FFFD}");
    }

    #[test]
    fn odd_trailing_byte_is_replaced() {
        let raw = [0x41, 0x00, 0x42];
        assert_eq!(decode_utf16le(&raw), "A\u{FFFD}");
    }

    #[test]
    fn output_is_valid_utf8_for_arbitrary_even_input() {
        for seed in 0u32..64 {
            let raw: Vec<u8> = (0..32)
                .map(|i| (seed.wrapping_mul(2654435761).wrapping_add(i * 7919) >> 8) as u8)
                .collect();
            // String construction would already have panicked on invalid UTF-8;
            // assert explicitly anyway.
            let decoded = decode_utf16le(&raw);
            assert!(std::str::from_utf8(decoded.as_bytes()).is_ok());
        }
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut s = "文件名".to_string(); // 9 bytes, 3 per char
        truncate_to_byte_boundary(&mut s, 8);
        assert_eq!(s, "文件");
        let mut short = "abc".to_string();
        truncate_to_byte_boundary(&mut short, 8);
        assert_eq!(short, "abc");
    }
}
