use std::fmt::Write;

use crate::types::errors::CodecError;

/// Parses whitespace-separated hex bytes, e.g. `"11 22 33"`.
///
/// The whole input is rejected on the first invalid token; nothing is
/// returned partially. Empty or blank input yields an empty payload.
///
/// ```
/// use can_logger::{parse_byte_string, CodecError};
///
/// assert_eq!(parse_byte_string("11 22 33"), Ok(vec![0x11, 0x22, 0x33]));
/// assert_eq!(
///     parse_byte_string("11 zz"),
///     Err(CodecError::InvalidByte("zz".to_string()))
/// );
/// ```
pub fn parse_byte_string(input: &str) -> Result<Vec<u8>, CodecError> {
    input
        .split_whitespace()
        .map(|token| {
            // from_str_radix would let a leading '+' through
            if token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(CodecError::InvalidByte(token.to_string()));
            }
            u8::from_str_radix(token, 16).map_err(|_| CodecError::InvalidByte(token.to_string()))
        })
        .collect()
}

/// Uppercase two-digit hex bytes separated by single spaces.
pub fn format_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // writing to a String cannot fail
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_tokens_in_any_spacing() {
        assert_eq!(parse_byte_string("11 22 33").unwrap(), vec![0x11, 0x22, 0x33]);
        assert_eq!(parse_byte_string("  a\tFF\n0 ").unwrap(), vec![0x0A, 0xFF, 0x00]);
        assert!(parse_byte_string("").unwrap().is_empty());
        assert!(parse_byte_string("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_whole_input_on_bad_token() {
        assert_eq!(
            parse_byte_string("11 zz"),
            Err(CodecError::InvalidByte("zz".into()))
        );
        assert_eq!(
            parse_byte_string("11 100 22"),
            Err(CodecError::InvalidByte("100".into()))
        );
        assert_eq!(
            parse_byte_string("+1"),
            Err(CodecError::InvalidByte("+1".into()))
        );
    }

    #[test]
    fn formats_uppercase_pairs() {
        assert_eq!(format_bytes(&[0x0a, 0xff, 0x00]), "0A FF 00");
        assert_eq!(format_bytes(&[]), "");
    }

    #[test]
    fn formatted_bytes_parse_back() {
        let data: Vec<u8> = (0..=255).step_by(17).collect();
        assert_eq!(parse_byte_string(&format_bytes(&data)).unwrap(), data);
    }
}
