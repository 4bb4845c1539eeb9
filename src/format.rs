//! Hex formatting helpers shared by every panel.

use std::borrow::Cow;

/// Format a byte as exactly two lowercase hex digits, no prefix.
pub fn hex_byte(byte: u8) -> String {
    format!("{:02x}", byte)
}

/// Format a value as lowercase hex with no prefix and no padding.
pub fn to_hex(value: u64) -> String {
    format!("{:x}", value)
}

/// Left-pad `hex` with `'0'` up to `width` characters.
///
/// Input that is already `width` characters or longer is returned as is;
/// nothing is ever truncated.
pub fn zero_extend(hex: &str, width: usize) -> String {
    if hex.len() >= width {
        return hex.to_string();
    }
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat('0').take(width - hex.len()));
    out.push_str(hex);
    out
}

/// Join bytes as space separated hex pairs (`"de ad be ef"`).
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&hex_byte(*byte));
    }
    out
}

/// Make engine supplied text safe to place inside a frame.
///
/// Printable text is borrowed unchanged. Control characters (newlines,
/// escapes, tabs) are replaced with `?`: a stray newline or escape sequence
/// would move the cursor and break the redraw line count.
pub fn terminal_safe(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if c.is_control() { '?' } else { c })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_byte_every_value() {
        for b in 0..=u8::MAX {
            let s = hex_byte(b);
            assert_eq!(s.len(), 2);
            assert!(s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert_eq!(u8::from_str_radix(&s, 16).unwrap(), b);
        }
    }

    #[test]
    fn test_zero_extend() {
        assert_eq!(zero_extend("1f", 16), "000000000000001f");
        assert_eq!(zero_extend("", 4), "0000");
        assert_eq!(zero_extend("abcd", 4), "abcd");
        // Never truncates
        assert_eq!(zero_extend("123456789", 8), "123456789");

        for len in 0..=20 {
            let s = "f".repeat(len);
            let out = zero_extend(&s, 16);
            assert!(out.len() >= 16);
            assert!(out.ends_with(&s));
            if len <= 16 {
                assert_eq!(out.len(), 16);
                assert!(out[..16 - len].chars().all(|c| c == '0'));
            } else {
                assert_eq!(out, s);
            }
        }
    }

    #[test]
    fn test_hex_bytes() {
        assert_eq!(hex_bytes(&[]), "");
        assert_eq!(hex_bytes(&[0x0a]), "0a");
        assert_eq!(hex_bytes(&[0xde, 0xad, 0xbe, 0xef]), "de ad be ef");
    }

    #[test]
    fn test_terminal_safe() {
        assert!(matches!(terminal_safe("mov rax, 0x10"), Cow::Borrowed(_)));
        assert_eq!(terminal_safe("a\nb\x1b[2Kc"), "a?b?[2Kc");
        assert_eq!(terminal_safe("tab\there"), "tab?here");
    }
}
