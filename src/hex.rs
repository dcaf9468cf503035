use rgb::{RGBA8, RGBA};
use thiserror::Error;
use crate::RGBColor;

/// Error returned by [`parse_argb_hex`].
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseHexError {
    #[error("empty color code")]
    Empty,
    #[error("invalid hexadecimal digit {0:?} in color code")]
    InvalidDigit(char),
    #[error("color code has {0} digits, at most 8 are allowed")]
    TooLong(usize),
}

/// Format `c` as eight upper-case hexadecimal digits `AARRGGBB`.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_panel::to_argb_hex;
/// assert_eq!(to_argb_hex(&RGB8::new(255, 128, 0)), "FFFF8000");
/// ```
pub fn to_argb_hex<C: RGBColor>(c: &C) -> String {
    let RGBA8 { r, g, b, a } = RGBA8::from_rgba(c.to_rgba());
    let argb = u32::from_be_bytes([a, r, g, b]);
    format!("{argb:08X}")
}

/// Parse a color code made of 1 to 8 hexadecimal digits, read as the
/// 32 bits integer `0xAARRGGBB`.  Surrounding whitespace and a
/// leading `#` are ignored.  Shorter codes are padded with leading
/// zeros, so a six digits code gives a fully transparent color.
///
/// # Example
///
/// ```
/// use rgb::RGBA8;
/// use color_panel::{parse_argb_hex, ParseHexError};
/// assert_eq!(parse_argb_hex("#80FF0000"), Ok(RGBA8::new(255, 0, 0, 128)));
/// assert_eq!(parse_argb_hex("FF00"), Ok(RGBA8::new(0, 255, 0, 0)));
/// assert_eq!(parse_argb_hex("12G4"), Err(ParseHexError::InvalidDigit('G')));
/// ```
pub fn parse_argb_hex(s: &str) -> Result<RGBA8, ParseHexError> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.is_empty() { return Err(ParseHexError::Empty) }
    if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ParseHexError::InvalidDigit(c))
    }
    if digits.len() > 8 { return Err(ParseHexError::TooLong(digits.len())) }
    let argb = digits.chars().filter_map(|c| c.to_digit(16))
        .fold(0, |n, d| n << 4 | d);
    let [a, r, g, b] = argb.to_be_bytes();
    Ok(RGBA { r, g, b, a })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_alpha_first() {
        assert_eq!(to_argb_hex(&RGBA8::new(1, 2, 3, 4)), "04010203");
        assert_eq!(to_argb_hex(&RGBA8::new(0, 0, 0, 0)), "00000000");
    }

    #[test]
    fn parse_formatted() {
        let c = RGBA8::new(0x12, 0xAB, 0xCD, 0xEF);
        assert_eq!(parse_argb_hex(&to_argb_hex(&c)), Ok(c));
        assert_eq!(parse_argb_hex("  efab12cd \n"),
                   Ok(RGBA8::new(0xAB, 0x12, 0xCD, 0xEF)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_argb_hex(""), Err(ParseHexError::Empty));
        assert_eq!(parse_argb_hex(" # "), Err(ParseHexError::Empty));
        assert_eq!(parse_argb_hex("+FF"), Err(ParseHexError::InvalidDigit('+')));
        assert_eq!(parse_argb_hex("123456789"), Err(ParseHexError::TooLong(9)));
        assert_eq!(parse_argb_hex("0123456789"), Err(ParseHexError::TooLong(10)));
        assert_eq!(parse_argb_hex("FFFFFFFF"), Ok(RGBA8::new(255, 255, 255, 255)));
        assert_eq!(ParseHexError::TooLong(9).to_string(),
                   "color code has 9 digits, at most 8 are allowed");
    }
}
