//! Identifier character classes.
//!
//! The valid set is the universal-character list from the C and C++
//! standards' annexes, realised over the Basic Multilingual Plane as a
//! 64 Ki-bit bitmap built once from the inclusive ranges below, plus a
//! formula for the supplementary planes. `$` participates only when the
//! dialect enables `IDENTIFIER_DOLLARS`.

use std::sync::OnceLock;

/// Inclusive BMP ranges of valid identifier characters. `$` (0x24) is in
/// the table; the dollar gate is applied before the bitmap test.
const CHAR_RANGES: &[(u32, u32)] = &[
    (0x24, 0x24),
    (0x30, 0x39),
    (0x41, 0x5a),
    (0x5f, 0x5f),
    (0x61, 0x7a),
    (0xa8, 0xa8),
    (0xaa, 0xaa),
    (0xad, 0xad),
    (0xaf, 0xaf),
    (0xb2, 0xb5),
    (0xb7, 0xba),
    (0xbc, 0xbe),
    (0xc0, 0xd6),
    (0xd8, 0xf6),
    (0xf8, 0xff),
    (0x0100, 0x167f),
    (0x1681, 0x180d),
    (0x180f, 0x1fff),
    (0x200b, 0x200d),
    (0x202a, 0x202e),
    (0x203f, 0x2040),
    (0x2054, 0x2054),
    (0x2060, 0x206f),
    (0x2070, 0x218f),
    (0x2460, 0x24ff),
    (0x2776, 0x2793),
    (0x2c00, 0x2dff),
    (0x2e80, 0x2fff),
    (0x3004, 0x3007),
    (0x3021, 0x302f),
    (0x3031, 0x303f),
    (0x3040, 0xd7ff),
    (0xf900, 0xfd3d),
    (0xfd40, 0xfdcf),
    (0xfdf0, 0xfe44),
    (0xfe47, 0xfffd),
];

/// 65536 bits, one per BMP code point.
fn bmp_bitmap() -> &'static [u64; 1024] {
    static BITS: OnceLock<Box<[u64; 1024]>> = OnceLock::new();
    BITS.get_or_init(|| {
        let mut bits = Box::new([0u64; 1024]);
        for &(lo, hi) in CHAR_RANGES {
            for c in lo..=hi {
                bits[(c / 64) as usize] |= 1 << (c % 64);
            }
        }
        bits
    })
}

/// Whether `c` may appear in an identifier body.
#[must_use]
pub fn is_valid_ident_char(c: char, allow_dollars: bool) -> bool {
    if c == '$' && !allow_dollars {
        return false;
    }
    let v = c as u32;
    if v <= 0xffff {
        bmp_bitmap()[(v / 64) as usize] & (1 << (v % 64)) != 0
    } else {
        (0x10000..=0xefffd).contains(&v) && (v & 0xffff) <= 0xfffd
    }
}

/// Whether `c` may start an identifier: a valid identifier character that
/// is neither an ASCII digit nor a combining mark.
#[must_use]
pub fn is_valid_initial_ident_char(c: char, allow_dollars: bool) -> bool {
    let v = c as u32;
    is_valid_ident_char(c, allow_dollars)
        && !(0x30..=0x39).contains(&v)
        && !(0x300..=0x36f).contains(&v)
        && !(0x1dc0..=0x1dff).contains(&v)
        && !(0x20d0..=0x20ff).contains(&v)
        && !(0xfe20..=0xfe2f).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_identifier_chars() {
        for c in ['a', 'z', 'A', 'Z', '_', '0', '9'] {
            assert!(is_valid_ident_char(c, false), "{c} should be valid");
        }
        for c in [' ', '+', '(', '\n', '#', '\0'] {
            assert!(!is_valid_ident_char(c, false), "{c:?} should be invalid");
        }
    }

    #[test]
    fn dollar_is_gated() {
        assert!(!is_valid_ident_char('$', false));
        assert!(is_valid_ident_char('$', true));
        assert!(is_valid_initial_ident_char('$', true));
    }

    #[test]
    fn digits_cannot_start() {
        assert!(is_valid_ident_char('7', false));
        assert!(!is_valid_initial_ident_char('7', false));
        assert!(is_valid_initial_ident_char('a', false));
        assert!(is_valid_initial_ident_char('_', false));
    }

    #[test]
    fn bmp_letters() {
        assert!(is_valid_ident_char('é', false));
        assert!(is_valid_initial_ident_char('é', false));
        assert!(is_valid_ident_char('日', false));
        // U+2028 LINE SEPARATOR sits in the 0x2000..0x200a gap? It does not:
        // 0x180f..0x1fff covers up to 0x1fff, 0x200b..0x200d excludes 0x2028.
        assert!(!is_valid_ident_char('\u{2028}', false));
    }

    #[test]
    fn combining_marks_cannot_start() {
        let grave = '\u{300}';
        assert!(is_valid_ident_char(grave, false));
        assert!(!is_valid_initial_ident_char(grave, false));
    }

    #[test]
    fn supplementary_planes() {
        assert!(is_valid_ident_char('\u{10000}', false));
        assert!(is_valid_ident_char('\u{1F600}', false)); // emoji, valid per formula
        assert!(!is_valid_ident_char('\u{1FFFE}', false)); // low 16 bits > 0xfffd
        assert!(!is_valid_ident_char('\u{F0000}', false)); // beyond 0xEFFFD
    }
}
