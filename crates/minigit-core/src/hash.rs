//! Content fingerprinting.
//!
//! A polynomial rolling digest rendered as 8 hex characters. It is cheap and
//! deterministic, and explicitly not collision resistant.

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Number of hex characters in a fingerprint.
pub const FINGERPRINT_LEN: usize = 8;

/// Compute the fingerprint of a string.
///
/// Accumulates `acc = acc * 31 + byte` over every byte with wrapping signed
/// 64-bit arithmetic, takes the absolute value, then emits the low
/// [`FINGERPRINT_LEN`] nibbles most-significant first.
///
/// Bytes are folded as unsigned values, so non-ASCII content contributes
/// 128..=255 per byte rather than a negative amount.
pub fn fingerprint(data: &str) -> String {
    let acc = data
        .bytes()
        .fold(0i64, |acc, b| acc.wrapping_mul(31).wrapping_add(i64::from(b)));

    let mut temp = acc.unsigned_abs();
    let mut digits = [0u8; FINGERPRINT_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = HEX_CHARS[(temp % 16) as usize];
        temp /= 16;
    }

    digits.iter().map(|&d| char::from(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(fingerprint("hello world"), fingerprint("hello world"));
    }

    #[test]
    fn test_fingerprint_different_inputs() {
        assert_ne!(fingerprint("hello world"), fingerprint("different text"));
        assert_ne!(fingerprint("x"), fingerprint("y"));
    }

    #[test]
    fn test_fingerprint_known_values() {
        assert_eq!(fingerprint(""), "00000000");
        assert_eq!(fingerprint("a"), "00000061");
        // 97 * 31 + 98 = 3105
        assert_eq!(fingerprint("ab"), "00000c21");
    }

    #[test]
    fn test_fingerprint_folds_unsigned_bytes() {
        // "é" is 0xc3 0xa9: 195 * 31 + 169 = 6214
        assert_eq!(fingerprint("é"), "00001846");
    }

    #[test]
    fn test_fingerprint_survives_overflow() {
        let long = "z".repeat(10_000);
        let fp = fingerprint(&long);
        assert_eq!(fp.len(), FINGERPRINT_LEN);
        assert_eq!(fp, fingerprint(&long));
    }

    proptest! {
        #[test]
        fn prop_fingerprint_is_eight_lower_hex(s in ".*") {
            let fp = fingerprint(&s);
            prop_assert_eq!(fp.len(), FINGERPRINT_LEN);
            prop_assert!(fp.bytes().all(|b| HEX_CHARS.contains(&b)));
        }

        #[test]
        fn prop_fingerprint_is_pure(s in ".*") {
            prop_assert_eq!(fingerprint(&s), fingerprint(&s.clone()));
        }
    }
}
