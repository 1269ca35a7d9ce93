//! Parsing range bounds from command-line args.

use anyhow::{ensure, Context as _};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Num;

/// Parses an integer with an optional sign. Besides decimal numbers, supports
/// hexadecimal (`0x` prefix), binary (`0b` prefix) and octal (leading `0`) notations.
pub fn parse_bound(s: &str) -> anyhow::Result<BigInt> {
    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (Sign::Minus, &s[1..]),
        Some(b'+') => (Sign::Plus, &s[1..]),
        _ => (Sign::Plus, s),
    };
    let (radix, digits) = split_radix(unsigned);

    ensure!(
        !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_alphanumeric()),
        "invalid integer: '{}'",
        s
    );
    let magnitude = BigUint::from_str_radix(digits, radix)
        .with_context(|| format!("invalid integer: '{}'", s))?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

fn split_radix(s: &str) -> (u32, &str) {
    let prefix = s.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &s[2..]),
        Some("0b") => (2, &s[2..]),
        _ if s.len() > 1 && s.starts_with('0') => (8, &s[1..]),
        _ => (10, s),
    }
}
