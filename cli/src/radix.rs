//! Output bases.

use anyhow::format_err;
use num_bigint::{BigInt, Sign};

use std::{fmt, str::FromStr};

const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Base for printing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// Bases 2..=36 using decimal digits and lowercase letters.
    Lowercase(u32),
    /// Bases 2..=36 using decimal digits and uppercase letters. Specified as a negative number.
    Uppercase(u32),
    /// Bases 37..=62 using decimal digits, uppercase letters, and lowercase letters.
    Extended(u32),
}

impl Default for Radix {
    fn default() -> Self {
        Self::Lowercase(10)
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowercase(radix) | Self::Extended(radix) => write!(formatter, "{}", radix),
            Self::Uppercase(radix) => write!(formatter, "-{}", radix),
        }
    }
}

impl FromStr for Radix {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base: i32 = s
            .parse()
            .map_err(|err| format_err!("invalid base '{}': {}", s, err))?;
        match base {
            2..=36 => Ok(Self::Lowercase(base.unsigned_abs())),
            -36..=-2 => Ok(Self::Uppercase(base.unsigned_abs())),
            37..=62 => Ok(Self::Extended(base.unsigned_abs())),
            _ => Err(format_err!(
                "unsupported base {}. Use 2..36 (lowercase letters), -2..-36 (uppercase letters) \
                 or 37..62 (uppercase and lowercase letters)",
                base
            )),
        }
    }
}

impl Radix {
    /// Formats `value` in this base.
    pub fn format(self, value: &BigInt) -> String {
        match self {
            Self::Lowercase(radix) => value.to_str_radix(radix),
            Self::Uppercase(radix) => value.to_str_radix(radix).to_ascii_uppercase(),
            Self::Extended(radix) => {
                let digits = value.magnitude().to_radix_be(radix);
                let sign = if value.sign() == Sign::Minus { "-" } else { "" };
                let digits: String = digits
                    .into_iter()
                    .map(|digit| char::from(DIGITS[usize::from(digit)]))
                    .collect();
                if digits.is_empty() {
                    "0".to_owned()
                } else {
                    format!("{}{}", sign, digits)
                }
            }
        }
    }
}
