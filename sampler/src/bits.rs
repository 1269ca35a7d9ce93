//! Conversion of raw entropy bytes into candidate integers.

use num_bigint::BigUint;

/// Number of random bits (and bytes) needed to draw a candidate in `[0, 2^bits)`, together
/// with the mask for the most significant byte of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRequirement {
    bits: u64,
    bytes: usize,
    mask: u8,
}

impl BitRequirement {
    /// Computes the requirement for candidates covering `[0, max_value]`.
    pub fn for_max_value(max_value: &BigUint) -> Self {
        Self::for_bits(max_value.bits())
    }

    pub(crate) fn for_bits(bits: u64) -> Self {
        let (div, rem) = (bits / 8, bits % 8);
        let bytes = usize::try_from(div + u64::from(rem != 0)).unwrap_or(usize::MAX);
        let mask = if rem == 0 {
            u8::MAX
        } else {
            // `rem < 8`, so the shifted value always fits into a byte.
            (1_u8 << rem) - 1
        };
        Self { bits, bytes, mask }
    }

    /// Returns the number of significant bits in a candidate.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Returns the number of bytes drawn from the entropy source per candidate.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Returns the mask applied to the first (most significant) byte of a draw.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Masks off the unused high-order bits of `buffer` and interprets it as a big-endian
    /// unsigned integer.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` has a length different from [`Self::bytes()`].
    pub fn candidate(&self, buffer: &mut [u8]) -> BigUint {
        assert_eq!(
            buffer.len(),
            self.bytes,
            "buffer length does not match bit requirement"
        );
        if let Some(first) = buffer.first_mut() {
            *first &= self.mask;
        }
        BigUint::from_bytes_be(buffer)
    }
}
