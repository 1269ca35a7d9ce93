//! Bounded sampler: uniform integers in a half-open range.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use std::path::Path;

use crate::{
    bits::BitRequirement,
    error::SampleError,
    source::{ByteSource, RandomDevice},
};

/// Maximum number of draws from the entropy source for a single sample.
///
/// Each draw is accepted with probability greater than 1/2, so for a uniform source
/// the chance to exhaust all attempts is below `2^-100`.
pub const MAX_ATTEMPTS: usize = 100;

/// Validated half-open range `[low, high)` of arbitrary-precision integers.
///
/// Sampling uses rejection: a candidate with the minimal number of random bits covering
/// the range width is drawn, and is discarded if it exceeds the width. Unlike scaling
/// a random value to the range, this produces exactly uniform results.
///
/// # Examples
///
/// ```
/// use bigrand::{ScriptedSource, UniformRange};
/// use num_bigint::BigInt;
///
/// let range = UniformRange::new(BigInt::from(-10), BigInt::from(10))?;
/// assert_eq!(range.bit_requirement().bits(), 5);
///
/// // The first draw (31) is out of range and is rejected; the second one is accepted.
/// let mut source = ScriptedSource::new(vec![0xff, 0x03]);
/// assert_eq!(range.sample(&mut source)?, BigInt::from(-7));
/// assert_eq!(source.reads(), 2);
/// # Ok::<_, bigrand::SampleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformRange {
    low: BigInt,
    high: BigInt,
    max_value: BigUint,
    requirement: BitRequirement,
}

impl UniformRange {
    /// Creates a range with the specified inclusive lower bound and exclusive upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidRange`] if `high <= low`.
    pub fn new(low: BigInt, high: BigInt) -> Result<Self, SampleError> {
        let width = &high - &low;
        let width = match width.into_parts() {
            (Sign::Plus, width) => width,
            _ => return Err(SampleError::InvalidRange { low, high }),
        };
        let max_value = width - 1_u32;
        let requirement = BitRequirement::for_max_value(&max_value);

        tracing::debug!(
            bits = requirement.bits(),
            bytes = requirement.bytes(),
            "prepared uniform range"
        );
        Ok(Self {
            low,
            high,
            max_value,
            requirement,
        })
    }

    /// Creates the range `[0, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidRange`] if `high` is not positive.
    pub fn below(high: BigInt) -> Result<Self, SampleError> {
        Self::new(BigInt::zero(), high)
    }

    /// Creates the range `[0, 2^bits)`.
    pub fn with_bit_width(bits: u64) -> Self {
        let max_value = (BigUint::one() << bits) - 1_u32;
        let high = BigInt::from(max_value.clone()) + 1;
        Self {
            low: BigInt::zero(),
            high,
            requirement: BitRequirement::for_bits(bits),
            max_value,
        }
    }

    /// Returns the inclusive lower bound.
    pub fn low(&self) -> &BigInt {
        &self.low
    }

    /// Returns the exclusive upper bound.
    pub fn high(&self) -> &BigInt {
        &self.high
    }

    /// Returns the number of values in the range.
    pub fn width(&self) -> BigUint {
        &self.max_value + 1_u32
    }

    /// Returns the number of bits and bytes drawn per candidate.
    pub fn bit_requirement(&self) -> BitRequirement {
        self.requirement
    }

    /// Checks whether the range contains a single value. Sampling from such a range
    /// does not consume entropy.
    pub fn is_degenerate(&self) -> bool {
        self.max_value.is_zero()
    }

    /// Checks whether the range contains the specified value.
    pub fn contains(&self, value: &BigInt) -> bool {
        self.low <= *value && *value < self.high
    }

    /// Draws a uniformly distributed value from this range.
    ///
    /// # Errors
    ///
    /// - Returns [`SampleError::EntropySource`] if `source` fails to supply bytes.
    ///   The error is returned immediately, without further draws.
    /// - Returns [`SampleError::RetryExhausted`] if [`MAX_ATTEMPTS`] draws are all
    ///   out of range.
    pub fn sample<S>(&self, source: &mut S) -> Result<BigInt, SampleError>
    where
        S: ByteSource + ?Sized,
    {
        if self.is_degenerate() {
            return Ok(self.low.clone());
        }

        let mut buffer = vec![0_u8; self.requirement.bytes()];
        for attempt in 1..=MAX_ATTEMPTS {
            source.fill_bytes(&mut buffer)?;
            let candidate = self.requirement.candidate(&mut buffer);
            if candidate <= self.max_value {
                tracing::debug!(attempt, "accepted candidate");
                return Ok(&self.low + BigInt::from(candidate));
            }
            tracing::trace!(attempt, "rejected out-of-range candidate");
        }

        tracing::warn!(
            attempts = MAX_ATTEMPTS,
            bits = self.requirement.bits(),
            "entropy source did not produce an in-range candidate"
        );
        Err(SampleError::RetryExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

/// Draws a uniformly distributed integer from `[low, high)`.
///
/// If the range contains a single value, it is returned without consuming entropy.
///
/// # Errors
///
/// Returns [`SampleError::InvalidRange`] if `high <= low`; see [`UniformRange::sample()`]
/// for other failure modes.
pub fn sample<S>(low: &BigInt, high: &BigInt, source: &mut S) -> Result<BigInt, SampleError>
where
    S: ByteSource + ?Sized,
{
    UniformRange::new(low.clone(), high.clone())?.sample(source)
}

/// Draws a uniformly distributed integer from `[0, high)`.
///
/// # Errors
///
/// Returns [`SampleError::InvalidRange`] if `high` is not positive; see
/// [`UniformRange::sample()`] for other failure modes.
pub fn sample_below<S>(high: &BigInt, source: &mut S) -> Result<BigInt, SampleError>
where
    S: ByteSource + ?Sized,
{
    UniformRange::below(high.clone())?.sample(source)
}

/// Draws a uniformly distributed integer from `[0, 2^bits)`.
///
/// # Errors
///
/// See [`UniformRange::sample()`].
pub fn sample_bits<S>(bits: u64, source: &mut S) -> Result<BigInt, SampleError>
where
    S: ByteSource + ?Sized,
{
    UniformRange::with_bit_width(bits).sample(source)
}

/// Draws a uniformly distributed integer from `[low, high)` using a random device
/// at the specified path.
///
/// The device is opened only if entropy is actually needed, and is closed before
/// this function returns.
///
/// # Errors
///
/// See [`sample()`].
pub fn sample_from_device(
    low: &BigInt,
    high: &BigInt,
    path: impl AsRef<Path>,
) -> Result<BigInt, SampleError> {
    let mut device = RandomDevice::new(path.as_ref());
    sample(low, high, &mut device)
}
