//! Uniformly distributed arbitrary-precision integers drawn from system entropy.
//!
//! This crate converts bytes from an entropy source (such as `/dev/urandom`) into
//! a [`BigInt`] uniformly distributed in a half-open range `[low, high)`. It does not
//! generate randomness itself; it is not a PRNG and cannot be seeded.
//!
//! # How it works
//!
//! 1. The range width `high - low` determines the minimal number of random bits
//!   needed to represent any offset into the range.
//! 2. A candidate offset is drawn by reading the minimal number of whole bytes from
//!   the source and zeroing the unused high-order bits of the first byte.
//! 3. If the candidate is outside the range, it is rejected and a new one is drawn.
//!   Since the number of bits is minimal, more than half of candidates are accepted.
//!   The number of draws is capped at [`MAX_ATTEMPTS`]; hitting the cap almost certainly
//!   means that the source is broken, and is reported as an error rather than
//!   a biased result.
//!
//! Ranges containing a single value are answered without touching the source.
//!
//! # Entropy sources
//!
//! Entropy is supplied via the [`ByteSource`] trait. [`RandomDevice`] reads from a file
//! or device, and [`ScriptedSource`] replays fixed bytes for testing.
//!
//! # Examples
//!
//! ```
//! use bigrand::{sample, RandomDevice};
//! use num_bigint::BigInt;
//!
//! let low: BigInt = "-1000000000000000000000000".parse()?;
//! let high: BigInt = "1000000000000000000000000".parse()?;
//! # if cfg!(unix) {
//! let mut device = RandomDevice::urandom();
//! let value = sample(&low, &high, &mut device)?;
//! assert!(low <= value && value < high);
//! # }
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Deterministic sources make the rejection behavior observable:
//!
//! ```
//! use bigrand::{sample_below, SampleError, ScriptedSource};
//! use num_bigint::BigInt;
//!
//! // Range [0, 257) needs 9 bits, i.e., 2 bytes per draw.
//! let high = BigInt::from(257);
//! let mut source = ScriptedSource::new(vec![0x01, 0x01, 0x00, 0xff]);
//! // 0x0101 = 257 is rejected; 0x00ff = 255 is accepted.
//! assert_eq!(sample_below(&high, &mut source)?, BigInt::from(255));
//!
//! // Empty ranges are rejected outright.
//! let err = sample_below(&BigInt::from(0), &mut source).unwrap_err();
//! assert!(matches!(err, SampleError::InvalidRange { .. }));
//! # Ok::<_, SampleError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/bigrand/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub use num_bigint::{BigInt, BigUint};

mod bits;
mod error;
mod range;
mod source;

pub use crate::{
    bits::BitRequirement,
    error::SampleError,
    range::{sample, sample_below, sample_bits, sample_from_device, UniformRange, MAX_ATTEMPTS},
    source::{ByteSource, RandomDevice, ReaderSource, ScriptedSource},
};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;
