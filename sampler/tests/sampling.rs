//! Tests for sampling with deterministic entropy sources.

use assert_matches::assert_matches;
use num_bigint::BigInt;
use rand::{rngs::StdRng, RngCore, SeedableRng};

use std::{error, io};

use bigrand::{
    sample, sample_below, sample_bits, sample_from_device, ByteSource, SampleError,
    ScriptedSource, UniformRange, MAX_ATTEMPTS,
};

/// Source that counts requested bytes and fails every read.
#[derive(Debug, Default)]
struct FailingSource {
    requested: Vec<usize>,
}

impl ByteSource for FailingSource {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        self.requested.push(buffer.len());
        Err(io::Error::new(io::ErrorKind::Other, "device is broken"))
    }
}

/// Source recording the size of each request and answering it with zeros.
#[derive(Debug, Default)]
struct RecordingSource {
    requested: Vec<usize>,
}

impl ByteSource for RecordingSource {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        self.requested.push(buffer.len());
        buffer.iter_mut().for_each(|byte| *byte = 0);
        Ok(())
    }
}

struct RngSource(StdRng);

impl ByteSource for RngSource {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        self.0.fill_bytes(buffer);
        Ok(())
    }
}

fn big(value: &str) -> BigInt {
    value.parse().unwrap()
}

#[test]
fn degenerate_range_consumes_no_entropy() {
    let mut source = ScriptedSource::new(vec![]);
    let value = sample(&BigInt::from(5), &BigInt::from(6), &mut source).unwrap();
    assert_eq!(value, BigInt::from(5));
    assert_eq!(source.reads(), 0);

    let mut source = FailingSource::default();
    let low = big("-123456789012345678901234567890");
    let value = sample(&low, &(&low + 1), &mut source).unwrap();
    assert_eq!(value, low);
    assert!(source.requested.is_empty());
}

#[test]
fn invalid_ranges_consume_no_entropy() {
    let mut source = FailingSource::default();
    let err = sample(&BigInt::from(10), &BigInt::from(10), &mut source).unwrap_err();
    assert_matches!(err, SampleError::InvalidRange { .. });
    let err = sample(&BigInt::from(10), &BigInt::from(5), &mut source).unwrap_err();
    assert_matches!(
        err,
        SampleError::InvalidRange { ref low, ref high }
            if *low == BigInt::from(10) && *high == BigInt::from(5)
    );
    assert!(source.requested.is_empty());
}

#[test]
fn byte_aligned_width_requests_single_unmasked_byte() {
    let high = BigInt::from(256);
    let mut recording = RecordingSource::default();
    sample_below(&high, &mut recording).unwrap();
    assert_eq!(recording.requested, [1]);

    // Every byte value is accepted as-is.
    for byte in [0_u8, 1, 127, 128, 255] {
        let mut source = ScriptedSource::new(vec![byte]);
        let value = sample_below(&high, &mut source).unwrap();
        assert_eq!(value, BigInt::from(byte));
        assert_eq!(source.reads(), 1);
    }
}

#[test]
fn unaligned_width_requests_masked_bytes() {
    let high = BigInt::from(257);
    let mut recording = RecordingSource::default();
    sample_below(&high, &mut recording).unwrap();
    assert_eq!(recording.requested, [2]);

    // The high 7 bits of the first byte are discarded: 0xfe00 -> 0x000, 0xff00 -> 0x100.
    let mut source = ScriptedSource::new(vec![0xfe, 0x00]);
    assert_eq!(sample_below(&high, &mut source).unwrap(), BigInt::from(0));
    let mut source = ScriptedSource::new(vec![0xff, 0x00]);
    assert_eq!(sample_below(&high, &mut source).unwrap(), BigInt::from(256));
    assert_eq!(source.reads(), 1);
}

#[test]
fn request_size_tracks_bit_length_of_width() {
    let cases = [
        (2_u64, 1_usize),
        (3, 1),
        (255, 1),
        (256, 1),
        (257, 2),
        (65_536, 2),
        (65_537, 3),
    ];
    for (width, expected_bytes) in cases {
        let mut recording = RecordingSource::default();
        let low = BigInt::from(-7);
        sample(&low, &(&low + width), &mut recording).unwrap();
        assert_eq!(recording.requested, [expected_bytes], "width = {}", width);
    }
}

#[test]
fn out_of_range_candidate_is_rejected() {
    // Width 10 needs 4 bits; 0x0c = 12 is out of range, 0x07 is in range.
    let low = big("1000000000000000000000");
    let high = &low + 10;
    let mut source = ScriptedSource::new(vec![0x0c, 0x07]);
    let value = sample(&low, &high, &mut source).unwrap();
    assert_eq!(value, &low + 7);
    assert_eq!(source.reads(), 2);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn masked_bits_do_not_cause_rejection() {
    // Width 10 needs 4 bits; 0xf3 is masked to 3 and accepted.
    let mut source = ScriptedSource::new(vec![0xf3]);
    let value = sample(&BigInt::from(-5), &BigInt::from(5), &mut source).unwrap();
    assert_eq!(value, BigInt::from(-2));
}

#[test]
fn exhaustion_after_exactly_max_attempts() {
    // Width 3 needs 2 bits; 0x03 is always out of range.
    let mut source = ScriptedSource::repeat(&[0x03], MAX_ATTEMPTS + 10);
    let err = sample(&BigInt::from(0), &BigInt::from(3), &mut source).unwrap_err();
    assert_matches!(err, SampleError::RetryExhausted { attempts } if attempts == MAX_ATTEMPTS);
    assert_eq!(source.reads(), MAX_ATTEMPTS);
    assert_eq!(source.remaining(), 10);
    assert_eq!(MAX_ATTEMPTS, 100);
}

#[test]
fn acceptance_on_last_attempt() {
    let mut bytes = vec![0x03; MAX_ATTEMPTS - 1];
    bytes.push(0x02);
    let mut source = ScriptedSource::new(bytes);
    let value = sample(&BigInt::from(0), &BigInt::from(3), &mut source).unwrap();
    assert_eq!(value, BigInt::from(2));
    assert_eq!(source.reads(), MAX_ATTEMPTS);
}

#[test]
fn short_source_is_reported_as_entropy_error() {
    // Two rejected draws, then the source runs dry.
    let mut source = ScriptedSource::new(vec![0x03, 0x03]);
    let err = sample(&BigInt::from(0), &BigInt::from(3), &mut source).unwrap_err();
    assert_matches!(err, SampleError::EntropySource(ref e) if e.kind() == io::ErrorKind::UnexpectedEof);
    assert_eq!(source.reads(), 2);

    let mut source = FailingSource::default();
    let err = sample_bits(64, &mut source).unwrap_err();
    assert_matches!(err, SampleError::EntropySource(_));
    assert_eq!(source.requested, [8]);
}

#[test]
fn bit_width_form() {
    let mut source = ScriptedSource::new(vec![]);
    assert_eq!(sample_bits(0, &mut source).unwrap(), BigInt::from(0));

    let mut source = ScriptedSource::new(vec![0xff; 9]);
    let value = sample_bits(65, &mut source).unwrap();
    assert_eq!(value, (BigInt::from(1) << 65_usize) - 1);
}

#[test]
fn results_are_contained_in_range() {
    let mut source = RngSource(StdRng::seed_from_u64(123));
    let ranges = [
        (big("0"), big("2")),
        (big("-1"), big("1")),
        (big("-300"), big("-43")),
        (big("18446744073709551615"), big("18446744073709551617")),
        (
            big("-340282366920938463463374607431768211456"),
            big("340282366920938463463374607431768211455"),
        ),
        (
            big("1000000000000000000000000000000000000000000000000000000000000"),
            big("1000000000000000000000000000000000000000000000000000000000001000"),
        ),
    ];

    for (low, high) in &ranges {
        let range = UniformRange::new(low.clone(), high.clone()).unwrap();
        for _ in 0..500 {
            let value = range.sample(&mut source).unwrap();
            assert!(
                *low <= value && value < *high,
                "{} not in [{}, {})",
                value,
                low,
                high
            );
        }
    }
}

#[test]
fn all_values_of_small_range_are_reachable() {
    let mut source = RngSource(StdRng::seed_from_u64(7));
    let range = UniformRange::new(BigInt::from(-3), BigInt::from(4)).unwrap();
    let mut seen = [false; 7];
    for _ in 0..1_000 {
        let value = range.sample(&mut source).unwrap();
        let index: usize = (value + 3_i32).try_into().unwrap();
        seen[index] = true;
    }
    assert!(seen.iter().all(|&flag| flag), "{:?}", seen);
}

#[test]
fn missing_device_is_reported_with_path() {
    let path = "/nonexistent/bigrand/device";
    let err = sample_from_device(&BigInt::from(0), &BigInt::from(100), path).unwrap_err();
    assert_matches!(err, SampleError::EntropySource(ref e) if e.kind() == io::ErrorKind::NotFound);
    let source = error::Error::source(&err).unwrap();
    assert!(source.to_string().contains(path), "{}", source);

    // Degenerate ranges never open the device.
    let value = sample_from_device(&BigInt::from(41), &BigInt::from(42), path).unwrap();
    assert_eq!(value, BigInt::from(41));
}

#[cfg(unix)]
#[test]
fn sampling_from_system_device() {
    let low = big("-99999999999999999999999999999999");
    let high = big("99999999999999999999999999999999");
    for _ in 0..20 {
        let value = sample_from_device(&low, &high, "/dev/urandom").unwrap();
        assert!(low <= value && value < high);
    }
}
