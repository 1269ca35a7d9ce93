//! CLI printing uniformly distributed random integers.

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use num_bigint::BigInt;
use tracing_subscriber::EnvFilter;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use bigrand::{ByteSource, RandomDevice, ReaderSource, SampleError, UniformRange};

mod bounds;
mod radix;

use crate::{bounds::parse_bound, radix::Radix};

const ABOUT: &str = "Prints an arbitrary-size random integer uniformly distributed \
    in the interval [LOWER_BOUND, UPPER_BOUND).";

const AFTER_HELP: &str = "\
NOTES:
    If only a single bound is provided, it is assumed to be the upper bound, and the lower
    bound is assumed to be 0. If no bounds are provided, the range is [0, 32768).

    Bounds may be prefixed with `0x` (hexadecimal), `0b` (binary) or `0` (octal).
    Negative bounds with a `0x` or `0b` prefix must follow `--`, as in
    `bigrand -- -0x10 0`; otherwise, they are parsed as options.

    `--source -` reads entropy from the standard input. `-r` takes precedence
    over `--source` and `BIGRAND_SOURCE`.

BASES:
    2..36      decimal digits, lowercase letters
    -2..-36    decimal digits, uppercase letters
    37..62     decimal digits, uppercase letters, lowercase letters

EXIT CODES:
    0    Normal exit
    1    Sampling error (e.g., the entropy source cannot be read)
    2    Invalid command-line option";

/// Exclusive upper bound used if no bounds are specified.
const DEFAULT_UPPER_BOUND: u32 = 1 << 15;
/// `--source` value denoting the standard input.
const STDIN_SOURCE: &str = "-";
const ERROR_EXIT_CODE: i32 = 1;
const SOURCE_HINT: &str = "check the entropy source, or choose another one with `--source` or `-r`";

#[derive(Debug, Parser)]
#[command(
    name = "bigrand",
    version,
    about = ABOUT,
    after_help = AFTER_HELP,
    allow_negative_numbers = true
)]
struct Args {
    /// Inclusive lower bound. If this is the only bound, it is treated as the exclusive
    /// upper bound instead.
    #[arg(value_name = "LOWER_BOUND", value_parser = parse_bound)]
    lower_bound: Option<BigInt>,
    /// Exclusive upper bound.
    #[arg(value_name = "UPPER_BOUND", value_parser = parse_bound)]
    upper_bound: Option<BigInt>,
    /// Use the interval [0, 2^N).
    #[arg(
        long,
        short = 's',
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        conflicts_with_all = ["lower_bound", "upper_bound"]
    )]
    bit_width: Option<u64>,
    /// Read from /dev/random instead of /dev/urandom.
    #[arg(long, short = 'r')]
    use_random: bool,
    /// Read entropy from the specified file or device (`-` for stdin) instead of
    /// /dev/urandom. Ignored if `-r` is specified.
    #[arg(long, value_name = "PATH", env = "BIGRAND_SOURCE")]
    source: Option<PathBuf>,
    /// Print the result in the given base (see BASES).
    #[arg(long, short = 'b', value_name = "N", default_value_t = Radix::default())]
    base: Radix,
    /// Increase logging verbosity (can be repeated). Ignored if `RUST_LOG` is set.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn range(&self) -> Result<UniformRange, SampleError> {
        if let Some(bits) = self.bit_width {
            return Ok(UniformRange::with_bit_width(bits));
        }
        match (&self.lower_bound, &self.upper_bound) {
            (Some(low), Some(high)) => UniformRange::new(low.clone(), high.clone()),
            (Some(high), None) => UniformRange::below(high.clone()),
            _ => UniformRange::below(BigInt::from(DEFAULT_UPPER_BOUND)),
        }
    }

    /// Returns the path to the entropy source. `-r` wins over `--source` / `BIGRAND_SOURCE`.
    fn source_path(&self) -> &Path {
        if self.use_random {
            Path::new(RandomDevice::RANDOM)
        } else if let Some(path) = &self.source {
            path
        } else {
            Path::new(RandomDevice::URANDOM)
        }
    }

    fn entropy_source(&self) -> Box<dyn ByteSource> {
        let path = self.source_path();
        if path == Path::new(STDIN_SOURCE) {
            Box::new(ReaderSource::new(io::stdin()))
        } else {
            Box::new(RandomDevice::new(path))
        }
    }

    fn run(self) -> anyhow::Result<()> {
        let range = self.range()?;
        let mut source = self.entropy_source();
        tracing::info!(
            low = %range.low(),
            high = %range.high(),
            source = %self.source_path().display(),
            "sampling integer"
        );

        let value = range.sample(&mut source).with_context(|| {
            format!("cannot sample from [{}, {})", range.low(), range.high())
        })?;
        drop(source);

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", self.base.format(&value)).context("cannot write output")?;
        Ok(())
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = args.run() {
        eprintln!("bigrand: error: {:#}", err);
        let is_source_failure = err
            .downcast_ref::<SampleError>()
            .map_or(false, SampleError::is_source_failure);
        if is_source_failure {
            eprintln!("bigrand: hint: {}", SOURCE_HINT);
        }
        process::exit(ERROR_EXIT_CODE);
    }
}
