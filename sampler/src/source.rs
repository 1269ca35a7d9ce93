//! Sources of random bytes.
//!
//! The sampler consumes entropy via the [`ByteSource`] trait and never generates it.
//! This module provides the following implementations:
//!
//! - [`RandomDevice`] reads from a file-backed random device, such as `/dev/urandom`.
//! - [`ReaderSource`] wraps an arbitrary [`Read`]er.
//! - [`ScriptedSource`] replays a fixed sequence of bytes. It is meant for testing code
//!   that relies on the sampler.

use std::{
    fmt,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// Source of uniformly distributed random bytes.
///
/// Implementations must either fill the entire buffer, or return an error. A short read
/// must be reported as an error (usually with [`io::ErrorKind::UnexpectedEof`]).
pub trait ByteSource {
    /// Fills `buffer` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot supply `buffer.len()` bytes.
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        (**self).fill_bytes(buffer)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        (**self).fill_bytes(buffer)
    }
}

/// File-backed random device, such as `/dev/urandom`.
///
/// The device is opened lazily on the first read and closed when this value is dropped.
/// Reads are unbuffered, so no more bytes are taken from the device than requested.
/// Reads may block if the device does so (e.g., `/dev/random` on older kernels while
/// the entropy pool is not initialized).
pub struct RandomDevice {
    path: PathBuf,
    file: Option<File>,
}

impl fmt::Debug for RandomDevice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RandomDevice")
            .field("path", &self.path)
            .field("is_open", &self.file.is_some())
            .finish()
    }
}

impl RandomDevice {
    /// Path to the non-blocking kernel random device.
    pub const URANDOM: &'static str = "/dev/urandom";
    /// Path to the blocking kernel random device.
    pub const RANDOM: &'static str = "/dev/random";

    /// Creates a device reading from the specified path. The path is not opened until
    /// the first read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Creates a device reading from `/dev/urandom`.
    pub fn urandom() -> Self {
        Self::new(Self::URANDOM)
    }

    /// Creates a device reading from `/dev/random`.
    pub fn random() -> Self {
        Self::new(Self::RANDOM)
    }

    /// Returns the path to the device.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks whether the device has been opened.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn with_path(&self, err: io::Error, action: &str) -> io::Error {
        io::Error::new(
            err.kind(),
            format!("could not {} {}: {}", action, self.path.display(), err),
        )
    }

    fn file(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                let file = File::open(&self.path).map_err(|err| self.with_path(err, "open"))?;
                tracing::debug!(path = %self.path.display(), "opened random device");
                file
            }
        };
        Ok(self.file.insert(file))
    }
}

impl ByteSource for RandomDevice {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        if buffer.is_empty() {
            return Ok(());
        }
        let result = self.file()?.read_exact(buffer);
        result.map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                self.with_path(
                    io::Error::new(err.kind(), "not enough bytes read"),
                    "read from",
                )
            } else {
                self.with_path(err, "read from")
            }
        })
    }
}

/// Adapter turning any [`Read`]er into a [`ByteSource`].
///
/// The reader is used as-is; wrap it into a `BufReader` beforehand if buffering is desired.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps the provided reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buffer)
    }
}

/// Source replaying a fixed sequence of bytes.
///
/// Once the sequence is exhausted, reads fail with [`io::ErrorKind::UnexpectedEof`].
/// A read that cannot be fully satisfied consumes nothing.
///
/// # Examples
///
/// ```
/// use bigrand::{ByteSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new(vec![1, 2, 3]);
/// let mut buffer = [0_u8; 2];
/// source.fill_bytes(&mut buffer)?;
/// assert_eq!(buffer, [1, 2]);
/// assert!(source.fill_bytes(&mut buffer).is_err());
/// assert_eq!(source.remaining(), 1);
/// assert_eq!(source.reads(), 1);
/// # Ok::<_, std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    bytes: Vec<u8>,
    position: usize,
    reads: usize,
}

impl ScriptedSource {
    /// Creates a source replaying the provided bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            position: 0,
            reads: 0,
        }
    }

    /// Creates a source yielding `draw` repeated `count` times.
    pub fn repeat(draw: &[u8], count: usize) -> Self {
        Self::new(draw.repeat(count))
    }

    /// Returns the number of successful reads.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Returns the total number of bytes consumed by successful reads.
    pub fn bytes_read(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }
}

impl ByteSource for ScriptedSource {
    fn fill_bytes(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        let end = self.position + buffer.len();
        let chunk = self.bytes.get(self.position..end).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted bytes are exhausted")
        })?;
        buffer.copy_from_slice(chunk);
        self.position = end;
        self.reads += 1;
        Ok(())
    }
}
