//! Possible crate errors.

use alloc::boxed::Box;

use core::{
    error,
    fmt::{self, Display},
    result,
    str::Utf8Error,
};

/// Alias for a [`Result`][core::result::Result] with a [`stepcbor::Error`][Error] error type.
pub type Result<T> = result::Result<T, Error>;

/// Errors raised while decoding.
///
/// Every error is also delivered to the [`Listener`][crate::Listener] through
/// [`on_error`][crate::Listener::on_error] and leaves the decoder in the
/// terminal [`State::Error`][crate::State::Error].
pub struct Error {
    inner: Box<ErrorImpl>,
}

impl Error {
    /// Constructs an error with the kind and the byte offset where the error
    /// was detected.
    ///
    /// Errors reported by a [`Decoder`][crate::Decoder] carry its
    /// [`position()`][crate::Decoder::position] at the point of failure. Errors
    /// returned by a [`ByteCursor`][crate::ByteCursor] are relative to the
    /// cursor's slice. A byte offset value of `0` indicates that the byte
    /// offset is either unknown or not relevant.
    #[must_use]
    #[inline]
    pub fn new(kind: ErrorKind, byte_offset: usize) -> Self {
        Self {
            inner: Box::new(ErrorImpl { kind, byte_offset }),
        }
    }

    /// Moves the error to another byte offset.
    #[must_use]
    pub(crate) fn with_byte_offset(mut self, byte_offset: usize) -> Self {
        self.inner.byte_offset = byte_offset;
        self
    }

    /// The kind of error encountered
    #[must_use]
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    /// The byte offset where the error was detected.
    ///
    /// A byte offset value of `0` indicates that the byte offset is either
    /// unknown or not relevant.
    #[must_use]
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.inner.byte_offset
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.inner.kind.source()
    }
}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, error)
    }
}

struct ErrorImpl {
    kind: ErrorKind,
    byte_offset: usize,
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.byte_offset == 0 {
            Display::fmt(&self.kind, f)
        } else {
            write!(f, "{} at byte offset {}", self.kind, self.byte_offset)
        }
    }
}

impl fmt::Debug for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("byte_offset", &self.byte_offset)
            .finish()
    }
}

/// All possible crate errors.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The minor type of an initial byte was one of the reserved or
    /// indefinite-length markers (28 through 31).
    InvalidHeader,
    /// A byte string, text string, array, or map used an 8-byte length
    /// argument.
    UnsupportedLength,
    /// A read was attempted past the end of the buffered bytes.
    BufferUnderflow,
    /// Text string payload was not valid UTF-8.
    ///
    /// Only raised when [`Config::validate_text`][crate::Config::validate_text]
    /// is enabled.
    MalformedTextEncoding(Utf8Error),
    /// A string length exceeded
    /// [`Config::max_payload_len`][crate::Config::max_payload_len].
    PayloadTooLarge {
        /// Declared length of the payload.
        len: u64,
        /// Configured maximum.
        max: usize,
    },
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidHeader => f.write_str("invalid type"),
            ErrorKind::UnsupportedLength => f.write_str("length too large"),
            ErrorKind::BufferUnderflow => f.write_str("buffer underflow"),
            ErrorKind::MalformedTextEncoding(source) => Display::fmt(source, f),
            ErrorKind::PayloadTooLarge { len, max } => {
                write!(f, "payload too large: {len} bytes exceeds maximum of {max}")
            }
        }
    }
}

impl error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ErrorKind::InvalidHeader
            | ErrorKind::UnsupportedLength
            | ErrorKind::BufferUnderflow
            | ErrorKind::PayloadTooLarge { .. } => None,
            ErrorKind::MalformedTextEncoding(source) => Some(source),
        }
    }
}
