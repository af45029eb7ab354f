//! A listener which prints one line per event.
//!
//! The line format is stable:
//!
//! ```text
//! integer:5
//! extra integer:+18446744073709551615
//! bytes:4
//! string:abc
//! array:3
//! map:1
//! tag:1
//! extra tag:4294967296
//! special:20
//! extra special:4607632778762754458
//! error:invalid type at byte offset 1
//! ```
//!
//! Byte strings are printed as their length. Text strings are printed with
//! invalid UTF-8 sequences replaced.

use core::fmt::{self, Write as _};

use crate::{
    error::Error,
    listener::{Listener, Sign},
    payload::{ByteString, TextString},
    simple::Simple,
};

/// Writes every event to a [`fmt::Write`] sink.
///
/// ```
/// use stepcbor::{ByteCursor, DebugListener, Decoder};
///
/// let mut decoder = Decoder::new(DebugListener::new(String::new()));
/// decoder.run(&mut ByteCursor::new(&[0x82, 0x20, 0xf5]));
/// let out = decoder.into_listener().finish().unwrap();
/// assert_eq!(out, "array:2\ninteger:-1\nspecial:21\n");
/// ```
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct DebugListener<W> {
    out: W,
    result: fmt::Result,
}

impl<W> DebugListener<W>
where
    W: fmt::Write,
{
    /// Instantiates a listener writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        DebugListener { out, result: Ok(()) }
    }

    /// The sink.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Returns the sink, or the first write error.
    ///
    /// Lines are dropped after a write fails.
    ///
    /// # Errors
    ///
    /// If writing any line failed.
    pub fn finish(self) -> Result<W, fmt::Error> {
        self.result.map(|()| self.out)
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.result.is_ok() {
            self.result = writeln!(self.out, "{args}");
        }
    }
}

impl<W> Listener for DebugListener<W>
where
    W: fmt::Write,
{
    fn on_integer(&mut self, value: i64) {
        self.line(format_args!("integer:{value}"));
    }

    fn on_extra_integer(&mut self, magnitude: u64, sign: Sign) {
        self.line(format_args!("extra integer:{sign}{magnitude}"));
    }

    fn on_bytes(&mut self, bytes: ByteString) {
        self.line(format_args!("bytes:{}", bytes.len()));
    }

    fn on_text(&mut self, text: TextString) {
        self.line(format_args!("string:{}", text.to_string_lossy()));
    }

    fn on_array(&mut self, len: u64) {
        self.line(format_args!("array:{len}"));
    }

    fn on_map(&mut self, len: u64) {
        self.line(format_args!("map:{len}"));
    }

    fn on_tag(&mut self, num: u64) {
        self.line(format_args!("tag:{num}"));
    }

    fn on_extra_tag(&mut self, num: u64) {
        self.line(format_args!("extra tag:{num}"));
    }

    fn on_simple(&mut self, value: Simple) {
        self.line(format_args!("special:{}", u32::from(value)));
    }

    fn on_extra_simple(&mut self, bits: u64) {
        self.line(format_args!("extra special:{bits}"));
    }

    fn on_error(&mut self, error: &Error) {
        self.line(format_args!("error:{error}"));
    }
}

#[cfg(feature = "std")]
pub use io_sink::{IoDebugListener, IoWriter};

#[cfg(feature = "std")]
mod io_sink {
    use std::io;

    use core::fmt;

    use super::DebugListener;

    /// A [`DebugListener`] writing to an [`io::Write`] sink.
    pub type IoDebugListener<W> = DebugListener<IoWriter<W>>;

    /// Adapts an [`io::Write`] sink to [`fmt::Write`].
    ///
    /// The first I/O error is kept and returned by
    /// [`into_inner()`][IoWriter::into_inner].
    #[derive(Debug)]
    pub struct IoWriter<W> {
        inner: W,
        error: Option<io::Error>,
    }

    impl<W> IoWriter<W>
    where
        W: io::Write,
    {
        /// Wraps `inner`.
        #[must_use]
        pub fn new(inner: W) -> Self {
            IoWriter { inner, error: None }
        }

        /// The wrapped sink.
        #[must_use]
        pub fn get_ref(&self) -> &W {
            &self.inner
        }

        /// Returns the wrapped sink.
        ///
        /// # Errors
        ///
        /// The first error returned by the sink.
        pub fn into_inner(self) -> io::Result<W> {
            match self.error {
                Some(e) => Err(e),
                None => Ok(self.inner),
            }
        }
    }

    impl<W> fmt::Write for IoWriter<W>
    where
        W: io::Write,
    {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.error.is_some() {
                return Err(fmt::Error);
            }
            self.inner.write_all(s.as_bytes()).map_err(|e| {
                self.error = Some(e);
                fmt::Error
            })
        }
    }

    impl<W> DebugListener<IoWriter<W>>
    where
        W: io::Write,
    {
        /// Instantiates a listener writing to an [`io::Write`] sink.
        #[must_use]
        pub fn from_io(inner: W) -> Self {
            DebugListener::new(IoWriter::new(inner))
        }

        /// Flushes and returns the sink.
        ///
        /// # Errors
        ///
        /// The first error returned by the sink, including the flush.
        pub fn finish_io(self) -> io::Result<W> {
            let mut inner = self.out.into_inner()?;
            self.result.map_err(|_| io::Error::other("formatter error"))?;
            inner.flush()?;
            Ok(inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{cursor::ByteCursor, decoder::Decoder, error::ErrorKind};

    use alloc::string::String;
    use hex_literal::hex;

    fn render(input: &[u8]) -> String {
        let mut decoder = Decoder::new(DebugListener::new(String::new()));
        decoder.run(&mut ByteCursor::new(input));
        decoder.into_listener().finish().unwrap()
    }

    #[test]
    fn test_lines() {
        let input = hex!(
            "
            a2
               63 6b 65 79
               83 05 38 63 1b ff ff ff ff ff ff ff ff
               44 01 02 03 04
               c1 db 00 00 00 01 00 00 00 00
            f6 fb 3f f1 99 99 99 99 99 9a
            3b 00 00 00 00 00 00 00 07
            "
        );
        assert_eq!(
            render(&input),
            "map:2\n\
             string:key\n\
             array:3\n\
             integer:5\n\
             integer:-100\n\
             extra integer:+18446744073709551615\n\
             bytes:4\n\
             tag:1\n\
             extra tag:4294967296\n\
             special:22\n\
             extra special:4607632778762754458\n\
             extra integer:-7\n"
        );
    }

    #[test]
    fn test_error_line() {
        assert_eq!(
            render(&hex!("01 fc")),
            "integer:1\nerror:invalid type at byte offset 2\n"
        );
    }

    #[test]
    fn test_lossy_text() {
        assert_eq!(render(&hex!("62 c3 28")), "string:\u{fffd}(\n");
    }

    /// Fails every write after the first.
    struct FailAfterOne(bool);

    impl fmt::Write for FailAfterOne {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            if self.0 {
                Err(fmt::Error)
            } else {
                Ok(())
            }
        }

        fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
            let _ = args;
            if core::mem::replace(&mut self.0, true) {
                Err(fmt::Error)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_write_error_is_kept() {
        let mut listener = DebugListener::new(FailAfterOne(false));
        listener.on_integer(1);
        listener.on_integer(2);
        listener.on_error(&Error::new(ErrorKind::BufferUnderflow, 0));
        assert_eq!(listener.finish().err(), Some(fmt::Error));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_io_sink() -> std::io::Result<()> {
        let mut listener = IoDebugListener::from_io(Vec::new());
        listener.on_tag(32);
        listener.on_text("http://example.com".into());
        let out = listener.finish_io()?;
        assert_eq!(out, b"tag:32\nstring:http://example.com\n");
        Ok(())
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_io_error() {
        struct Broken;

        impl std::io::Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut listener = IoDebugListener::from_io(Broken);
        listener.on_integer(1);
        listener.on_integer(2);
        let err = listener.finish_io().err().map(|e| e.kind());
        assert_eq!(err, Some(std::io::ErrorKind::BrokenPipe));
    }
}
