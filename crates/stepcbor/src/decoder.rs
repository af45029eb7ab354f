//! Incremental decoder for CBOR data.
//!
//! [`Decoder`] is a finite-state machine. Each call to
//! [`step()`][Decoder::step] makes at most one transition and reports the
//! result as a [`Status`]. When the bytes needed for the next transition have
//! not arrived yet, the step returns [`Status::Suspended`] without consuming
//! anything, so the caller can retry later with the same unread bytes plus
//! whatever arrived in the meantime.
//!
//! The decoder emits one [`Listener`] event per data item, except for byte
//! strings and text strings, whose header and payload are read in separate
//! transitions. Nested arrays and maps are not tracked: the decoder only
//! reports the header of each container.
//!
//! Only definite-length items are supported. Byte strings, text strings,
//! arrays, and maps may use arguments of at most 4 bytes. Integers, tags, and
//! simple values also accept 8-byte arguments, which are reported through the
//! `extra` listener methods.
//!
//! ```
//! use hex_literal::hex;
//! use stepcbor::{ByteCursor, Decoder, Event, EventLog, Status};
//!
//! let input = hex!("a1 61 61 01");
//! let mut decoder = Decoder::new(EventLog::new());
//! let mut cursor = ByteCursor::new(&input);
//!
//! assert_eq!(decoder.run(&mut cursor), Status::Suspended(1));
//! assert_eq!(
//!     decoder.into_listener().into_events(),
//!     [
//!         Event::MapHeader(1),
//!         Event::TextString("a".into()),
//!         Event::Integer(1),
//!     ]
//! );
//! ```

use crate::{
    config::{Config, NegativeIntMapping},
    cursor::ByteCursor,
    error::{Error, ErrorKind, Result},
    listener::{Listener, Sign},
    payload::{ByteString, TextString},
    simple::Simple,
};

const IB_UINT_MIN: u8 = 0b000_00000;
const IB_NEG_INT_MIN: u8 = 0b001_00000;
const IB_BYTE_STR_MIN: u8 = 0b010_00000;
const IB_TEXT_STR_MIN: u8 = 0b011_00000;
const IB_ARRAY_MIN: u8 = 0b100_00000;
const IB_MAP_MIN: u8 = 0b101_00000;
const IB_TAG_MIN: u8 = 0b110_00000;
const IB_FP_SIMPLE_MIN: u8 = 0b111_00000;

/// Mask for the additional information (minor type) of an initial byte.
const MINOR_MASK: u8 = 0b0001_1111;

/// Width of the widest argument.
const EXTRA_WIDTH: usize = 8;

/// Argument of a 4-byte negative integer reported as `i32::MIN` under
/// [`NegativeIntMapping::Legacy`].
const LEGACY_INT_MIN_ARG: u64 = 1 << 31;

/// The transition a [`Decoder`] will attempt next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Waiting for an initial byte.
    TypeHeader,
    /// Waiting for the argument of an unsigned integer.
    PendingPositiveIntArg,
    /// Waiting for the argument of a negative integer.
    PendingNegativeIntArg,
    /// Waiting for the length of a byte string.
    PendingByteStringLenArg,
    /// Waiting for the payload of a byte string.
    PendingByteStringData,
    /// Waiting for the length of a text string.
    PendingTextStringLenArg,
    /// Waiting for the payload of a text string.
    PendingTextStringData,
    /// Waiting for the length of an array.
    PendingArrayArg,
    /// Waiting for the length of a map.
    PendingMapArg,
    /// Waiting for a tag number.
    PendingTagArg,
    /// Waiting for the argument of a simple value or float.
    PendingSimpleArg,
    /// An error was reported. Terminal until [`Decoder::reset()`].
    Error,
}

/// Result of a single [`Decoder::step()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A transition was made. The caller may step again.
    Consumed,
    /// Not enough bytes are buffered. Nothing was consumed and at least this
    /// many more bytes are needed before stepping again can make progress.
    Suspended(usize),
    /// The decoder is in [`State::Error`].
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Major {
    UnsignedInt,
    NegativeInt,
    ByteStr,
    TextStr,
    Array,
    Map,
    Tag,
    Simple,
}

impl Major {
    #[inline]
    fn from_init_byte(init_byte: u8) -> Self {
        match init_byte {
            IB_UINT_MIN..IB_NEG_INT_MIN => Major::UnsignedInt,
            IB_NEG_INT_MIN..IB_BYTE_STR_MIN => Major::NegativeInt,
            IB_BYTE_STR_MIN..IB_TEXT_STR_MIN => Major::ByteStr,
            IB_TEXT_STR_MIN..IB_ARRAY_MIN => Major::TextStr,
            IB_ARRAY_MIN..IB_MAP_MIN => Major::Array,
            IB_MAP_MIN..IB_TAG_MIN => Major::Map,
            IB_TAG_MIN..IB_FP_SIMPLE_MIN => Major::Tag,
            IB_FP_SIMPLE_MIN..=0xff => Major::Simple,
        }
    }

    fn arg_state(self) -> State {
        match self {
            Major::UnsignedInt => State::PendingPositiveIntArg,
            Major::NegativeInt => State::PendingNegativeIntArg,
            Major::ByteStr => State::PendingByteStringLenArg,
            Major::TextStr => State::PendingTextStringLenArg,
            Major::Array => State::PendingArrayArg,
            Major::Map => State::PendingMapArg,
            Major::Tag => State::PendingTagArg,
            Major::Simple => State::PendingSimpleArg,
        }
    }
}

/// Decodes CBOR data items and dispatches them to a [`Listener`].
///
/// The decoder holds no input. The bytes are passed to each
/// [`step()`][Decoder::step] or [`run()`][Decoder::run] through a
/// [`ByteCursor`]. Between calls, the decoder state is only its [`State`], a
/// pending length, and a count of consumed bytes, so the cursor may be rebuilt
/// over a different buffer as long as it starts with the bytes which the
/// previous cursor left unread.
///
/// A decoder must be driven by one thread at a time, and a listener callback
/// must not drive the decoder which invoked it.
#[derive(Debug)]
pub struct Decoder<L> {
    listener: L,
    config: Config,
    state: State,
    /// Width of the pending argument, or the length of the pending payload.
    pending_len: usize,
    /// Bytes consumed since construction or the last reset.
    position: usize,
}

impl<L> Decoder<L> {
    /// Constructs a decoder with the default [`Config`].
    #[must_use]
    pub fn new(listener: L) -> Self {
        Self::with_config(listener, Config::new())
    }

    /// Constructs a decoder.
    #[must_use]
    pub fn with_config(listener: L, config: Config) -> Self {
        Decoder {
            listener,
            config,
            state: State::TypeHeader,
            pending_len: 0,
            position: 0,
        }
    }

    /// The decoder's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transition which will be attempted next.
    #[inline]
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// While waiting for an argument, the width of the argument. While waiting
    /// for a payload, the length of the payload. Otherwise `0`.
    #[inline]
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    /// Number of bytes consumed since construction or the last
    /// [`reset()`][Decoder::reset], across every cursor passed to
    /// [`step()`][Decoder::step].
    ///
    /// Error offsets reported to the listener are measured from the same
    /// origin, so they do not depend on how the input was split.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if an error was reported and the decoder was not reset.
    #[inline]
    #[must_use]
    pub fn is_errored(&self) -> bool {
        self.state == State::Error
    }

    /// Returns true if the decoder is between data items.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == State::TypeHeader
    }

    /// The listener.
    #[inline]
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// The listener.
    #[inline]
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Replaces the listener and returns the previous one.
    ///
    /// The decoder state is kept, so the new listener receives the events of
    /// a partially decoded item.
    pub fn set_listener(&mut self, listener: L) -> L {
        core::mem::replace(&mut self.listener, listener)
    }

    /// Returns the listener.
    #[must_use]
    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Forgets any partially decoded item and leaves [`State::Error`].
    pub fn reset(&mut self) {
        self.state = State::TypeHeader;
        self.pending_len = 0;
        self.position = 0;
    }
}

impl<L> Decoder<L>
where
    L: Listener,
{
    /// Attempts one transition.
    ///
    /// Errors are reported to [`Listener::on_error`] and move the decoder to
    /// [`State::Error`]. In that state nothing is read and every step returns
    /// [`Status::Errored`] until [`reset()`][Decoder::reset] is called.
    ///
    /// The byte offset of a reported error is a [`position()`][Decoder::position],
    /// not an offset into `cursor`.
    pub fn step(&mut self, cursor: &mut ByteCursor<'_>) -> Status {
        let start = cursor.byte_offset();
        let result = match self.state {
            State::TypeHeader => self.step_header(cursor),
            State::PendingPositiveIntArg => self.step_arg(Major::UnsignedInt, cursor),
            State::PendingNegativeIntArg => self.step_arg(Major::NegativeInt, cursor),
            State::PendingByteStringLenArg => self.step_arg(Major::ByteStr, cursor),
            State::PendingTextStringLenArg => self.step_arg(Major::TextStr, cursor),
            State::PendingArrayArg => self.step_arg(Major::Array, cursor),
            State::PendingMapArg => self.step_arg(Major::Map, cursor),
            State::PendingTagArg => self.step_arg(Major::Tag, cursor),
            State::PendingSimpleArg => self.step_arg(Major::Simple, cursor),
            State::PendingByteStringData => self.step_payload(false, cursor),
            State::PendingTextStringData => self.step_payload(true, cursor),
            State::Error => return Status::Errored,
        };

        let base = self.position;
        self.position += cursor.byte_offset() - start;

        match result {
            Ok(status) => status,
            Err(error) => {
                let byte_offset = base + error.byte_offset().saturating_sub(start);
                self.fail(&error.with_byte_offset(byte_offset))
            }
        }
    }

    /// Steps until the decoder suspends or errors.
    ///
    /// Never returns [`Status::Consumed`].
    pub fn run(&mut self, cursor: &mut ByteCursor<'_>) -> Status {
        loop {
            match self.step(cursor) {
                Status::Consumed => {}
                status => return status,
            }
        }
    }

    fn fail(&mut self, error: &Error) -> Status {
        self.state = State::Error;
        self.pending_len = 0;
        self.listener.on_error(error);
        Status::Errored
    }

    fn step_header(&mut self, cursor: &mut ByteCursor<'_>) -> Result<Status> {
        if !cursor.has_remaining(1) {
            return Ok(Status::Suspended(1));
        }

        let init_byte = cursor.read_u8()?;
        let major = Major::from_init_byte(init_byte);

        match init_byte & MINOR_MASK {
            minor @ 0..24 => self.dispatch(major, u64::from(minor), 0, cursor.byte_offset()),
            minor @ 24..28 => {
                self.state = major.arg_state();
                self.pending_len = 1 << (minor - 24);
                Ok(Status::Consumed)
            }
            _ => Err(Error::new(ErrorKind::InvalidHeader, cursor.byte_offset())),
        }
    }

    fn step_arg(&mut self, major: Major, cursor: &mut ByteCursor<'_>) -> Result<Status> {
        let width = self.pending_len;
        if !cursor.has_remaining(width) {
            return Ok(Status::Suspended(width - cursor.remaining()));
        }

        let arg = cursor.read_uint(width)?;
        self.dispatch(major, arg, width, cursor.byte_offset())
    }

    fn step_payload(&mut self, is_text: bool, cursor: &mut ByteCursor<'_>) -> Result<Status> {
        let len = self.pending_len;
        if !cursor.has_remaining(len) {
            return Ok(Status::Suspended(len - cursor.remaining()));
        }

        let bytes = cursor.read_bytes(len)?;
        self.state = State::TypeHeader;
        self.pending_len = 0;

        if is_text {
            if self.config.validate_text {
                if let Err(e) = core::str::from_utf8(&bytes) {
                    return Err(Error::new(
                        ErrorKind::MalformedTextEncoding(e),
                        cursor.byte_offset(),
                    ));
                }
            }
            self.listener.on_text(TextString::from(bytes));
        } else {
            self.listener.on_bytes(ByteString::from(bytes));
        }

        Ok(Status::Consumed)
    }

    /// Reports a decoded argument. `width` is `0` when the argument was
    /// contained in the initial byte.
    fn dispatch(
        &mut self,
        major: Major,
        arg: u64,
        width: usize,
        byte_offset: usize,
    ) -> Result<Status> {
        self.state = State::TypeHeader;
        self.pending_len = 0;

        match major {
            Major::UnsignedInt => match i32::try_from(arg) {
                Ok(value) if width < EXTRA_WIDTH => self.listener.on_integer(i64::from(value)),
                _ => self.listener.on_extra_integer(arg, Sign::Positive),
            },
            Major::NegativeInt => self.dispatch_negative(arg, width),
            Major::ByteStr => {
                return self.begin_payload(State::PendingByteStringData, arg, width, byte_offset)
            }
            Major::TextStr => {
                return self.begin_payload(State::PendingTextStringData, arg, width, byte_offset)
            }
            Major::Array => {
                check_len_width(width, byte_offset)?;
                self.listener.on_array(arg);
            }
            Major::Map => {
                check_len_width(width, byte_offset)?;
                self.listener.on_map(arg);
            }
            Major::Tag => {
                if width < EXTRA_WIDTH {
                    self.listener.on_tag(arg);
                } else {
                    self.listener.on_extra_tag(arg);
                }
            }
            Major::Simple => match u32::try_from(arg) {
                Ok(code) if width < EXTRA_WIDTH => self.listener.on_simple(Simple::new(code)),
                _ => self.listener.on_extra_simple(arg),
            },
        }

        Ok(Status::Consumed)
    }

    fn dispatch_negative(&mut self, arg: u64, width: usize) {
        let small = i32::try_from(arg).ok().filter(|_| width < EXTRA_WIDTH);

        match (self.config.negative_ints, small) {
            (NegativeIntMapping::Standard, Some(value)) => {
                self.listener.on_integer(-1 - i64::from(value));
            }
            (NegativeIntMapping::Legacy, Some(value)) => {
                self.listener.on_integer(-i64::from(value));
            }
            (NegativeIntMapping::Legacy, None) if width == 4 && arg == LEGACY_INT_MIN_ARG => {
                self.listener.on_integer(i64::from(i32::MIN));
            }
            _ => self.listener.on_extra_integer(arg, Sign::Negative),
        }
    }

    fn begin_payload(
        &mut self,
        data_state: State,
        arg: u64,
        width: usize,
        byte_offset: usize,
    ) -> Result<Status> {
        check_len_width(width, byte_offset)?;

        let max = self.config.max_payload_len;
        let len = usize::try_from(arg)
            .ok()
            .filter(|len| *len <= max)
            .ok_or_else(|| {
                Error::new(ErrorKind::PayloadTooLarge { len: arg, max }, byte_offset)
            })?;

        self.state = data_state;
        self.pending_len = len;
        Ok(Status::Consumed)
    }
}

/// Lengths and counts are limited to 4-byte arguments.
#[inline]
fn check_len_width(width: usize, byte_offset: usize) -> Result<()> {
    if width < EXTRA_WIDTH {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::UnsupportedLength, byte_offset))
    }
}
