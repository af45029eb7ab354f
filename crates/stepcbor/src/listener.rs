//! The [`Listener`] trait receives every event produced by a
//! [`Decoder`][crate::Decoder].
//!
//! Only [`on_integer`][Listener::on_integer], [`on_bytes`][Listener::on_bytes],
//! [`on_text`][Listener::on_text], and [`on_error`][Listener::on_error] must be
//! implemented. The other methods ignore their event by default.
//!
//! The decoder keeps no nesting stack. An [`on_array`][Listener::on_array] or
//! [`on_map`][Listener::on_map] call only announces how many items (or pairs of
//! items) follow; reconciling nesting is up to the listener.

use alloc::vec::Vec;

use core::fmt;

use crate::{
    error::{Error, ErrorKind},
    payload::{ByteString, TextString},
    simple::Simple,
};

/// Sign of an integer too large for [`Listener::on_integer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Unsigned integer (major type 0)
    Positive,
    /// Negative integer (major type 1)
    Negative,
}

/// Writes `+` or `-`.
impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => f.write_str("+"),
            Sign::Negative => f.write_str("-"),
        }
    }
}

/// Receives decoded events.
///
/// Callbacks run inline on the thread which called
/// [`Decoder::step`][crate::Decoder::step], before `step` returns. A callback
/// must not drive the same decoder.
pub trait Listener {
    /// An integer which fits in 32 bits.
    ///
    /// Unsigned integers with an argument up to `i32::MAX` and negative
    /// integers whose value is at least `i32::MIN` are reported here. The
    /// parameter is an `i64` so that no cast is needed by the caller.
    fn on_integer(&mut self, value: i64);

    /// An integer which does not fit in 32 bits.
    ///
    /// `magnitude` is the raw argument from the input. For
    /// [`Sign::Positive`] the value is `magnitude`. For [`Sign::Negative`] the
    /// value is `-1 - magnitude` under
    /// [`NegativeIntMapping::Standard`][crate::NegativeIntMapping::Standard]
    /// and `-magnitude` under
    /// [`NegativeIntMapping::Legacy`][crate::NegativeIntMapping::Legacy].
    ///
    /// The default implementation ignores the event.
    fn on_extra_integer(&mut self, magnitude: u64, sign: Sign) {
        let _ = (magnitude, sign);
    }

    /// A byte string. The listener owns the payload.
    fn on_bytes(&mut self, bytes: ByteString);

    /// A text string. The listener owns the payload.
    fn on_text(&mut self, text: TextString);

    /// The header of an array with `len` items.
    ///
    /// The default implementation ignores the event.
    fn on_array(&mut self, len: u64) {
        let _ = len;
    }

    /// The header of a map with `len` key/value pairs.
    ///
    /// The default implementation ignores the event.
    fn on_map(&mut self, len: u64) {
        let _ = len;
    }

    /// A tag number with an argument of at most 4 bytes.
    ///
    /// The default implementation ignores the event.
    fn on_tag(&mut self, num: u64) {
        let _ = num;
    }

    /// A tag number with an 8-byte argument.
    ///
    /// The default implementation ignores the event.
    fn on_extra_tag(&mut self, num: u64) {
        let _ = num;
    }

    /// A simple value, or the bits of a half or single precision float.
    ///
    /// The default implementation ignores the event.
    fn on_simple(&mut self, value: Simple) {
        let _ = value;
    }

    /// The bits of a double precision float (or any major type 7 item with an
    /// 8-byte argument).
    ///
    /// The default implementation ignores the event.
    fn on_extra_simple(&mut self, bits: u64) {
        let _ = bits;
    }

    /// The input is malformed or unsupported.
    ///
    /// The decoder is in [`State::Error`][crate::State::Error] when this is
    /// called and stays there until reset.
    fn on_error(&mut self, error: &Error);
}

impl<L> Listener for &mut L
where
    L: Listener + ?Sized,
{
    #[inline]
    fn on_integer(&mut self, value: i64) {
        (**self).on_integer(value);
    }

    #[inline]
    fn on_extra_integer(&mut self, magnitude: u64, sign: Sign) {
        (**self).on_extra_integer(magnitude, sign);
    }

    #[inline]
    fn on_bytes(&mut self, bytes: ByteString) {
        (**self).on_bytes(bytes);
    }

    #[inline]
    fn on_text(&mut self, text: TextString) {
        (**self).on_text(text);
    }

    #[inline]
    fn on_array(&mut self, len: u64) {
        (**self).on_array(len);
    }

    #[inline]
    fn on_map(&mut self, len: u64) {
        (**self).on_map(len);
    }

    #[inline]
    fn on_tag(&mut self, num: u64) {
        (**self).on_tag(num);
    }

    #[inline]
    fn on_extra_tag(&mut self, num: u64) {
        (**self).on_extra_tag(num);
    }

    #[inline]
    fn on_simple(&mut self, value: Simple) {
        (**self).on_simple(value);
    }

    #[inline]
    fn on_extra_simple(&mut self, bits: u64) {
        (**self).on_extra_simple(bits);
    }

    #[inline]
    fn on_error(&mut self, error: &Error) {
        (**self).on_error(error);
    }
}

/// A decoded event, as recorded by [`EventLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// See [`Listener::on_integer`].
    Integer(i64),
    /// See [`Listener::on_extra_integer`].
    ExtraInteger {
        /// Raw argument
        magnitude: u64,
        /// Sign from the major type
        sign: Sign,
    },
    /// See [`Listener::on_bytes`].
    ByteString(ByteString),
    /// See [`Listener::on_text`].
    TextString(TextString),
    /// See [`Listener::on_array`].
    ArrayHeader(u64),
    /// See [`Listener::on_map`].
    MapHeader(u64),
    /// See [`Listener::on_tag`].
    Tag(u64),
    /// See [`Listener::on_extra_tag`].
    ExtraTag(u64),
    /// See [`Listener::on_simple`].
    Simple(Simple),
    /// See [`Listener::on_extra_simple`].
    ExtraSimple(u64),
    /// See [`Listener::on_error`].
    DecodeError(ErrorKind),
}

/// A listener which records every event in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Instantiates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Removes and returns the events recorded so far.
    pub fn take(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Listener for EventLog {
    fn on_integer(&mut self, value: i64) {
        self.events.push(Event::Integer(value));
    }

    fn on_extra_integer(&mut self, magnitude: u64, sign: Sign) {
        self.events.push(Event::ExtraInteger { magnitude, sign });
    }

    fn on_bytes(&mut self, bytes: ByteString) {
        self.events.push(Event::ByteString(bytes));
    }

    fn on_text(&mut self, text: TextString) {
        self.events.push(Event::TextString(text));
    }

    fn on_array(&mut self, len: u64) {
        self.events.push(Event::ArrayHeader(len));
    }

    fn on_map(&mut self, len: u64) {
        self.events.push(Event::MapHeader(len));
    }

    fn on_tag(&mut self, num: u64) {
        self.events.push(Event::Tag(num));
    }

    fn on_extra_tag(&mut self, num: u64) {
        self.events.push(Event::ExtraTag(num));
    }

    fn on_simple(&mut self, value: Simple) {
        self.events.push(Event::Simple(value));
    }

    fn on_extra_simple(&mut self, bits: u64) {
        self.events.push(Event::ExtraSimple(bits));
    }

    fn on_error(&mut self, error: &Error) {
        self.events.push(Event::DecodeError(error.kind().clone()));
    }
}
