//! Buffers input for a [`Decoder`] which arrives in arbitrary chunks.

use alloc::vec::Vec;

use crate::{
    cursor::ByteCursor,
    decoder::{Decoder, Status},
    listener::Listener,
};

/// Owns a [`Decoder`] and the bytes which it has not consumed yet.
///
/// Each [`feed()`][Feeder::feed] appends a chunk, runs the decoder as far as
/// the buffered bytes allow, and drops the consumed prefix. The events are the
/// same however the input is split into chunks.
///
/// ```
/// use stepcbor::{Decoder, Event, EventLog, Feeder, Status};
///
/// let mut feeder = Feeder::new(Decoder::new(EventLog::new()));
/// assert_eq!(feeder.feed(&[0x19, 0x03]), Status::Suspended(1));
/// assert_eq!(feeder.feed(&[0xe8]), Status::Suspended(1));
/// assert!(feeder.is_idle());
/// assert_eq!(
///     feeder.into_decoder().into_listener().into_events(),
///     [Event::Integer(1000)]
/// );
/// ```
#[derive(Debug)]
pub struct Feeder<L> {
    decoder: Decoder<L>,
    buf: Vec<u8>,
}

impl<L> Feeder<L> {
    /// Wraps a decoder.
    #[must_use]
    pub fn new(decoder: Decoder<L>) -> Self {
        Feeder {
            decoder,
            buf: Vec::new(),
        }
    }

    /// Bytes which were fed but not consumed.
    #[inline]
    #[must_use]
    pub fn pending_input(&self) -> &[u8] {
        &self.buf
    }

    /// Returns true if the decoder is between data items and no input is
    /// buffered.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.decoder.is_idle() && self.buf.is_empty()
    }

    /// The decoder.
    #[inline]
    #[must_use]
    pub fn decoder(&self) -> &Decoder<L> {
        &self.decoder
    }

    /// The decoder.
    ///
    /// Resetting the decoder through this reference keeps the buffered input.
    #[inline]
    pub fn decoder_mut(&mut self) -> &mut Decoder<L> {
        &mut self.decoder
    }

    /// Returns the decoder. Buffered input is dropped.
    #[must_use]
    pub fn into_decoder(self) -> Decoder<L> {
        self.decoder
    }

    /// Resets the decoder and drops the buffered input.
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.buf.clear();
    }
}

impl<L> Feeder<L>
where
    L: Listener,
{
    /// Appends `chunk` and decodes as much of the buffered input as possible.
    ///
    /// Returns [`Status::Suspended`] when more input is needed, or
    /// [`Status::Errored`]. An errored decoder ignores further chunks.
    ///
    /// Error offsets count from the first byte fed since construction or the
    /// last [`reset()`][Feeder::reset].
    pub fn feed(&mut self, chunk: &[u8]) -> Status {
        if self.decoder.is_errored() {
            return Status::Errored;
        }

        self.buf.extend_from_slice(chunk);

        let mut cursor = ByteCursor::new(&self.buf);
        let status = self.decoder.run(&mut cursor);
        let consumed = cursor.byte_offset();
        self.buf.drain(..consumed);

        status
    }
}
