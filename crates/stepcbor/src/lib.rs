//! # StepCbor
//!
//! StepCbor is an incremental decoder for the [Concise Binary Object
//! Representation (CBOR)][cbor] data format. CBOR is specified in [RFC
//! 8949][rfc_8949].
//!
//! The decoder is a small state machine which is driven one step at a time.
//! Input may arrive in arbitrarily small chunks: when a data item is not
//! complete yet, the decoder suspends without consuming anything and resumes
//! once more bytes are available. Every decoded item is reported to a
//! [`Listener`] as an event. No document tree is built.
//!
//! ```
//! use stepcbor::{Decoder, Event, EventLog, Feeder, Status};
//!
//! let mut feeder = Feeder::new(Decoder::new(EventLog::new()));
//!
//! // [1, "hi"] split in the middle of the string
//! assert_eq!(feeder.feed(&[0x82, 0x01, 0x62, 0x68]), Status::Suspended(1));
//! assert_eq!(feeder.feed(&[0x69]), Status::Suspended(1));
//!
//! let events = feeder.into_decoder().into_listener().into_events();
//! assert_eq!(
//!     events,
//!     [
//!         Event::ArrayHeader(2),
//!         Event::Integer(1),
//!         Event::TextString("hi".into()),
//!     ]
//! );
//! ```
//!
//! Only definite-length items are supported. Nested arrays and maps are
//! reported as flat events; the listener tracks nesting if it needs to.
//! Floating-point values are reported as raw bits, see [`float`].
//!
//! ## Features
//!
//! * `std` (default): [`IoDebugListener`] and the conversion of [`Error`]
//!   into `std::io::Error`. Without it the crate is `no_std` and requires
//!   `alloc`.
//!
//! ## License
//!
//! Licensed under either of [Apache License, Version 2.0][LICENSE_APACHE] or [MIT
//! License][LICENSE_MIT] at your option.
//!
//! ### Contributions
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted
//! for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
//! dual licensed as above, without any additional terms or conditions.
//!
//! [LICENSE_APACHE]: LICENSE-APACHE
//! [LICENSE_MIT]: LICENSE-MIT
//! [cbor]: https://cbor.io/
//! [rfc_8949]: https://www.rfc-editor.org/rfc/rfc8949.html

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod config;
mod cursor;
mod debug;
mod decoder;
mod error;
mod feed;
pub mod float;
mod listener;
mod payload;
mod simple;

#[doc(inline)]
pub use config::{Config, NegativeIntMapping, DEFAULT_MAX_PAYLOAD_LEN};
#[doc(inline)]
pub use cursor::ByteCursor;
#[doc(inline)]
pub use debug::DebugListener;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[doc(inline)]
pub use debug::{IoDebugListener, IoWriter};
#[doc(inline)]
pub use decoder::{Decoder, State, Status};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use feed::Feeder;
#[doc(inline)]
pub use listener::{Event, EventLog, Listener, Sign};
#[doc(inline)]
pub use payload::{ByteString, TextString};
#[doc(inline)]
pub use simple::{
    Simple, SIMPLE_VALUE_FALSE, SIMPLE_VALUE_NULL, SIMPLE_VALUE_TRUE, SIMPLE_VALUE_UNDEFINED,
};
