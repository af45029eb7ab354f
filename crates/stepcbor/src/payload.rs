//! Owned string payloads handed to a [`Listener`][crate::Listener].
//!
//! The decoder copies the bytes of a byte string or text string out of the
//! input and moves the copy into the listener callback. After the callback
//! returns, the decoder has no claim on the memory.

use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
    ops::{Deref, DerefMut},
    str::Utf8Error,
};

use alloc::{
    borrow::Cow,
    string::{FromUtf8Error, String},
    vec::Vec,
};

/// A sequence of bytes like a `Vec<u8>`.
#[derive(Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    /// Returns the inner vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for ByteString {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl BorrowMut<[u8]> for ByteString {
    fn borrow_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Deref for ByteString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ByteString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> From<&'a [u8]> for ByteString {
    fn from(value: &'a [u8]) -> Self {
        Self(Vec::from(value))
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<ByteString> for Vec<u8> {
    fn from(value: ByteString) -> Self {
        value.0
    }
}

/// The payload of a text string.
///
/// The decoder does not check that the bytes are valid UTF-8 unless
/// [`Config::validate_text`][crate::Config::validate_text] is enabled, so the
/// conversions to `str` are fallible.
#[derive(Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextString(Vec<u8>);

impl TextString {
    /// The raw payload bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of payload bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the payload is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Views the payload as a `str`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(&self.0)
    }

    /// Converts the payload into a `String`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid UTF-8. The bytes can be
    /// recovered from the error.
    #[inline]
    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.0)
    }

    /// Views the payload as a `str`, replacing invalid sequences with
    /// `U+FFFD`.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Returns the raw payload bytes.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for TextString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TextString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl From<Vec<u8>> for TextString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl<'a> From<&'a str> for TextString {
    fn from(value: &'a str) -> Self {
        Self(Vec::from(value))
    }
}

impl From<String> for TextString {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl PartialEq<str> for TextString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for TextString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hex_literal::hex;

    #[test]
    fn test_text_valid() {
        let text = TextString::from(hex!("63 e6 b0 b4")[1..].to_vec());
        assert_eq!(text.as_str(), Ok("\u{6c34}"));
        assert_eq!(text, "\u{6c34}");
        assert_eq!(text.len(), 3);
        assert_eq!(text.into_string().as_deref(), Ok("\u{6c34}"));
    }

    #[test]
    fn test_text_invalid_is_kept() {
        let text = TextString::from(hex!("66 6f ff").to_vec());
        assert!(text.as_str().is_err());
        assert_eq!(text.to_string_lossy(), "fo\u{fffd}");
        assert_eq!(text.as_bytes(), &[0x66, 0x6f, 0xff]);
        let err = text.into_string().unwrap_err();
        assert_eq!(err.into_bytes(), [0x66, 0x6f, 0xff]);
    }

    #[test]
    fn test_byte_string_conversions() {
        let bytes = ByteString::from(&[1_u8, 2, 3][..]);
        assert_eq!(bytes.len(), 3);
        assert_eq!(&bytes[..], &[1, 2, 3]);
        assert_eq!(Vec::<u8>::from(bytes), [1, 2, 3]);
        assert!(ByteString::default().is_empty());
    }
}
