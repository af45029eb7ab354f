//! Decoder configuration.

/// Default value of [`Config::max_payload_len`].
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 64 * 1024;

/// How the argument of a negative integer (major type 1) maps to a value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegativeIntMapping {
    /// The value is `-1 - argument`, as defined by RFC 8949.
    #[default]
    Standard,
    /// The value is `-argument`.
    ///
    /// Reproduces the output of older Arduino CBOR readers. A 4-byte argument
    /// of exactly `2^31` is reported as `i32::MIN`.
    Legacy,
}

/// Options for a [`Decoder`][crate::Decoder].
///
/// ```
/// use stepcbor::{Config, NegativeIntMapping};
///
/// let config = Config::new()
///     .with_max_payload_len(512)
///     .with_validate_text(true)
///     .with_negative_ints(NegativeIntMapping::Legacy);
/// assert_eq!(config.max_payload_len, 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// Maximum length of a byte string or text string payload.
    ///
    /// Checked as soon as the length argument is decoded and before any
    /// allocation. Larger payloads raise
    /// [`ErrorKind::PayloadTooLarge`][crate::ErrorKind::PayloadTooLarge].
    pub max_payload_len: usize,
    /// Validate that text string payloads are UTF-8 (default: false)
    pub validate_text: bool,
    /// Mapping used for negative integers
    pub negative_ints: NegativeIntMapping,
}

impl Config {
    /// The default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            validate_text: false,
            negative_ints: NegativeIntMapping::Standard,
        }
    }

    /// Sets [`Config::max_payload_len`].
    #[must_use]
    pub const fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    /// Sets [`Config::validate_text`].
    #[must_use]
    pub const fn with_validate_text(mut self, validate_text: bool) -> Self {
        self.validate_text = validate_text;
        self
    }

    /// Sets [`Config::negative_ints`].
    #[must_use]
    pub const fn with_negative_ints(mut self, negative_ints: NegativeIntMapping) -> Self {
        self.negative_ints = negative_ints;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
