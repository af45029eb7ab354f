//! Simple value

use core::{fmt, ops::Deref};

/// Boolean `false`
pub const SIMPLE_VALUE_FALSE: u32 = 20;
/// Boolean `true`
pub const SIMPLE_VALUE_TRUE: u32 = 21;
/// `null` value
pub const SIMPLE_VALUE_NULL: u32 = 22;
/// `undefined` value
pub const SIMPLE_VALUE_UNDEFINED: u32 = 23;

/// Simple value code as passed to [`Listener::on_simple`][crate::Listener::on_simple].
///
/// Codes above 23 may be one-byte simple values or the raw bits of a half or
/// single precision float, depending on the argument width. The decoder does
/// not distinguish between them; see [`crate::float`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Simple(pub u32);

impl Simple {
    /// Null
    pub const NULL: Simple = Simple::new(SIMPLE_VALUE_NULL);
    /// True
    pub const TRUE: Simple = Simple::new(SIMPLE_VALUE_TRUE);
    /// False
    pub const FALSE: Simple = Simple::new(SIMPLE_VALUE_FALSE);
    /// Undefined
    pub const UNDEFINED: Simple = Simple::new(SIMPLE_VALUE_UNDEFINED);

    /// Construct a simple value from the numerical value
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the simple value as a boolean. Return `None` if the simple value
    /// is not a boolean.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self.0 {
            SIMPLE_VALUE_FALSE => Some(false),
            SIMPLE_VALUE_TRUE => Some(true),
            _ => None,
        }
    }

    /// Returns true if the simple value is the `null` value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == SIMPLE_VALUE_NULL
    }

    /// Returns true if the simple value is the `undefined` value.
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        self.0 == SIMPLE_VALUE_UNDEFINED
    }
}

impl fmt::Display for Simple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Simple::FALSE => f.write_str("false"),
            Simple::TRUE => f.write_str("true"),
            Simple::NULL => f.write_str("null"),
            Simple::UNDEFINED => f.write_str("undefined"),
            Simple(code) => write!(f, "simple({code})"),
        }
    }
}

impl From<u32> for Simple {
    fn from(value: u32) -> Self {
        Simple::new(value)
    }
}

impl From<Simple> for u32 {
    fn from(value: Simple) -> Self {
        value.0
    }
}

impl Deref for Simple {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
