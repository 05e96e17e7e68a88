//! Immutable shared strings.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable string value.
///
/// Cloning shares the buffer. Ordering follows UTF-16 code units, which is
/// what relational comparison of two strings observes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JsStr(Arc<str>);

impl JsStr {
    pub fn new(s: &str) -> Self {
        JsStr(Arc::from(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in UTF-16 code units.
    pub fn utf16_len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// Code unit at `index`, as a one-unit string.
    ///
    /// `str` cannot hold a lone surrogate, so either half of an astral
    /// character comes back as U+FFFD rather than the surrogate itself.
    pub fn unit_at(&self, index: usize) -> Option<JsStr> {
        let unit = self.0.encode_utf16().nth(index)?;
        let c = char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER);
        Some(JsStr::from(c.to_string()))
    }

    /// Compare two strings code unit by code unit.
    pub fn cmp_utf16(&self, other: &JsStr) -> Ordering {
        self.0.encode_utf16().cmp(other.0.encode_utf16())
    }

    /// Concatenate two strings into a new buffer.
    pub fn concat(&self, other: &JsStr) -> JsStr {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut buf = String::with_capacity(self.len() + other.len());
        buf.push_str(&self.0);
        buf.push_str(&other.0);
        JsStr::from(buf)
    }
}

impl Default for JsStr {
    fn default() -> Self {
        JsStr::new("")
    }
}

impl Deref for JsStr {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for JsStr {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JsStr {
    fn from(s: &str) -> Self {
        JsStr::new(s)
    }
}

impl From<String> for JsStr {
    fn from(s: String) -> Self {
        JsStr(Arc::from(s))
    }
}

impl fmt::Debug for JsStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for JsStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
