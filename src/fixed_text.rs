//!
//! The FixedText module contains [FixedText], the bounded text field used inside records.
//! FixedText is re-exported.
//!

use core::fmt;

use serde::{Serialize, Serializer, Deserialize, Deserializer};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;

use super::unicode_string_helpers::{*};

/// A text field that always occupies exactly `N` bytes when encoded
///
/// The content is UTF-8, followed by zero bytes up to `N`.  One byte is reserved for the
/// terminator, so a `FixedText<N>` holds at most `N-1` bytes of text.  Longer input is
/// silently truncated at the last character boundary that fits, and input containing a NUL
/// character is cut at the NUL.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedText<const N : usize> {
    bytes : [u8; N],
}

impl <const N : usize>FixedText<N> {

    /// The number of text bytes this field can hold
    pub const CAPACITY : usize = N.saturating_sub(1);

    /// Creates a new FixedText, truncating `s` to [CAPACITY](Self::CAPACITY) bytes
    pub fn new(s : &str) -> Self {
        let s = match s.find('\0') {
            Some(nul_idx) => &s[..nul_idx],
            None => s,
        };
        let s = utf8_truncate(s, Self::CAPACITY);
        let mut bytes = [0u8; N];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Self{ bytes }
    }

    /// Returns `true` if `s` can be stored without being truncated
    pub fn fits(s : &str) -> bool {
        s.len() <= Self::CAPACITY && !s.contains('\0')
    }

    /// Rebuilds a FixedText from its encoded bytes
    ///
    /// Everything after the first zero byte is filler and is normalized to zeros.
    pub fn from_bytes(mut bytes : [u8; N]) -> Result<Self, String> {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(N);
        if len > Self::CAPACITY {
            return Err(format!("text field of {} bytes is missing its terminator", N));
        }
        if let Err(e) = std::str::from_utf8(&bytes[..len]) {
            return Err(format!("text field is not valid UTF-8: {e}"));
        }
        bytes[len..].fill(0);
        Ok(Self{ bytes })
    }

    /// The number of text bytes in use
    pub fn len(&self) -> usize {
        self.bytes.iter().position(|&b| b == 0).unwrap_or(N)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> &str {
        let text = &self.bytes[..self.len()];
        match std::str::from_utf8(text) {
            Ok(s) => s,
            //NOTE: Can't happen for a FixedText built through `new` or `from_bytes`, but we
            // degrade to the valid prefix rather than panic
            Err(e) => std::str::from_utf8(&text[..e.valid_up_to()]).unwrap_or_default(),
        }
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl <const N : usize>Default for FixedText<N> {
    fn default() -> Self {
        Self{ bytes : [0u8; N] }
    }
}

impl <const N : usize>From<&str> for FixedText<N> {
    fn from(s : &str) -> Self {
        Self::new(s)
    }
}

impl <const N : usize>PartialEq<str> for FixedText<N> {
    fn eq(&self, other : &str) -> bool {
        self.as_str() == other
    }
}

impl <const N : usize>PartialEq<&str> for FixedText<N> {
    fn eq(&self, other : &&str) -> bool {
        self.as_str() == *other
    }
}

impl <const N : usize>fmt::Display for FixedText<N> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl <const N : usize>fmt::Debug for FixedText<N> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

//NOTE: serde only implements Serialize for arrays up to 32 elements, and we need fields of
// 1024 and 2048 bytes, so FixedText writes itself as an N-element tuple.  With bincode that
// is exactly N raw bytes, with no length prefix.
impl <const N : usize>Serialize for FixedText<N> {
    fn serialize<S : Serializer>(&self, serializer : S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for byte in self.bytes.iter() {
            tuple.serialize_element(byte)?;
        }
        tuple.end()
    }
}

struct FixedTextVisitor<const N : usize>;

impl <'de, const N : usize>Visitor<'de> for FixedTextVisitor<N> {
    type Value = FixedText<N>;

    fn expecting(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes of fixed-width text", N)
    }

    fn visit_seq<A : SeqAccess<'de>>(self, mut seq : A) -> Result<Self::Value, A::Error> {
        let mut bytes = [0u8; N];
        for (idx, slot) in bytes.iter_mut().enumerate() {
            *slot = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(idx, &self))?;
        }
        FixedText::from_bytes(bytes).map_err(de::Error::custom)
    }
}

impl <'de, const N : usize>Deserialize<'de> for FixedText<N> {
    fn deserialize<D : Deserializer<'de>>(deserializer : D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(N, FixedTextVisitor::<N>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_capacity() {
        let text = FixedText::<4>::new("USDollar");
        assert_eq!(text, "USD");
        assert_eq!(text.len(), 3);
        assert_eq!(FixedText::<4>::CAPACITY, 3);
        assert!(FixedText::<4>::fits("EUR"));
        assert!(!FixedText::<4>::fits("EURO"));

        //Multi-byte characters are never split
        let text = FixedText::<5>::new("añoñ");
        assert_eq!(text, "año");
    }

    #[test]
    fn nul_cuts_the_text() {
        let text = FixedText::<10>::new("ab\0cd");
        assert_eq!(text.as_str(), "ab");
        assert!(!FixedText::<10>::fits("ab\0cd"));
    }

    #[test]
    fn filler_is_zero_and_normalized() {
        let text = FixedText::<8>::new("N/A");
        assert_eq!(text.as_bytes(), b"N/A\0\0\0\0\0");

        //Garbage after the terminator is dropped
        let decoded = FixedText::<8>::from_bytes(*b"hi\0junk!").unwrap();
        assert_eq!(decoded.as_bytes(), b"hi\0\0\0\0\0\0");
        assert_eq!(decoded, FixedText::<8>::new("hi"));
    }

    #[test]
    fn rejects_unterminated_and_invalid_bytes() {
        assert!(FixedText::<4>::from_bytes(*b"ABCD").is_err());
        assert!(FixedText::<4>::from_bytes([0xff, 0xfe, 0, 0]).is_err());
        assert!(FixedText::<4>::from_bytes([0, 0, 0, 0]).unwrap().is_empty());
    }

    #[test]
    fn display_pads_like_a_str() {
        let text = FixedText::<10>::new("abc");
        assert_eq!(format!("[{:<5}]", text), "[abc  ]");
        assert_eq!(format!("{:?}", text), "\"abc\"");
    }
}
