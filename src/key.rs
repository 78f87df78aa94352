//!
//! The Key module contains the [Key] trait, which defines how the key of a record is matched
//! during a lookup.  Only the [Key] trait should be publicly re-exported.
//!

use core::fmt::Display;

use super::records::RecordId;
use super::fixed_text::FixedText;
use super::unicode_string_helpers::{*};

/// A value used to address a record for find, update and delete
///
/// Numeric keys match exactly.  Text keys match without regard to case, so "Alice" finds a
/// record keyed "ALICE".
pub trait Key : Display {

    /// Returns `true` if this key addresses the same record as `other`
    fn matches(&self, other : &Self) -> bool;
}

impl Key for RecordId {
    fn matches(&self, other : &Self) -> bool {
        self == other
    }
}

impl Key for i32 {
    fn matches(&self, other : &Self) -> bool {
        self == other
    }
}

impl Key for i64 {
    fn matches(&self, other : &Self) -> bool {
        self == other
    }
}

impl <const N : usize>Key for FixedText<N> {
    fn matches(&self, other : &Self) -> bool {
        unicode_eq_ignore_case(self.as_str(), other.as_str())
    }
}
