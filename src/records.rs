//!
//! The Records module contains the logic for working with record identities and positions.
//! [RecordId] and [Position] are re-exported to the public interface.
//!

use serde::{Serialize, Deserialize};

/// A store-assigned identity for a record within a [Table](crate::Table)
///
/// Identities are 1-based.  A `RecordId` is frozen into the record when it is inserted and is
/// never renumbered, so after a delete the identity of a later record no longer equals its
/// position + 1.
#[derive(Copy, Debug, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd, derive_more::Display, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl RecordId {
    /// The identity of a record that has not been inserted yet
    pub const UNASSIGNED : RecordId = RecordId(0);

    pub fn is_assigned(&self) -> bool {
        *self != Self::UNASSIGNED
    }
    pub fn next(&self) -> Self {
        RecordId(self.0.saturating_add(1))
    }
}

/// The 0-based index of a record in the current order of a [Table](crate::Table)
///
/// Positions are only meaningful until the next delete, which shifts every later record one
/// position earlier.
#[derive(Copy, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, derive_more::Display)]
pub struct Position(pub usize);

impl Position {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What [Table::insert](crate::Table::insert) reports about a newly inserted record
#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub struct Inserted {
    pub position : Position,
    /// The identity the store assigned, for schemas with store-assigned identity
    pub id : Option<RecordId>,
}
