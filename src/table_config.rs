//!
//! The TableConfig module contains the parameters for configuring a Table, and the [Record] trait
//! every record schema implements.  Both traits are re-exported.
//!

use serde::Serialize;

use super::key::Key;
use super::records::RecordId;

/// How the identity of a record is established
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IdentityPolicy {
    /// The Table assigns a [RecordId] at insert time (see [IdAssignment])
    StoreAssigned,
    /// The caller supplies the key, and the Table rejects an insert whose key matches a live record
    CallerSupplied,
    /// The key is only used for lookups.  Several records may share it, and the first one wins
    NonUnique,
}

/// How a Table with [IdentityPolicy::StoreAssigned] picks the next [RecordId]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IdAssignment {
    /// Ids come from a counter that only moves forward.  After a load the counter resumes at
    /// the largest live id + 1, so an id is never handed out twice to live records.
    Monotonic,
    /// The new id is `len + 1`, counting the records currently in the table.
    ///
    /// WARNING: ids are never renumbered after a delete, so once a record has been deleted the
    /// next insert can receive the same id as a later record that is still live.  [find](crate::Table::find)
    /// then returns the first of the two.
    FromLength,
}

/// A fixed-schema entry in a [Table](crate::Table)
///
/// A Record must encode to the same number of bytes regardless of its contents, which in practice
/// means its fields are integers, floats, bools, fixed arrays and [FixedText](crate::FixedText).
/// The `Default` value is used to measure the encoded size.
pub trait Record : 'static + Clone + Default + Serialize + serde::de::DeserializeOwned {

    /// The type of value used to address a record.  See [Key]
    type KeyT : Key;

    /// A set of optional field replacements applied by [update](crate::Table::update).  Identity
    /// fields are never part of it
    type ChangesT;

    /// How the identity of the record is established
    const IDENTITY : IdentityPolicy;

    /// Returns the key of this record
    fn key(&self) -> Self::KeyT;

    /// Stores a store-assigned identity in the record.  Only called when `IDENTITY` is
    /// [IdentityPolicy::StoreAssigned]
    fn assign_id(&mut self, _id : RecordId) {}

    /// Returns the store-assigned identity held by the record, if the schema has one
    fn assigned_id(&self) -> Option<RecordId> {
        None
    }

    /// Replaces the fields that are present in `changes`, leaving the others untouched
    fn apply(&mut self, changes : Self::ChangesT);

    /// Checks the field values.  An `Err` becomes [StoreError::InvalidInput](crate::StoreError::InvalidInput)
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// The TableConfig trait specifies all of the parameters for configuring a [Table](crate::Table)
///
/// ## An example creating a [Table](crate::Table) using a custom [TableConfig]
/// ```
/// use record_desk::{*};
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Clone, Default, Serialize, Deserialize)]
/// struct Tag {
///     id : RecordId,
///     label : FixedText<16>,
/// }
///
/// impl Record for Tag {
///     type KeyT = RecordId;
///     type ChangesT = Option<String>;
///     const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;
///     fn key(&self) -> RecordId { self.id }
///     fn assign_id(&mut self, id : RecordId) { self.id = id }
///     fn assigned_id(&self) -> Option<RecordId> { Some(self.id) }
///     fn apply(&mut self, label : Option<String>) {
///         if let Some(label) = label { self.label = FixedText::new(&label) }
///     }
/// }
///
/// struct TagConfig();
/// impl TableConfig for TagConfig {
///     type RecordT = Tag;
///     type CoderT = BincodeCoder;
///     const CAPACITY : usize = 8;
///     const FILE_NAME : &'static str = "tags.dat";
/// }
///
/// let mut table = Table::<TagConfig>::new().unwrap();
/// let inserted = table.insert(Tag{ label : FixedText::new("urgent"), ..Tag::default() }).unwrap();
/// assert_eq!(inserted.id, Some(RecordId(1)));
/// assert_eq!(table.record_size(), 20);
/// ```
pub trait TableConfig {

    /// The record schema stored in the table
    type RecordT : Record;

    /// The [Coder](crate::Coder) used to produce the fixed-width byte image of each record
    type CoderT : 'static + crate::Coder;

    /// The maximum number of records the table will hold
    const CAPACITY : usize;

    /// The fixed, schema-specific name of the persisted file
    const FILE_NAME : &'static str;

    /// How store-assigned ids are chosen.  Ignored for other identity policies
    const ID_ASSIGNMENT : IdAssignment = IdAssignment::Monotonic;
}
