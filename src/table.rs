//!
//! The Table module contains the main [Table] object
//!

use core::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::records::{*};
use super::key::Key;
use super::database::{*};
use super::table_config::{*};
use crate::{Coder, StoreError};

/// An ordered, bounded collection of fixed-size records
///
/// A Table holds at most [CAPACITY](TableConfig::CAPACITY) records of one [Record] type, in
/// insertion order.  Deleting a record shifts every later record one position earlier, so the
/// relative order of the survivors never changes.
///
/// The whole table moves to and from disk in one call.  [save](Table::save) writes a flat
/// concatenation of the fixed-width encodings of every record, in order, and [load](Table::load)
/// reads them back.  Nothing is written implicitly.
pub struct Table<ConfigT : TableConfig> {
    records : Vec<ConfigT::RecordT>,
    record_size : usize,
    next_id : RecordId,
    coder : ConfigT::CoderT,
    config : PhantomData<ConfigT>,
}

impl <ConfigT : TableConfig>Table<ConfigT> {

    /// Creates a new empty Table
    ///
    /// Fails with [StoreError::Codec] if the record type does not have a usable fixed-width encoding.
    pub fn new() -> Result<Self, StoreError> {

        let coder = ConfigT::CoderT::new();

        //Measure the record width by encoding the default record
        let record_size = coder.encode_to_buf(&ConfigT::RecordT::default())
            .map_err(StoreError::Codec)?
            .len();
        if record_size == 0 {
            return Err(StoreError::Codec("records must encode to at least one byte".to_string()));
        }

        Ok(Self {
            records : Vec::with_capacity(ConfigT::CAPACITY),
            record_size,
            next_id : RecordId(1),
            coder,
            config : PhantomData,
        })
    }

    /// Creates a Table and loads it from the table's file inside `dir`
    ///
    /// Returns the table along with the number of records loaded.  A missing file yields an empty
    /// table, not an error.
    pub fn open(dir : impl AsRef<Path>) -> Result<(Self, usize), StoreError> {
        let mut table = Self::new()?;
        let loaded = table.load(Self::path_in(dir))?;
        Ok((table, loaded))
    }

    /// Returns the path of the table's file inside `dir`
    pub fn path_in(dir : impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(ConfigT::FILE_NAME)
    }

    /// The maximum number of records
    pub fn capacity(&self) -> usize {
        ConfigT::CAPACITY
    }

    /// The number of live records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= ConfigT::CAPACITY
    }

    /// The number of bytes each record occupies in the persisted file
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// The id the next store-assigned insert will receive
    pub fn next_id(&self) -> RecordId {
        match ConfigT::ID_ASSIGNMENT {
            IdAssignment::Monotonic => self.next_id,
            IdAssignment::FromLength => RecordId(self.records.len() as u32 + 1),
        }
    }

    /// Resets a Table, dropping every record and restoring it to an empty state
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_id = RecordId(1);
    }

    /// Inserts a record at the end of the Table
    ///
    /// For [IdentityPolicy::StoreAssigned] schemas, the identity of `record` is overwritten with
    /// the next id, which is returned.  For [IdentityPolicy::CallerSupplied] schemas, the insert
    /// fails with [StoreError::DuplicateKey] if a live record has a matching key.  The table is
    /// not modified when an insert fails.
    pub fn insert(&mut self, mut record : ConfigT::RecordT) -> Result<Inserted, StoreError> {

        if self.is_full() {
            return Err(StoreError::StoreFull{ capacity : ConfigT::CAPACITY });
        }

        record.validate().map_err(StoreError::InvalidInput)?;

        let assigned_id = match <ConfigT::RecordT as Record>::IDENTITY {
            IdentityPolicy::StoreAssigned => {
                let id = self.next_id();
                record.assign_id(id);
                Some(id)
            },
            IdentityPolicy::CallerSupplied => {
                let key = record.key();
                if self.find(&key).is_some() {
                    return Err(StoreError::DuplicateKey(key.to_string()));
                }
                None
            },
            IdentityPolicy::NonUnique => None,
        };

        //Make sure the record still fits the fixed layout before we commit to it
        self.check_encoding(&record)?;

        if let Some(id) = assigned_id {
            self.next_id = self.next_id.max(id.next());
        }
        let position = Position(self.records.len());
        debug!(file = ConfigT::FILE_NAME, %position, key = %record.key(), "insert");
        self.records.push(record);

        Ok(Inserted{ position, id : assigned_id })
    }

    /// Returns the position of the first record whose key matches `key`
    pub fn find(&self, key : &<ConfigT::RecordT as Record>::KeyT) -> Option<Position> {
        self.records.iter()
            .position(|record| record.key().matches(key))
            .map(Position)
    }

    /// Returns the first record whose key matches `key`
    pub fn get(&self, key : &<ConfigT::RecordT as Record>::KeyT) -> Option<&ConfigT::RecordT> {
        self.find(key).and_then(|position| self.get_at(position))
    }

    /// Returns the record at `position`
    pub fn get_at(&self, position : Position) -> Option<&ConfigT::RecordT> {
        self.records.get(position.index())
    }

    /// Returns every record that satisfies `predicate`, in table order
    pub fn find_all<'a, F>(&'a self, predicate : F) -> impl Iterator<Item=&'a ConfigT::RecordT> + 'a
        where
        F : Fn(&ConfigT::RecordT) -> bool + 'a
    {
        self.records.iter().filter(move |record| predicate(record))
    }

    /// Replaces the fields supplied in `changes` on the record addressed by `key`
    ///
    /// Fields that are absent from `changes` keep their prior value, and identity fields can't be
    /// changed.  The updated record is validated before it replaces the old one, so the table is
    /// not modified when an update fails.
    pub fn update(&mut self, key : &<ConfigT::RecordT as Record>::KeyT, changes : <ConfigT::RecordT as Record>::ChangesT) -> Result<(), StoreError> {

        let position = self.find(key).ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let mut updated = self.records[position.index()].clone();
        updated.apply(changes);
        updated.validate().map_err(StoreError::InvalidInput)?;
        self.check_encoding(&updated)?;

        debug!(file = ConfigT::FILE_NAME, %position, %key, "update");
        self.records[position.index()] = updated;
        Ok(())
    }

    /// Deletes the record addressed by `key`, returning it
    ///
    /// Every later record moves one position earlier.  Store-assigned ids are not renumbered.
    pub fn delete(&mut self, key : &<ConfigT::RecordT as Record>::KeyT) -> Result<ConfigT::RecordT, StoreError> {

        let position = self.find(key).ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        debug!(file = ConfigT::FILE_NAME, %position, %key, "delete");

        //Vec::remove shifts the tail down, which preserves the order of the remaining records
        Ok(self.records.remove(position.index()))
    }

    /// Returns every record, in table order
    pub fn list(&self) -> &[ConfigT::RecordT] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item=&ConfigT::RecordT> {
        self.records.iter()
    }

    /// Writes every record to `target`, replacing whatever was there
    ///
    /// The file is replaced atomically: a failed save leaves the previous file intact.
    pub fn save(&self, target : impl AsRef<Path>) -> Result<(), StoreError> {

        let mut image = Vec::with_capacity(self.records.len() * self.record_size);
        for record in self.records.iter() {
            let start = image.len();
            self.coder.encode_into(record, &mut image).map_err(StoreError::Codec)?;
            if image.len() - start != self.record_size {
                return Err(self.size_mismatch(image.len() - start));
            }
        }

        let file = FlatFile::new(target);
        file.replace_image(&image)?;

        info!(path = %file.path().display(), records = self.records.len(), "saved table");
        Ok(())
    }

    /// Replaces the contents of the Table with the records stored in `source`
    ///
    /// If `source` does not exist the Table becomes empty and 0 is returned.  Otherwise as many
    /// whole records as fit in the table are loaded, in file order, and the count is returned.
    /// A trailing partial record is ignored.
    ///
    /// If decoding fails the table keeps its prior contents.
    pub fn load(&mut self, source : impl AsRef<Path>) -> Result<usize, StoreError> {

        let file = FlatFile::new(source);
        let image = match file.read_image(self.record_size, ConfigT::CAPACITY)? {
            Some(image) => image,
            None => {
                self.reset();
                return Ok(0);
            }
        };

        let mut records = Vec::with_capacity(ConfigT::CAPACITY);
        for record_bytes in image.bytes.chunks_exact(self.record_size) {
            let record : ConfigT::RecordT = self.coder.decode_from_bytes(record_bytes).map_err(StoreError::Codec)?;
            records.push(record);
        }

        let stored_records = image.file_len / self.record_size as u64;
        if stored_records > records.len() as u64 {
            warn!(path = %file.path().display(), stored_records, capacity = ConfigT::CAPACITY, "file holds more records than the table capacity");
        }

        //Resume the id counter after the largest live id
        let max_id = records.iter()
            .filter_map(|record| record.assigned_id())
            .max()
            .unwrap_or(RecordId::UNASSIGNED);
        self.next_id = max_id.next();
        self.records = records;

        info!(path = %file.path().display(), records = self.records.len(), "loaded table");
        Ok(self.records.len())
    }

    fn check_encoding(&self, record : &ConfigT::RecordT) -> Result<(), StoreError> {
        let encoded_len = self.coder.encode_to_buf(record).map_err(StoreError::Codec)?.len();
        if encoded_len != self.record_size {
            return Err(self.size_mismatch(encoded_len));
        }
        Ok(())
    }

    fn size_mismatch(&self, encoded_len : usize) -> StoreError {
        StoreError::Codec(format!("record encoded to {} bytes, but {} records are {} bytes", encoded_len, ConfigT::FILE_NAME, self.record_size))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Serialize, Deserialize};

    use super::*;
    use crate::{BincodeCoder, FixedText};

    //A store-assigned schema, numbered the way the desk programs number records
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        id : RecordId,
        note : FixedText<8>,
    }

    impl Record for Ticket {
        type KeyT = RecordId;
        type ChangesT = Option<String>;
        const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;
        fn key(&self) -> RecordId { self.id }
        fn assign_id(&mut self, id : RecordId) { self.id = id }
        fn assigned_id(&self) -> Option<RecordId> { Some(self.id) }
        fn apply(&mut self, note : Option<String>) {
            if let Some(note) = note {
                self.note = FixedText::new(&note);
            }
        }
    }

    struct LengthConfig();
    impl TableConfig for LengthConfig {
        type RecordT = Ticket;
        type CoderT = BincodeCoder;
        const CAPACITY : usize = 4;
        const FILE_NAME : &'static str = "tickets.dat";
        const ID_ASSIGNMENT : IdAssignment = IdAssignment::FromLength;
    }

    struct CounterConfig();
    impl TableConfig for CounterConfig {
        type RecordT = Ticket;
        type CoderT = BincodeCoder;
        const CAPACITY : usize = 4;
        const FILE_NAME : &'static str = "tickets.dat";
    }

    fn ticket(note : &str) -> Ticket {
        Ticket{ id : RecordId::UNASSIGNED, note : FixedText::new(note) }
    }

    fn ids<C : TableConfig<RecordT = Ticket>>(table : &Table<C>) -> Vec<u32> {
        table.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn positions_shift_after_delete() {
        let mut table = Table::<CounterConfig>::new().unwrap();
        for note in ["a", "b", "c"] {
            table.insert(ticket(note)).unwrap();
        }
        assert_eq!(table.get_at(Position(1)).unwrap().note, "b");

        table.delete(&RecordId(1)).unwrap();
        assert_eq!(table.get_at(Position(0)).unwrap().note, "b");
        assert_eq!(table.get_at(Position(1)).unwrap().note, "c");
        assert_eq!(table.get_at(Position(2)), None);
        assert_eq!(table.get(&RecordId(3)).unwrap().note, "c");
    }

    #[test]
    fn from_length_ids_can_collide_after_delete() {
        let mut table = Table::<LengthConfig>::new().unwrap();
        for note in ["a", "b", "c"] {
            table.insert(ticket(note)).unwrap();
        }
        table.delete(&RecordId(1)).unwrap();
        assert_eq!(ids(&table), vec![2, 3]);

        //len + 1 == 3, which is still live
        let inserted = table.insert(ticket("d")).unwrap();
        assert_eq!(inserted.id, Some(RecordId(3)));
        assert_eq!(ids(&table), vec![2, 3, 3]);

        //The first of the two wins
        assert_eq!(table.get(&RecordId(3)).unwrap().note, "c");
    }

    #[test]
    fn monotonic_ids_never_repeat() {
        let mut table = Table::<CounterConfig>::new().unwrap();
        for note in ["a", "b", "c"] {
            table.insert(ticket(note)).unwrap();
        }
        table.delete(&RecordId(3)).unwrap();
        table.delete(&RecordId(1)).unwrap();

        let inserted = table.insert(ticket("d")).unwrap();
        assert_eq!(inserted.id, Some(RecordId(4)));
        assert_eq!(inserted.position, Position(1));
        assert_eq!(ids(&table), vec![2, 4]);
    }

    #[test]
    fn monotonic_counter_resumes_after_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = Table::<CounterConfig>::path_in(dir.path());

        let mut table = Table::<CounterConfig>::new().unwrap();
        for note in ["a", "b", "c"] {
            table.insert(ticket(note)).unwrap();
        }
        table.delete(&RecordId(2)).unwrap();
        table.save(&path).unwrap();

        let (mut table, loaded) = Table::<CounterConfig>::open(dir.path()).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(table.next_id(), RecordId(4));
        assert_eq!(table.insert(ticket("d")).unwrap().id, Some(RecordId(4)));
    }

    #[test]
    fn caller_cannot_choose_a_store_assigned_id() {
        let mut table = Table::<CounterConfig>::new().unwrap();
        let inserted = table.insert(Ticket{ id : RecordId(99), note : FixedText::new("x") }).unwrap();
        assert_eq!(inserted.id, Some(RecordId(1)));
        assert!(table.find(&RecordId(99)).is_none());
    }

    #[test]
    fn failed_update_and_delete_leave_table_alone() {
        let mut table = Table::<CounterConfig>::new().unwrap();
        table.insert(ticket("a")).unwrap();

        assert!(matches!(table.update(&RecordId(7), Some("z".to_string())), Err(StoreError::NotFound(_))));
        assert!(matches!(table.delete(&RecordId(7)), Err(StoreError::NotFound(_))));
        assert_eq!(table.len(), 1);
        assert_eq!(table.list()[0].note, "a");

        //An empty change set is allowed and changes nothing
        table.update(&RecordId(1), None).unwrap();
        assert_eq!(table.list()[0].note, "a");
    }

    #[test]
    fn load_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replace.dat");

        let mut table = Table::<CounterConfig>::new().unwrap();
        table.insert(ticket("saved")).unwrap();
        table.save(&path).unwrap();

        table.insert(ticket("unsaved")).unwrap();
        assert_eq!(table.load(&path).unwrap(), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.list()[0].note, "saved");

        //Loading a missing file empties the table
        assert_eq!(table.load(dir.path().join("missing.dat")).unwrap(), 0);
        assert!(table.is_empty());
        assert_eq!(table.next_id(), RecordId(1));
    }

    #[test]
    fn load_stops_at_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.dat");

        //Six records on disk, but the table only holds four
        let table = Table::<CounterConfig>::new().unwrap();
        let mut image = vec![];
        for id in 1..=6u32 {
            let record = Ticket{ id : RecordId(id), note : FixedText::new("n") };
            table.coder.encode_into(&record, &mut image).unwrap();
        }
        std::fs::write(&path, &image).unwrap();

        let mut table = Table::<CounterConfig>::new().unwrap();
        assert_eq!(table.load(&path).unwrap(), 4);
        assert_eq!(ids(&table), vec![1, 2, 3, 4]);
    }

    #[test]
    fn corrupt_file_is_a_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.dat");

        let mut table = Table::<CounterConfig>::new().unwrap();
        table.insert(ticket("keep")).unwrap();

        //A text field with no terminator can't be decoded
        std::fs::write(&path, [1, 0, 0, 0, b'x', b'x', b'x', b'x', b'x', b'x', b'x', b'x']).unwrap();
        assert!(matches!(table.load(&path), Err(StoreError::Codec(_))));
        assert_eq!(table.list()[0].note, "keep");
    }

    #[test]
    fn record_size_is_measured() {
        let table = Table::<CounterConfig>::new().unwrap();
        assert_eq!(table.record_size(), 12);
        assert_eq!(table.capacity(), 4);
        assert!(table.is_empty());
        assert!(!table.is_full());
    }
}
