
//! # record_desk Overview
//!
//! An in-memory, fixed-capacity record table with whole-table flat-file persistence, and the
//! menu-driven desk programs built on top of it: bus seat booking, a contact book, a currency
//! converter, a clock and countdown timer, a Caesar-cipher file tool, hospital records, a library
//! catalog, a diary, a recipe book and student records.
//!
//! ## Records & Keys
//!
//! A [Table] holds up to [CAPACITY](TableConfig::CAPACITY) records of one [Record] type, in insertion
//! order.  Every record has a [Key] used to find, update and delete it.  How that key is established
//! is the record's [IdentityPolicy]:
//!
//! - **Store-assigned**: the Table writes a 1-based [RecordId] into the record when it is inserted.
//! - **Caller-supplied**: the caller provides the key, and an insert whose key matches a live record
//! is rejected with [StoreError::DuplicateKey].
//! - **Non-unique**: the key is only used for lookups, and the first match wins.
//!
//! Numeric keys match exactly.  Text keys match without regard to case.
//!
//! Deleting a record shifts every later record one position earlier, so the relative order of the
//! remaining records never changes.  Store-assigned ids are never renumbered.
//!
//! ## Usage Example
//!
//! ```
//! use record_desk::{*};
//! use record_desk::schemas::library::{Book, BookChanges, Library};
//!
//! let dir = tempfile::tempdir().unwrap();
//!
//! //Create a table and insert some records
//! let mut library = Library::new().unwrap();
//! let dune = library.insert(Book::new("Dune", "Frank Herbert")).unwrap().id.unwrap();
//! let emma = library.insert(Book::new("Emma", "Jane Austen")).unwrap().id.unwrap();
//! let ulysses = library.insert(Book::new("Ulysses", "James Joyce")).unwrap().id.unwrap();
//! assert_eq!((dune, emma, ulysses), (RecordId(1), RecordId(2), RecordId(3)));
//!
//! //Update one field, and delete a record
//! library.update(&dune, BookChanges{ author : Some("F. Herbert".to_string()), ..Default::default() }).unwrap();
//! library.delete(&emma).unwrap();
//! assert_eq!(library.find(&ulysses), Some(Position(1)));
//!
//! //Save the whole table, and load it back into a fresh one
//! library.save(Library::path_in(dir.path())).unwrap();
//! let (reloaded, count) = Library::open(dir.path()).unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(reloaded.list(), library.list());
//! ```
//!
//! ## Table Configuration
//!
//! Each schema has a zero-sized type implementing [TableConfig], which names the [Record] type,
//! the [Coder] used to encode it, the capacity, the file name, and for store-assigned schemas the
//! [IdAssignment] policy.  The built-in schemas live in the [schemas] module.
//!
//! ## File Format
//!
//! A saved table is the flat concatenation of the encodings of its records, in table order, with no
//! header, footer or length prefix.  Every record of a schema encodes to the same number of bytes
//! ([record_size](Table::record_size)), so the number of records in a file is its length divided by
//! the record size.  [BincodeCoder] writes integers and floats little-endian at their natural width,
//! a `bool` as one byte, and each [FixedText] field as exactly `N` bytes of UTF-8 padded with zeros.
//!
//! Saving writes a temporary file beside the target and renames it into place, so the previous
//! file survives a failed save.  Loading a file that doesn't exist gives an empty table.
//!
//! ## The Desk Programs
//!
//! The `record-desk` binary runs each program as a subcommand.  The menus are in the [apps] module
//! and read their input through a [Console](console::Console), so they can be driven from a script.
//!

mod unicode_string_helpers;
mod error;
pub use error::StoreError;
mod fixed_text;
pub use fixed_text::FixedText;
mod encode_decode;
pub use encode_decode::{Coder, BincodeCoder};
mod database;
mod key;
pub use key::Key;
mod records;
pub use records::{RecordId, Position, Inserted};
mod table_config;
pub use table_config::{TableConfig, Record, IdentityPolicy, IdAssignment};
mod table;
pub use table::{Table};

pub mod schemas;
pub mod cipher;
pub mod clock;
pub mod console;
pub mod apps;
pub mod logging;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{*};
    use crate::schemas::contacts::{Contact, ContactBook, name_key};
    use crate::schemas::library::{Book, Library};
    use crate::schemas::students::{Student, StudentChanges, StudentRecords};

    #[test]
    fn ids_follow_insertion_and_survive_a_delete() {
        let mut library = Library::new().unwrap();
        for title in ["One", "Two", "Three"] {
            library.insert(Book::new(title, "Anon")).unwrap();
        }
        let ids : Vec<u32> = library.iter().map(|book| book.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        library.delete(&RecordId(2)).unwrap();
        let ids : Vec<u32> = library.iter().map(|book| book.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(library.find(&RecordId(2)), None);
        assert_eq!(library.find(&RecordId(1)), Some(Position(0)));
        assert_eq!(library.find(&RecordId(3)), Some(Position(1)));
    }

    #[test]
    fn full_table_is_left_alone() {
        let mut contacts = ContactBook::new().unwrap();
        for idx in 0..contacts.capacity() {
            contacts.insert(Contact::new(&format!("Contact {idx}"), "", "")).unwrap();
        }
        let before = contacts.list().to_vec();

        assert!(matches!(contacts.insert(Contact::new("Extra", "", "")), Err(StoreError::StoreFull{ capacity : 100 })));
        assert_eq!(contacts.list(), &before[..]);
    }

    #[test]
    fn duplicate_keys_are_left_alone() {
        let mut contacts = ContactBook::new().unwrap();
        contacts.insert(Contact::new("Marie Curie", "1", "marie@example.com")).unwrap();
        let before = contacts.list().to_vec();

        assert!(matches!(contacts.insert(Contact::new("MARIE CURIE", "2", "")), Err(StoreError::DuplicateKey(_))));
        assert_eq!(contacts.list(), &before[..]);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut students = StudentRecords::new().unwrap();
        students.insert(Student::new(11, "Ada", [70, 80, 90])).unwrap();
        students.insert(Student::new(12, "Bea", [60, 60, 60])).unwrap();
        let coder = BincodeCoder::new();
        let untouched_before = coder.encode_to_buf(students.get(&12).unwrap()).unwrap();

        students.update(&11, StudentChanges{ name : None, marks : [None, None, Some(100)] }).unwrap();
        let ada = students.get(&11).unwrap();
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.marks, [70, 80, 100]);

        //Byte for byte, the other record did not move
        assert_eq!(coder.encode_to_buf(students.get(&12).unwrap()).unwrap(), untouched_before);
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::new().unwrap();
        library.insert(Book::new("Stale", "Anon")).unwrap();

        assert_eq!(library.load(dir.path().join("never_saved.dat")).unwrap(), 0);
        assert!(library.is_empty());
    }

    #[test]
    fn trailing_partial_record_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = ContactBook::path_in(dir.path());

        let mut contacts = ContactBook::new().unwrap();
        contacts.insert(Contact::new("Ann", "1", "")).unwrap();
        contacts.insert(Contact::new("Ben", "2", "")).unwrap();
        contacts.save(&path).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 2 * contacts.record_size());
        bytes.extend_from_slice(&[b'x'; 17]);
        std::fs::write(&path, &bytes).unwrap();

        let (reloaded, count) = ContactBook::open(dir.path()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(reloaded.list(), contacts.list());
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::new().unwrap();
        let result = library.save(dir.path().join("missing").join("library.dat"));
        assert!(matches!(result, Err(StoreError::Io{ .. })));
    }

    fn student_strategy() -> impl Strategy<Value = (i32, String, [i32; 3])> {
        (1..=i32::MAX, "[A-Za-z][A-Za-z ]{0,48}", prop::array::uniform3(0..=100i32))
    }

    proptest! {
        #[test]
        fn save_then_load_reproduces_the_table(students in prop::collection::vec(student_strategy(), 0..=100)) {
            let dir = tempfile::tempdir().unwrap();
            let path = StudentRecords::path_in(dir.path());

            let mut records = StudentRecords::new().unwrap();
            for (roll_no, name, marks) in students {
                match records.insert(Student::new(roll_no, &name, marks)) {
                    Ok(_) | Err(StoreError::DuplicateKey(_)) => {},
                    Err(err) => panic!("unexpected insert failure: {err}"),
                }
            }
            records.save(&path).unwrap();

            let mut reloaded = StudentRecords::new().unwrap();
            let count = reloaded.load(&path).unwrap();
            prop_assert_eq!(count, records.len());
            prop_assert_eq!(reloaded.list(), records.list());
        }

        #[test]
        fn delete_keeps_the_order_of_the_rest(count in 1usize..=40, victim in 0usize..40) {
            let victim = victim % count;
            let mut contacts = ContactBook::new().unwrap();
            for idx in 0..count {
                contacts.insert(Contact::new(&format!("Name {idx}"), &idx.to_string(), "")).unwrap();
            }
            let mut expected = contacts.list().to_vec();
            let removed = expected.remove(victim);

            let deleted = contacts.delete(&name_key(removed.name.as_str())).unwrap();
            prop_assert_eq!(&deleted, &removed);
            prop_assert_eq!(contacts.len(), count - 1);
            prop_assert_eq!(contacts.list(), &expected[..]);
            prop_assert!(contacts.find(&removed.name).is_none());
        }
    }
}
