//!
//! The library catalog
//!

use serde::{Serialize, Deserialize};

use crate::{*};
use super::require_text;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id : RecordId,
    pub title : FixedText<100>,
    pub author : FixedText<100>,
}

impl Book {
    pub fn new(title : &str, author : &str) -> Self {
        Self {
            id : RecordId::UNASSIGNED,
            title : FixedText::new(title),
            author : FixedText::new(author),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BookChanges {
    pub title : Option<String>,
    pub author : Option<String>,
}

impl Record for Book {
    type KeyT = RecordId;
    type ChangesT = BookChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;

    fn key(&self) -> RecordId {
        self.id
    }
    fn assign_id(&mut self, id : RecordId) {
        self.id = id;
    }
    fn assigned_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
    fn apply(&mut self, changes : BookChanges) {
        super::replace_text(&mut self.title, changes.title);
        super::replace_text(&mut self.author, changes.author);
    }
    fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)
    }
}

pub struct LibraryConfig();
impl TableConfig for LibraryConfig {
    type RecordT = Book;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 100;
    const FILE_NAME : &'static str = "library.dat";
}

pub type Library = Table<LibraryConfig>;
