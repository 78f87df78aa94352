//!
//! The contact book.  Contacts are keyed by name, which is compared without regard to case.
//!

use serde::{Serialize, Deserialize};

use crate::{*};
use super::{require_text, replace_text};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name : FixedText<100>,
    pub phone : FixedText<20>,
    pub email : FixedText<100>,
}

impl Contact {
    pub fn new(name : &str, phone : &str, email : &str) -> Self {
        Self {
            name : FixedText::new(name),
            phone : FixedText::new(phone),
            email : FixedText::new(email),
        }
    }
}

/// The name is the key, so only the phone and email can change
#[derive(Clone, Debug, Default)]
pub struct ContactChanges {
    pub phone : Option<String>,
    pub email : Option<String>,
}

impl Record for Contact {
    type KeyT = FixedText<100>;
    type ChangesT = ContactChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::CallerSupplied;

    fn key(&self) -> FixedText<100> {
        self.name.clone()
    }
    fn apply(&mut self, changes : ContactChanges) {
        replace_text(&mut self.phone, changes.phone);
        replace_text(&mut self.email, changes.email);
    }
    fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)
    }
}

pub struct ContactsConfig();
impl TableConfig for ContactsConfig {
    type RecordT = Contact;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 100;
    const FILE_NAME : &'static str = "contacts.dat";
}

pub type ContactBook = Table<ContactsConfig>;

/// Builds the lookup key for a name typed by the user
pub fn name_key(name : &str) -> FixedText<100> {
    FixedText::new(name)
}
