//!
//! Student records, keyed by roll number, with a letter grade computed from three subject marks.
//!

use serde::{Serialize, Deserialize};

use crate::{*};
use super::require_text;

/// The number of subjects each student is marked in
pub const SUBJECTS : usize = 3;

/// The highest mark a subject can receive
pub const MAX_MARK : i32 = 100;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub roll_no : i32,
    pub name : FixedText<50>,
    pub marks : [i32; SUBJECTS],
}

impl Student {
    pub fn new(roll_no : i32, name : &str, marks : [i32; SUBJECTS]) -> Self {
        Self {
            roll_no,
            name : FixedText::new(name),
            marks,
        }
    }

    /// The mean of the three marks
    pub fn average(&self) -> f64 {
        self.marks.iter().map(|&mark| mark as f64).sum::<f64>() / SUBJECTS as f64
    }

    /// The letter grade for the average mark
    pub fn grade(&self) -> char {
        let average = self.average();
        if average >= 90.0 {
            'A'
        } else if average >= 80.0 {
            'B'
        } else if average >= 70.0 {
            'C'
        } else if average >= 60.0 {
            'D'
        } else {
            'F'
        }
    }
}

/// The roll number is the key, so only the name and marks can change.  Each mark is replaced
/// independently
#[derive(Clone, Debug, Default)]
pub struct StudentChanges {
    pub name : Option<String>,
    pub marks : [Option<i32>; SUBJECTS],
}

impl Record for Student {
    type KeyT = i32;
    type ChangesT = StudentChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::CallerSupplied;

    fn key(&self) -> i32 {
        self.roll_no
    }
    fn apply(&mut self, changes : StudentChanges) {
        super::replace_text(&mut self.name, changes.name);
        for (mark, change) in self.marks.iter_mut().zip(changes.marks) {
            if let Some(new_mark) = change {
                *mark = new_mark;
            }
        }
    }
    fn validate(&self) -> Result<(), String> {
        if self.roll_no <= 0 {
            return Err(format!("roll number {} must be positive", self.roll_no));
        }
        require_text("name", &self.name)?;
        for (subject, mark) in self.marks.iter().enumerate() {
            if !(0..=MAX_MARK).contains(mark) {
                return Err(format!("mark {} for subject {} is outside 0..={}", mark, subject + 1, MAX_MARK));
            }
        }
        Ok(())
    }
}

pub struct StudentsConfig();
impl TableConfig for StudentsConfig {
    type RecordT = Student;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 100;
    const FILE_NAME : &'static str = "students.dat";
}

pub type StudentRecords = Table<StudentsConfig>;
