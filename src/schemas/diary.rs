//!
//! The personal diary.  Entries are stamped with the time they were written and can be searched
//! by calendar date in any time zone.
//!

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Serialize, Deserialize};

use crate::{*};

/// The number of bytes in an entry's content field, including the terminator
pub const MAX_ENTRY_LENGTH : usize = 1024;

const TIMESTAMP_FORMAT : &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT : &str = "%Y-%m-%d";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Seconds since the unix epoch
    pub timestamp : i64,
    pub content : FixedText<MAX_ENTRY_LENGTH>,
}

impl DiaryEntry {
    pub fn new(timestamp : i64, content : &str) -> Self {
        Self {
            timestamp,
            content : FixedText::new(content),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiaryChanges {
    pub content : Option<String>,
}

impl Record for DiaryEntry {
    type KeyT = i64;
    type ChangesT = DiaryChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::NonUnique;

    fn key(&self) -> i64 {
        self.timestamp
    }
    fn apply(&mut self, changes : DiaryChanges) {
        super::replace_text(&mut self.content, changes.content);
    }
}

pub struct DiaryConfig();
impl TableConfig for DiaryConfig {
    type RecordT = DiaryEntry;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 100;
    const FILE_NAME : &'static str = "diary.dat";
}

pub type Diary = Table<DiaryConfig>;

fn local_time<Tz : TimeZone>(timestamp : i64, tz : &Tz) -> Option<DateTime<Tz>> {
    tz.timestamp_opt(timestamp, 0).earliest()
}

/// Renders `timestamp` as `YYYY-MM-DD HH:MM:SS` in `tz`
///
/// Returns `None` if the timestamp is outside the range chrono can represent.
pub fn format_timestamp<Tz : TimeZone>(timestamp : i64, tz : &Tz) -> Option<String>
    where Tz::Offset : Display
{
    local_time(timestamp, tz).map(|time| time.format(TIMESTAMP_FORMAT).to_string())
}

/// The calendar date of `entry` in `tz`
pub fn entry_date<Tz : TimeZone>(entry : &DiaryEntry, tz : &Tz) -> Option<NaiveDate> {
    local_time(entry.timestamp, tz).map(|time| time.date_naive())
}

/// Parses a `YYYY-MM-DD` date as typed at the search prompt
pub fn parse_date(input : &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|err| StoreError::InvalidInput(format!("'{}' is not a YYYY-MM-DD date: {}", input.trim(), err)))
}

/// Returns the entries written on `date` in `tz`, in diary order
pub fn entries_on<'a, Tz : TimeZone + 'a>(diary : &'a Diary, date : NaiveDate, tz : &'a Tz) -> impl Iterator<Item=&'a DiaryEntry> + 'a {
    diary.find_all(move |entry| entry_date(entry, tz) == Some(date))
}
