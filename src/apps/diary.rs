//!
//! The diary menu: writing entries and finding them by date.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::Local;

use crate::console::{Console, END_SENTINEL};
use crate::schemas::diary::{*};
use super::{invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 4] = [
    "Add New Diary Entry",
    "View All Entries",
    "Search Entries by Date",
    "Save and Exit",
];

const RULE : &str = "========================================";

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut diary, loaded) = loaded_or(console, "the diary", Diary::open(data_dir), Diary::new)?;
    if loaded > 0 {
        console.say(format!("Loaded {} diary entries.", loaded))?;
    }

    while let Some(choice) = menu(console, "Personal Diary System", &OPTIONS)? {
        match choice {
            1 => add(console, &mut diary)?,
            2 => show_all(console, &diary)?,
            3 => search(console, &diary)?,
            4 => if save_table(console, &diary, data_dir)? {
                console.say("Diary saved. Goodbye!")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn add<R : BufRead, W : Write>(console : &mut Console<R, W>, diary : &mut Diary) -> std::io::Result<()> {
    if diary.is_full() {
        return console.say("Diary is full. Cannot add more entries.");
    }
    let timestamp = Local::now().timestamp();

    console.say(format!("Enter your thoughts for today. Type '{}' on a new line to finish.", END_SENTINEL))?;
    let content = console.read_multiline(MAX_ENTRY_LENGTH - 1)?;
    if content.truncated {
        console.say("Entry is too long, cannot add more text.")?;
    }

    match diary.insert(DiaryEntry::new(timestamp, &content.text)) {
        Ok(_) => console.say("Diary entry saved successfully!"),
        Err(err) => report(console, err),
    }
}

fn show_entry<R : BufRead, W : Write>(console : &mut Console<R, W>, entry : &DiaryEntry) -> std::io::Result<()> {
    let when = format_timestamp(entry.timestamp, &Local).unwrap_or_else(|| entry.timestamp.to_string());
    console.say(RULE)?;
    console.say(format!("Entry Date: {}", when))?;
    console.say("----------------------------------------")?;
    write!(console.out(), "{}", entry.content)?;
    console.say(RULE)
}

fn show_all<R : BufRead, W : Write>(console : &mut Console<R, W>, diary : &Diary) -> std::io::Result<()> {
    if diary.is_empty() {
        return console.say("Your diary is empty.");
    }
    for entry in diary.iter() {
        show_entry(console, entry)?;
    }
    Ok(())
}

fn search<R : BufRead, W : Write>(console : &mut Console<R, W>, diary : &Diary) -> std::io::Result<()> {
    if diary.is_empty() {
        return console.say("Diary is empty, nothing to search.");
    }
    let Some(input) = console.ask_line("Enter date to search for (YYYY-MM-DD): ")? else { return Ok(()) };
    let date = match parse_date(&input) {
        Ok(date) => date,
        Err(err) => return report(console, err),
    };

    let mut found = 0;
    for entry in entries_on(diary, date, &Local) {
        show_entry(console, entry)?;
        found += 1;
    }
    if found == 0 {
        console.say(format!("No entries found for the date {}.", date))?;
    }
    Ok(())
}
