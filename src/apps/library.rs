//!
//! The library catalog menu.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::Console;
use crate::RecordId;
use crate::schemas::library::{*};
use super::{grid, invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 4] = [
    "Add a New Book",
    "Display All Books",
    "Search for a Book (by ID)",
    "Save and Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut library, loaded) = loaded_or(console, "the library", Library::open(data_dir), Library::new)?;
    if loaded > 0 {
        console.say(format!("Loaded {} books.", loaded))?;
    }

    while let Some(choice) = menu(console, "Library Management System", &OPTIONS)? {
        match choice {
            1 => add(console, &mut library)?,
            2 => show_all(console, &library)?,
            3 => search(console, &library)?,
            4 => if save_table(console, &library, data_dir)? {
                console.say("Library data saved. Exiting program.")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn add<R : BufRead, W : Write>(console : &mut Console<R, W>, library : &mut Library) -> std::io::Result<()> {
    if library.is_full() {
        return console.say("The library is full. Cannot add more books.");
    }
    let Some(title) = console.ask_line("Enter book title: ")? else { return Ok(()) };
    let Some(author) = console.ask_line("Enter book author: ")? else { return Ok(()) };

    match library.insert(Book::new(&title, &author)) {
        Ok(inserted) => console.say(format!("Book added successfully with ID {}!", inserted.id.unwrap_or_default())),
        Err(err) => report(console, err),
    }
}

fn show_all<R : BufRead, W : Write>(console : &mut Console<R, W>, library : &Library) -> std::io::Result<()> {
    if library.is_empty() {
        return console.say("The library is empty.");
    }
    let mut listing = grid(&["ID", "Title", "Author"]);
    for book in library.iter() {
        listing.add_row(vec![book.id.to_string(), book.title.to_string(), book.author.to_string()]);
    }
    console.say(listing.to_string())
}

fn search<R : BufRead, W : Write>(console : &mut Console<R, W>, library : &Library) -> std::io::Result<()> {
    if library.is_empty() {
        return console.say("The library is empty. Cannot search.");
    }
    let Some(id) = console.read_int("Enter the Book ID to search for: ")? else { return Ok(()) };
    let found = u32::try_from(id).ok().and_then(|id| library.get(&RecordId(id)));
    match found {
        Some(book) => {
            console.say("--- Book Found ---")?;
            console.say(format!("ID: {}", book.id))?;
            console.say(format!("Title: {}", book.title))?;
            console.say(format!("Author: {}", book.author))
        },
        None => console.say(format!("No book found with ID {}.", id)),
    }
}
