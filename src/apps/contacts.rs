//!
//! The contact book menu.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::Console;
use crate::schemas::non_blank;
use crate::schemas::contacts::{*};
use super::{grid, invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 6] = [
    "Add New Contact",
    "Display All Contacts",
    "Search for a Contact",
    "Update a Contact",
    "Delete a Contact",
    "Save and Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut book, loaded) = loaded_or(console, "contacts", ContactBook::open(data_dir), ContactBook::new)?;
    if loaded > 0 {
        console.say(format!("Loaded {} contacts.", loaded))?;
    }

    while let Some(choice) = menu(console, "Contact Management System", &OPTIONS)? {
        match choice {
            1 => add(console, &mut book)?,
            2 => show_all(console, &book)?,
            3 => search(console, &book)?,
            4 => update(console, &mut book)?,
            5 => delete(console, &mut book)?,
            6 => if save_table(console, &book, data_dir)? {
                console.say("Contacts saved. Exiting...")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn add<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &mut ContactBook) -> std::io::Result<()> {
    if book.is_full() {
        return console.say("Contact book is full.");
    }
    let Some(name) = console.ask_line("Enter Name: ")? else { return Ok(()) };
    if book.find(&name_key(&name)).is_some() {
        return report(console, "A contact with this name already exists.");
    }
    let Some(phone) = console.ask_line("Enter Phone Number: ")? else { return Ok(()) };
    let Some(email) = console.ask_line("Enter Email Address: ")? else { return Ok(()) };

    match book.insert(Contact::new(&name, &phone, &email)) {
        Ok(_) => console.say("Contact added successfully!"),
        Err(err) => report(console, err),
    }
}

fn listing<'a>(contacts : impl Iterator<Item=&'a Contact>) -> comfy_table::Table {
    let mut listing = grid(&["Name", "Phone", "Email"]);
    for contact in contacts {
        listing.add_row(vec![contact.name.to_string(), contact.phone.to_string(), contact.email.to_string()]);
    }
    listing
}

fn show_all<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &ContactBook) -> std::io::Result<()> {
    if book.is_empty() {
        return console.say("No contacts to display.");
    }
    console.say(listing(book.iter()).to_string())
}

fn search<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &ContactBook) -> std::io::Result<()> {
    let Some(name) = console.ask_line("Enter the name to search for: ")? else { return Ok(()) };
    match book.get(&name_key(&name)) {
        Some(contact) => console.say(listing(std::iter::once(contact)).to_string()),
        None => console.say(format!("Contact '{}' not found.", name)),
    }
}

fn update<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &mut ContactBook) -> std::io::Result<()> {
    let Some(name) = console.ask_line("Enter the name of the contact to update: ")? else { return Ok(()) };
    let key = name_key(&name);
    let Some(current) = book.get(&key).cloned() else {
        return console.say(format!("Contact '{}' not found.", name));
    };

    let Some(phone) = console.ask_line(&format!("Enter new Phone Number (or press Enter to keep '{}'): ", current.phone))? else { return Ok(()) };
    let Some(email) = console.ask_line(&format!("Enter new Email Address (or press Enter to keep '{}'): ", current.email))? else { return Ok(()) };

    let changes = ContactChanges{ phone : non_blank(&phone), email : non_blank(&email) };
    match book.update(&key, changes) {
        Ok(()) => console.say("Contact updated successfully!"),
        Err(err) => report(console, err),
    }
}

fn delete<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &mut ContactBook) -> std::io::Result<()> {
    let Some(name) = console.ask_line("Enter the name of the contact to delete: ")? else { return Ok(()) };
    match book.delete(&name_key(&name)) {
        Ok(deleted) => console.say(format!("Contact '{}' deleted successfully.", deleted.name)),
        Err(err) => report(console, err),
    }
}

#[cfg(test)]
mod tests {
    use crate::apps::Program;
    use crate::apps::test_support::run_script;
    use super::*;

    #[test]
    fn full_session() {
        let dir = tempfile::tempdir().unwrap();
        let script = concat!(
            "1\nAlice\n555-0100\nalice@example.com\n",
            "1\nBob\n555-0101\nbob@example.com\n",
            "1\nALICE\n",
            "4\nbob\n\nbob@work.example\n",
            "5\nalice\n",
            "3\nAlice\n",
            "2\n",
            "6\n",
        );
        let shown = run_script(Program::Contacts, dir.path(), script);

        assert_eq!(shown.matches("Contact added successfully!").count(), 2);
        assert!(shown.contains("Error: A contact with this name already exists."));
        assert!(shown.contains("keep '555-0101'"));
        assert!(shown.contains("Contact updated successfully!"));
        assert!(shown.contains("Contact 'Alice' deleted successfully."));
        assert!(shown.contains("Contact 'Alice' not found."));
        assert!(shown.contains("bob@work.example"));

        let (book, loaded) = ContactBook::open(dir.path()).unwrap();
        assert_eq!(loaded, 1);
        let bob = &book.list()[0];
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.phone, "555-0101");
        assert_eq!(bob.email, "bob@work.example");
    }
}
