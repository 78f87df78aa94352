//! Drives the desk programs across several sessions against one data directory

use std::path::Path;

use record_desk::{*};
use record_desk::apps::{self, Program};
use record_desk::console::Console;
use record_desk::schemas::library::Library;
use record_desk::schemas::contacts::ContactBook;

fn session(program : Program, data_dir : &Path, input : &str) -> String {
    let mut console = Console::new(input.as_bytes(), vec![]);
    apps::run(program, &mut console, data_dir).unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

#[test]
fn library_ids_continue_after_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = session(Program::Library, dir.path(), "1\nDune\nFrank Herbert\n1\nEmma\nJane Austen\n4\n");
    assert!(first.contains("Book added successfully with ID 1!"));
    assert!(first.contains("Book added successfully with ID 2!"));

    let second = session(Program::Library, dir.path(), "1\nUlysses\nJames Joyce\n3\n3\n4\n");
    assert!(second.contains("Loaded 2 books."));
    assert!(second.contains("Book added successfully with ID 3!"));
    assert!(second.contains("Title: Ulysses"));

    let (library, loaded) = Library::open(dir.path()).unwrap();
    assert_eq!(loaded, 3);
    assert_eq!(library.get(&RecordId(3)).unwrap().author, "James Joyce");
}

#[test]
fn end_of_input_quits_without_saving() {
    let dir = tempfile::tempdir().unwrap();

    session(Program::Contacts, dir.path(), "1\nAda Lovelace\n555-0100\nada@example.com\n");
    assert!(!ContactBook::path_in(dir.path()).exists());

    let (contacts, loaded) = ContactBook::open(dir.path()).unwrap();
    assert_eq!(loaded, 0);
    assert!(contacts.is_empty());
}

#[test]
fn programs_keep_to_their_own_files() {
    let dir = tempfile::tempdir().unwrap();

    session(Program::Library, dir.path(), "1\nDune\nFrank Herbert\n4\n");
    let shown = session(Program::Students, dir.path(), "2\n6\n");
    assert!(shown.contains("No student records found."));

    let mut names : Vec<String> = std::fs::read_dir(dir.path()).unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["library.dat".to_string(), "students.dat".to_string()]);
}
