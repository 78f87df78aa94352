//!
//! The student records menu, with marks and grades.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::Console;
use crate::schemas::non_blank;
use crate::schemas::students::{*};
use super::{grid, invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 6] = [
    "Add Student Record",
    "Display All Student Records",
    "Search for a Student",
    "Update a Student Record",
    "Delete a Student Record",
    "Save and Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut records, loaded) = loaded_or(console, "student records", StudentRecords::open(data_dir), StudentRecords::new)?;
    if loaded > 0 {
        console.say(format!("Loaded {} student records.", loaded))?;
    }

    while let Some(choice) = menu(console, "Student Record Management System", &OPTIONS)? {
        match choice {
            1 => add(console, &mut records)?,
            2 => show(console, records.iter())?,
            3 => search(console, &records)?,
            4 => update(console, &mut records)?,
            5 => delete(console, &mut records)?,
            6 => if save_table(console, &records, data_dir)? {
                console.say("Records saved. Exiting...")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn add<R : BufRead, W : Write>(console : &mut Console<R, W>, records : &mut StudentRecords) -> std::io::Result<()> {
    if records.is_full() {
        return console.say("Student database is full.");
    }
    let Some(roll_no) = console.read_int("Enter Roll Number: ")? else { return Ok(()) };
    if records.find(&roll_no).is_some() {
        return report(console, "A student with this roll number already exists.");
    }
    let Some(name) = console.ask_line("Enter Name: ")? else { return Ok(()) };
    let mut marks = [0; SUBJECTS];
    for (subject, mark) in marks.iter_mut().enumerate() {
        let Some(value) = console.read_int(&format!("Enter Marks for Subject {}: ", subject + 1))? else { return Ok(()) };
        *mark = value;
    }

    match records.insert(Student::new(roll_no, &name, marks)) {
        Ok(_) => console.say("Student record added successfully!"),
        Err(err) => report(console, err),
    }
}

fn show<'a, R : BufRead, W : Write>(console : &mut Console<R, W>, students : impl Iterator<Item=&'a Student>) -> std::io::Result<()> {
    let mut listing = grid(&["Roll No", "Name", "Sub1", "Sub2", "Sub3", "Grade"]);
    let mut count = 0;
    for student in students {
        let mut row = vec![student.roll_no.to_string(), student.name.to_string()];
        row.extend(student.marks.iter().map(|mark| mark.to_string()));
        row.push(student.grade().to_string());
        listing.add_row(row);
        count += 1;
    }
    if count == 0 {
        return console.say("No student records found.");
    }
    console.say(listing.to_string())
}

fn search<R : BufRead, W : Write>(console : &mut Console<R, W>, records : &StudentRecords) -> std::io::Result<()> {
    let Some(roll_no) = console.read_int("Enter Roll Number to search: ")? else { return Ok(()) };
    match records.get(&roll_no) {
        Some(student) => show(console, std::iter::once(student)),
        None => console.say(format!("Student with Roll No {} not found.", roll_no)),
    }
}

/// Reads a mark that may be left blank.  The outer `None` is the end of the input
fn ask_mark<R : BufRead, W : Write>(console : &mut Console<R, W>, prompt : &str) -> std::io::Result<Option<Option<i32>>> {
    loop {
        let Some(line) = console.ask_line(prompt)? else { return Ok(None) };
        if line.trim().is_empty() {
            return Ok(Some(None));
        }
        match line.trim().parse() {
            Ok(mark) => return Ok(Some(Some(mark))),
            Err(_) => console.say("Please enter a whole number.")?,
        }
    }
}

fn update<R : BufRead, W : Write>(console : &mut Console<R, W>, records : &mut StudentRecords) -> std::io::Result<()> {
    let Some(roll_no) = console.read_int("Enter Roll Number of the student to update: ")? else { return Ok(()) };
    let Some(current) = records.get(&roll_no).cloned() else {
        return console.say(format!("Student with Roll No {} not found.", roll_no));
    };

    console.say(format!("--- Updating Record for {} (Roll No: {}) ---", current.name, current.roll_no))?;
    let Some(name) = console.ask_line(&format!("Enter new Name (or press Enter to keep '{}'): ", current.name))? else { return Ok(()) };
    let mut changes = StudentChanges{ name : non_blank(&name), marks : [None; SUBJECTS] };
    for (subject, change) in changes.marks.iter_mut().enumerate() {
        let prompt = format!("Enter new Marks for Subject {} (current: {}): ", subject + 1, current.marks[subject]);
        let Some(mark) = ask_mark(console, &prompt)? else { return Ok(()) };
        *change = mark;
    }

    match records.update(&roll_no, changes) {
        Ok(()) => console.say("Student record updated successfully!"),
        Err(err) => report(console, err),
    }
}

fn delete<R : BufRead, W : Write>(console : &mut Console<R, W>, records : &mut StudentRecords) -> std::io::Result<()> {
    let Some(roll_no) = console.read_int("Enter Roll Number of the student to delete: ")? else { return Ok(()) };
    match records.delete(&roll_no) {
        Ok(deleted) => console.say(format!("Student record for {} deleted successfully.", deleted.name)),
        Err(err) => report(console, err),
    }
}

#[cfg(test)]
mod tests {
    use crate::apps::Program;
    use crate::apps::test_support::run_script;
    use super::*;

    #[test]
    fn crud_session() {
        let dir = tempfile::tempdir().unwrap();
        let script = concat!(
            "2\n",
            "1\n1\nAnn\n95\n91\n88\n",
            "1\n2\nBen\n70\n65\n61\n",
            "1\n1\n",
            "1\n3\nCat\n50\n150\n50\n",
            "4\n2\n\n\nx\n85\n\n",
            "3\n2\n",
            "5\n1\n",
            "5\n1\n",
            "6\n",
        );
        let shown = run_script(Program::Students, dir.path(), script);

        assert!(shown.contains("No student records found."));
        assert_eq!(shown.matches("Student record added successfully!").count(), 2);
        assert!(shown.contains("Error: A student with this roll number already exists."));
        assert!(shown.contains("mark 150 for subject 2 is outside 0..=100"));
        assert!(shown.contains("Student record updated successfully!"));
        assert!(shown.contains("Student record for Ann deleted successfully."));
        assert!(shown.contains("Error: no record found with key '1'"));

        let (records, loaded) = StudentRecords::open(dir.path()).unwrap();
        assert_eq!(loaded, 1);
        let ben = records.get(&2).unwrap();
        assert_eq!(ben.name, "Ben");
        assert_eq!(ben.marks, [70, 85, 61]);
        assert_eq!(ben.grade(), 'C');
    }

    #[test]
    fn unreadable_file_is_reported_and_the_menu_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = StudentRecords::path_in(dir.path());
        let mut bytes = vec![0u8; StudentRecords::new().unwrap().record_size()];
        bytes[4..54].fill(0xFF);
        std::fs::write(&path, &bytes).unwrap();

        let shown = run_script(Program::Students, dir.path(), "2\n6\n");
        assert!(shown.contains("Error: could not load student records: codec error"));
        assert!(shown.contains("No student records found."));
        assert!(shown.contains("Records saved. Exiting..."));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }
}
