//!
//! The Apps module contains the menu loop of each desk program.  Every program reads its answers
//! through a [Console] and keeps its tables in one data directory.
//!
//! Store errors are shown to the user and the menu carries on.  A data file that can't be loaded
//! is reported and the program starts from an empty table.  Only console i/o failures end a
//! program with an error.
//!

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use tracing::warn;

use crate::console::Console;
use crate::{StoreError, Table, TableConfig};

pub mod bus;
pub mod cipher;
pub mod clock;
pub mod contacts;
pub mod currency;
pub mod diary;
pub mod hospital;
pub mod library;
pub mod recipes;
pub mod students;

/// The desk programs, one subcommand each
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::Subcommand)]
pub enum Program {
    /// Book and cancel seats on a 32-seat bus
    Bus,
    /// Keep a contact book
    Contacts,
    /// Convert between currencies
    Currency,
    /// Show a digital clock or run a countdown timer
    Clock,
    /// Encrypt or decrypt a text file with a Caesar shift
    Cipher,
    /// Register patients and doctors, and schedule appointments
    Hospital,
    /// Catalog the books of a library
    Library,
    /// Write timestamped diary entries
    Diary,
    /// Collect recipes
    Recipes,
    /// Keep student marks and grades
    Students,
}

/// Runs `program` until the user exits or the input ends
pub fn run<R : BufRead, W : Write>(program : Program, console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    match program {
        Program::Bus => bus::run(console, data_dir),
        Program::Contacts => contacts::run(console, data_dir),
        Program::Currency => currency::run(console, data_dir),
        Program::Clock => clock::run(console),
        Program::Cipher => cipher::run(console),
        Program::Hospital => hospital::run(console, data_dir),
        Program::Library => library::run(console, data_dir),
        Program::Diary => diary::run(console, data_dir),
        Program::Recipes => recipes::run(console, data_dir),
        Program::Students => students::run(console, data_dir),
    }
}

/// Shows a numbered menu and reads the choice.  Returns `None` at the end of the input
pub(crate) fn menu<R : BufRead, W : Write>(console : &mut Console<R, W>, title : &str, options : &[&str]) -> io::Result<Option<i32>> {
    console.say("")?;
    console.say(format!("--- {} ---", title))?;
    for (idx, option) in options.iter().enumerate() {
        console.say(format!("{}. {}", idx + 1, option))?;
    }
    let choice = console.read_int("Enter your choice: ")?;
    if choice.is_none() {
        warn!(title, "input ended, leaving without saving");
    }
    Ok(choice)
}

pub(crate) fn report<R : BufRead, W : Write>(console : &mut Console<R, W>, err : impl Display) -> io::Result<()> {
    console.say(format!("Error: {}", err))
}

/// Passes a successful load through.  A failed one is reported, and the program carries on with
/// the table made by `fresh` and a load count of 0
pub(crate) fn loaded_or<T, R : BufRead, W : Write>(console : &mut Console<R, W>, what : &str, opened : Result<(T, usize), StoreError>, fresh : impl FnOnce() -> Result<T, StoreError>) -> anyhow::Result<(T, usize)> {
    match opened {
        Ok(opened) => Ok(opened),
        Err(err) => {
            warn!(%err, what, "could not load saved data, starting empty");
            report(console, format!("could not load {}: {}", what, err))?;
            let table = fresh().with_context(|| format!("creating empty {}", what))?;
            Ok((table, 0))
        },
    }
}

pub(crate) fn invalid_choice<R : BufRead, W : Write>(console : &mut Console<R, W>) -> io::Result<()> {
    console.say("Invalid choice. Please try again.")
}

/// Saves `table` into `data_dir`, telling the user how it went.  Returns `true` on success
pub(crate) fn save_table<ConfigT : TableConfig, R : BufRead, W : Write>(console : &mut Console<R, W>, table : &Table<ConfigT>, data_dir : &Path) -> io::Result<bool> {
    match table.save(Table::<ConfigT>::path_in(data_dir)) {
        Ok(()) => Ok(true),
        Err(err) => {
            report(console, &err)?;
            Ok(false)
        },
    }
}

/// A listing with the given column headers
pub(crate) fn grid(header : &[&str]) -> comfy_table::Table {
    let mut grid = comfy_table::Table::new();
    grid.load_preset(UTF8_FULL);
    grid.set_header(header.to_vec());
    grid
}
