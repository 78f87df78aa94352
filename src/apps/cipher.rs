//!
//! The Caesar cipher menu, encrypting and decrypting files.
//!

use std::io::{BufRead, Write};

use crate::cipher::{*};
use crate::console::Console;
use super::{invalid_choice, menu, report};

const OPTIONS : [&str; 3] = [
    "Encrypt a File",
    "Decrypt a File",
    "Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>) -> anyhow::Result<()> {
    while let Some(choice) = menu(console, "File Encryptor/Decryptor", &OPTIONS)? {
        match choice {
            1 => process_file(console, Direction::Encrypt)?,
            2 => process_file(console, Direction::Decrypt)?,
            3 => {
                console.say("Exiting program.")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn process_file<R : BufRead, W : Write>(console : &mut Console<R, W>, direction : Direction) -> std::io::Result<()> {
    let Some(input) = console.ask_line("Enter input file name: ")? else { return Ok(()) };
    let Some(output) = console.ask_line("Enter output file name: ")? else { return Ok(()) };
    let Some(key) = console.read_int("Enter the key (a number from 1 to 25): ")? else { return Ok(()) };

    let result = ShiftKey::new(key)
        .and_then(|key| transform_file(input.trim(), output.trim(), key, direction));
    match result {
        Ok(bytes) => {
            console.say(format!("File has been {}ed successfully! ({} bytes)", direction.verb(), bytes))?;
            console.say(format!("Input: {}", input.trim()))?;
            console.say(format!("Output: {}", output.trim()))
        },
        Err(err) => report(console, err),
    }
}
