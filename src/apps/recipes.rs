//!
//! The recipe book menu.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::{Console, END_SENTINEL};
use crate::schemas::recipes::{*};
use super::{invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 4] = [
    "Add New Recipe",
    "Display All Recipes",
    "Search for a Recipe (by Title)",
    "Save and Exit",
];

const RULE : &str = "==================================================";

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut book, loaded) = loaded_or(console, "recipes", RecipeBook::open(data_dir), RecipeBook::new)?;
    if loaded > 0 {
        console.say(format!("Loaded {} recipes.", loaded))?;
    }

    while let Some(choice) = menu(console, "Digital Recipe Book", &OPTIONS)? {
        match choice {
            1 => add(console, &mut book)?,
            2 => show_all(console, &book)?,
            3 => search(console, &book)?,
            4 => if save_table(console, &book, data_dir)? {
                console.say("Recipe book saved. Bon appétit!")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn read_text<R : BufRead, W : Write>(console : &mut Console<R, W>, what : &str) -> std::io::Result<String> {
    console.say(format!("Enter {} (type '{}' on a new line to finish):", what, END_SENTINEL))?;
    let read = console.read_multiline(MAX_TEXT_LENGTH - 1)?;
    if read.truncated {
        console.say("Input is too long, cannot add more text.")?;
    }
    Ok(read.text)
}

fn add<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &mut RecipeBook) -> std::io::Result<()> {
    if book.is_full() {
        return console.say("Recipe book is full.");
    }
    let Some(title) = console.ask_line("Enter Recipe Title: ")? else { return Ok(()) };
    let ingredients = read_text(console, "Ingredients")?;
    let instructions = read_text(console, "Instructions")?;

    match book.insert(Recipe::new(&title, &ingredients, &instructions)) {
        Ok(_) => console.say(format!("Recipe for '{}' added successfully!", title)),
        Err(err) => report(console, err),
    }
}

fn show_recipe<R : BufRead, W : Write>(console : &mut Console<R, W>, recipe : &Recipe) -> std::io::Result<()> {
    console.say(RULE)?;
    console.say(format!("  {}", recipe.title))?;
    console.say(RULE)?;
    console.say(format!("--- Ingredients ---\n{}", recipe.ingredients))?;
    console.say(format!("--- Instructions ---\n{}", recipe.instructions))?;
    console.say(RULE)
}

fn show_all<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &RecipeBook) -> std::io::Result<()> {
    if book.is_empty() {
        return console.say("Your recipe book is empty.");
    }
    for recipe in book.iter() {
        show_recipe(console, recipe)?;
    }
    Ok(())
}

fn search<R : BufRead, W : Write>(console : &mut Console<R, W>, book : &RecipeBook) -> std::io::Result<()> {
    if book.is_empty() {
        return console.say("Recipe book is empty, nothing to search.");
    }
    let Some(keyword) = console.ask_line("Enter a keyword to search for in recipe titles: ")? else { return Ok(()) };

    let mut found = 0;
    for recipe in search_title(book, &keyword) {
        show_recipe(console, recipe)?;
        found += 1;
    }
    if found == 0 {
        console.say(format!("No recipes found with '{}' in the title.", keyword))?;
    }
    Ok(())
}
