//!
//! The Schemas module contains the record types of the desk programs, one submodule per program,
//! along with the [TableConfig](crate::TableConfig) of each table and the small pieces of
//! program logic that sit on top of the tables.
//!

pub mod bus;
pub mod contacts;
pub mod currency;
pub mod diary;
pub mod hospital;
pub mod library;
pub mod recipes;
pub mod students;

use crate::FixedText;

/// Returns `None` for blank input, so a blank answer at an update prompt keeps the current value
pub fn non_blank(input : &str) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

/// Checks that a required text field has content
pub(crate) fn require_text<const N : usize>(field : &str, text : &FixedText<N>) -> Result<(), String> {
    if text.as_str().trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// Replaces `target` with `value` if one was supplied
pub(crate) fn replace_text<const N : usize>(target : &mut FixedText<N>, value : Option<String>) {
    if let Some(value) = value {
        *target = FixedText::new(&value);
    }
}
