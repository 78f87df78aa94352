//!
//! The Console module contains the line-oriented prompt and input reader the desk programs are
//! driven through.  It is generic over the input and output streams so a whole menu session can
//! be scripted in a test.
//!

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// The line that ends a multi-line answer
pub const END_SENTINEL : &str = "END";

/// A prompt-and-answer session over a line-oriented input and an output sink
pub struct Console<R, W> {
    input : R,
    output : W,
}

impl <R : BufRead, W : Write>Console<R, W> {

    pub fn new(input : R, output : W) -> Self {
        Self{ input, output }
    }

    /// The output sink, for rendering listings and messages
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the Console, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline
    pub fn say(&mut self, text : impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Writes `text` without a newline and flushes, so it shows before the answer is typed
    pub fn prompt(&mut self, text : &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Reads one line with the trailing newline removed.  Returns `None` at the end of the input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Prompts for, and reads, one line of text
    pub fn ask_line(&mut self, prompt : &str) -> io::Result<Option<String>> {
        self.prompt(prompt)?;
        self.read_line()
    }

    /// Prompts until a value that parses as `T` is entered.  Returns `None` at the end of the input
    fn ask_parsed<T : FromStr>(&mut self, prompt : &str, what : &str) -> io::Result<Option<T>> {
        loop {
            let line = match self.ask_line(prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(format!("Please enter {}.", what))?,
            }
        }
    }

    /// Prompts until a whole number is entered
    pub fn read_int(&mut self, prompt : &str) -> io::Result<Option<i32>> {
        self.ask_parsed(prompt, "a whole number")
    }

    /// Prompts until a number is entered
    pub fn read_f64(&mut self, prompt : &str) -> io::Result<Option<f64>> {
        self.ask_parsed(prompt, "a number")
    }

    /// Reads lines until one equal to [END_SENTINEL], or until the next line would take the text
    /// past `budget` bytes
    ///
    /// Each line keeps its newline.  The sentinel itself is not included.  When the budget is
    /// exhausted the rest of the input is left unread, and `truncated` is set in the result.
    pub fn read_multiline(&mut self, budget : usize) -> io::Result<Multiline> {
        let mut text = String::new();
        let mut truncated = false;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim_end_matches(['\n', '\r']) == END_SENTINEL {
                break;
            }
            if text.len() + line.len() > budget {
                truncated = true;
                break;
            }
            text.push_str(&line);
        }
        Ok(Multiline{ text, truncated })
    }
}

/// The result of [Console::read_multiline]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Multiline {
    pub text : String,
    /// `true` if reading stopped because the budget ran out
    pub truncated : bool,
}
