//!
//! The clock menu: a live digital clock and a countdown timer.
//!

use std::io::{BufRead, Write};
use std::time::Duration;

use chrono::Local;
use tracing::warn;

use crate::clock::{*};
use crate::console::Console;
use super::{invalid_choice, menu, report};

const OPTIONS : [&str; 3] = [
    "Display Digital Clock",
    "Start Countdown Timer",
    "Exit",
];

const TICK : Duration = Duration::from_secs(1);

//Once the Ctrl+C handler is installed it stays installed until the process exits
const CTRL_C_NOTE : &str = "Ctrl+C now only stops the clock and timer. Choose 3 to exit.";

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>) -> anyhow::Result<()> {
    while let Some(choice) = menu(console, "Digital Clock & Timer", &OPTIONS)? {
        match choice {
            1 => {
                console.say("Press Ctrl+C to return to the main menu.")?;
                let frames = std::iter::repeat_with(|| clock_frame(&Local::now()));
                show_frames(console, frames)?;
            },
            2 => countdown(console)?,
            3 => {
                console.say("Exiting program.")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn countdown<R : BufRead, W : Write>(console : &mut Console<R, W>) -> anyhow::Result<()> {
    let Some(minutes) = console.read_int("Enter minutes: ")? else { return Ok(()) };
    let Some(seconds) = console.read_int("Enter seconds: ")? else { return Ok(()) };
    let timer = match Countdown::new(minutes, seconds) {
        Ok(timer) => timer,
        Err(err) => {
            report(console, err)?;
            return Ok(());
        },
    };

    console.say(format!("Timer starting for {:02}:{:02}. Press Ctrl+C to cancel.", minutes, seconds))?;
    if show_frames(console, timer)? == TickOutcome::Completed {
        console.say("!!! TIME'S UP !!!\x07")?;
    }
    Ok(())
}

/// Shows one frame a second, overwriting the previous one, until the frames run out or Ctrl+C
fn show_frames<R : BufRead, W : Write>(console : &mut Console<R, W>, frames : impl Iterator<Item=String>) -> anyhow::Result<TickOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let cancel = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "Ctrl+C can't be caught, the clock can only be stopped by ending the program");
            std::future::pending::<()>().await;
        }
    };

    let out = console.out();
    let outcome = runtime.block_on(run_ticks(frames, TICK, cancel, |frame| {
        write!(out, "\r\t\t\t  {}  ", frame)?;
        out.flush()
    }))?;
    console.say("")?;
    console.say(CTRL_C_NOTE)?;
    Ok(outcome)
}
