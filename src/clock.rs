//!
//! The Clock module contains the digital clock and countdown timer.  Both are a sequence of
//! rendered frames, and [run_ticks] paces any such sequence on a tokio interval until it runs
//! out or is cancelled.
//!

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, TimeZone};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ClockError {

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("could not display frame: {0}")]
    Io(#[from] std::io::Error),
}

/// How a [run_ticks] call ended
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// Every frame was shown
    Completed,
    /// The cancel future resolved first
    Cancelled,
}

/// Renders the time of day as `HH:MM:SS`
pub fn clock_frame<Tz : TimeZone>(now : &DateTime<Tz>) -> String
    where Tz::Offset : Display
{
    now.format("%H:%M:%S").to_string()
}

/// The frames of a countdown timer, `MM:SS` from the starting time down to and including `00:00`
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining : Option<u32>,
}

impl Countdown {
    pub fn new(minutes : i32, seconds : i32) -> Result<Self, ClockError> {
        if minutes < 0 || seconds < 0 {
            return Err(ClockError::InvalidInput(format!("{}:{} is not a valid duration", minutes, seconds)));
        }
        let total = (minutes as u32).checked_mul(60)
            .and_then(|minute_secs| minute_secs.checked_add(seconds as u32))
            .ok_or_else(|| ClockError::InvalidInput(format!("{}:{} is too long", minutes, seconds)))?;
        Ok(Self{ remaining : Some(total) })
    }
}

impl Iterator for Countdown {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let remaining = self.remaining?;
        self.remaining = remaining.checked_sub(1);
        Some(format!("{:02}:{:02}", remaining / 60, remaining % 60))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.map(|remaining| remaining as usize + 1).unwrap_or(0);
        (len, Some(len))
    }
}

/// Hands one frame to `sink` per `period`, starting immediately
///
/// Returns [TickOutcome::Completed] as soon as the last frame has been shown, which the
/// iterator reports through an upper `size_hint` of 0, or when it runs dry.  Returns
/// [TickOutcome::Cancelled] if `cancel` resolves first.  Frames are produced lazily, one per
/// tick, so an endless clock always renders the current time.
pub async fn run_ticks<I, C, S>(frames : I, period : Duration, cancel : C, mut sink : S) -> Result<TickOutcome, ClockError>
    where
    I : IntoIterator<Item=String>,
    C : Future<Output=()>,
    S : FnMut(&str) -> std::io::Result<()>,
{
    let mut frames = frames.into_iter();
    let mut interval = tokio::time::interval(period);
    tokio::pin!(cancel);

    loop {
        tokio::select! {
            biased;

            _ = &mut cancel => {
                debug!("ticks cancelled");
                return Ok(TickOutcome::Cancelled);
            },
            _ = interval.tick() => {
                match frames.next() {
                    Some(frame) => sink(&frame)?,
                    None => return Ok(TickOutcome::Completed),
                }
                if frames.size_hint().1 == Some(0) {
                    return Ok(TickOutcome::Completed);
                }
            },
        }
    }
}
