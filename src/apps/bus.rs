//!
//! The bus reservation menu: a seat map, booking and cancelling seats.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::Console;
use crate::schemas::bus::{*};
use super::{grid, invalid_choice, loaded_or, menu, report, save_table};

const OPTIONS : [&str; 5] = [
    "Display Seat Map",
    "Book a Seat",
    "Cancel a Booking",
    "Display Booked Seats List",
    "Save and Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (mut bus, loaded) = loaded_or(console, "the bus", open_bus(data_dir), new_bus)?;
    if loaded > 0 {
        console.say(format!("Loaded {} seats.", loaded))?;
    }

    while let Some(choice) = menu(console, "Bus Reservation System", &OPTIONS)? {
        match choice {
            1 => show_seat_map(console, &bus)?,
            2 => book(console, &mut bus)?,
            3 => cancel(console, &mut bus)?,
            4 => show_booked(console, &bus)?,
            5 => if save_table(console, &bus, data_dir)? {
                console.say("Reservations saved. Goodbye!")?;
                return Ok(());
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn show_seat_map<R : BufRead, W : Write>(console : &mut Console<R, W>, bus : &Bus) -> std::io::Result<()> {
    console.say("")?;
    console.say("--- Seat Map ([XX] = booked) ---")?;
    write!(console.out(), "{}", seat_map(bus))
}

fn book<R : BufRead, W : Write>(console : &mut Console<R, W>, bus : &mut Bus) -> std::io::Result<()> {
    let Some(seat) = console.read_int("Enter the seat number you want to book: ")? else { return Ok(()) };
    if seat < 1 || seat as usize > TOTAL_SEATS {
        return report(console, format!("seat number must be between 1 and {}", TOTAL_SEATS));
    }
    if let Some(booked) = booked_seats(bus).find(|s| s.seat_number.0 == seat as u32) {
        return report(console, format!("Seat {} is already booked by {}.", seat, booked.passenger_name));
    }
    let Some(name) = console.ask_line(&format!("Enter passenger name for seat {}: ", seat))? else { return Ok(()) };

    match book_seat(bus, seat as u32, &name) {
        Ok(()) => console.say(format!("Seat {} booked successfully for {}!", seat, name.trim())),
        Err(err) => report(console, err),
    }
}

fn cancel<R : BufRead, W : Write>(console : &mut Console<R, W>, bus : &mut Bus) -> std::io::Result<()> {
    let Some(seat) = console.read_int("Enter the seat number to cancel booking: ")? else { return Ok(()) };
    if seat < 1 {
        return report(console, format!("seat number must be between 1 and {}", TOTAL_SEATS));
    }
    match cancel_booking(bus, seat as u32) {
        Ok(passenger) => console.say(format!("Booking for seat {} ({}) has been cancelled.", seat, passenger)),
        Err(err) => report(console, err),
    }
}

fn show_booked<R : BufRead, W : Write>(console : &mut Console<R, W>, bus : &Bus) -> std::io::Result<()> {
    if booked_seats(bus).next().is_none() {
        return console.say("No seats are currently booked.");
    }
    let mut listing = grid(&["Seat", "Passenger"]);
    for seat in booked_seats(bus) {
        listing.add_row(vec![seat.seat_number.to_string(), seat.passenger_name.to_string()]);
    }
    console.say(listing.to_string())
}
