//!
//! Seat booking for a single bus.  Every seat is a record that exists for the life of the table;
//! booking and cancelling are updates.
//!

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::{*};
use super::require_text;

/// The number of seats on the bus
pub const TOTAL_SEATS : usize = 32;

/// The passenger name stored on a seat nobody has booked
pub const NO_PASSENGER : &str = "N/A";

/// The number of seats in each row of the seat map
const SEATS_PER_ROW : usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub seat_number : RecordId,
    pub is_booked : bool,
    pub passenger_name : FixedText<100>,
}

impl Seat {
    pub fn available() -> Self {
        Self {
            seat_number : RecordId::UNASSIGNED,
            is_booked : false,
            passenger_name : FixedText::new(NO_PASSENGER),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SeatChanges {
    pub is_booked : Option<bool>,
    pub passenger_name : Option<String>,
}

impl Record for Seat {
    type KeyT = RecordId;
    type ChangesT = SeatChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;

    fn key(&self) -> RecordId {
        self.seat_number
    }
    fn assign_id(&mut self, id : RecordId) {
        self.seat_number = id;
    }
    fn assigned_id(&self) -> Option<RecordId> {
        Some(self.seat_number)
    }
    fn apply(&mut self, changes : SeatChanges) {
        if let Some(is_booked) = changes.is_booked {
            self.is_booked = is_booked;
        }
        super::replace_text(&mut self.passenger_name, changes.passenger_name);
    }
    fn validate(&self) -> Result<(), String> {
        if self.is_booked {
            require_text("passenger name", &self.passenger_name)?;
        }
        Ok(())
    }
}

pub struct BusConfig();
impl TableConfig for BusConfig {
    type RecordT = Seat;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = TOTAL_SEATS;
    const FILE_NAME : &'static str = "bus_reservation.dat";
}

pub type Bus = Table<BusConfig>;

/// Creates a bus with every seat available
pub fn new_bus() -> Result<Bus, StoreError> {
    let mut bus = Bus::new()?;
    for _ in 0..TOTAL_SEATS {
        bus.insert(Seat::available())?;
    }
    Ok(bus)
}

/// Loads the bus from `dir`, or creates a fresh one if nothing has been saved yet
///
/// Returns the bus and the number of seats that were loaded from disk.
pub fn open_bus(dir : impl AsRef<Path>) -> Result<(Bus, usize), StoreError> {
    let (bus, loaded) = Bus::open(dir)?;
    if loaded == 0 {
        return Ok((new_bus()?, 0));
    }
    Ok((bus, loaded))
}

fn seat_key(seat_number : u32) -> Result<RecordId, StoreError> {
    if seat_number < 1 || seat_number as usize > TOTAL_SEATS {
        return Err(StoreError::InvalidInput(format!("seat number must be between 1 and {}", TOTAL_SEATS)));
    }
    Ok(RecordId(seat_number))
}

/// Books `seat_number` for `passenger_name`
pub fn book_seat(bus : &mut Bus, seat_number : u32, passenger_name : &str) -> Result<(), StoreError> {
    let key = seat_key(seat_number)?;
    let seat = bus.get(&key).ok_or_else(|| StoreError::NotFound(key.to_string()))?;
    if seat.is_booked {
        return Err(StoreError::InvalidInput(format!("seat {} is already booked by {}", seat_number, seat.passenger_name)));
    }
    bus.update(&key, SeatChanges{ is_booked : Some(true), passenger_name : Some(passenger_name.to_string()) })
}

/// Cancels the booking on `seat_number`, returning the name of the passenger who held it
pub fn cancel_booking(bus : &mut Bus, seat_number : u32) -> Result<String, StoreError> {
    let key = seat_key(seat_number)?;
    let seat = bus.get(&key).ok_or_else(|| StoreError::NotFound(key.to_string()))?;
    if !seat.is_booked {
        return Err(StoreError::InvalidInput(format!("seat {} is not booked", seat_number)));
    }
    let passenger = seat.passenger_name.to_string();
    bus.update(&key, SeatChanges{ is_booked : Some(false), passenger_name : Some(NO_PASSENGER.to_string()) })?;
    Ok(passenger)
}

pub fn booked_seats(bus : &Bus) -> impl Iterator<Item=&Seat> {
    bus.find_all(|seat| seat.is_booked)
}

/// Renders the seat map, four seats to a row.  Booked seats show as `[XX]`
pub fn seat_map(bus : &Bus) -> String {
    let mut map = String::new();
    for (idx, seat) in bus.iter().enumerate() {
        if seat.is_booked {
            map.push_str("[XX] ");
        } else {
            map.push_str(&format!("[{:02}] ", seat.seat_number.0));
        }
        if (idx + 1) % SEATS_PER_ROW == 0 {
            map.push('\n');
        }
    }
    map
}
