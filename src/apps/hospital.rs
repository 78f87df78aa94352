//!
//! The hospital menu for patients, doctors and appointments.
//!

use std::io::{BufRead, Write};
use std::path::Path;

use crate::console::Console;
use crate::RecordId;
use crate::schemas::hospital::{*};
use super::{grid, invalid_choice, loaded_or, menu, report};

const OPTIONS : [&str; 7] = [
    "Add New Patient",
    "Add New Doctor",
    "Schedule Appointment",
    "Display All Patients",
    "Display All Doctors",
    "Display All Appointments",
    "Save and Exit",
];

pub fn run<R : BufRead, W : Write>(console : &mut Console<R, W>, data_dir : &Path) -> anyhow::Result<()> {
    let (patients, _) = loaded_or(console, "patients", Patients::open(data_dir), Patients::new)?;
    let (doctors, _) = loaded_or(console, "doctors", Doctors::open(data_dir), Doctors::new)?;
    let (appointments, _) = loaded_or(console, "appointments", Appointments::open(data_dir), Appointments::new)?;
    let mut hospital = Hospital{ patients, doctors, appointments };
    let loaded = hospital.patients.len() + hospital.doctors.len() + hospital.appointments.len();
    if loaded > 0 {
        console.say(format!("Loaded data from files: {} Patients, {} Doctors, {} Appointments.",
            hospital.patients.len(), hospital.doctors.len(), hospital.appointments.len()))?;
    }

    while let Some(choice) = menu(console, "Hospital Management System", &OPTIONS)? {
        match choice {
            1 => add_patient(console, &mut hospital)?,
            2 => add_doctor(console, &mut hospital)?,
            3 => schedule(console, &mut hospital)?,
            4 => show_patients(console, &hospital.patients)?,
            5 => show_doctors(console, &hospital.doctors)?,
            6 => show_appointments(console, &hospital.appointments)?,
            7 => match hospital.save(data_dir) {
                Ok(()) => {
                    console.say("All data saved. Exiting...")?;
                    return Ok(());
                },
                Err(err) => report(console, err)?,
            },
            _ => invalid_choice(console)?,
        }
    }
    Ok(())
}

fn add_patient<R : BufRead, W : Write>(console : &mut Console<R, W>, hospital : &mut Hospital) -> std::io::Result<()> {
    if hospital.patients.is_full() {
        return console.say("Patient database is full.");
    }
    console.say(format!("--- Add New Patient (ID: {}) ---", hospital.patients.next_id()))?;
    let Some(name) = console.ask_line("Enter Name: ")? else { return Ok(()) };
    let Some(age) = console.read_int("Enter Age: ")? else { return Ok(()) };
    let Some(gender) = console.ask_line("Enter Gender: ")? else { return Ok(()) };

    match hospital.patients.insert(Patient::new(&name, age, &gender)) {
        Ok(_) => console.say("Patient added successfully!"),
        Err(err) => report(console, err),
    }
}

fn add_doctor<R : BufRead, W : Write>(console : &mut Console<R, W>, hospital : &mut Hospital) -> std::io::Result<()> {
    if hospital.doctors.is_full() {
        return console.say("Doctor database is full.");
    }
    console.say(format!("--- Add New Doctor (ID: {}) ---", hospital.doctors.next_id()))?;
    let Some(name) = console.ask_line("Enter Name: ")? else { return Ok(()) };
    let Some(specialization) = console.ask_line("Enter Specialization: ")? else { return Ok(()) };

    match hospital.doctors.insert(Doctor::new(&name, &specialization)) {
        Ok(_) => console.say("Doctor added successfully!"),
        Err(err) => report(console, err),
    }
}

fn schedule<R : BufRead, W : Write>(console : &mut Console<R, W>, hospital : &mut Hospital) -> std::io::Result<()> {
    if hospital.appointments.is_full() {
        return console.say("Appointment schedule is full.");
    }
    if hospital.patients.is_empty() || hospital.doctors.is_empty() {
        return console.say("Cannot schedule appointment. Please add patients and doctors first.");
    }
    show_patients(console, &hospital.patients)?;
    show_doctors(console, &hospital.doctors)?;

    let Some(patient_id) = console.read_int("Enter Patient ID: ")? else { return Ok(()) };
    let Some(doctor_id) = console.read_int("Enter Doctor ID: ")? else { return Ok(()) };
    let Some(date) = console.ask_line("Enter Date (YYYY-MM-DD): ")? else { return Ok(()) };
    if patient_id <= 0 || doctor_id <= 0 {
        return report(console, "Invalid Patient or Doctor ID. Appointment not scheduled.");
    }

    match hospital.schedule_appointment(RecordId(patient_id as u32), RecordId(doctor_id as u32), &date) {
        Ok(id) => console.say(format!("Appointment {} scheduled successfully!", id)),
        Err(err) => report(console, err),
    }
}

fn show_patients<R : BufRead, W : Write>(console : &mut Console<R, W>, patients : &Patients) -> std::io::Result<()> {
    if patients.is_empty() {
        return console.say("No patients registered.");
    }
    let mut listing = grid(&["ID", "Name", "Age", "Gender"]);
    for patient in patients.iter() {
        listing.add_row(vec![patient.id.to_string(), patient.name.to_string(), patient.age.to_string(), patient.gender.to_string()]);
    }
    console.say(listing.to_string())
}

fn show_doctors<R : BufRead, W : Write>(console : &mut Console<R, W>, doctors : &Doctors) -> std::io::Result<()> {
    if doctors.is_empty() {
        return console.say("No doctors registered.");
    }
    let mut listing = grid(&["ID", "Name", "Specialization"]);
    for doctor in doctors.iter() {
        listing.add_row(vec![doctor.id.to_string(), doctor.name.to_string(), doctor.specialization.to_string()]);
    }
    console.say(listing.to_string())
}

fn show_appointments<R : BufRead, W : Write>(console : &mut Console<R, W>, appointments : &Appointments) -> std::io::Result<()> {
    if appointments.is_empty() {
        return console.say("No appointments scheduled.");
    }
    let mut listing = grid(&["Appt. ID", "Patient ID", "Doctor ID", "Date"]);
    for appointment in appointments.iter() {
        listing.add_row(vec![appointment.id.to_string(), appointment.patient_id.to_string(), appointment.doctor_id.to_string(), appointment.date.to_string()]);
    }
    console.say(listing.to_string())
}

#[cfg(test)]
mod tests {
    use crate::apps::Program;
    use crate::apps::test_support::run_script;
    use super::*;

    #[test]
    fn register_and_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let script = concat!(
            "3\n",
            "1\nJane Doe\n34\nF\n",
            "2\nGregory House\nDiagnostics\n",
            "3\n1\n5\n2024-05-01\n",
            "3\n1\n1\n2024-05-01\n",
            "6\n",
            "7\n",
        );
        let shown = run_script(Program::Hospital, dir.path(), script);

        assert!(shown.contains("Cannot schedule appointment. Please add patients and doctors first."));
        assert!(shown.contains("--- Add New Patient (ID: 1) ---"));
        assert!(shown.contains("Error: invalid input: no doctor has id 5"));
        assert!(shown.contains("Appointment 1 scheduled successfully!"));
        assert!(shown.contains("2024-05-01"));
        assert!(shown.contains("All data saved. Exiting..."));

        let hospital = Hospital::open(dir.path()).unwrap();
        assert_eq!(hospital.patients.len(), 1);
        assert_eq!(hospital.doctors.len(), 1);
        assert_eq!(hospital.appointments.list()[0].doctor_id, RecordId(1));
    }

    #[test]
    fn one_unreadable_table_keeps_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let mut patients = Patients::new().unwrap();
        patients.insert(Patient::new("Jane Doe", 34, "F")).unwrap();
        patients.save(Patients::path_in(dir.path())).unwrap();
        let record_size = Doctors::new().unwrap().record_size();
        std::fs::write(Doctors::path_in(dir.path()), vec![0xFF; record_size]).unwrap();

        let shown = run_script(Program::Hospital, dir.path(), "4\n5\n");
        assert!(shown.contains("Error: could not load doctors: codec error"));
        assert!(shown.contains("Loaded data from files: 1 Patients, 0 Doctors, 0 Appointments."));
        assert!(shown.contains("Jane Doe"));
        assert!(shown.contains("No doctors registered."));
    }
}

