//!
//! Hospital records: patients, doctors, and the appointments that link them.  Each of the three
//! lives in its own table and file.
//!

use std::path::Path;

use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::{*};
use super::require_text;

const DATE_FORMAT : &str = "%Y-%m-%d";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id : RecordId,
    pub name : FixedText<100>,
    pub age : i32,
    pub gender : FixedText<10>,
}

impl Patient {
    pub fn new(name : &str, age : i32, gender : &str) -> Self {
        Self {
            id : RecordId::UNASSIGNED,
            name : FixedText::new(name),
            age,
            gender : FixedText::new(gender),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PatientChanges {
    pub name : Option<String>,
    pub age : Option<i32>,
    pub gender : Option<String>,
}

impl Record for Patient {
    type KeyT = RecordId;
    type ChangesT = PatientChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;

    fn key(&self) -> RecordId {
        self.id
    }
    fn assign_id(&mut self, id : RecordId) {
        self.id = id;
    }
    fn assigned_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
    fn apply(&mut self, changes : PatientChanges) {
        super::replace_text(&mut self.name, changes.name);
        if let Some(age) = changes.age {
            self.age = age;
        }
        super::replace_text(&mut self.gender, changes.gender);
    }
    fn validate(&self) -> Result<(), String> {
        require_text("patient name", &self.name)?;
        if self.age < 0 {
            return Err(format!("age {} is negative", self.age));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id : RecordId,
    pub name : FixedText<100>,
    pub specialization : FixedText<100>,
}

impl Doctor {
    pub fn new(name : &str, specialization : &str) -> Self {
        Self {
            id : RecordId::UNASSIGNED,
            name : FixedText::new(name),
            specialization : FixedText::new(specialization),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DoctorChanges {
    pub name : Option<String>,
    pub specialization : Option<String>,
}

impl Record for Doctor {
    type KeyT = RecordId;
    type ChangesT = DoctorChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;

    fn key(&self) -> RecordId {
        self.id
    }
    fn assign_id(&mut self, id : RecordId) {
        self.id = id;
    }
    fn assigned_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
    fn apply(&mut self, changes : DoctorChanges) {
        super::replace_text(&mut self.name, changes.name);
        super::replace_text(&mut self.specialization, changes.specialization);
    }
    fn validate(&self) -> Result<(), String> {
        require_text("doctor name", &self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id : RecordId,
    pub patient_id : RecordId,
    pub doctor_id : RecordId,
    /// `YYYY-MM-DD`
    pub date : FixedText<20>,
}

/// Only the date of an appointment can be moved
#[derive(Clone, Debug, Default)]
pub struct AppointmentChanges {
    pub date : Option<String>,
}

impl Record for Appointment {
    type KeyT = RecordId;
    type ChangesT = AppointmentChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::StoreAssigned;

    fn key(&self) -> RecordId {
        self.id
    }
    fn assign_id(&mut self, id : RecordId) {
        self.id = id;
    }
    fn assigned_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
    fn apply(&mut self, changes : AppointmentChanges) {
        super::replace_text(&mut self.date, changes.date);
    }
    fn validate(&self) -> Result<(), String> {
        parse_date(self.date.as_str()).map(|_| ())
    }
}

fn parse_date(date : &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|err| format!("appointment date '{}' is not YYYY-MM-DD: {}", date, err))
}

pub struct PatientsConfig();
impl TableConfig for PatientsConfig {
    type RecordT = Patient;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 100;
    const FILE_NAME : &'static str = "patients.dat";
}

pub struct DoctorsConfig();
impl TableConfig for DoctorsConfig {
    type RecordT = Doctor;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 50;
    const FILE_NAME : &'static str = "doctors.dat";
}

pub struct AppointmentsConfig();
impl TableConfig for AppointmentsConfig {
    type RecordT = Appointment;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 200;
    const FILE_NAME : &'static str = "appointments.dat";
}

pub type Patients = Table<PatientsConfig>;
pub type Doctors = Table<DoctorsConfig>;
pub type Appointments = Table<AppointmentsConfig>;

/// The three hospital tables, which are always loaded and saved together
pub struct Hospital {
    pub patients : Patients,
    pub doctors : Doctors,
    pub appointments : Appointments,
}

impl Hospital {

    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            patients : Patients::new()?,
            doctors : Doctors::new()?,
            appointments : Appointments::new()?,
        })
    }

    /// Loads all three tables from `dir`.  Missing files give empty tables
    pub fn open(dir : impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let (patients, patient_count) = Patients::open(dir)?;
        let (doctors, doctor_count) = Doctors::open(dir)?;
        let (appointments, appointment_count) = Appointments::open(dir)?;

        info!(patients = patient_count, doctors = doctor_count, appointments = appointment_count, "opened hospital records");
        Ok(Self{ patients, doctors, appointments })
    }

    /// Saves all three tables into `dir`
    ///
    /// Every table is attempted even if an earlier one fails.  The first failure is returned.
    pub fn save(&self, dir : impl AsRef<Path>) -> Result<(), StoreError> {
        let dir = dir.as_ref();
        let results = [
            self.patients.save(Patients::path_in(dir)),
            self.doctors.save(Doctors::path_in(dir)),
            self.appointments.save(Appointments::path_in(dir)),
        ];

        let mut first_err = None;
        for result in results {
            if let Err(err) = result {
                warn!(%err, "failed to save hospital table");
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Books `patient_id` with `doctor_id` on `date`, returning the new appointment's id
    pub fn schedule_appointment(&mut self, patient_id : RecordId, doctor_id : RecordId, date : &str) -> Result<RecordId, StoreError> {

        if self.patients.is_empty() || self.doctors.is_empty() {
            return Err(StoreError::InvalidInput("add patients and doctors before scheduling appointments".to_string()));
        }
        if self.patients.find(&patient_id).is_none() {
            return Err(StoreError::InvalidInput(format!("no patient has id {}", patient_id)));
        }
        if self.doctors.find(&doctor_id).is_none() {
            return Err(StoreError::InvalidInput(format!("no doctor has id {}", doctor_id)));
        }

        let appointment = Appointment {
            id : RecordId::UNASSIGNED,
            patient_id,
            doctor_id,
            date : FixedText::new(date.trim()),
        };
        let inserted = self.appointments.insert(appointment)?;
        Ok(inserted.id.unwrap_or_default())
    }
}
