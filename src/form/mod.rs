//! The six form fields and the pure functions that gate a submission.
//!
//! [`validate`] checks presence, [`build_payload`] turns the two list fields
//! into typed sequences. Neither touches the network.

mod payload;
mod validation;

pub use payload::{PayloadError, SubmissionPayload, build_payload, parse_alphabets, parse_numbers};
pub use validation::{FormErrors, validate};

/// Identifies one of the six inputs.
///
/// Declaration order is display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    Dob,
    CollegeEmail,
    RollNumber,
    Numbers,
    Alphabets,
}

impl FieldName {
    pub const ALL: [FieldName; 6] = [
        FieldName::FullName,
        FieldName::Dob,
        FieldName::CollegeEmail,
        FieldName::RollNumber,
        FieldName::Numbers,
        FieldName::Alphabets,
    ];

    /// JSON key used in the request body.
    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Dob => "dob",
            Self::CollegeEmail => "collegeEmail",
            Self::RollNumber => "rollNumber",
            Self::Numbers => "numbers",
            Self::Alphabets => "alphabets",
        }
    }

    /// Name used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Dob => "Date of Birth",
            Self::CollegeEmail => "College Email",
            Self::RollNumber => "College Roll Number",
            Self::Numbers => "Numbers array",
            Self::Alphabets => "Alphabets array",
        }
    }

    /// Question shown above the input.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::FullName => "1. What's your full name? *",
            Self::Dob => "2. What's your D.O.B? [ddmmyyyy] *",
            Self::CollegeEmail => "3. What's your college email ID? *",
            Self::RollNumber => "4. What's your college roll number? *",
            Self::Numbers => "5. Enter Numbers (comma separated) *",
            Self::Alphabets => "6. Enter Alphabets (comma separated) *",
        }
    }

    /// Placeholder text for the input, if any.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::Dob => Some("dd/mm/yyyy"),
            Self::Numbers => Some("1, 2, 3"),
            Self::Alphabets => Some("A, B, C"),
            Self::FullName | Self::CollegeEmail | Self::RollNumber => None,
        }
    }
}

/// Current text of every input, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub full_name: String,
    pub dob: String,
    pub college_email: String,
    pub roll_number: String,
    pub numbers: String,
    pub alphabets: String,
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::FullName => &self.full_name,
            FieldName::Dob => &self.dob,
            FieldName::CollegeEmail => &self.college_email,
            FieldName::RollNumber => &self.roll_number,
            FieldName::Numbers => &self.numbers,
            FieldName::Alphabets => &self.alphabets,
        }
    }

    pub fn get_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::FullName => &mut self.full_name,
            FieldName::Dob => &mut self.dob,
            FieldName::CollegeEmail => &mut self.college_email,
            FieldName::RollNumber => &mut self.roll_number,
            FieldName::Numbers => &mut self.numbers,
            FieldName::Alphabets => &mut self.alphabets,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}
