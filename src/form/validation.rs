use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::models::cv::{CvDraft, WorkExperience};
use crate::utils::time::today;
use crate::utils::validation::{
    check_image_data_url, is_digits, is_letters_and_spaces, is_month, ImageError,
};

pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkField {
    Company,
    Position,
    StartDate,
    EndDate,
}

impl WorkField {
    fn as_str(self) -> &'static str {
        match self {
            WorkField::Company => "company",
            WorkField::Position => "position",
            WorkField::StartDate => "startDate",
            WorkField::EndDate => "endDate",
        }
    }
}

/// Address of a form control an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    FirstName,
    LastName,
    Age,
    PhoneNumber,
    Address,
    DateOfBirth,
    Nationality,
    EmploymentStatus,
    PreferredLanguages,
    WorkExperience,
    WorkExperienceItem { index: usize, field: WorkField },
    ProfilePicture,
    TermsAccepted,
}

impl FieldPath {
    pub fn item(index: usize, field: WorkField) -> Self {
        FieldPath::WorkExperienceItem { index, field }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldPath::FirstName => "firstName",
            FieldPath::LastName => "lastName",
            FieldPath::Age => "age",
            FieldPath::PhoneNumber => "phoneNumber",
            FieldPath::Address => "address",
            FieldPath::DateOfBirth => "dateOfBirth",
            FieldPath::Nationality => "nationality",
            FieldPath::EmploymentStatus => "employmentStatus",
            FieldPath::PreferredLanguages => "preferredLanguages",
            FieldPath::WorkExperience => "workExperience",
            FieldPath::WorkExperienceItem { index, field } => {
                return write!(f, "workExperience.{}.{}", index, field.as_str());
            }
            FieldPath::ProfilePicture => "profilePicture",
            FieldPath::TermsAccepted => "termsAccepted",
        };
        f.write_str(name)
    }
}

/// Accumulated validation failures, one message per field path.
/// Serializes as a JSON object keyed by the dotted path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<FieldPath, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// First message wins; later rules never overwrite an earlier one.
    pub fn add(&mut self, path: FieldPath, message: impl Into<String>) {
        self.0.entry(path).or_insert_with(|| message.into());
    }

    pub fn set(&mut self, path: FieldPath, message: impl Into<String>) {
        self.0.insert(path, message.into());
    }

    pub fn clear_field(&mut self, path: FieldPath) -> Option<String> {
        self.0.remove(&path)
    }

    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.0.get(&path).map(String::as_str)
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.contains_key(&path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, message) in &self.0 {
            map.serialize_entry(&path.to_string(), message)?;
        }
        map.end()
    }
}

/// Validates a draft against today's date.
pub fn validate(draft: &CvDraft) -> ErrorMap {
    validate_at(draft, today())
}

/// Runs every rule and reports every failure. `today` bounds the date of
/// birth so results do not depend on the wall clock.
pub fn validate_at(draft: &CvDraft, today: NaiveDate) -> ErrorMap {
    let mut errors = ErrorMap::new();

    check_name(&mut errors, FieldPath::FirstName, &draft.first_name, "First name");
    check_name(&mut errors, FieldPath::LastName, &draft.last_name, "Last name");

    match draft.age {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => {}
        _ => errors.add(
            FieldPath::Age,
            format!("Age must be between {MIN_AGE} and {MAX_AGE}"),
        ),
    }

    if draft.phone_number.trim().is_empty() {
        errors.add(FieldPath::PhoneNumber, "Phone number is required");
    } else if !is_digits(&draft.phone_number) {
        errors.add(FieldPath::PhoneNumber, "Only digits are allowed");
    }

    if draft.address.trim().is_empty() {
        errors.add(FieldPath::Address, "Address is required");
    }

    match draft.date_of_birth {
        None => errors.add(FieldPath::DateOfBirth, "Date of birth is required"),
        Some(dob) if dob > today => errors.add(
            FieldPath::DateOfBirth,
            "Date of birth cannot be in the future",
        ),
        Some(_) => {}
    }

    if draft.nationality.is_none() {
        errors.add(FieldPath::Nationality, "Nationality is required");
    }
    if draft.employment_status.is_none() {
        errors.add(FieldPath::EmploymentStatus, "Employment status is required");
    }
    if draft.preferred_languages.is_empty() {
        errors.add(
            FieldPath::PreferredLanguages,
            "At least one preferred language is required",
        );
    }

    if draft.work_experience.is_empty() {
        errors.add(
            FieldPath::WorkExperience,
            "At least one work experience is required",
        );
    }
    for (index, entry) in draft.work_experience.iter().enumerate() {
        check_entry(&mut errors, index, entry);
    }

    if let Some(picture) = draft.profile_picture.as_deref().filter(|p| !p.is_empty()) {
        match check_image_data_url(picture) {
            Ok(()) => {}
            Err(ImageError::NotAnImage) => {
                errors.add(FieldPath::ProfilePicture, "Please select a valid image file")
            }
            Err(ImageError::TooLarge) => {
                errors.add(FieldPath::ProfilePicture, "Image size should be less than 5MB")
            }
        }
    }

    if !draft.terms_accepted {
        errors.add(
            FieldPath::TermsAccepted,
            "You must accept the terms and conditions",
        );
    }

    errors
}

fn check_name(errors: &mut ErrorMap, path: FieldPath, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(path, format!("{label} is required"));
    } else if !is_letters_and_spaces(value) {
        errors.add(path, "Only letters are allowed");
    }
}

fn check_entry(errors: &mut ErrorMap, index: usize, entry: &WorkExperience) {
    if entry.company.trim().is_empty() {
        errors.add(FieldPath::item(index, WorkField::Company), "Company is required");
    }

    if entry.position.trim().is_empty() {
        errors.add(FieldPath::item(index, WorkField::Position), "Position is required");
    } else if !is_letters_and_spaces(&entry.position) {
        errors.add(
            FieldPath::item(index, WorkField::Position),
            "Only letters are allowed",
        );
    }

    if entry.start_date.is_empty() {
        errors.add(
            FieldPath::item(index, WorkField::StartDate),
            "Start date is required",
        );
    } else if !is_month(&entry.start_date) {
        errors.add(
            FieldPath::item(index, WorkField::StartDate),
            "Start date must be in YYYY-MM format",
        );
    }

    if !entry.is_current {
        if entry.end_date.is_empty() {
            errors.add(FieldPath::item(index, WorkField::EndDate), "End date is required");
        } else if !is_month(&entry.end_date) {
            errors.add(
                FieldPath::item(index, WorkField::EndDate),
                "End date must be in YYYY-MM format",
            );
        }
    }
}
