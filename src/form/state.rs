use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::validation::{validate, ErrorMap, FieldPath};
use crate::form::work_experience::{WorkExperienceChange, WorkExperienceEditor};
use crate::models::cv::{
    Coordinates, CvDraft, CvPatch, EmploymentStatus, Language, Nationality,
};

/// Replacement value for one top-level draft field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Age(Option<i32>),
    PhoneNumber(String),
    /// Picking an autocomplete suggestion sets both the text and the point.
    Address {
        address: String,
        coordinates: Option<Coordinates>,
    },
    DateOfBirth(Option<NaiveDate>),
    IsActive(bool),
    Nationality(Option<Nationality>),
    EmploymentStatus(Option<EmploymentStatus>),
    PreferredLanguages(BTreeSet<Language>),
    ProfilePicture(Option<String>),
    TermsAccepted(bool),
}

impl FieldUpdate {
    /// The control this field's errors are attached to, if it has any rules.
    pub fn path(&self) -> Option<FieldPath> {
        let path = match self {
            FieldUpdate::FirstName(_) => FieldPath::FirstName,
            FieldUpdate::LastName(_) => FieldPath::LastName,
            FieldUpdate::Age(_) => FieldPath::Age,
            FieldUpdate::PhoneNumber(_) => FieldPath::PhoneNumber,
            FieldUpdate::Address { .. } => FieldPath::Address,
            FieldUpdate::DateOfBirth(_) => FieldPath::DateOfBirth,
            FieldUpdate::IsActive(_) => return None,
            FieldUpdate::Nationality(_) => FieldPath::Nationality,
            FieldUpdate::EmploymentStatus(_) => FieldPath::EmploymentStatus,
            FieldUpdate::PreferredLanguages(_) => FieldPath::PreferredLanguages,
            FieldUpdate::ProfilePicture(_) => FieldPath::ProfilePicture,
            FieldUpdate::TermsAccepted(_) => FieldPath::TermsAccepted,
        };
        Some(path)
    }
}

/// The draft being edited plus the errors currently shown next to it.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    draft: CvDraft,
    errors: ErrorMap,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draft(draft: CvDraft) -> Self {
        Self {
            draft,
            errors: ErrorMap::new(),
        }
    }

    pub fn draft(&self) -> &CvDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_draft(self) -> CvDraft {
        self.draft
    }

    /// Replaces one field. Errors are left as they were.
    pub fn set_field(&mut self, update: FieldUpdate) {
        let d = &mut self.draft;
        match update {
            FieldUpdate::FirstName(v) => d.first_name = v,
            FieldUpdate::LastName(v) => d.last_name = v,
            FieldUpdate::Age(v) => d.age = v,
            FieldUpdate::PhoneNumber(v) => d.phone_number = v,
            FieldUpdate::Address {
                address,
                coordinates,
            } => {
                d.address = address;
                d.coordinates = coordinates;
            }
            FieldUpdate::DateOfBirth(v) => d.date_of_birth = v,
            FieldUpdate::IsActive(v) => d.is_active = v,
            FieldUpdate::Nationality(v) => d.nationality = v,
            FieldUpdate::EmploymentStatus(v) => d.employment_status = v,
            FieldUpdate::PreferredLanguages(v) => d.preferred_languages = v,
            FieldUpdate::ProfilePicture(v) => d.profile_picture = v,
            FieldUpdate::TermsAccepted(v) => d.terms_accepted = v,
        }
    }

    /// Replaces one field and refreshes that field's error, the way a
    /// control revalidates once the user has touched it.
    pub fn edit_field(&mut self, update: FieldUpdate) {
        let path = update.path();
        self.set_field(update);
        if let Some(path) = path {
            self.revalidate_field(path);
        }
    }

    /// Swaps in a whole new draft, e.g. when opening a stored CV for editing.
    pub fn reset(&mut self, initial: CvDraft) {
        self.draft = initial;
        self.errors.clear();
    }

    pub fn apply_patch(&mut self, patch: CvPatch) {
        patch.apply_to(&mut self.draft);
    }

    pub fn work_experience(&mut self) -> WorkExperienceEditor<'_> {
        WorkExperienceEditor::new(&mut self.draft.work_experience)
    }

    pub fn add_work_experience(&mut self) -> Uuid {
        self.work_experience().add()
    }

    pub fn remove_work_experience(&mut self, id: Uuid) -> bool {
        self.work_experience().remove(id)
    }

    pub fn update_work_experience(&mut self, id: Uuid, change: WorkExperienceChange) -> bool {
        self.work_experience().update(id, change)
    }

    /// Re-checks a single control after it changed and refreshes only its
    /// entry in the error map.
    pub fn revalidate_field(&mut self, path: FieldPath) {
        let fresh = validate(&self.draft);
        match fresh.get(path) {
            Some(message) => self.errors.set(path, message),
            None => {
                self.errors.clear_field(path);
            }
        }
    }

    /// Full validation; replaces the error map and reports whether the
    /// draft is acceptable.
    pub fn validate_all(&mut self) -> bool {
        self.errors = validate(&self.draft);
        self.errors.is_empty()
    }

    pub(crate) fn replace_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }
}
