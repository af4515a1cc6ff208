use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Nationality {
    American,
    British,
    Canadian,
    Australian,
    German,
    French,
    Spanish,
    Italian,
    Japanese,
    Chinese,
    Indian,
    Brazilian,
    #[serde(rename = "Sri Lankan")]
    SriLankan,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    Student,
    Retired,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Chinese,
    Japanese,
    Arabic,
    Russian,
    Dutch,
    Swedish,
    Sinhala,
    Tamil,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One entry of the work-experience list. Month fields use the `YYYY-MM`
/// form produced by month pickers; an empty string means "not set".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_current: bool,
}

impl WorkExperience {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            is_current: false,
        }
    }
}

/// The in-progress CV. Every field tolerates being missing on the wire so a
/// half-filled form deserializes and gets reported by validation instead of
/// being rejected by the JSON extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub phone_number: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub nationality: Option<Nationality>,
    pub employment_status: Option<EmploymentStatus>,
    pub preferred_languages: BTreeSet<Language>,
    pub work_experience: Vec<WorkExperience>,
    pub profile_picture: Option<String>,
    pub terms_accepted: bool,
}

impl Default for CvDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            age: None,
            phone_number: String::new(),
            address: String::new(),
            coordinates: None,
            date_of_birth: None,
            is_active: true,
            nationality: None,
            employment_status: None,
            preferred_languages: BTreeSet::new(),
            work_experience: Vec::new(),
            profile_picture: None,
            terms_accepted: false,
        }
    }
}

/// Partial update of a stored CV. Absent fields keep their stored value.
/// Nullable fields distinguish absent (`None`) from an explicit `null`
/// (`Some(None)`), which clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub age: Option<Option<i32>>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Option<Coordinates>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub nationality: Option<Option<Nationality>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<Option<EmploymentStatus>>,
    pub preferred_languages: Option<BTreeSet<Language>>,
    pub work_experience: Option<Vec<WorkExperience>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Option<String>>,
    pub terms_accepted: Option<bool>,
}

impl CvPatch {
    pub fn is_empty(&self) -> bool {
        *self == CvPatch::default()
    }

    /// Merges every present field into `draft`.
    pub fn apply_to(self, draft: &mut CvDraft) {
        if let Some(v) = self.first_name {
            draft.first_name = v;
        }
        if let Some(v) = self.last_name {
            draft.last_name = v;
        }
        if let Some(v) = self.age {
            draft.age = v;
        }
        if let Some(v) = self.phone_number {
            draft.phone_number = v;
        }
        if let Some(v) = self.address {
            draft.address = v;
        }
        if let Some(v) = self.coordinates {
            draft.coordinates = v;
        }
        if let Some(v) = self.date_of_birth {
            draft.date_of_birth = v;
        }
        if let Some(v) = self.is_active {
            draft.is_active = v;
        }
        if let Some(v) = self.nationality {
            draft.nationality = v;
        }
        if let Some(v) = self.employment_status {
            draft.employment_status = v;
        }
        if let Some(v) = self.preferred_languages {
            draft.preferred_languages = v;
        }
        if let Some(v) = self.work_experience {
            draft.work_experience = v;
        }
        if let Some(v) = self.profile_picture {
            draft.profile_picture = v;
        }
        if let Some(v) = self.terms_accepted {
            draft.terms_accepted = v;
        }
    }
}

/// Every field present, so applying it overwrites the whole stored draft.
impl From<CvDraft> for CvPatch {
    fn from(draft: CvDraft) -> Self {
        Self {
            first_name: Some(draft.first_name),
            last_name: Some(draft.last_name),
            age: Some(draft.age),
            phone_number: Some(draft.phone_number),
            address: Some(draft.address),
            coordinates: Some(draft.coordinates),
            date_of_birth: Some(draft.date_of_birth),
            is_active: Some(draft.is_active),
            nationality: Some(draft.nationality),
            employment_status: Some(draft.employment_status),
            preferred_languages: Some(draft.preferred_languages),
            work_experience: Some(draft.work_experience),
            profile_picture: Some(draft.profile_picture),
            terms_accepted: Some(draft.terms_accepted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub data: CvDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CvRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.data.first_name, self.data.last_name)
    }
}

/// Database row: the draft lives in a JSONB column.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CvRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub data: sqlx::types::Json<CvDraft>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CvRow> for CvRecord {
    fn from(row: CvRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    pub fn matches(self, is_active: bool) -> bool {
        match self {
            ActiveFilter::All => true,
            ActiveFilter::Active => is_active,
            ActiveFilter::Inactive => !is_active,
        }
    }
}
