use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cv::WorkExperience;

/// A single-field edit of one work-experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum WorkExperienceChange {
    Company(String),
    Position(String),
    StartDate(String),
    EndDate(String),
    Description(String),
    IsCurrent(bool),
}

/// Editor over the ordered work-experience list of a draft.
pub struct WorkExperienceEditor<'a> {
    entries: &'a mut Vec<WorkExperience>,
}

impl<'a> WorkExperienceEditor<'a> {
    pub fn new(entries: &'a mut Vec<WorkExperience>) -> Self {
        Self { entries }
    }

    /// Appends a blank entry and returns its id.
    pub fn add(&mut self) -> Uuid {
        let entry = WorkExperience::blank();
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Removes the entry with `id`, keeping the others in order.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Applies `change` to the entry with `id`. Marking an entry as current
    /// clears its end date in the same step.
    pub fn update(&mut self, id: Uuid, change: WorkExperienceChange) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match change {
            WorkExperienceChange::Company(v) => entry.company = v,
            WorkExperienceChange::Position(v) => entry.position = v,
            WorkExperienceChange::StartDate(v) => entry.start_date = v,
            WorkExperienceChange::EndDate(v) => entry.end_date = v,
            WorkExperienceChange::Description(v) => entry.description = v,
            WorkExperienceChange::IsCurrent(current) => {
                entry.is_current = current;
                if current {
                    entry.end_date.clear();
                }
            }
        }
        true
    }

    pub fn get(&self, id: Uuid) -> Option<&WorkExperience> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
