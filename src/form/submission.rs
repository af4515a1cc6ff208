use serde::Serialize;
use uuid::Uuid;

use crate::form::state::FormStore;
use crate::form::validation::{validate, ErrorMap};
use crate::models::cv::{CvDraft, CvPatch};
use crate::services::cv_store::CvStore;

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save CV. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Editing,
    Validating,
    Submitting,
    Saved,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the errors are also on the session's store.
    Rejected(ErrorMap),
    Saved(Uuid),
    /// The store failed. The draft is intact and can be resubmitted.
    Failed(String),
    /// The session already saved once.
    AlreadySaved(Uuid),
}

/// One editing session of one CV: the draft, its errors, the record it is
/// bound to (if editing) and where the submission currently stands.
#[derive(Debug, Clone)]
pub struct FormSession {
    owner_id: Uuid,
    bound_id: Option<Uuid>,
    store: FormStore,
    state: SubmissionState,
    saved_id: Option<Uuid>,
    submit_error: Option<String>,
}

impl FormSession {
    /// A session for a brand-new CV.
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            bound_id: None,
            store: FormStore::new(),
            state: SubmissionState::Editing,
            saved_id: None,
            submit_error: None,
        }
    }

    /// A session editing the stored CV `id`, hydrated from `current`.
    pub fn edit(owner_id: Uuid, id: Uuid, current: CvDraft) -> Self {
        let mut session = Self::new(owner_id);
        session.bound_id = Some(id);
        session.store.reset(current);
        session
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn form(&self) -> &FormStore {
        &self.store
    }

    /// Mutable access for field edits. Editing never leaves `Editing`.
    pub fn form_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    pub fn draft(&self) -> &CvDraft {
        self.store.draft()
    }

    pub fn bound_id(&self) -> Option<Uuid> {
        self.bound_id
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Validates and, if the draft is clean, hands it to `cv_store`: create
    /// for a new session, update for an edit session.
    pub async fn submit<S>(&mut self, cv_store: &S) -> SubmitOutcome
    where
        S: CvStore + ?Sized,
    {
        if let Some(id) = self.saved_id {
            return SubmitOutcome::AlreadySaved(id);
        }

        self.state = SubmissionState::Validating;
        self.submit_error = None;
        let errors = validate(self.store.draft());
        self.store.replace_errors(errors.clone());
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "cv draft rejected by validation");
            self.state = SubmissionState::Editing;
            return SubmitOutcome::Rejected(errors);
        }

        self.state = SubmissionState::Submitting;
        let result = match self.bound_id {
            None => cv_store.create(self.owner_id, self.store.draft()).await,
            Some(id) => {
                let patch = CvPatch::from(self.store.draft().clone());
                match cv_store.update(id, self.owner_id, patch).await {
                    Ok(true) => Ok(id),
                    Ok(false) => Err(anyhow::anyhow!("cv {id} not found for owner")),
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(id) => {
                tracing::info!(cv_id = %id, owner_id = %self.owner_id, "cv saved");
                self.state = SubmissionState::Saved;
                self.saved_id = Some(id);
                SubmitOutcome::Saved(id)
            }
            Err(e) => {
                tracing::error!(error = ?e, owner_id = %self.owner_id, "failed to save cv");
                self.state = SubmissionState::Editing;
                self.submit_error = Some(SAVE_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed(SAVE_FAILED_MESSAGE.to_string())
            }
        }
    }
}
