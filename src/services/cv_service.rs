use std::sync::Arc;

use uuid::Uuid;

use crate::dto::cv_dto::{CvListQuery, CvListResponse, CvStatsResponse, ValidateResponse};
use crate::error::{Error, Result};
use crate::form::submission::{FormSession, SubmitOutcome};
use crate::form::validation::validate;
use crate::models::cv::{CvDraft, CvPatch, CvRecord};
use crate::services::cv_store::CvStore;

const RECENT_LIMIT: usize = 3;

#[derive(Clone)]
pub struct CvService {
    store: Arc<dyn CvStore>,
}

impl CvService {
    pub fn new(store: Arc<dyn CvStore>) -> Self {
        Self { store }
    }

    pub fn validate(&self, draft: &CvDraft) -> ValidateResponse {
        validate(draft).into()
    }

    pub async fn submit_new(&self, owner_id: Uuid, draft: CvDraft) -> Result<CvRecord> {
        let mut session = FormSession::new(owner_id);
        session.form_mut().reset(draft);
        self.finish(session, owner_id).await
    }

    /// Replaces the whole stored draft of `id`.
    pub async fn submit_edit(&self, id: Uuid, owner_id: Uuid, draft: CvDraft) -> Result<CvRecord> {
        let current = self.get(id, owner_id).await?;
        let mut session = FormSession::edit(owner_id, id, current.data);
        session.form_mut().reset(draft);
        self.finish(session, owner_id).await
    }

    /// Merges `patch` into the stored draft; the merged result has to pass
    /// validation like any other submission.
    pub async fn patch(&self, id: Uuid, owner_id: Uuid, patch: CvPatch) -> Result<CvRecord> {
        let current = self.get(id, owner_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }
        let mut session = FormSession::edit(owner_id, id, current.data);
        session.form_mut().apply_patch(patch);
        self.finish(session, owner_id).await
    }

    pub async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<CvRecord> {
        self.store
            .get_by_id(id, owner_id)
            .await?
            .ok_or_else(|| Error::NotFound("CV not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<()> {
        if self.store.delete(id, owner_id).await? {
            tracing::info!(cv_id = %id, owner_id = %owner_id, "cv deleted");
            Ok(())
        } else {
            Err(Error::NotFound("CV not found".to_string()))
        }
    }

    pub async fn list(&self, owner_id: Uuid, query: CvListQuery) -> Result<CvListResponse> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let cvs: Vec<CvRecord> = self
            .store
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .filter(|cv| query.status.matches(cv.data.is_active))
            .filter(|cv| needle.as_deref().map_or(true, |n| matches_search(cv, n)))
            .collect();

        Ok(CvListResponse {
            total: cvs.len(),
            cvs,
        })
    }

    pub async fn stats(&self, owner_id: Uuid) -> Result<CvStatsResponse> {
        let all = self.store.list_by_owner(owner_id).await?;
        let active = all.iter().filter(|cv| cv.data.is_active).count();
        Ok(CvStatsResponse {
            total: all.len(),
            active,
            recent: all.into_iter().take(RECENT_LIMIT).collect(),
        })
    }

    async fn finish(&self, mut session: FormSession, owner_id: Uuid) -> Result<CvRecord> {
        match session.submit(self.store.as_ref()).await {
            SubmitOutcome::Saved(id) | SubmitOutcome::AlreadySaved(id) => self.get(id, owner_id).await,
            SubmitOutcome::Rejected(errors) => Err(Error::Form(errors)),
            SubmitOutcome::Failed(message) => Err(Error::Internal(message)),
        }
    }
}

/// `needle` is already lowercased. Matching on the full name covers first
/// and last name alone as well as "first last". Phone numbers are digits
/// only, so they are matched as-is.
fn matches_search(cv: &CvRecord, needle: &str) -> bool {
    cv.full_name().to_lowercase().contains(needle)
        || cv.data.address.to_lowercase().contains(needle)
        || cv.data.phone_number.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::submission::SAVE_FAILED_MESSAGE;
    use crate::form::validation::FieldPath;
    use crate::models::cv::{
        ActiveFilter, EmploymentStatus, Language, Nationality, WorkExperience,
    };
    use crate::services::cv_store::{MemoryCvStore, MockCvStore};
    use chrono::NaiveDate;

    fn valid_draft(first: &str, last: &str) -> CvDraft {
        CvDraft {
            first_name: first.into(),
            last_name: last.into(),
            age: Some(30),
            phone_number: "5551234567".into(),
            address: "221B Baker Street".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 5, 1),
            nationality: Some(Nationality::British),
            employment_status: Some(EmploymentStatus::Employed),
            preferred_languages: [Language::English].into_iter().collect(),
            work_experience: vec![WorkExperience {
                company: "Acme".into(),
                position: "Engineer".into(),
                start_date: "2020-01".into(),
                end_date: "2021-01".into(),
                ..WorkExperience::blank()
            }],
            terms_accepted: true,
            ..CvDraft::default()
        }
    }

    fn service() -> CvService {
        CvService::new(Arc::new(MemoryCvStore::new()))
    }

    #[tokio::test]
    async fn submit_new_returns_stored_record() {
        let svc = service();
        let owner = Uuid::new_v4();
        let record = svc.submit_new(owner, valid_draft("John", "Doe")).await.unwrap();
        assert_eq!(record.owner_id, owner);
        assert_eq!(record.full_name(), "John Doe");
        assert_eq!(svc.get(record.id, owner).await.unwrap(), record);
    }

    #[tokio::test]
    async fn invalid_submission_maps_to_form_error() {
        let svc = service();
        let mut draft = valid_draft("John", "Doe");
        draft.age = Some(15);
        match svc.submit_new(Uuid::new_v4(), draft).await {
            Err(Error::Form(errors)) => assert!(errors.contains(FieldPath::Age)),
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn store_failure_maps_to_internal_error() {
        let mut mock = MockCvStore::new();
        mock.expect_create()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));
        let svc = CvService::new(Arc::new(mock));
        match svc.submit_new(Uuid::new_v4(), valid_draft("John", "Doe")).await {
            Err(Error::Internal(msg)) => assert_eq!(msg, SAVE_FAILED_MESSAGE),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn edit_of_foreign_record_is_not_found() {
        let svc = service();
        let owner = Uuid::new_v4();
        let record = svc.submit_new(owner, valid_draft("John", "Doe")).await.unwrap();
        let err = svc
            .submit_edit(record.id, Uuid::new_v4(), valid_draft("Eve", "Doe"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(matches!(
            svc.delete(record.id, Uuid::new_v4()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn patch_merges_and_revalidates() {
        let svc = service();
        let owner = Uuid::new_v4();
        let record = svc.submit_new(owner, valid_draft("John", "Doe")).await.unwrap();

        let toggled = svc
            .patch(
                record.id,
                owner,
                CvPatch {
                    is_active: Some(false),
                    ..CvPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(!toggled.data.is_active);
        assert_eq!(toggled.data.last_name, "Doe");

        let bad = CvPatch {
            phone_number: Some("12ab".into()),
            ..CvPatch::default()
        };
        match svc.patch(record.id, owner, bad).await {
            Err(Error::Form(errors)) => assert!(errors.contains(FieldPath::PhoneNumber)),
            other => panic!("expected form error, got {other:?}"),
        }
        assert_eq!(
            svc.get(record.id, owner).await.unwrap().data.phone_number,
            "5551234567"
        );
    }

    #[tokio::test]
    async fn list_filters_by_search_and_status() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.submit_new(owner, valid_draft("John", "Doe")).await.unwrap();
        let mut inactive = valid_draft("Jane", "Roe");
        inactive.is_active = false;
        inactive.phone_number = "9998887777".into();
        svc.submit_new(owner, inactive).await.unwrap();
        svc.submit_new(Uuid::new_v4(), valid_draft("Johnny", "Other"))
            .await
            .unwrap();

        let all = svc.list(owner, CvListQuery::default()).await.unwrap();
        assert_eq!(all.total, 2);

        let by_name = svc
            .list(
                owner,
                CvListQuery {
                    search: Some("JOHN".into()),
                    status: ActiveFilter::All,
                },
            )
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.cvs[0].data.first_name, "John");

        let by_full_name = svc
            .list(
                owner,
                CvListQuery {
                    search: Some("jane roe".into()),
                    status: ActiveFilter::All,
                },
            )
            .await
            .unwrap();
        assert_eq!(by_full_name.total, 1);
        assert_eq!(by_full_name.cvs[0].data.first_name, "Jane");

        let by_phone = svc
            .list(
                owner,
                CvListQuery {
                    search: Some("888".into()),
                    status: ActiveFilter::All,
                },
            )
            .await
            .unwrap();
        assert_eq!(by_phone.cvs[0].data.first_name, "Jane");

        let inactive_only = svc
            .list(
                owner,
                CvListQuery {
                    search: None,
                    status: ActiveFilter::Inactive,
                },
            )
            .await
            .unwrap();
        assert_eq!(inactive_only.total, 1);
        assert!(!inactive_only.cvs[0].data.is_active);
    }

    #[tokio::test]
    async fn stats_count_active_and_cap_recent() {
        let svc = service();
        let owner = Uuid::new_v4();
        for i in 0..4 {
            let mut draft = valid_draft("John", "Doe");
            draft.is_active = i % 2 == 0;
            svc.submit_new(owner, draft).await.unwrap();
        }
        let stats = svc.stats(owner).await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.recent.len(), RECENT_LIMIT);
    }

    #[test]
    fn validate_reports_without_saving() {
        let svc = service();
        let response = svc.validate(&CvDraft::default());
        assert!(!response.valid);
        assert!(response.errors.contains(FieldPath::FirstName));
        assert!(svc.validate(&valid_draft("John", "Doe")).valid);
    }
}
