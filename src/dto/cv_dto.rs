use serde::{Deserialize, Serialize};

use crate::form::validation::ErrorMap;
use crate::models::cv::{ActiveFilter, CvRecord};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CvListQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub status: ActiveFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct CvListResponse {
    pub cvs: Vec<CvRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CvStatsResponse {
    pub total: usize,
    pub active: usize,
    pub recent: Vec<CvRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: ErrorMap,
}

impl From<ErrorMap> for ValidateResponse {
    fn from(errors: ErrorMap) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}
