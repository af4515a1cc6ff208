use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::cv_dto::{CvListQuery, CvListResponse, CvStatsResponse, ValidateResponse},
    error::Result,
    middleware::auth::CurrentUser,
    models::cv::{CvDraft, CvPatch, CvRecord},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/cvs/validate",
    request_body = CvDraft,
    responses(
        (status = 200, description = "Field errors for the draft, if any", body = Json<ValidateResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn validate_cv(
    State(state): State<AppState>,
    Json(draft): Json<CvDraft>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.cv_service.validate(&draft)))
}

#[utoipa::path(
    post,
    path = "/api/cvs",
    request_body = CvDraft,
    responses(
        (status = 201, description = "CV saved", body = Json<CvRecord>),
        (status = 422, description = "Validation failed")
    )
)]
#[axum::debug_handler]
pub async fn create_cv(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(draft): Json<CvDraft>,
) -> Result<impl IntoResponse> {
    let record = state.cv_service.submit_new(user.id, draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/cvs",
    params(
        ("search" = Option<String>, Query, description = "Matches name, address or phone"),
        ("status" = Option<String>, Query, description = "all, active or inactive")
    ),
    responses(
        (status = 200, description = "The caller's CVs, newest first", body = Json<CvListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_cvs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<CvListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.cv_service.list(user.id, query).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/cvs/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = Json<CvStatsResponse>)
    )
)]
#[axum::debug_handler]
pub async fn cv_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let stats = state.cv_service.stats(user.id).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/cvs/{id}",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 200, description = "CV found", body = Json<CvRecord>),
        (status = 404, description = "CV not found")
    )
)]
#[axum::debug_handler]
pub async fn get_cv(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let record = state.cv_service.get(id, user.id).await?;
    Ok(Json(record))
}

#[utoipa::path(
    put,
    path = "/api/cvs/{id}",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    request_body = CvDraft,
    responses(
        (status = 200, description = "CV updated", body = Json<CvRecord>),
        (status = 404, description = "CV not found"),
        (status = 422, description = "Validation failed")
    )
)]
#[axum::debug_handler]
pub async fn replace_cv(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(draft): Json<CvDraft>,
) -> Result<impl IntoResponse> {
    let record = state.cv_service.submit_edit(id, user.id, draft).await?;
    Ok(Json(record))
}

#[utoipa::path(
    patch,
    path = "/api/cvs/{id}",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    request_body = CvPatch,
    responses(
        (status = 200, description = "CV updated", body = Json<CvRecord>),
        (status = 404, description = "CV not found"),
        (status = 422, description = "Validation failed")
    )
)]
#[axum::debug_handler]
pub async fn patch_cv(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CvPatch>,
) -> Result<impl IntoResponse> {
    let record = state.cv_service.patch(id, user.id, patch).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/cvs/{id}",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 204, description = "CV deleted"),
        (status = 404, description = "CV not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_cv(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.cv_service.delete(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
