use crate::{
    dtos::schedule::{SubjectQueryParams, SubjectResponse},
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use database::services::schedule::ScheduleService;

/// List subjects, optionally for a single career
#[utoipa::path(
    get,
    path = "/subjects",
    params(SubjectQueryParams),
    responses(
        (status = 200, description = "Subjects retrieved successfully", body = Vec<SubjectResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedule"
)]
pub async fn get_subjects(
    State(state): State<AppState>,
    Query(params): Query<SubjectQueryParams>,
) -> Result<Json<Vec<SubjectResponse>>, AppError> {
    let subjects = ScheduleService::get_subjects(&state.db, params.career_id).await?;

    Ok(Json(subjects.into_iter().map(SubjectResponse::from).collect()))
}
