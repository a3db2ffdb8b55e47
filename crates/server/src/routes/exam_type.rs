use crate::{dtos::schedule::ExamTypeResponse, error::AppError, state::AppState};
use axum::{Json, extract::State};
use database::services::schedule::ScheduleService;

/// List the exam types available for direct creation
#[utoipa::path(
    get,
    path = "/exam-types",
    responses(
        (status = 200, description = "Exam types retrieved successfully", body = Vec<ExamTypeResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn get_exam_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamTypeResponse>>, AppError> {
    let exam_types = ScheduleService::get_exam_types(&state.db).await?;

    Ok(Json(
        exam_types.into_iter().map(ExamTypeResponse::from).collect(),
    ))
}
