use crate::{
    dtos::exam::{
        CreateExamRequest, ExamResponse, GenerateExamsParams, SecondExaminerRequest,
        StatusUpdateRequest,
    },
    error::{ApiError, AppError},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::{
    assembler::ExamRecord, exam::ExamService, generate_exams::ExamGeneratorService,
    query_exam::QueryExamService,
};

fn to_responses(records: Vec<ExamRecord>) -> Vec<ExamResponse> {
    records.into_iter().map(ExamResponse::from).collect()
}

/// List every exam with its subject, room, group, and second examiner
#[utoipa::path(
    get,
    path = "/exams",
    responses(
        (status = 200, description = "Exams retrieved successfully", body = Vec<ExamResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn get_exams(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamResponse>>, AppError> {
    let exams = QueryExamService::get_exams(&state.db).await?;

    Ok(Json(to_responses(exams)))
}

/// Get a specific exam by ID
#[utoipa::path(
    get,
    path = "/exams/{id}",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Exam found", body = ExamResponse),
        (status = 404, description = "Exam not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn get_exam_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ExamResponse>, AppError> {
    let exam = QueryExamService::get_exam_by_id(&state.db, id).await?;

    Ok(Json(exam.into()))
}

/// Create a single draft exam
#[utoipa::path(
    post,
    path = "/exams",
    request_body = CreateExamRequest,
    responses(
        (status = 201, description = "Exam created", body = ExamResponse),
        (status = 404, description = "Unknown exam type, subject, room, or group", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn create_exam(
    State(state): State<AppState>,
    Json(request): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<ExamResponse>), AppError> {
    let exam = ExamService::create_exam(&state.db, request.into()).await?;

    Ok((StatusCode::CREATED, Json(exam.into())))
}

/// Replace a career's exams with a calendar derived from a group's weekly slots
#[utoipa::path(
    post,
    path = "/generate-exams",
    params(GenerateExamsParams),
    responses(
        (status = 200, description = "Exams generated; only the new batch is returned", body = Vec<ExamResponse>),
        (status = 404, description = "Career or group missing, or nothing to generate", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn generate_exams(
    State(state): State<AppState>,
    Query(params): Query<GenerateExamsParams>,
) -> Result<Json<Vec<ExamResponse>>, AppError> {
    let exams =
        ExamGeneratorService::generate(&state.db, params.career_id, params.group_id).await?;

    Ok(Json(to_responses(exams)))
}

/// Set or clear the second examiner of an exam
#[utoipa::path(
    put,
    path = "/exams/{id}/second-examiner",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    request_body = SecondExaminerRequest,
    responses(
        (status = 200, description = "Assignment saved", body = ExamResponse),
        (status = 400, description = "Examiner is the subject's instructor", body = ApiError),
        (status = 404, description = "Exam or professor not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn assign_second_examiner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SecondExaminerRequest>,
) -> Result<Json<ExamResponse>, AppError> {
    let exam =
        ExamService::assign_second_examiner(&state.db, id, request.second_examiner_id).await?;

    Ok(Json(exam.into()))
}

/// Move an exam through review
#[utoipa::path(
    put,
    path = "/exams/{id}/status",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = ExamResponse),
        (status = 404, description = "Exam not found", body = ApiError),
        (status = 409, description = "Transition not allowed from the current status", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Exams"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ExamResponse>, AppError> {
    let exam =
        ExamService::update_status(&state.db, id, request.status, request.rejection_comment)
            .await?;

    Ok(Json(exam.into()))
}
