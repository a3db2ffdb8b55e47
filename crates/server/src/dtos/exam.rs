use crate::dtos::schedule::{GroupSummary, ProfessorResponse, RoomResponse, SubjectResponse};
use chrono::{NaiveDate, NaiveTime};
use database::services::{assembler::ExamRecord, exam::NewExam};
use models::exam_status::ExamStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResponse {
    pub id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exam_type: String,
    #[schema(value_type = String, example = "draft")]
    pub status: ExamStatus,
    pub rejection_comment: Option<String>,
    pub submitted_at: Option<NaiveDate>,
    pub approved_at: Option<NaiveDate>,
    pub subject_id: i32,
    pub room_id: Option<i32>,
    pub group_id: Option<i32>,
    pub second_examiner_id: Option<i32>,
    pub subject: Option<SubjectResponse>,
    pub room: Option<RoomResponse>,
    pub group: Option<GroupSummary>,
    pub second_examiner: Option<ProfessorResponse>,
}

impl From<ExamRecord> for ExamResponse {
    fn from(record: ExamRecord) -> Self {
        let group_id = record.group_id();
        let exam = record.exam;

        Self {
            id: exam.id,
            date: exam.date,
            start_time: exam.start_time,
            end_time: exam.end_time,
            exam_type: exam.exam_type,
            status: exam.status,
            rejection_comment: exam.rejection_comment,
            submitted_at: exam.submitted_at,
            approved_at: exam.approved_at,
            subject_id: exam.subject_id,
            room_id: exam.room_id,
            group_id,
            second_examiner_id: exam.second_examiner_id,
            subject: record.subject.map(SubjectResponse::from),
            room: record.room.map(RoomResponse::from),
            group: record.group.map(GroupSummary::from),
            second_examiner: record.second_examiner.map(ProfessorResponse::from),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GenerateExamsParams {
    pub career_id: i32,
    /// Group whose weekly timetable is used
    pub group_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExamRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exam_type_id: i32,
    pub subject_id: i32,
    pub room_id: i32,
    pub group_id: i32,
}

impl From<CreateExamRequest> for NewExam {
    fn from(request: CreateExamRequest) -> Self {
        Self {
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            exam_type_id: request.exam_type_id,
            subject_id: request.subject_id,
            room_id: request.room_id,
            group_id: request.group_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SecondExaminerRequest {
    /// `null` clears the assignment
    pub second_examiner_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(value_type = String, example = "submitted")]
    pub status: ExamStatus,
    /// Kept only when rejecting
    pub rejection_comment: Option<String>,
}
