use chrono::NaiveTime;
use database::{
    entities::{exam_types, groups, professors, rooms},
    services::assembler::SubjectRecord,
};
use models::weekday::Weekday;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CareerResponse {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub groups: Vec<GroupResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponse {
    pub id: i32,
    pub label: String,
    pub career_id: i32,
    pub weekly_slots: Vec<WeeklySlotResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklySlotResponse {
    pub id: i32,
    #[schema(value_type = String, example = "MONDAY")]
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub group_id: i32,
    pub subject: Option<SubjectResponse>,
    pub room: Option<RoomResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i32,
    pub name: String,
    pub career_id: Option<i32>,
    pub career_name: Option<String>,
    pub professor: Option<ProfessorResponse>,
}

impl From<SubjectRecord> for SubjectResponse {
    fn from(record: SubjectRecord) -> Self {
        Self {
            id: record.subject.id,
            name: record.subject.name,
            career_id: record.subject.career_id,
            career_name: record.career_name,
            professor: record.professor.map(ProfessorResponse::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfessorResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}

impl From<professors::Model> for ProfessorResponse {
    fn from(professor: professors::Model) -> Self {
        Self {
            id: professor.id,
            name: professor.name,
            email: professor.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: i32,
    pub name: String,
    pub capacity: Option<i32>,
    pub room_type: Option<String>,
}

impl From<rooms::Model> for RoomResponse {
    fn from(room: rooms::Model) -> Self {
        Self {
            id: room.id,
            name: room.name,
            capacity: room.capacity,
            room_type: room.room_type,
        }
    }
}

/// A group without its timetable
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupSummary {
    pub id: i32,
    pub label: String,
    pub career_id: i32,
}

impl From<groups::Model> for GroupSummary {
    fn from(group: groups::Model) -> Self {
        Self {
            id: group.id,
            label: group.label,
            career_id: group.career_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamTypeResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<exam_types::Model> for ExamTypeResponse {
    fn from(exam_type: exam_types::Model) -> Self {
        Self {
            id: exam_type.id,
            name: exam_type.name,
            description: exam_type.description,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubjectQueryParams {
    /// Only subjects of this career
    pub career_id: Option<i32>,
}
