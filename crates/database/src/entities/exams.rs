use models::exam_status::ExamStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub exam_type: String, // e.g. "PARCIAL"
    pub subject_id: i32,
    pub room_id: Option<i32>,
    pub group_id: Option<i32>,
    /// Professor sitting alongside the instructor of record
    pub second_examiner_id: Option<i32>,
    pub status: ExamStatus,
    pub rejection_comment: Option<String>,
    pub submitted_at: Option<Date>,
    pub approved_at: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::RoomId",
        to = "super::rooms::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::SecondExaminerId",
        to = "super::professors::Column::Id"
    )]
    SecondExaminer,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SecondExaminer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
