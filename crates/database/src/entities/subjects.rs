use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub career_id: Option<i32>,
    /// Instructor of record
    pub professor_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::careers::Entity",
        from = "Column::CareerId",
        to = "super::careers::Column::Id"
    )]
    Career,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id"
    )]
    Professor,
    #[sea_orm(has_many = "super::weekly_slots::Entity")]
    WeeklySlots,
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
}

impl Related<super::careers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Career.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::weekly_slots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklySlots.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
