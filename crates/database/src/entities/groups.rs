use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A cohort of students sharing one weekly schedule
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub label: String, // e.g. "3A"
    pub career_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::careers::Entity",
        from = "Column::CareerId",
        to = "super::careers::Column::Id"
    )]
    Career,
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
