use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub capacity: Option<i32>,
    pub room_type: Option<String>, // e.g. "LAB"
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weekly_slots::Entity")]
    WeeklySlots,
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
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
