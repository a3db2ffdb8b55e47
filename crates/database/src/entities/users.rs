use models::role::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff account. Credentials are managed elsewhere; this crate only reads them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// Career a program head is responsible for
    pub career: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
