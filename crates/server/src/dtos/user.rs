use database::entities::users;
use models::role::Role;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    #[schema(value_type = String, example = "program_head")]
    pub role: Role,
    pub email: Option<String>,
    pub career: Option<String>,
    pub is_active: bool,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            email: user.email,
            career: user.career,
            is_active: user.is_active,
        }
    }
}
