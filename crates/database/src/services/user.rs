use crate::{
    entities::users,
    services::error::{ServiceError, ServiceResult},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

pub struct UserService;

impl UserService {
    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> ServiceResult<users::Model> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {username} not found")))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::setup_db;
    use models::role::Role;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};

    #[tokio::test]
    async fn test_find_by_username() {
        let db = setup_db().await;
        users::ActiveModel {
            username: Set("jefa.informatica".to_string()),
            password_hash: Set("$argon2id$placeholder".to_string()),
            role: Set(Role::ProgramHead),
            email: Set(None),
            career: Set(Some("Informatics".to_string())),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let user = UserService::find_by_username(&db, "jefa.informatica")
            .await
            .unwrap();
        assert_eq!(user.role, Role::ProgramHead);
        assert_eq!(user.career.as_deref(), Some("Informatics"));

        assert!(matches!(
            UserService::find_by_username(&db, "nobody").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
