use models::exam_status::TransitionError;
use sea_orm::{DbErr, SqlErr};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the scheduling services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A referenced row does not exist, or there was nothing to act on
    #[error("{0}")]
    NotFound(String),
    /// A unique field is already taken
    #[error("{0}")]
    Conflict(String),
    /// The second examiner is the subject's own instructor
    #[error("{0}")]
    InvalidAssignment(String),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("persistence failure: {0}")]
    Persistence(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }

    /// Classifies a failed write: unique violations become `Conflict`,
    /// dangling references become `NotFound`.
    pub fn from_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::NotFound(msg),
            _ => Self::Persistence(err),
        }
    }
}
