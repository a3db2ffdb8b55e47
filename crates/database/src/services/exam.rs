use crate::{
    entities::{exam_types, exams, groups, professors, rooms, subjects},
    services::{
        assembler::{Assembler, ExamRecord},
        error::{ServiceError, ServiceResult},
    },
};
use chrono::{Local, NaiveDate};
use log::info;
use models::exam_status::ExamStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DatabaseTransaction, EntityTrait,
    TransactionTrait,
    prelude::{Date, Time},
};

/// Fields for a directly created exam
#[derive(Clone, Debug)]
pub struct NewExam {
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub exam_type_id: i32,
    pub subject_id: i32,
    pub room_id: i32,
    pub group_id: i32,
}

/// Owns the lifecycle of exam rows outside of bulk generation
pub struct ExamService;

impl ExamService {
    pub const INSTRUCTOR_AS_EXAMINER: &'static str =
        "examiner cannot be the instructor of record";

    /// Insert a single draft exam, naming it after the chosen exam type
    pub async fn create_exam(
        db: &DatabaseConnection,
        new_exam: NewExam,
    ) -> ServiceResult<ExamRecord> {
        let txn = db.begin().await?;

        let exam_type = exam_types::Entity::find_by_id(new_exam.exam_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Exam type", new_exam.exam_type_id))?;

        if subjects::Entity::find_by_id(new_exam.subject_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Subject", new_exam.subject_id));
        }
        if rooms::Entity::find_by_id(new_exam.room_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Room", new_exam.room_id));
        }
        if groups::Entity::find_by_id(new_exam.group_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Group", new_exam.group_id));
        }

        let exam = exams::ActiveModel {
            date: Set(new_exam.date),
            start_time: Set(new_exam.start_time),
            end_time: Set(new_exam.end_time),
            exam_type: Set(exam_type.name),
            subject_id: Set(new_exam.subject_id),
            room_id: Set(Some(new_exam.room_id)),
            group_id: Set(Some(new_exam.group_id)),
            status: Set(ExamStatus::Draft),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::from_write)?;

        info!("Created exam {} for subject {}", exam.id, exam.subject_id);
        Self::finish(txn, exam).await
    }

    /// Set or clear the second examiner of an exam
    pub async fn assign_second_examiner(
        db: &DatabaseConnection,
        exam_id: i32,
        professor_id: Option<i32>,
    ) -> ServiceResult<ExamRecord> {
        let txn = db.begin().await?;
        let exam = Self::find_exam(&txn, exam_id).await?;

        if let Some(professor_id) = professor_id {
            if professors::Entity::find_by_id(professor_id)
                .one(&txn)
                .await?
                .is_none()
            {
                return Err(ServiceError::not_found("Professor", professor_id));
            }

            let instructor_id = subjects::Entity::find_by_id(exam.subject_id)
                .one(&txn)
                .await?
                .and_then(|s| s.professor_id);

            if instructor_id == Some(professor_id) {
                return Err(ServiceError::InvalidAssignment(
                    Self::INSTRUCTOR_AS_EXAMINER.to_string(),
                ));
            }
        }

        let mut active: exams::ActiveModel = exam.into();
        active.second_examiner_id = Set(professor_id);
        let exam = active.update(&txn).await?;

        Self::finish(txn, exam).await
    }

    /// Move an exam through its review states, stamping today's date
    pub async fn update_status(
        db: &DatabaseConnection,
        exam_id: i32,
        next: ExamStatus,
        rejection_comment: Option<String>,
    ) -> ServiceResult<ExamRecord> {
        Self::update_status_on(db, exam_id, next, rejection_comment, Local::now().date_naive())
            .await
    }

    pub async fn update_status_on(
        db: &DatabaseConnection,
        exam_id: i32,
        next: ExamStatus,
        rejection_comment: Option<String>,
        today: NaiveDate,
    ) -> ServiceResult<ExamRecord> {
        let txn = db.begin().await?;
        let exam = Self::find_exam(&txn, exam_id).await?;
        let previous = exam.status;
        let status = previous.transition(next)?;

        let mut active: exams::ActiveModel = exam.into();
        active.status = Set(status);
        match status {
            ExamStatus::Submitted => {
                active.submitted_at = Set(Some(today));
                active.rejection_comment = Set(None);
            }
            ExamStatus::Approved => {
                active.approved_at = Set(Some(today));
            }
            ExamStatus::Rejected => {
                active.rejection_comment = Set(rejection_comment);
            }
            ExamStatus::Draft => {}
        }
        let exam = active.update(&txn).await?;

        if status.is_terminal() {
            info!("Exam {exam_id} moved from {previous} to {status} (final)");
        } else {
            info!("Exam {exam_id} moved from {previous} to {status}");
        }
        Self::finish(txn, exam).await
    }

    async fn find_exam(txn: &DatabaseTransaction, exam_id: i32) -> ServiceResult<exams::Model> {
        exams::Entity::find_by_id(exam_id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Exam", exam_id))
    }

    /// Enrich the written row and commit
    async fn finish(txn: DatabaseTransaction, exam: exams::Model) -> ServiceResult<ExamRecord> {
        let exam_id = exam.id;
        let record = Assembler::exam_records(&txn, vec![exam])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Exam", exam_id))?;

        txn.commit().await?;
        Ok(record)
    }
}
