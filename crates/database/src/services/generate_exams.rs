use crate::{
    entities::{exams, subjects, weekly_slots},
    services::{
        assembler::ExamRecord,
        error::{ServiceError, ServiceResult},
        query_exam::QueryExamService,
        schedule::ScheduleService,
    },
};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use models::{
    exam_plan::{PlannedExam, SlotCandidate, plan_exams},
    exam_status::ExamStatus,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Statement, TransactionTrait, sea_query::JoinType,
};

/// Derives a career's exam calendar from a group's weekly classes
pub struct ExamGeneratorService;

impl ExamGeneratorService {
    /// First key of the advisory lock taken per career while regenerating
    const LOCK_CLASS: i32 = 0x4558_414d; // "EXAM"

    /// Regenerate exams for `career_id` from the timetable of `group_id`,
    /// anchored on the current local date
    pub async fn generate(
        db: &DatabaseConnection,
        career_id: i32,
        group_id: i32,
    ) -> ServiceResult<Vec<ExamRecord>> {
        Self::generate_on(db, career_id, group_id, Local::now().date_naive()).await
    }

    /// Regenerate exams as if today were `today`.
    ///
    /// Every exam of the career's subjects is replaced, for all groups, and
    /// manual edits on them are lost. Validation runs before any write and
    /// the whole operation is one transaction, so a failure leaves the
    /// previous exams in place. Returns only the freshly generated exams.
    pub async fn generate_on(
        db: &DatabaseConnection,
        career_id: i32,
        group_id: i32,
        today: NaiveDate,
    ) -> ServiceResult<Vec<ExamRecord>> {
        let txn = db.begin().await?;
        Self::lock_career(&txn, career_id).await?;

        ScheduleService::find_career(&txn, career_id).await?;
        ScheduleService::find_group(&txn, group_id).await?;

        let subject_ids: Vec<i32> = subjects::Entity::find()
            .select_only()
            .column(subjects::Column::Id)
            .filter(subjects::Column::CareerId.eq(career_id))
            .into_tuple::<i32>()
            .all(&txn)
            .await?;

        // Ascending id decides which slot wins a shared day and time
        let slots = weekly_slots::Entity::find()
            .join(JoinType::InnerJoin, weekly_slots::Relation::Subject.def())
            .filter(weekly_slots::Column::GroupId.eq(group_id))
            .filter(subjects::Column::CareerId.eq(career_id))
            .order_by_asc(weekly_slots::Column::Id)
            .all(&txn)
            .await?;

        if slots.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No weekly slots found for career {career_id} and group {group_id}"
            )));
        }

        let slot_count = slots.len();
        let plan = plan_exams(today, slots.into_iter().map(Self::slot_candidate));

        info!(
            "Planning exams for career {career_id}, group {group_id}: anchor {}, {} of {} slots usable",
            plan.anchor,
            plan.exams.len(),
            slot_count
        );
        for (slot_id, reason) in &plan.skipped {
            debug!("  Skipped slot {slot_id}: {reason:?}");
        }

        if plan.exams.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No exams could be generated from the weekly slots of career {career_id} and group {group_id}"
            )));
        }

        let deleted = exams::Entity::delete_many()
            .filter(exams::Column::SubjectId.is_in(subject_ids.clone()))
            .exec(&txn)
            .await?;

        let new_exams: Vec<exams::ActiveModel> =
            plan.exams.iter().map(Self::exam_to_active_model).collect();
        exams::Entity::insert_many(new_exams).exec(&txn).await?;

        let generated = QueryExamService::get_exams_for_subjects(&txn, subject_ids).await?;
        txn.commit().await?;

        info!(
            "Replaced {} exams of career {career_id} with {}",
            deleted.rows_affected,
            generated.len()
        );
        Ok(generated)
    }

    /// Serializes concurrent regenerations of one career on PostgreSQL.
    /// Released when the transaction ends.
    async fn lock_career(txn: &DatabaseTransaction, career_id: i32) -> Result<(), DbErr> {
        if txn.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_xact_lock($1, $2)",
            [Self::LOCK_CLASS.into(), career_id.into()],
        ))
        .await?;

        Ok(())
    }

    fn slot_candidate(slot: weekly_slots::Model) -> SlotCandidate {
        SlotCandidate {
            slot_id: slot.id,
            weekday: slot.weekday,
            start_time: slot.start_time,
            end_time: slot.end_time,
            group_id: slot.group_id,
            subject_id: slot.subject_id,
            room_id: slot.room_id,
        }
    }

    fn exam_to_active_model(exam: &PlannedExam) -> exams::ActiveModel {
        exams::ActiveModel {
            date: Set(exam.date),
            start_time: Set(exam.start_time),
            end_time: Set(exam.end_time),
            exam_type: Set(exam.exam_type.to_string()),
            subject_id: Set(exam.subject_id),
            room_id: Set(Some(exam.room_id)),
            group_id: Set(Some(exam.group_id)),
            status: Set(ExamStatus::Draft),
            ..Default::default()
        }
    }
}
