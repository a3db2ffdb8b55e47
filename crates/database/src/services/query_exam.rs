use crate::{
    entities::exams,
    services::{
        assembler::{Assembler, ExamRecord},
        error::{ServiceError, ServiceResult},
    },
};
use log::warn;
use models::exam_status::ExamStatus;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Select,
    prelude::{Date, Time},
};

/// A full `exams` row with `status` left as stored text
#[derive(Debug, FromQueryResult)]
struct ExamRow {
    id: i32,
    date: Date,
    start_time: Time,
    end_time: Time,
    exam_type: String,
    subject_id: i32,
    room_id: Option<i32>,
    group_id: Option<i32>,
    second_examiner_id: Option<i32>,
    status: String,
    rejection_comment: Option<String>,
    submitted_at: Option<Date>,
    approved_at: Option<Date>,
}

impl ExamRow {
    /// `None` when the stored status is not a known value
    fn into_exam(self) -> Option<exams::Model> {
        let status = match self.status.parse::<ExamStatus>() {
            Ok(status) => status,
            Err(e) => {
                warn!("Skipping exam {}: {e}", self.id);
                return None;
            }
        };

        Some(exams::Model {
            id: self.id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            exam_type: self.exam_type,
            subject_id: self.subject_id,
            room_id: self.room_id,
            group_id: self.group_id,
            second_examiner_id: self.second_examiner_id,
            status,
            rejection_comment: self.rejection_comment,
            submitted_at: self.submitted_at,
            approved_at: self.approved_at,
        })
    }
}

/// Columns every deployed `exams` table has had
#[derive(Debug, FromQueryResult)]
struct ExamCoreColumns {
    id: i32,
    date: Date,
    start_time: Time,
    end_time: Time,
    exam_type: String,
    subject_id: i32,
    room_id: Option<i32>,
    group_id: Option<i32>,
}

impl From<ExamCoreColumns> for exams::Model {
    fn from(core: ExamCoreColumns) -> Self {
        Self {
            id: core.id,
            date: core.date,
            start_time: core.start_time,
            end_time: core.end_time,
            exam_type: core.exam_type,
            subject_id: core.subject_id,
            room_id: core.room_id,
            group_id: core.group_id,
            second_examiner_id: None,
            status: ExamStatus::default(),
            rejection_comment: None,
            submitted_at: None,
            approved_at: None,
        }
    }
}

/// Errors raised by SQLite and PostgreSQL when a selected column is absent
fn is_missing_column(err: &DbErr) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("no such column") || (msg.contains("column") && msg.contains("does not exist"))
}

fn in_calendar_order(select: Select<exams::Entity>) -> Select<exams::Entity> {
    select
        .order_by_asc(exams::Column::Date)
        .order_by_asc(exams::Column::StartTime)
        .order_by_asc(exams::Column::Id)
}

pub struct QueryExamService;

impl QueryExamService {
    /// Every exam, enriched, ordered by date and start time.
    ///
    /// Rows with an unreadable status are logged and left out. If the table
    /// lacks a review column (an unmigrated database) the listing is retried
    /// with the core columns and review fields defaulted.
    pub async fn get_exams<C: ConnectionTrait>(db: &C) -> Result<Vec<ExamRecord>, DbErr> {
        let exams = match Self::load_exams(db, exams::Entity::find()).await {
            Ok(exams) => exams,
            Err(e) if is_missing_column(&e) => {
                warn!("Full exam query failed, retrying with core columns: {e}");
                Self::get_exam_core_columns(db).await?
            }
            Err(e) => return Err(e),
        };

        Assembler::exam_records(db, exams).await
    }

    async fn load_exams<C: ConnectionTrait>(
        db: &C,
        select: Select<exams::Entity>,
    ) -> Result<Vec<exams::Model>, DbErr> {
        let rows = in_calendar_order(select)
            .into_model::<ExamRow>()
            .all(db)
            .await?;

        Ok(rows.into_iter().filter_map(ExamRow::into_exam).collect())
    }

    async fn get_exam_core_columns<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<exams::Model>, DbErr> {
        let select = exams::Entity::find().select_only().columns([
            exams::Column::Id,
            exams::Column::Date,
            exams::Column::StartTime,
            exams::Column::EndTime,
            exams::Column::ExamType,
            exams::Column::SubjectId,
            exams::Column::RoomId,
            exams::Column::GroupId,
        ]);

        let rows = in_calendar_order(select)
            .into_model::<ExamCoreColumns>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(exams::Model::from).collect())
    }

    pub async fn get_exam_by_id<C: ConnectionTrait>(
        db: &C,
        exam_id: i32,
    ) -> ServiceResult<ExamRecord> {
        let exam = exams::Entity::find_by_id(exam_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Exam", exam_id))?;

        Assembler::exam_records(db, vec![exam])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Exam", exam_id))
    }

    /// Enriched exams for the given subjects
    pub async fn get_exams_for_subjects<C: ConnectionTrait>(
        db: &C,
        subject_ids: Vec<i32>,
    ) -> Result<Vec<ExamRecord>, DbErr> {
        if subject_ids.is_empty() {
            return Ok(vec![]);
        }

        let select = exams::Entity::find().filter(exams::Column::SubjectId.is_in(subject_ids));
        let exams = Self::load_exams(db, select).await?;

        Assembler::exam_records(db, exams).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::*;

    #[tokio::test]
    async fn test_exams_are_enriched() {
        let db = setup_db().await;
        let career = insert_career(&db, "Informatics").await;
        let group = insert_group(&db, career.id, "5B").await;
        let professor = insert_professor(&db, "Grace Hopper").await;
        let room = insert_room(&db, "Lab 1").await;
        let subject = insert_subject(&db, "Databases", Some(career.id), Some(professor.id)).await;
        let exam = insert_exam(&db, subject.id, Some(room.id), Some(group.id)).await;

        let records = QueryExamService::get_exams(&db).await.unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.exam.id, exam.id);
        assert_eq!(record.group_id(), Some(group.id));
        assert_eq!(record.room.as_ref().map(|r| r.name.as_str()), Some("Lab 1"));

        let subject_record = record.subject.as_ref().unwrap();
        assert_eq!(subject_record.career_name.as_deref(), Some("Informatics"));
        assert_eq!(
            subject_record.professor.as_ref().map(|p| p.id),
            Some(professor.id)
        );
        assert!(record.second_examiner.is_none());
    }

    #[tokio::test]
    async fn test_partial_records_still_render() {
        let db = setup_db().await;
        let career = insert_career(&db, "Law").await;
        let group = insert_group(&db, career.id, "1A").await;
        let careerless = insert_subject(&db, "Ethics", None, None).await;
        let complete = insert_subject(&db, "Civil Law", Some(career.id), None).await;

        insert_exam(&db, careerless.id, None, None).await;
        insert_exam(&db, complete.id, None, Some(group.id)).await;

        let records = QueryExamService::get_exams(&db).await.unwrap();
        assert_eq!(records.len(), 2);

        let roomless = records
            .iter()
            .find(|r| r.exam.subject_id == careerless.id)
            .unwrap();
        assert!(roomless.room.is_none());
        assert!(roomless.group.is_none());
        assert_eq!(roomless.group_id(), None);
        assert_eq!(
            roomless.subject.as_ref().and_then(|s| s.career_name.clone()),
            None
        );

        let other = records
            .iter()
            .find(|r| r.exam.subject_id == complete.id)
            .unwrap();
        assert_eq!(
            other.subject.as_ref().and_then(|s| s.career_name.as_deref()),
            Some("Law")
        );
    }

    #[tokio::test]
    async fn test_core_column_fallback_defaults_review_fields() {
        let db = setup_db().await;
        let career = insert_career(&db, "Nursing").await;
        let subject = insert_subject(&db, "Anatomy", Some(career.id), None).await;
        let exam = insert_exam(&db, subject.id, None, None).await;

        let rows = QueryExamService::get_exam_core_columns(&db).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, exam.id);
        assert_eq!(rows[0].date, exam.date);
        assert_eq!(rows[0].status, ExamStatus::Draft);
        assert_eq!(rows[0].second_examiner_id, None);
    }

    #[tokio::test]
    async fn test_unreadable_status_only_drops_its_own_row() {
        let db = setup_db().await;
        let career = insert_career(&db, "Medicine").await;
        let subject = insert_subject(&db, "Physiology", Some(career.id), None).await;
        let approved = insert_exam(&db, subject.id, None, None).await;
        let legacy = insert_exam(&db, subject.id, None, None).await;
        let broken = insert_exam(&db, subject.id, None, None).await;

        db.execute_unprepared(&format!(
            "UPDATE exams SET status = 'approved', approved_at = '2024-06-04' WHERE id = {}",
            approved.id
        ))
        .await
        .unwrap();
        db.execute_unprepared(&format!(
            "UPDATE exams SET status = 'rechazado', rejection_comment = 'Wrong room' WHERE id = {}",
            legacy.id
        ))
        .await
        .unwrap();
        db.execute_unprepared(&format!(
            "UPDATE exams SET status = 'archivado' WHERE id = {}",
            broken.id
        ))
        .await
        .unwrap();

        let records = QueryExamService::get_exams(&db).await.unwrap();
        assert_eq!(records.len(), 2);

        let listed = records.iter().find(|r| r.exam.id == approved.id).unwrap();
        assert_eq!(listed.exam.status, ExamStatus::Approved);
        assert_eq!(listed.exam.approved_at, Some(date(2024, 6, 4)));

        let listed = records.iter().find(|r| r.exam.id == legacy.id).unwrap();
        assert_eq!(listed.exam.status, ExamStatus::Rejected);
        assert_eq!(listed.exam.rejection_comment.as_deref(), Some("Wrong room"));

        assert!(records.iter().all(|r| r.exam.id != broken.id));
    }

    #[tokio::test]
    async fn test_missing_review_column_falls_back_to_core_columns() {
        let db = setup_db().await;
        let career = insert_career(&db, "Dentistry").await;
        let subject = insert_subject(&db, "Histology", Some(career.id), None).await;
        let exam = insert_exam(&db, subject.id, None, None).await;

        db.execute_unprepared("ALTER TABLE exams DROP COLUMN rejection_comment")
            .await
            .unwrap();

        let records = QueryExamService::get_exams(&db).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].exam.id, exam.id);
        assert_eq!(records[0].exam.rejection_comment, None);
    }

    #[test]
    fn test_missing_column_detection() {
        assert!(is_missing_column(&DbErr::Custom(
            "no such column: rejection_comment".into()
        )));
        assert!(is_missing_column(&DbErr::Custom(
            r#"column "approved_at" does not exist"#.into()
        )));
        assert!(!is_missing_column(&DbErr::Type(
            "unknown exam status \"archivado\"".into()
        )));
    }

    #[tokio::test]
    async fn test_get_missing_exam() {
        let db = setup_db().await;

        assert!(matches!(
            QueryExamService::get_exam_by_id(&db, 7).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
