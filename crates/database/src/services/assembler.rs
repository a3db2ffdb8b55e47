use crate::entities::{careers, exams, groups, professors, rooms, subjects};
use log::warn;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::collections::{HashMap, HashSet};

/// A subject with its denormalized career name and instructor
#[derive(Clone, Debug, PartialEq)]
pub struct SubjectRecord {
    pub subject: subjects::Model,
    pub career_name: Option<String>,
    pub professor: Option<professors::Model>,
}

/// An exam with every relation a client needs to render it
#[derive(Clone, Debug, PartialEq)]
pub struct ExamRecord {
    pub exam: exams::Model,
    pub subject: Option<SubjectRecord>,
    pub room: Option<rooms::Model>,
    pub group: Option<groups::Model>,
    pub second_examiner: Option<professors::Model>,
}

impl ExamRecord {
    /// Group id taken from the loaded group, falling back to the raw column
    pub fn group_id(&self) -> Option<i32> {
        self.group.as_ref().map(|g| g.id).or(self.exam.group_id)
    }
}

/// Builds read models out of batch-loaded rows.
///
/// Missing optional relations come back as `None`; a record whose lookups
/// come up empty still renders.
pub struct Assembler;

impl Assembler {
    /// Enrich a list of exams, preserving their order
    pub async fn exam_records<C: ConnectionTrait>(
        db: &C,
        exams: Vec<exams::Model>,
    ) -> Result<Vec<ExamRecord>, DbErr> {
        if exams.is_empty() {
            return Ok(vec![]);
        }

        let subject_ids = exams.iter().map(|e| e.subject_id);
        let room_ids = exams.iter().filter_map(|e| e.room_id);
        let group_ids = exams.iter().filter_map(|e| e.group_id);
        let examiner_ids = exams.iter().filter_map(|e| e.second_examiner_id);

        let subjects = Self::load_subjects(db, subject_ids).await?;
        let rooms = Self::load_rooms(db, room_ids).await?;
        let groups = Self::load_groups(db, group_ids).await?;
        let examiners = Self::load_professors(db, examiner_ids).await?;

        let records = exams
            .into_iter()
            .map(|exam| ExamRecord {
                subject: subjects.get(&exam.subject_id).cloned(),
                room: exam.room_id.and_then(|id| rooms.get(&id).cloned()),
                group: exam.group_id.and_then(|id| groups.get(&id).cloned()),
                second_examiner: exam
                    .second_examiner_id
                    .and_then(|id| examiners.get(&id).cloned()),
                exam,
            })
            .collect();

        Ok(records)
    }

    /// Subjects keyed by id, each stamped with its career name
    pub async fn load_subjects<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = i32>,
    ) -> Result<HashMap<i32, SubjectRecord>, DbErr> {
        let ids = unique(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(ids))
            .find_also_related(careers::Entity)
            .all(db)
            .await?;

        let professor_ids = rows.iter().filter_map(|(s, _)| s.professor_id);
        let professors = Self::load_professors(db, professor_ids).await?;

        let mut result = HashMap::with_capacity(rows.len());
        for (subject, career) in rows {
            let career_name = match career {
                Some(career) => Some(career.name),
                None => Self::lookup_career_name(db, &subject).await,
            };
            let professor = subject
                .professor_id
                .and_then(|id| professors.get(&id).cloned());

            result.insert(
                subject.id,
                SubjectRecord {
                    subject,
                    career_name,
                    professor,
                },
            );
        }

        Ok(result)
    }

    /// Direct lookup when the joined career did not come back. Errors only
    /// blank out this subject's career name.
    async fn lookup_career_name<C: ConnectionTrait>(
        db: &C,
        subject: &subjects::Model,
    ) -> Option<String> {
        let career_id = subject.career_id?;

        match careers::Entity::find_by_id(career_id).one(db).await {
            Ok(career) => career.map(|c| c.name),
            Err(e) => {
                warn!(
                    "Could not load career {career_id} for subject {}: {e}",
                    subject.id
                );
                None
            }
        }
    }

    pub async fn load_professors<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = i32>,
    ) -> Result<HashMap<i32, professors::Model>, DbErr> {
        let ids = unique(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let professors = professors::Entity::find()
            .filter(professors::Column::Id.is_in(ids))
            .all(db)
            .await?;

        Ok(professors.into_iter().map(|p| (p.id, p)).collect())
    }

    pub async fn load_rooms<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = i32>,
    ) -> Result<HashMap<i32, rooms::Model>, DbErr> {
        let ids = unique(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rooms = rooms::Entity::find()
            .filter(rooms::Column::Id.is_in(ids))
            .all(db)
            .await?;

        Ok(rooms.into_iter().map(|r| (r.id, r)).collect())
    }

    pub async fn load_groups<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = i32>,
    ) -> Result<HashMap<i32, groups::Model>, DbErr> {
        let ids = unique(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let groups = groups::Entity::find()
            .filter(groups::Column::Id.is_in(ids))
            .all(db)
            .await?;

        Ok(groups.into_iter().map(|g| (g.id, g)).collect())
    }
}

fn unique(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    ids.into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}
