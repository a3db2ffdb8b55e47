use crate::{
    entities::{careers, exam_types, groups, rooms, subjects, weekly_slots},
    services::{
        assembler::{Assembler, SubjectRecord},
        error::{ServiceError, ServiceResult},
    },
};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

/// A weekly slot with its subject and room
pub type SlotRecord = (
    weekly_slots::Model,
    Option<SubjectRecord>,
    Option<rooms::Model>,
);
pub type GroupTree = (groups::Model, Vec<SlotRecord>);
pub type CareerTree = (careers::Model, Vec<GroupTree>);

/// Read access to the scheduling entities
pub struct ScheduleService;

impl ScheduleService {
    pub async fn find_career<C: ConnectionTrait>(
        db: &C,
        career_id: i32,
    ) -> ServiceResult<careers::Model> {
        careers::Entity::find_by_id(career_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Career", career_id))
    }

    pub async fn find_group<C: ConnectionTrait>(
        db: &C,
        group_id: i32,
    ) -> ServiceResult<groups::Model> {
        groups::Entity::find_by_id(group_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Group", group_id))
    }

    /// Every career with its groups and each group's weekly timetable
    pub async fn get_careers_tree<C: ConnectionTrait>(db: &C) -> Result<Vec<CareerTree>, DbErr> {
        let careers = careers::Entity::find()
            .order_by_asc(careers::Column::Name)
            .all(db)
            .await?;

        if careers.is_empty() {
            return Ok(vec![]);
        }

        let groups = groups::Entity::find()
            .order_by_asc(groups::Column::Label)
            .all(db)
            .await?;

        let group_ids: Vec<i32> = groups.iter().map(|g| g.id).collect();
        let slots = if group_ids.is_empty() {
            vec![]
        } else {
            weekly_slots::Entity::find()
                .filter(weekly_slots::Column::GroupId.is_in(group_ids))
                .order_by_asc(weekly_slots::Column::Id)
                .all(db)
                .await?
        };

        let subjects = Assembler::load_subjects(db, slots.iter().filter_map(|s| s.subject_id)).await?;
        let rooms = Assembler::load_rooms(db, slots.iter().filter_map(|s| s.room_id)).await?;

        // Build lookup maps
        let mut slots_by_group: HashMap<i32, Vec<weekly_slots::Model>> = HashMap::new();
        for slot in slots {
            slots_by_group.entry(slot.group_id).or_default().push(slot);
        }

        let mut groups_by_career: HashMap<i32, Vec<groups::Model>> = HashMap::new();
        for group in groups {
            groups_by_career
                .entry(group.career_id)
                .or_default()
                .push(group);
        }

        // Build the final result structure
        let mut results = Vec::with_capacity(careers.len());
        for career in careers {
            let career_groups = groups_by_career.remove(&career.id).unwrap_or_default();

            let mut result_groups = Vec::with_capacity(career_groups.len());
            for group in career_groups {
                let mut group_slots = slots_by_group.remove(&group.id).unwrap_or_default();
                group_slots.sort_by_key(|s| (s.weekday, s.start_time));

                let slot_records = group_slots
                    .into_iter()
                    .map(|slot| {
                        let subject = slot.subject_id.and_then(|id| subjects.get(&id).cloned());
                        let room = slot.room_id.and_then(|id| rooms.get(&id).cloned());
                        (slot, subject, room)
                    })
                    .collect();

                result_groups.push((group, slot_records));
            }

            results.push((career, result_groups));
        }

        Ok(results)
    }

    /// Subjects, optionally restricted to one career
    pub async fn get_subjects<C: ConnectionTrait>(
        db: &C,
        career_id: Option<i32>,
    ) -> Result<Vec<SubjectRecord>, DbErr> {
        let mut query = subjects::Entity::find().order_by_asc(subjects::Column::Name);
        if let Some(career_id) = career_id {
            query = query.filter(subjects::Column::CareerId.eq(career_id));
        }

        let ids: Vec<i32> = query.all(db).await?.into_iter().map(|s| s.id).collect();
        let mut by_id = Assembler::load_subjects(db, ids.iter().copied()).await?;

        Ok(ids.into_iter().filter_map(|id| by_id.remove(&id)).collect())
    }

    pub async fn get_exam_types<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<exam_types::Model>, DbErr> {
        exam_types::Entity::find()
            .order_by_asc(exam_types::Column::Id)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::*;
    use models::weekday::Weekday;

    #[tokio::test]
    async fn test_careers_tree_nests_groups_and_slots() {
        let db = setup_db().await;
        let career = insert_career(&db, "Informatics").await;
        let empty_career = insert_career(&db, "Accounting").await;
        let group = insert_group(&db, career.id, "3A").await;
        let professor = insert_professor(&db, "Ada Lovelace").await;
        let room = insert_room(&db, "B-12").await;
        let subject = insert_subject(&db, "Compilers", Some(career.id), Some(professor.id)).await;

        insert_slot(&db, group.id, Some(subject.id), Some(room.id), Weekday::Friday, 9).await;
        insert_slot(&db, group.id, Some(subject.id), None, Weekday::Monday, 7).await;

        let tree = ScheduleService::get_careers_tree(&db).await.unwrap();

        // Ordered by career name
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].0.id, empty_career.id);
        assert!(tree[0].1.is_empty());

        let (informatics, groups) = &tree[1];
        assert_eq!(informatics.name, "Informatics");
        assert_eq!(groups.len(), 1);

        let slots = &groups[0].1;
        assert_eq!(slots.len(), 2);
        // Sorted by weekday, then start time
        assert_eq!(slots[0].0.weekday, Weekday::Monday);
        assert!(slots[0].2.is_none());
        assert_eq!(slots[1].0.weekday, Weekday::Friday);
        assert_eq!(slots[1].2.as_ref().map(|r| r.id), Some(room.id));

        let subject_record = slots[1].1.as_ref().unwrap();
        assert_eq!(subject_record.career_name.as_deref(), Some("Informatics"));
        assert_eq!(
            subject_record.professor.as_ref().map(|p| p.name.as_str()),
            Some("Ada Lovelace")
        );
    }

    #[tokio::test]
    async fn test_get_subjects_filters_by_career() {
        let db = setup_db().await;
        let first = insert_career(&db, "Nursing").await;
        let second = insert_career(&db, "Law").await;
        insert_subject(&db, "Anatomy", Some(first.id), None).await;
        insert_subject(&db, "Pharmacology", Some(first.id), None).await;
        insert_subject(&db, "Civil Law", Some(second.id), None).await;
        insert_subject(&db, "Orphan", None, None).await;

        let all = ScheduleService::get_subjects(&db, None).await.unwrap();
        assert_eq!(all.len(), 4);

        let nursing = ScheduleService::get_subjects(&db, Some(first.id)).await.unwrap();
        let names: Vec<_> = nursing.iter().map(|s| s.subject.name.as_str()).collect();
        assert_eq!(names, vec!["Anatomy", "Pharmacology"]);
        assert!(nursing.iter().all(|s| s.career_name.as_deref() == Some("Nursing")));

        let orphan = all.iter().find(|s| s.subject.name == "Orphan").unwrap();
        assert!(orphan.career_name.is_none());
    }

    #[tokio::test]
    async fn test_exam_types_are_seeded() {
        let db = setup_db().await;

        let names: Vec<_> = ScheduleService::get_exam_types(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, vec!["Parcial", "Ordinario", "Extraordinario"]);
    }

    #[tokio::test]
    async fn test_find_missing_career_and_group() {
        let db = setup_db().await;

        assert!(matches!(
            ScheduleService::find_career(&db, 42).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            ScheduleService::find_group(&db, 42).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
