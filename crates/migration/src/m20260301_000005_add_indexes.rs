use sea_orm_migration::prelude::*;

use crate::{
    m20260301_000001_create_schedule_tables::{Groups, Subjects, WeeklySlots},
    m20260301_000002_create_exam_tables::Exams,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Generation looks up every subject of a career
        manager
            .create_index(
                Index::create()
                    .name("idx_subjects_career_id")
                    .table(Subjects::Table)
                    .col(Subjects::CareerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_groups_career_id")
                    .table(Groups::Table)
                    .col(Groups::CareerId)
                    .to_owned(),
            )
            .await?;

        // Slots are read per group
        manager
            .create_index(
                Index::create()
                    .name("idx_weekly_slots_group_id")
                    .table(WeeklySlots::Table)
                    .col(WeeklySlots::GroupId)
                    .to_owned(),
            )
            .await?;

        // Regeneration deletes exams by subject
        manager
            .create_index(
                Index::create()
                    .name("idx_exams_subject_id")
                    .table(Exams::Table)
                    .col(Exams::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exams_date_start_time")
                    .table(Exams::Table)
                    .col(Exams::Date)
                    .col(Exams::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_exams_date_start_time",
            "idx_exams_subject_id",
            "idx_weekly_slots_group_id",
            "idx_groups_career_id",
            "idx_subjects_career_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
