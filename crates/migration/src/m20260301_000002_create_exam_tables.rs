use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_schedule_tables::{Groups, Professors, Rooms, Subjects};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create exam_types table
        manager
            .create_table(
                Table::create()
                    .table(ExamTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamTypes::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(ExamTypes::Description).text())
                    .to_owned(),
            )
            .await?;

        // Create exams table
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::Date).date().not_null())
                    .col(ColumnDef::new(Exams::StartTime).time().not_null())
                    .col(ColumnDef::new(Exams::EndTime).time().not_null())
                    .col(ColumnDef::new(Exams::ExamType).string().not_null())
                    .col(ColumnDef::new(Exams::SubjectId).integer().not_null())
                    .col(ColumnDef::new(Exams::RoomId).integer())
                    .col(ColumnDef::new(Exams::GroupId).integer())
                    .col(ColumnDef::new(Exams::SecondExaminerId).integer())
                    .col(
                        ColumnDef::new(Exams::Status)
                            .text()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Exams::RejectionComment).text())
                    .col(ColumnDef::new(Exams::SubmittedAt).date())
                    .col(ColumnDef::new(Exams::ApprovedAt).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-subject_id")
                            .from(Exams::Table, Exams::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-room_id")
                            .from(Exams::Table, Exams::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-group_id")
                            .from(Exams::Table, Exams::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-second_examiner_id")
                            .from(Exams::Table, Exams::SecondExaminerId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ExamTypes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum ExamTypes {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
pub(crate) enum Exams {
    Table,
    Id,
    Date,
    StartTime,
    EndTime,
    ExamType,
    SubjectId,
    RoomId,
    GroupId,
    SecondExaminerId,
    Status,
    RejectionComment,
    SubmittedAt,
    ApprovedAt,
}
