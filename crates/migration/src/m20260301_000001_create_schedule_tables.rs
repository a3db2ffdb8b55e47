use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create careers table
        manager
            .create_table(
                Table::create()
                    .table(Careers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Careers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Careers::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Careers::Code).string().unique_key())
                    .col(ColumnDef::new(Careers::Description).text())
                    .to_owned(),
            )
            .await?;

        // Create professors table
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professors::Name).string().not_null())
                    .col(ColumnDef::new(Professors::Email).string().unique_key())
                    .to_owned(),
            )
            .await?;

        // Create rooms table
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Rooms::Capacity).integer())
                    .col(ColumnDef::new(Rooms::RoomType).string())
                    .to_owned(),
            )
            .await?;

        // Create groups table
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Label).string().not_null())
                    .col(ColumnDef::new(Groups::CareerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-groups-career_id")
                            .from(Groups::Table, Groups::CareerId)
                            .to(Careers::Table, Careers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::CareerId).integer())
                    .col(ColumnDef::new(Subjects::ProfessorId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subjects-career_id")
                            .from(Subjects::Table, Subjects::CareerId)
                            .to(Careers::Table, Careers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subjects-professor_id")
                            .from(Subjects::Table, Subjects::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create weekly_slots table
        manager
            .create_table(
                Table::create()
                    .table(WeeklySlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeeklySlots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeeklySlots::Weekday).text().not_null())
                    .col(ColumnDef::new(WeeklySlots::StartTime).time().not_null())
                    .col(ColumnDef::new(WeeklySlots::EndTime).time().not_null())
                    .col(ColumnDef::new(WeeklySlots::GroupId).integer().not_null())
                    .col(ColumnDef::new(WeeklySlots::SubjectId).integer())
                    .col(ColumnDef::new(WeeklySlots::RoomId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-weekly_slots-group_id")
                            .from(WeeklySlots::Table, WeeklySlots::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-weekly_slots-subject_id")
                            .from(WeeklySlots::Table, WeeklySlots::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-weekly_slots-room_id")
                            .from(WeeklySlots::Table, WeeklySlots::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(WeeklySlots::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Careers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Careers {
    Table,
    Id,
    Name,
    Code,
    Description,
}

#[derive(Iden)]
pub(crate) enum Professors {
    Table,
    Id,
    Name,
    Email,
}

#[derive(Iden)]
pub(crate) enum Rooms {
    Table,
    Id,
    Name,
    Capacity,
    RoomType,
}

#[derive(Iden)]
pub(crate) enum Groups {
    Table,
    Id,
    Label,
    CareerId,
}

#[derive(Iden)]
pub(crate) enum Subjects {
    Table,
    Id,
    Name,
    CareerId,
    ProfessorId,
}

#[derive(Iden)]
pub(crate) enum WeeklySlots {
    Table,
    Id,
    Weekday,
    StartTime,
    EndTime,
    GroupId,
    SubjectId,
    RoomId,
}
