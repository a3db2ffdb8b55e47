use sea_orm_migration::prelude::*;

use crate::m20260301_000002_create_exam_tables::ExamTypes;

/// Exam types offered out of the box
const DEFAULT_EXAM_TYPES: [(&str, &str); 3] = [
    ("Parcial", "Partial exam held during the term"),
    ("Ordinario", "Regular end-of-term exam"),
    ("Extraordinario", "Make-up exam outside the regular period"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(ExamTypes::Table)
            .columns([ExamTypes::Name, ExamTypes::Description]);

        for (name, description) in DEFAULT_EXAM_TYPES {
            insert.values_panic([name.into(), description.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names = DEFAULT_EXAM_TYPES.map(|(name, _)| name);

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(ExamTypes::Table)
                    .and_where(Expr::col(ExamTypes::Name).is_in(names))
                    .to_owned(),
            )
            .await
    }
}
