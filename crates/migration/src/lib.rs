pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_schedule_tables;
mod m20260301_000002_create_exam_tables;
mod m20260301_000003_create_users_table;
mod m20260301_000004_seed_exam_types;
mod m20260301_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_schedule_tables::Migration),
            Box::new(m20260301_000002_create_exam_tables::Migration),
            Box::new(m20260301_000003_create_users_table::Migration),
            Box::new(m20260301_000004_seed_exam_types::Migration),
            Box::new(m20260301_000005_add_indexes::Migration),
        ]
    }
}
