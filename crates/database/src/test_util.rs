//! In-memory SQLite fixtures for service tests.

use crate::entities::{careers, exams, groups, professors, rooms, subjects, weekly_slots};
use chrono::{NaiveDate, NaiveTime};
use migration::{Migrator, MigratorTrait};
use models::{exam_status::ExamStatus, weekday::Weekday};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait,
};

/// A fresh, fully migrated database. The pool holds one connection so every
/// query sees the same in-memory file.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn insert_career(db: &DatabaseConnection, name: &str) -> careers::Model {
    careers::ActiveModel {
        name: Set(name.to_string()),
        code: Set(Some(name.to_uppercase())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_group(db: &DatabaseConnection, career_id: i32, label: &str) -> groups::Model {
    groups::ActiveModel {
        label: Set(label.to_string()),
        career_id: Set(career_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_professor(db: &DatabaseConnection, name: &str) -> professors::Model {
    professors::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_room(db: &DatabaseConnection, name: &str) -> rooms::Model {
    rooms::ActiveModel {
        name: Set(name.to_string()),
        capacity: Set(Some(40)),
        room_type: Set(Some("CLASSROOM".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_subject(
    db: &DatabaseConnection,
    name: &str,
    career_id: Option<i32>,
    professor_id: Option<i32>,
) -> subjects::Model {
    subjects::ActiveModel {
        name: Set(name.to_string()),
        career_id: Set(career_id),
        professor_id: Set(professor_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// A one-hour weekly class starting at `start_hour`
pub async fn insert_slot(
    db: &DatabaseConnection,
    group_id: i32,
    subject_id: Option<i32>,
    room_id: Option<i32>,
    weekday: Weekday,
    start_hour: u32,
) -> weekly_slots::Model {
    weekly_slots::ActiveModel {
        weekday: Set(weekday),
        start_time: Set(time(start_hour)),
        end_time: Set(time(start_hour + 1)),
        group_id: Set(group_id),
        subject_id: Set(subject_id),
        room_id: Set(room_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// A draft exam inserted directly, bypassing generation
pub async fn insert_exam(
    db: &DatabaseConnection,
    subject_id: i32,
    room_id: Option<i32>,
    group_id: Option<i32>,
) -> exams::Model {
    exams::ActiveModel {
        date: Set(date(2024, 6, 3)),
        start_time: Set(time(9)),
        end_time: Set(time(10)),
        exam_type: Set("Ordinario".to_string()),
        subject_id: Set(subject_id),
        room_id: Set(room_id),
        group_id: Set(group_id),
        status: Set(ExamStatus::Draft),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn count_exams(db: &DatabaseConnection) -> u64 {
    exams::Entity::find().count(db).await.unwrap()
}
