//! Derives a one-week exam calendar from a group's recurring class meetings.
//!
//! The plan is pure: callers load the weekly slots, pick "today", and persist
//! whatever comes back. Each weekly slot becomes at most one exam, dated in
//! the week that starts on the anchor Monday.

use crate::weekday::Weekday;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::collections::HashMap;

/// Exam type stamped on every generated exam
pub const DEFAULT_EXAM_TYPE: &str = "PARCIAL";

/// A weekly class meeting considered for generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    pub slot_id: i32,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub group_id: i32,
    pub subject_id: Option<i32>,
    pub room_id: Option<i32>,
}

/// An exam ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedExam {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exam_type: &'static str,
    pub subject_id: i32,
    pub room_id: i32,
    pub group_id: i32,
    /// Weekly slot the exam was derived from
    pub source_slot_id: i32,
}

/// Why a slot did not produce an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    MissingSubject,
    MissingRoom,
    /// Another slot already claimed the same day and start time
    Duplicate { kept_slot_id: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamPlan {
    pub anchor: NaiveDate,
    pub exams: Vec<PlannedExam>,
    pub skipped: Vec<(i32, SkipReason)>,
}

/// The Monday that starts the exam week: today if today is a Monday,
/// otherwise the next one.
pub fn anchor_monday(today: NaiveDate) -> NaiveDate {
    let offset = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Days::new(offset.into())
}

/// Date of the exam for a slot recurring on `weekday`.
///
/// Sunday classes belong to the following week, so they land on the Monday
/// after the exam week.
pub fn exam_date(anchor: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = match weekday {
        Weekday::Sunday => 7,
        _ => (weekday.index() + 7 - Weekday::from(anchor.weekday()).index()) % 7,
    };
    anchor + Days::new(offset.into())
}

/// Builds the exam plan for `slots`, in the order given.
///
/// Slots without a subject or room are skipped. Afterwards the first slot
/// seen for a `(weekday, HH:MM)` pair wins and later slots sharing that pair
/// are dropped, whatever their subject. This is a first-write-wins policy,
/// not conflict resolution.
pub fn plan_exams<I>(today: NaiveDate, slots: I) -> ExamPlan
where
    I: IntoIterator<Item = SlotCandidate>,
{
    let anchor = anchor_monday(today);
    let mut occupied: HashMap<(Weekday, u32, u32), i32> = HashMap::new();
    let mut exams = Vec::new();
    let mut skipped = Vec::new();

    for slot in slots {
        let Some(subject_id) = slot.subject_id else {
            skipped.push((slot.slot_id, SkipReason::MissingSubject));
            continue;
        };
        let Some(room_id) = slot.room_id else {
            skipped.push((slot.slot_id, SkipReason::MissingRoom));
            continue;
        };

        let key = (
            slot.weekday,
            slot.start_time.hour(),
            slot.start_time.minute(),
        );
        if let Some(&kept_slot_id) = occupied.get(&key) {
            skipped.push((slot.slot_id, SkipReason::Duplicate { kept_slot_id }));
            continue;
        }
        occupied.insert(key, slot.slot_id);

        exams.push(PlannedExam {
            date: exam_date(anchor, slot.weekday),
            start_time: slot.start_time,
            end_time: slot.end_time,
            exam_type: DEFAULT_EXAM_TYPE,
            subject_id,
            room_id,
            group_id: slot.group_id,
            source_slot_id: slot.slot_id,
        });
    }

    ExamPlan {
        anchor,
        exams,
        skipped,
    }
}
