pub mod careers;
pub mod exam_types;
pub mod exams;
pub mod groups;
pub mod professors;
pub mod rooms;
pub mod subjects;
pub mod users;
pub mod weekly_slots;
