pub mod exam;
pub mod schedule;
pub mod user;
