pub mod assembler;
pub mod error;
pub mod exam;
pub mod generate_exams;
pub mod query_exam;
pub mod schedule;
pub mod user;
