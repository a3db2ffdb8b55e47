mod macros;

pub mod exam_plan;
pub mod exam_status;
pub mod role;
pub mod weekday;
