pub mod query_student;
pub mod seed;
pub mod university;
