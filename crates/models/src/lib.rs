pub mod course_key;
pub mod gpa;
pub mod university;
