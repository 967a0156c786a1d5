pub mod courses;
pub mod departments;
pub mod groups;
pub mod student_courses;
pub mod students;
