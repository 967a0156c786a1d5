use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identifies a course: the same course name may be offered in several semesters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseKey {
    pub name: String,
    pub semester: i32,
}

impl CourseKey {
    pub fn new(name: impl Into<String>, semester: i32) -> Self {
        Self {
            name: name.into(),
            semester,
        }
    }
}

impl From<(&str, i32)> for CourseKey {
    fn from((name, semester): (&str, i32)) -> Self {
        Self::new(name, semester)
    }
}

impl Display for CourseKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} (semester {})", self.name, self.semester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let key = CourseKey::new("Web Design", 1);
        assert_eq!(key.to_string(), "Web Design (semester 1)");
    }

    #[test]
    fn test_same_name_different_semester_is_distinct() {
        let fall = CourseKey::from(("Linear Algebra", 1));
        let spring = CourseKey::from(("Linear Algebra", 2));

        assert_ne!(fall, spring);
        assert!(fall < spring);
    }
}
