//! Sample university used to populate a fresh database

use crate::course_key::CourseKey;
use chrono::NaiveDate;

pub const COMPUTER_SCIENCE: &str = "Department of Computer Science";
pub const COMPUTER_ENGINEERING: &str = "B.E. in Computer Engineering";
pub const WEB_DESIGN: &str = "Web Design";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartmentSeed {
    pub number: i32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseSeed {
    pub name: &'static str,
    pub semester: i32,
    pub dept: i32,
    pub lect_hours: i32,
    pub lab_hours: i32,
    pub credits: i32,
}

impl CourseSeed {
    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.name, self.semester)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSeed {
    pub number: i32,
    pub major: &'static str,
    pub dept: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentSeed {
    pub name: &'static str,
    /// (year, month, day)
    pub dob: (i32, u32, u32),
    pub gpa: f64,
    pub group: i32,
    /// (course name, semester)
    pub courses: &'static [(&'static str, i32)],
}

impl StudentSeed {
    /// Returns `None` when the stored triple is not a calendar date
    pub fn dob(&self) -> Option<NaiveDate> {
        let (year, month, day) = self.dob;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn course_keys(&self) -> Vec<CourseKey> {
        self.courses.iter().copied().map(CourseKey::from).collect()
    }
}

/// A complete set of rows to insert, ordered so every reference points backwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixture<'a> {
    pub departments: &'a [DepartmentSeed],
    pub courses: &'a [CourseSeed],
    pub groups: &'a [GroupSeed],
    pub students: &'a [StudentSeed],
}

pub const SAMPLE: Fixture<'static> = Fixture {
    departments: &DEPARTMENTS,
    courses: &COURSES,
    groups: &GROUPS,
    students: &STUDENTS,
};

pub const DEPARTMENTS: [DepartmentSeed; 3] = [
    DepartmentSeed {
        number: 1,
        name: COMPUTER_SCIENCE,
    },
    DepartmentSeed {
        number: 2,
        name: "Department of Mathematical Sciences",
    },
    DepartmentSeed {
        number: 3,
        name: "Department of Applied Physics",
    },
];

const DATA_STRUCTURES: (&str, i32) = ("Data Structures and Algorithms", 3);
const LINEAR_ALGEBRA: (&str, i32) = ("Linear Algebra", 1);
const STATISTICAL_METHODS: (&str, i32) = ("Statistical Methods", 2);
const THERMODYNAMICS: (&str, i32) = ("Thermodynamics", 2);
const QUANTUM_MECHANICS: (&str, i32) = ("Quantum Mechanics", 3);
const WEB: (&str, i32) = (WEB_DESIGN, 1);

pub const COURSES: [CourseSeed; 6] = [
    CourseSeed {
        name: WEB.0,
        semester: WEB.1,
        dept: 1,
        lect_hours: 30,
        lab_hours: 30,
        credits: 3,
    },
    CourseSeed {
        name: DATA_STRUCTURES.0,
        semester: DATA_STRUCTURES.1,
        dept: 1,
        lect_hours: 40,
        lab_hours: 20,
        credits: 4,
    },
    CourseSeed {
        name: LINEAR_ALGEBRA.0,
        semester: LINEAR_ALGEBRA.1,
        dept: 2,
        lect_hours: 30,
        lab_hours: 30,
        credits: 4,
    },
    CourseSeed {
        name: STATISTICAL_METHODS.0,
        semester: STATISTICAL_METHODS.1,
        dept: 2,
        lect_hours: 50,
        lab_hours: 25,
        credits: 5,
    },
    CourseSeed {
        name: THERMODYNAMICS.0,
        semester: THERMODYNAMICS.1,
        dept: 3,
        lect_hours: 25,
        lab_hours: 40,
        credits: 4,
    },
    CourseSeed {
        name: QUANTUM_MECHANICS.0,
        semester: QUANTUM_MECHANICS.1,
        dept: 3,
        lect_hours: 40,
        lab_hours: 30,
        credits: 5,
    },
];

pub const GROUPS: [GroupSeed; 6] = [
    GroupSeed {
        number: 101,
        major: COMPUTER_ENGINEERING,
        dept: 1,
    },
    GroupSeed {
        number: 102,
        major: "B.S./M.S. in Computer Science",
        dept: 1,
    },
    GroupSeed {
        number: 103,
        major: "B.S. in Applied Mathematics and Statistics",
        dept: 2,
    },
    GroupSeed {
        number: 104,
        major: "B.S./M.S. in Pure Mathematics",
        dept: 2,
    },
    GroupSeed {
        number: 105,
        major: "B.E in Electronics",
        dept: 3,
    },
    GroupSeed {
        number: 106,
        major: "B.S./M.S. in Nuclear Engineering",
        dept: 3,
    },
];

pub const STUDENTS: [StudentSeed; 7] = [
    StudentSeed {
        name: "John Smith",
        dob: (1991, 3, 20),
        gpa: 3.0,
        group: 101,
        courses: &[WEB, DATA_STRUCTURES, STATISTICAL_METHODS, QUANTUM_MECHANICS],
    },
    StudentSeed {
        name: "Matthew Reed",
        dob: (1990, 11, 26),
        gpa: 3.5,
        group: 101,
        courses: &[WEB, LINEAR_ALGEBRA, STATISTICAL_METHODS, THERMODYNAMICS],
    },
    StudentSeed {
        name: "Chuan Qin",
        dob: (1989, 2, 5),
        gpa: 4.0,
        group: 101,
        courses: &[LINEAR_ALGEBRA, THERMODYNAMICS, QUANTUM_MECHANICS],
    },
    StudentSeed {
        name: "Rebecca Lawson",
        dob: (1990, 4, 18),
        gpa: 3.3,
        group: 102,
        courses: &[WEB, STATISTICAL_METHODS, THERMODYNAMICS, QUANTUM_MECHANICS],
    },
    StudentSeed {
        name: "Maria Ionescu",
        dob: (1991, 4, 23),
        gpa: 3.9,
        group: 102,
        courses: &[WEB, DATA_STRUCTURES, STATISTICAL_METHODS, QUANTUM_MECHANICS],
    },
    StudentSeed {
        name: "Oliver Blakey",
        dob: (1990, 9, 8),
        gpa: 3.1,
        group: 102,
        courses: &[WEB, DATA_STRUCTURES, THERMODYNAMICS],
    },
    StudentSeed {
        name: "Jing Xia",
        dob: (1988, 12, 30),
        gpa: 3.2,
        group: 102,
        courses: &[WEB, LINEAR_ALGEBRA, THERMODYNAMICS, QUANTUM_MECHANICS],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_sizes() {
        assert_eq!(DEPARTMENTS.len(), 3);
        assert_eq!(COURSES.len(), 6);
        assert_eq!(GROUPS.len(), 6);
        assert_eq!(STUDENTS.len(), 7);
    }

    #[test]
    fn test_course_keys_are_unique() {
        let keys: HashSet<CourseKey> = COURSES.iter().map(CourseSeed::key).collect();
        assert_eq!(keys.len(), COURSES.len());
    }

    #[test]
    fn test_department_names_are_unique() {
        let names: HashSet<&str> = DEPARTMENTS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), DEPARTMENTS.len());
    }

    #[test]
    fn test_references_resolve() {
        let departments: HashSet<i32> = DEPARTMENTS.iter().map(|d| d.number).collect();
        let groups: HashSet<i32> = GROUPS.iter().map(|g| g.number).collect();
        let courses: HashSet<CourseKey> = COURSES.iter().map(CourseSeed::key).collect();

        assert!(COURSES.iter().all(|c| departments.contains(&c.dept)));
        assert!(GROUPS.iter().all(|g| departments.contains(&g.dept)));

        for student in &STUDENTS {
            assert!(groups.contains(&student.group), "{}", student.name);
            for key in student.course_keys() {
                assert!(courses.contains(&key), "{} -> {key}", student.name);
            }
        }
    }

    #[test]
    fn test_dates_are_valid() {
        for student in &STUDENTS {
            assert!(student.dob().is_some(), "{}", student.name);
        }
        assert_eq!(
            STUDENTS[0].dob(),
            NaiveDate::from_ymd_opt(1991, 3, 20)
        );
    }
}
