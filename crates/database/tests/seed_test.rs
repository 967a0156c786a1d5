mod common;

use common::{create_test_db, sqlite_url};
use database::{
    db::{DbConfig, create_connection},
    services::{
        seed::{SeedOutcome, SeedService},
        university::{TableCounts, UniversityService},
    },
};
use models::university::{
    COURSES, DEPARTMENTS, Fixture, GROUPS, SAMPLE, STUDENTS, StudentSeed,
};
use sea_orm::DbErr;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_seed_populates_every_table() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;

    let outcome = SeedService::populate(&db).await.expect("Failed to seed");
    assert_eq!(
        outcome,
        SeedOutcome::Seeded {
            students: 7,
            enrollments: 26
        }
    );

    let counts = UniversityService::counts(&db).await.unwrap();
    assert_eq!(
        counts,
        TableCounts {
            departments: 3,
            groups: 6,
            courses: 6,
            students: 7,
            enrollments: 26,
        }
    );
}

#[tokio::test]
async fn test_seed_twice_keeps_seven_students() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;

    SeedService::populate(&db).await.expect("Failed to seed");
    let second = SeedService::populate(&db).await.expect("Failed to reseed");

    assert_eq!(second, SeedOutcome::AlreadyPopulated { students: 7 });
    assert_eq!(UniversityService::counts(&db).await.unwrap().students, 7);
}

#[tokio::test]
async fn test_reopening_keeps_data() {
    let temp_file = NamedTempFile::new().unwrap();

    {
        let db = create_test_db(&temp_file).await;
        SeedService::populate(&db).await.expect("Failed to seed");
        db.close().await.unwrap();
    }

    let config = DbConfig {
        url: sqlite_url(&temp_file),
        sql_debug: false,
    };
    let db = create_connection(&config)
        .await
        .expect("Failed to reopen database");

    assert_eq!(UniversityService::counts(&db).await.unwrap().students, 7);
    assert_eq!(
        SeedService::populate(&db).await.unwrap(),
        SeedOutcome::AlreadyPopulated { students: 7 }
    );
}

#[tokio::test]
async fn test_unknown_course_rolls_back_everything() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;

    let students = [
        STUDENTS[0],
        StudentSeed {
            name: "Ada Byron",
            dob: (1990, 12, 10),
            gpa: 3.8,
            group: 102,
            courses: &[("Analytical Engines", 1)],
        },
    ];
    let fixture = Fixture {
        students: &students,
        ..SAMPLE
    };

    let result = SeedService::populate_with(&db, &fixture).await;
    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    assert_eq!(
        UniversityService::counts(&db).await.unwrap(),
        TableCounts::default()
    );
}

#[tokio::test]
async fn test_invalid_student_data_rolls_back_everything() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;

    let bad_date = [StudentSeed {
        dob: (1990, 2, 30),
        ..STUDENTS[0]
    }];
    let fixture = Fixture {
        departments: &DEPARTMENTS,
        courses: &COURSES,
        groups: &GROUPS,
        students: &bad_date,
    };
    let result = SeedService::populate_with(&db, &fixture).await;
    assert!(matches!(result, Err(DbErr::Custom(_))));

    let bad_gpa = [StudentSeed {
        gpa: 4.5,
        ..STUDENTS[0]
    }];
    let fixture = Fixture {
        students: &bad_gpa,
        ..SAMPLE
    };
    let result = SeedService::populate_with(&db, &fixture).await;
    assert!(matches!(result, Err(DbErr::Custom(_))));

    assert_eq!(
        UniversityService::counts(&db).await.unwrap(),
        TableCounts::default()
    );
}

#[tokio::test]
async fn test_unknown_group_violates_foreign_key() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;

    let orphan = [StudentSeed {
        group: 999,
        ..STUDENTS[0]
    }];
    let fixture = Fixture {
        students: &orphan,
        ..SAMPLE
    };

    assert!(SeedService::populate_with(&db, &fixture).await.is_err());
    assert_eq!(UniversityService::counts(&db).await.unwrap().departments, 0);
}
