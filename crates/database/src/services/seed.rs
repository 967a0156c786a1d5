use crate::{
    db::log_sql,
    entities::{courses, departments, groups, student_courses, students},
};
use log::{debug, info};
use models::{
    course_key::CourseKey,
    gpa::Gpa,
    university::{Fixture, SAMPLE, StudentSeed},
};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, TransactionTrait,
};
use std::collections::HashSet;

/// What a call to [`SeedService::populate`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The fixture was inserted and committed
    Seeded { students: usize, enrollments: usize },
    /// Students already existed, nothing was written
    AlreadyPopulated { students: u64 },
}

pub struct SeedService;

impl SeedService {
    /// Populates an empty database with the sample university
    pub async fn populate(db: &DatabaseConnection) -> Result<SeedOutcome, DbErr> {
        Self::populate_with(db, &SAMPLE).await
    }

    /// Inserts `fixture` in a single transaction unless any student row exists.
    /// On error the transaction is dropped and nothing is kept.
    pub async fn populate_with(
        db: &DatabaseConnection,
        fixture: &Fixture<'_>,
    ) -> Result<SeedOutcome, DbErr> {
        let txn = db.begin().await?;

        let existing = students::Entity::find().count(&txn).await?;
        if existing > 0 {
            info!("Database already holds {existing} students, skipping seed");
            txn.rollback().await?;
            return Ok(SeedOutcome::AlreadyPopulated { students: existing });
        }

        Self::insert_departments(&txn, fixture).await?;
        Self::insert_courses(&txn, fixture).await?;
        Self::insert_groups(&txn, fixture).await?;

        let course_cache = Self::build_course_cache(&txn).await?;

        let mut enrollments = 0;
        for seed in fixture.students {
            let student = Self::insert_student(&txn, seed).await?;
            enrollments +=
                Self::enroll(&txn, &course_cache, student.id, &seed.course_keys()).await?;
        }

        txn.commit().await?;

        info!(
            "Seeded {} departments, {} courses, {} groups, {} students, {} enrollments",
            fixture.departments.len(),
            fixture.courses.len(),
            fixture.groups.len(),
            fixture.students.len(),
            enrollments
        );

        Ok(SeedOutcome::Seeded {
            students: fixture.students.len(),
            enrollments,
        })
    }

    async fn insert_departments(
        txn: &DatabaseTransaction,
        fixture: &Fixture<'_>,
    ) -> Result<(), DbErr> {
        let rows: Vec<departments::ActiveModel> = fixture
            .departments
            .iter()
            .map(|d| departments::ActiveModel {
                number: Set(d.number),
                name: Set(d.name.to_string()),
            })
            .collect();

        if !rows.is_empty() {
            let insert = departments::Entity::insert_many(rows);
            log_sql(txn, &insert);
            insert.exec_without_returning(txn).await?;
        }
        Ok(())
    }

    async fn insert_courses(txn: &DatabaseTransaction, fixture: &Fixture<'_>) -> Result<(), DbErr> {
        let rows: Vec<courses::ActiveModel> = fixture
            .courses
            .iter()
            .map(|c| courses::ActiveModel {
                name: Set(c.name.to_string()),
                semester: Set(c.semester),
                lect_hours: Set(c.lect_hours),
                lab_hours: Set(c.lab_hours),
                credits: Set(c.credits),
                dept_number: Set(c.dept),
            })
            .collect();

        if !rows.is_empty() {
            let insert = courses::Entity::insert_many(rows);
            log_sql(txn, &insert);
            insert.exec_without_returning(txn).await?;
        }
        Ok(())
    }

    async fn insert_groups(txn: &DatabaseTransaction, fixture: &Fixture<'_>) -> Result<(), DbErr> {
        let rows: Vec<groups::ActiveModel> = fixture
            .groups
            .iter()
            .map(|g| groups::ActiveModel {
                number: Set(g.number),
                major: Set(g.major.to_string()),
                dept_number: Set(g.dept),
            })
            .collect();

        if !rows.is_empty() {
            let insert = groups::Entity::insert_many(rows);
            log_sql(txn, &insert);
            insert.exec_without_returning(txn).await?;
        }
        Ok(())
    }

    /// Inserts one student and returns the row with its generated id
    async fn insert_student(
        txn: &DatabaseTransaction,
        seed: &StudentSeed,
    ) -> Result<students::Model, DbErr> {
        let dob = seed.dob().ok_or_else(|| {
            DbErr::Custom(format!(
                "Invalid date of birth {:?} for {}",
                seed.dob, seed.name
            ))
        })?;
        let gpa =
            Gpa::new(seed.gpa).map_err(|e| DbErr::Custom(format!("{}: {e}", seed.name)))?;

        let insert = students::Entity::insert(students::ActiveModel {
            name: Set(seed.name.to_string()),
            dob: Set(dob),
            picture: Set(None),
            gpa: Set(gpa),
            group_number: Set(seed.group),
            ..Default::default()
        });
        log_sql(txn, &insert);

        let student = insert.exec_with_returning(txn).await?;

        debug!("Inserted student {} ({})", student.name, student.id);
        Ok(student)
    }

    /// Build a cache of every course key currently stored
    async fn build_course_cache(txn: &DatabaseTransaction) -> Result<HashSet<CourseKey>, DbErr> {
        let courses = courses::Entity::find().all(txn).await?;

        Ok(courses
            .into_iter()
            .map(|c| CourseKey::new(c.name, c.semester))
            .collect())
    }

    /// Links a student to each listed course. Every course must already exist.
    async fn enroll(
        txn: &DatabaseTransaction,
        course_cache: &HashSet<CourseKey>,
        student_id: i32,
        course_keys: &[CourseKey],
    ) -> Result<usize, DbErr> {
        let mut links = Vec::with_capacity(course_keys.len());

        for key in course_keys {
            if !course_cache.contains(key) {
                return Err(DbErr::RecordNotFound(format!(
                    "Course {key} for student {student_id}"
                )));
            }

            links.push(student_courses::ActiveModel {
                student_id: Set(student_id),
                course_name: Set(key.name.clone()),
                course_semester: Set(key.semester),
            });
        }

        if !links.is_empty() {
            let insert = student_courses::Entity::insert_many(links);
            log_sql(txn, &insert);
            insert.exec_without_returning(txn).await?;
        }

        Ok(course_keys.len())
    }
}
