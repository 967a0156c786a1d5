use anyhow::{Context, Result};
use database::{entities::students, services::query_student::QueryStudentService};
use log::info;
use models::university::{COMPUTER_ENGINEERING, COMPUTER_SCIENCE, WEB_DESIGN};
use sea_orm::{DatabaseConnection, DbErr, Order};
use std::io::{self, Write};

/// Writes one name per line followed by a blank line
pub fn print_students<W: Write>(out: &mut W, students: &[students::Model]) -> io::Result<()> {
    for student in students {
        writeln!(out, "{}", student.name)?;
    }
    writeln!(out)
}

pub fn print_average<W: Write>(out: &mut W, average: Option<f64>) -> io::Result<()> {
    match average {
        Some(average) => writeln!(out, "Average GPA is {average}")?,
        None => writeln!(out, "Average GPA is undefined, there are no students")?,
    }
    writeln!(out)
}

fn show<W: Write>(
    out: &mut W,
    caption: &str,
    result: Result<Vec<students::Model>, DbErr>,
) -> Result<()> {
    let students = result.with_context(|| format!("Query failed: {caption}"))?;
    info!("{caption}: {} students", students.len());
    print_students(out, &students)?;
    Ok(())
}

/// Runs every example query in order and prints the results to `out`
pub async fn run_showcase<W: Write>(db: &DatabaseConnection, out: &mut W) -> Result<()> {
    show(out, "All students", QueryStudentService::all(db).await)?;

    show(
        out,
        "GPA above 3.4, born in 1990",
        QueryStudentService::with_gpa_above_born_in(db, 3.4, 1990).await,
    )?;

    show(
        out,
        "Fewer than 4 courses",
        QueryStudentService::with_fewer_courses_than(db, 4).await,
    )?;

    show(
        out,
        "Name starts with M",
        QueryStudentService::name_starts_with(db, "M").await,
    )?;

    show(
        out,
        "Name contains Smith",
        QueryStudentService::name_contains(db, "Smith").await,
    )?;

    show(
        out,
        "Enrolled in Web Design",
        QueryStudentService::enrolled_in(db, WEB_DESIGN).await,
    )?;

    let average = QueryStudentService::average_gpa(db)
        .await
        .context("Query failed: average GPA")?;
    print_average(out, average)?;

    show(
        out,
        "Fewer than 15 credits",
        QueryStudentService::with_total_credits_below(db, 15).await,
    )?;

    show(
        out,
        "Computer Engineering majors",
        QueryStudentService::in_major(db, COMPUTER_ENGINEERING).await,
    )?;

    show(
        out,
        "Computer Science department",
        QueryStudentService::in_department(db, COMPUTER_SCIENCE).await,
    )?;

    show(
        out,
        "Ordered by name",
        QueryStudentService::ordered_by_name(db, Order::Asc).await,
    )?;

    show(
        out,
        "Positions 2 to 4 by name",
        QueryStudentService::page_by_name(db, 2, 4).await,
    )?;

    show(
        out,
        "Ordered by name, descending",
        QueryStudentService::ordered_by_name(db, Order::Desc).await,
    )?;

    show(
        out,
        "Ordered by group, then name descending",
        QueryStudentService::ordered_by_group_then_name_desc(db).await,
    )?;

    show(
        out,
        "Computer Science, GPA above 3.5, more than 3 courses",
        QueryStudentService::high_achievers_in_department(db, COMPUTER_SCIENCE, 3.5, 3).await,
    )?;

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::gpa::Gpa;
    use sea_orm::prelude::Date;

    fn student(id: i32, name: &str) -> students::Model {
        students::Model {
            id,
            name: name.to_string(),
            dob: Date::from_ymd_opt(1990, 1, 1).unwrap(),
            picture: None,
            gpa: Gpa::new(3.0).unwrap(),
            group_number: 101,
        }
    }

    #[test]
    fn test_print_students_one_per_line() {
        let mut out = Vec::new();
        print_students(&mut out, &[student(1, "John Smith"), student(2, "Jing Xia")]).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "John Smith\nJing Xia\n\n");
    }

    #[test]
    fn test_print_empty_result_is_blank_line() {
        let mut out = Vec::new();
        print_students(&mut out, &[]).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "\n");
    }

    #[test]
    fn test_print_average() {
        let mut out = Vec::new();
        print_average(&mut out, Some(3.5)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Average GPA is 3.5\n\n");

        let mut out = Vec::new();
        print_average(&mut out, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Average GPA is undefined, there are no students\n\n"
        );
    }
}
