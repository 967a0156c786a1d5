use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on students.name for prefix searches and name ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_name")
                    .table(Students::Table)
                    .col(Students::Name)
                    .to_owned(),
            )
            .await?;

        // Foreign key indexes for faster joins
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_group_number")
                    .table(Students::Table)
                    .col(Students::GroupNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_groups_dept_number")
                    .table(Groups::Table)
                    .col(Groups::DeptNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_dept_number")
                    .table(Courses::Table)
                    .col(Courses::DeptNumber)
                    .to_owned(),
            )
            .await?;

        // The junction primary key already leads with student_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_courses_course")
                    .table(StudentCourses::Table)
                    .col(StudentCourses::CourseName)
                    .col(StudentCourses::CourseSemester)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite index names are database-wide, so dropping by name is enough
        for name in [
            "idx_student_courses_course",
            "idx_courses_dept_number",
            "idx_groups_dept_number",
            "idx_students_group_number",
            "idx_students_name",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Name,
    GroupNumber,
}

#[derive(Iden)]
enum Groups {
    Table,
    DeptNumber,
}

#[derive(Iden)]
enum Courses {
    Table,
    DeptNumber,
}

#[derive(Iden)]
enum StudentCourses {
    Table,
    CourseName,
    CourseSemester,
}
