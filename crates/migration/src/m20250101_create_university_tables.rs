use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Number)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create groups table
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Number)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Major).string().not_null())
                    .col(ColumnDef::new(Groups::DeptNumber).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-groups-dept_number")
                            .from(Groups::Table, Groups::DeptNumber)
                            .to(Departments::Table, Departments::Number)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table, keyed by (name, semester)
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Semester).integer().not_null())
                    .col(ColumnDef::new(Courses::LectHours).integer().not_null())
                    .col(ColumnDef::new(Courses::LabHours).integer().not_null())
                    .col(ColumnDef::new(Courses::Credits).integer().not_null())
                    .col(ColumnDef::new(Courses::DeptNumber).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk-courses")
                            .col(Courses::Name)
                            .col(Courses::Semester),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-dept_number")
                            .from(Courses::Table, Courses::DeptNumber)
                            .to(Departments::Table, Departments::Number)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Dob).date().not_null())
                    .col(ColumnDef::new(Students::Picture).binary())
                    .col(
                        ColumnDef::new(Students::Gpa)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Students::GroupNumber).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-group_number")
                            .from(Students::Table, Students::GroupNumber)
                            .to(Groups::Table, Groups::Number)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student_courses junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(StudentCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentCourses::StudentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::CourseName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::CourseSemester)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk-student_courses")
                            .col(StudentCourses::StudentId)
                            .col(StudentCourses::CourseName)
                            .col(StudentCourses::CourseSemester),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_courses-student_id")
                            .from(StudentCourses::Table, StudentCourses::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_courses-course")
                            .from(
                                StudentCourses::Table,
                                (StudentCourses::CourseName, StudentCourses::CourseSemester),
                            )
                            .to(Courses::Table, (Courses::Name, Courses::Semester))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(StudentCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Number,
    Name,
}

#[derive(Iden)]
enum Groups {
    Table,
    Number,
    Major,
    DeptNumber,
}

#[derive(Iden)]
enum Courses {
    Table,
    Name,
    Semester,
    LectHours,
    LabHours,
    Credits,
    DeptNumber,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    Name,
    Dob,
    Picture,
    Gpa,
    GroupNumber,
}

#[derive(Iden)]
enum StudentCourses {
    Table,
    StudentId,
    CourseName,
    CourseSemester,
}
