use crate::{
    db::log_sql,
    entities::{courses, departments, groups, student_courses, students},
};
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, ModelTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::{Alias, Expr, Func, SimpleExpr},
};

pub struct QueryStudentService;

impl QueryStudentService {
    /// All students in insertion order
    pub async fn all(db: &DatabaseConnection) -> Result<Vec<students::Model>, DbErr> {
        Self::fetch(db, students::Entity::find().order_by_asc(students::Column::Id)).await
    }

    /// Students whose gpa is strictly above `min_gpa` and who were born in `year`
    pub async fn with_gpa_above_born_in(
        db: &DatabaseConnection,
        min_gpa: f64,
        year: i32,
    ) -> Result<Vec<students::Model>, DbErr> {
        let (first_day, last_day) = Self::year_bounds(year)?;

        let query = students::Entity::find()
            .filter(students::Column::Gpa.gt(min_gpa))
            .filter(students::Column::Dob.between(first_day, last_day))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Students enrolled in fewer than `limit` courses, including those with none
    pub async fn with_fewer_courses_than(
        db: &DatabaseConnection,
        limit: i64,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = students::Entity::find()
            .join(JoinType::LeftJoin, students::Relation::StudentCourses.def())
            .group_by(students::Column::Id)
            .having(Expr::expr(Self::enrollment_count()).lt(limit))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Students whose name begins with `prefix`, compared literally
    pub async fn name_starts_with(
        db: &DatabaseConnection,
        prefix: &str,
    ) -> Result<Vec<students::Model>, DbErr> {
        // substr(name, 1, length(prefix)) = prefix, case-sensitive with no wildcards
        let head = Func::cust(Alias::new("substr"))
            .arg(Expr::col((students::Entity, students::Column::Name)))
            .arg(Expr::val(1))
            .arg(Func::cust(Alias::new("length")).arg(Expr::val(prefix)));

        let query = students::Entity::find()
            .filter(Expr::expr(head).eq(prefix))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Students whose name contains `fragment` exactly as written
    pub async fn name_contains(
        db: &DatabaseConnection,
        fragment: &str,
    ) -> Result<Vec<students::Model>, DbErr> {
        let position = Func::cust(Alias::new("instr"))
            .arg(Expr::col((students::Entity, students::Column::Name)))
            .arg(Expr::val(fragment));

        let query = students::Entity::find()
            .filter(Expr::expr(position).gt(0))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Students taking a course called `course_name` in any semester
    pub async fn enrolled_in(
        db: &DatabaseConnection,
        course_name: &str,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = students::Entity::find()
            .join(JoinType::InnerJoin, students::Relation::StudentCourses.def())
            .filter(student_courses::Column::CourseName.eq(course_name))
            .distinct()
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Mean gpa over all students, `None` when there are no students
    pub async fn average_gpa(db: &DatabaseConnection) -> Result<Option<f64>, DbErr> {
        let query = students::Entity::find().select_only().column_as(
            SimpleExpr::from(Func::avg(Expr::col((
                students::Entity,
                students::Column::Gpa,
            )))),
            "average_gpa",
        );
        log_sql(db, &query);

        let average = query.into_tuple::<Option<f64>>().one(db).await?;
        Ok(average.flatten())
    }

    /// Students whose enrolled courses add up to fewer than `limit` credits
    pub async fn with_total_credits_below(
        db: &DatabaseConnection,
        limit: i64,
    ) -> Result<Vec<students::Model>, DbErr> {
        let credit_sum: [SimpleExpr; 2] = [
            Func::sum(Expr::col((courses::Entity, courses::Column::Credits))).into(),
            Expr::val(0).into(),
        ];
        let total_credits = Func::coalesce(credit_sum);

        let query = students::Entity::find()
            .join(JoinType::LeftJoin, students::Relation::StudentCourses.def())
            .join(JoinType::LeftJoin, student_courses::Relation::Course.def())
            .group_by(students::Column::Id)
            .having(Expr::expr(total_credits).lt(limit))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Students whose group studies `major`
    pub async fn in_major(
        db: &DatabaseConnection,
        major: &str,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = students::Entity::find()
            .join(JoinType::InnerJoin, students::Relation::Group.def())
            .filter(groups::Column::Major.eq(major))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Students whose group belongs to the department named `department`
    pub async fn in_department(
        db: &DatabaseConnection,
        department: &str,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = Self::joined_to_department(department).order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    pub async fn ordered_by_name(
        db: &DatabaseConnection,
        order: Order,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = students::Entity::find().order_by(students::Column::Name, order);

        Self::fetch(db, query).await
    }

    /// Rows `start..end` of the name-ascending order
    pub async fn page_by_name(
        db: &DatabaseConnection,
        start: u64,
        end: u64,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = students::Entity::find()
            .order_by_asc(students::Column::Name)
            .offset(start)
            .limit(end.saturating_sub(start));

        Self::fetch(db, query).await
    }

    /// Grouped by group number, names descending within each group
    pub async fn ordered_by_group_then_name_desc(
        db: &DatabaseConnection,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = students::Entity::find()
            .order_by_asc(students::Column::GroupNumber)
            .order_by_desc(students::Column::Name);

        Self::fetch(db, query).await
    }

    /// Students of `department` with gpa above `min_gpa` taking more than `min_courses` courses
    pub async fn high_achievers_in_department(
        db: &DatabaseConnection,
        department: &str,
        min_gpa: f64,
        min_courses: i64,
    ) -> Result<Vec<students::Model>, DbErr> {
        let query = Self::joined_to_department(department)
            .filter(students::Column::Gpa.gt(min_gpa))
            .join(JoinType::LeftJoin, students::Relation::StudentCourses.def())
            .group_by(students::Column::Id)
            .having(Expr::expr(Self::enrollment_count()).gt(min_courses))
            .order_by_asc(students::Column::Id);

        Self::fetch(db, query).await
    }

    /// Courses a student is enrolled in, by name then semester
    pub async fn courses_of(
        db: &DatabaseConnection,
        student: &students::Model,
    ) -> Result<Vec<courses::Model>, DbErr> {
        let query = student
            .find_related(courses::Entity)
            .order_by_asc(courses::Column::Name)
            .order_by_asc(courses::Column::Semester);
        log_sql(db, &query);

        query.all(db).await
    }

    fn joined_to_department(department: &str) -> Select<students::Entity> {
        students::Entity::find()
            .join(JoinType::InnerJoin, students::Relation::Group.def())
            .join(JoinType::InnerJoin, groups::Relation::Department.def())
            .filter(departments::Column::Name.eq(department))
    }

    /// COUNT over the junction rows of a left join, so students without courses count 0
    fn enrollment_count() -> SimpleExpr {
        Func::count(Expr::col((
            student_courses::Entity,
            student_courses::Column::CourseName,
        )))
        .into()
    }

    fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), DbErr> {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .zip(NaiveDate::from_ymd_opt(year, 12, 31))
            .ok_or_else(|| DbErr::Custom(format!("Year {year} is out of range")))
    }

    async fn fetch(
        db: &DatabaseConnection,
        query: Select<students::Entity>,
    ) -> Result<Vec<students::Model>, DbErr> {
        log_sql(db, &query);
        query.all(db).await
    }
}
