use crate::{
    db::log_sql,
    entities::{courses, departments, groups, student_courses, students},
};
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, QuerySelect,
    sea_query::{Asterisk, Expr},
};

/// Row counts of every table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub departments: u64,
    pub groups: u64,
    pub courses: u64,
    pub students: u64,
    pub enrollments: u64,
}

pub struct UniversityService;

impl UniversityService {
    pub async fn counts(db: &DatabaseConnection) -> Result<TableCounts, DbErr> {
        Ok(TableCounts {
            departments: Self::count::<departments::Entity>(db).await?,
            groups: Self::count::<groups::Entity>(db).await?,
            courses: Self::count::<courses::Entity>(db).await?,
            students: Self::count::<students::Entity>(db).await?,
            enrollments: Self::count::<student_courses::Entity>(db).await?,
        })
    }

    async fn count<E: EntityTrait>(db: &DatabaseConnection) -> Result<u64, DbErr> {
        let query = E::find()
            .select_only()
            .column_as(Expr::col(Asterisk).count(), "count");
        log_sql(db, &query);

        let count = query.into_tuple::<i64>().one(db).await?.unwrap_or(0);
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
