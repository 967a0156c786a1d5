#![allow(dead_code)]

use database::{
    db::{DbConfig, create_connection},
    entities::students,
};
use sea_orm::DatabaseConnection;
use tempfile::NamedTempFile;

pub fn sqlite_url(path: &NamedTempFile) -> String {
    format!(
        "sqlite:{}?mode=rwc",
        path.path().to_str().unwrap().replace("\\", "/")
    )
}

/// Opens a migrated database backed by `path`
pub async fn create_test_db(path: &NamedTempFile) -> DatabaseConnection {
    let config = DbConfig {
        url: sqlite_url(path),
        sql_debug: false,
    };

    create_connection(&config)
        .await
        .expect("Failed to open test database")
}

pub fn names(students: &[students::Model]) -> Vec<&str> {
    students.iter().map(|s| s.name.as_str()).collect()
}
