mod common;

use common::sqlite_url;
use database::{
    db::{DbConfig, SQL_LOG_TARGET, create_connection},
    services::{
        query_student::QueryStudentService, seed::SeedService, university::UniversityService,
    },
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};
use tempfile::NamedTempFile;

/// Keeps every record so tests can inspect what was logged
struct CaptureLogger {
    records: Mutex<Vec<(String, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((
                record.target().to_string(),
                record.level(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("Logger already installed");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// SQL records on the `sql` target that contain `needle`
fn sql_records_containing(needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(target, level, message)| {
            target == SQL_LOG_TARGET && *level == Level::Debug && message.contains(needle)
        })
        .map(|(_, _, message)| message.clone())
        .collect()
}

#[tokio::test]
async fn test_statements_are_logged_on_sql_target() {
    install_logger();

    let temp_file = NamedTempFile::new().unwrap();
    let config = DbConfig {
        url: sqlite_url(&temp_file),
        sql_debug: true,
    };
    let db = create_connection(&config).await.unwrap();
    SeedService::populate(&db).await.unwrap();

    QueryStudentService::name_contains(&db, "Reed").await.unwrap();
    let selects = sql_records_containing("Reed");
    assert!(
        selects.iter().any(|sql| sql.starts_with("SELECT") && sql.contains("instr")),
        "no SELECT logged: {selects:?}"
    );

    let inserts = sql_records_containing(r#"INSERT INTO "departments""#);
    assert_eq!(inserts.len(), 1);

    UniversityService::counts(&db).await.unwrap();
    assert!(!sql_records_containing("COUNT(*)").is_empty());
}

#[tokio::test]
async fn test_driver_does_not_log_statements() {
    install_logger();

    let temp_file = NamedTempFile::new().unwrap();
    let config = DbConfig {
        url: sqlite_url(&temp_file),
        sql_debug: true,
    };
    let db = create_connection(&config).await.unwrap();
    QueryStudentService::all(&db).await.unwrap();

    let driver_records = LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(target, _, _)| target.starts_with("sqlx::query"))
        .count();
    assert_eq!(driver_records, 0);
}
