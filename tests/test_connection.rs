//! Connection integration tests: SQL execution, seed loading, type conversion.

mod common;

use clubfin_sdk::{ClubfinError, Connection, SeedManager};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;

fn empty_connection(dir: &Path) -> Connection {
    let seeds = SeedManager::new(Some(dir.to_path_buf())).unwrap();
    Connection::new(seeds).unwrap()
}

fn write_lines(path: &Path, rows: &[serde_json::Value]) {
    let body: String = rows
        .iter()
        .map(|r| format!("{}\n", serde_json::to_string(r).unwrap()))
        .collect();
    fs::write(path, body).unwrap();
}

// ---------------------------------------------------------------------------
// execute / execute_scalar
// ---------------------------------------------------------------------------

#[test]
fn execute_with_params() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn
        .execute(
            "SELECT name FROM clubs WHERE country = ? ORDER BY name",
            &["England".to_string()],
        )
        .unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["name"], "Arsenal");
}

#[test]
fn execute_scalar_returns_first_value_or_none() {
    let (conn, _tmp) = common::setup_sample_db();

    let cnt = conn.execute_scalar("SELECT COUNT(*) FROM clubs", &[]).unwrap();
    assert_eq!(cnt.unwrap().as_i64(), Some(5));

    let none = conn
        .execute_scalar("SELECT id FROM clubs WHERE name = ?", &["Nobody".to_string()])
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn execute_into_deserializes_rows() {
    let (conn, _tmp) = common::setup_sample_db();

    #[derive(serde::Deserialize, Debug)]
    struct Row {
        id: i64,
        name: String,
    }

    let rows: Vec<Row> = conn
        .execute_into("SELECT id, name FROM clubs ORDER BY id", &[])
        .unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].name, "Manchester United");
}

// ---------------------------------------------------------------------------
// Type conversions
// ---------------------------------------------------------------------------

#[test]
fn decimal_and_null_values_convert() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn
        .execute(
            "SELECT CAST(583.25 AS DECIMAL(10, 2)) AS revenue, NULL AS wages, TRUE AS flag",
            &[],
        )
        .unwrap();
    assert!((rows[0]["revenue"].as_f64().unwrap() - 583.25).abs() < 1e-9);
    assert!(rows[0]["wages"].is_null());
    assert_eq!(rows[0]["flag"], true);
}

// ---------------------------------------------------------------------------
// Table registration
// ---------------------------------------------------------------------------

#[test]
fn register_table_replaces_existing_table() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let conn = empty_connection(tmp_dir.path());

    common::write_ndjson_and_register(&conn, "clubs", &[serde_json::json!({"id": 1, "name": "Old"})]);
    common::write_ndjson_and_register(&conn, "clubs", &[serde_json::json!({"id": 2, "name": "New"})]);

    let rows = conn.execute("SELECT * FROM clubs", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "New");
}

#[test]
fn tables_tracks_registrations() {
    let (conn, _tmp) = common::setup_sample_db();

    assert_eq!(conn.tables(), vec!["club_financials", "clubs"]);
    assert!(conn.has_table("clubs"));
}

#[test]
fn reset_forgets_seed_tables_and_keeps_direct_ones() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_lines(&tmp_dir.path().join("clubs.ndjson"), &common::club_rows());
    let conn = empty_connection(tmp_dir.path());

    conn.ensure_tables(&["clubs"]).unwrap();
    common::write_ndjson_and_register(&conn, "club_financials", &common::financial_rows());
    assert_eq!(conn.tables(), vec!["club_financials", "clubs"]);

    conn.reset_tables();
    assert_eq!(conn.tables(), vec!["club_financials"]);
    assert!(!conn.has_table("clubs"));
}

#[test]
fn raw_provides_access_to_underlying_duckdb_connection() {
    let (conn, _tmp) = common::setup_sample_db();

    conn.raw()
        .execute_batch("CREATE TABLE raw_test (id INTEGER, value TEXT); INSERT INTO raw_test VALUES (1, 'hello')")
        .unwrap();

    let rows = conn.execute("SELECT * FROM raw_test", &[]).unwrap();
    assert_eq!(rows[0]["value"], "hello");
}

// ---------------------------------------------------------------------------
// Seed loading
// ---------------------------------------------------------------------------

#[test]
fn ensure_tables_loads_plain_seed_file() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_lines(&tmp_dir.path().join("clubs.ndjson"), &common::club_rows());
    let conn = empty_connection(tmp_dir.path());

    assert!(!conn.has_table("clubs"));
    conn.ensure_tables(&["clubs"]).unwrap();
    assert!(conn.has_table("clubs"));

    let cnt = conn.execute_scalar("SELECT COUNT(*) FROM clubs", &[]).unwrap();
    assert_eq!(cnt.unwrap().as_i64(), Some(5));
}

#[test]
fn ensure_tables_loads_gzipped_seed_file() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let file = fs::File::create(tmp_dir.path().join("club_financials.ndjson.gz")).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    for row in common::financial_rows() {
        writeln!(encoder, "{}", serde_json::to_string(&row).unwrap()).unwrap();
    }
    encoder.finish().unwrap();

    let conn = empty_connection(tmp_dir.path());
    conn.ensure_tables(&["club_financials"]).unwrap();

    let cnt = conn
        .execute_scalar("SELECT COUNT(*) FROM club_financials", &[])
        .unwrap();
    assert_eq!(cnt.unwrap().as_i64(), Some(9));
}

#[test]
fn missing_seed_file_is_not_found() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let conn = empty_connection(tmp_dir.path());

    let err = conn.ensure_tables(&["clubs"]).unwrap_err();
    assert!(matches!(err, ClubfinError::NotFound(msg) if msg.contains("clubs.ndjson")));
}

#[test]
fn unknown_table_is_not_found() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let conn = empty_connection(tmp_dir.path());

    assert!(matches!(
        conn.ensure_tables(&["players"]),
        Err(ClubfinError::NotFound(_))
    ));
}
