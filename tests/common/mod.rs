//! Shared test fixtures for the club financials integration tests.
//!
//! `setup_sample_db()` creates an in-memory DuckDB connection populated with
//! small `clubs` and `club_financials` tables via NDJSON temp files.
//! `InMemorySource` serves the same data without DuckDB.

#![allow(dead_code)]

use clubfin_sdk::models::{Club, FinancialRecord};
use clubfin_sdk::{Connection, FinancialSource, Result, SeedManager};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

pub const MAN_UNITED: i64 = 1;
pub const MAN_CITY: i64 = 2;
pub const BARCELONA: i64 = 3;
pub const ARSENAL: i64 = 4;
pub const NORTHSIDE: i64 = 5;

/// Create a `Connection` with sample tables loaded.
///
/// The caller must keep the returned `TempDir` alive for the duration of the
/// test.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let seeds = SeedManager::new(Some(tmp_dir.path().to_path_buf())).unwrap();
    let conn = Connection::new(seeds).unwrap();

    write_ndjson_and_register(&conn, "clubs", &club_rows());
    write_ndjson_and_register(&conn, "club_financials", &financial_rows());

    (conn, tmp_dir)
}

pub fn club_rows() -> Vec<serde_json::Value> {
    vec![
        json!({"id": MAN_UNITED, "name": "Manchester United", "country": "England", "league": "Premier League"}),
        json!({"id": MAN_CITY, "name": "Manchester City", "country": "England", "league": "Premier League"}),
        json!({"id": BARCELONA, "name": "Barcelona", "country": "Spain", "league": "La Liga"}),
        json!({"id": ARSENAL, "name": "Arsenal", "country": "England", "league": "Premier League"}),
        json!({"id": NORTHSIDE, "name": "Northside Athletic", "country": "England", "league": "National League"}),
    ]
}

/// Season rows, deliberately out of year order.
pub fn financial_rows() -> Vec<serde_json::Value> {
    vec![
        json!({"club_id": MAN_UNITED, "year": 2022, "revenue": 583.0, "ebitda": 118.5, "wages": 384.2}),
        json!({"club_id": MAN_UNITED, "year": 2020, "revenue": 509.0, "ebitda": 114.0, "wages": 284.0}),
        json!({"club_id": MAN_UNITED, "year": 2021, "revenue": 494.0, "ebitda": 95.0, "wages": null}),
        json!({"club_id": MAN_CITY, "year": 2022, "revenue": 613.0, "ebitda": 150.0, "wages": 354.0}),
        json!({"club_id": MAN_CITY, "year": 2021, "revenue": 569.8, "ebitda": null, "wages": 355.0}),
        json!({"club_id": BARCELONA, "year": 2022, "revenue": 638.2, "ebitda": 40.0, "wages": null}),
        json!({"club_id": BARCELONA, "year": 2021, "revenue": 582.1, "ebitda": -30.0, "wages": null}),
        json!({"club_id": NORTHSIDE, "year": 2020, "revenue": 0.0, "ebitda": 0.0, "wages": 1.5}),
        json!({"club_id": NORTHSIDE, "year": 2021, "revenue": 12.5, "ebitda": 2.0, "wages": 3.0}),
    ]
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table.
pub fn write_ndjson_and_register(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    conn.register_table_from_ndjson(table_name, file.path().to_str().unwrap())
        .unwrap();
    // DuckDB copied the rows into an in-memory table, so dropping the file is fine.
}

/// `FinancialSource` over plain vectors, mirroring the DuckDB lookup rules.
pub struct InMemorySource {
    pub clubs: Vec<Club>,
    pub records: Vec<FinancialRecord>,
}

impl InMemorySource {
    pub fn sample() -> Self {
        Self {
            clubs: club_rows()
                .into_iter()
                .map(|v| serde_json::from_value(v).unwrap())
                .collect(),
            records: financial_rows()
                .into_iter()
                .map(|v| serde_json::from_value(v).unwrap())
                .collect(),
        }
    }
}

impl FinancialSource for InMemorySource {
    fn lookup_club_by_name(&self, fragment: &str) -> Result<Option<Club>> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        let mut matches: Vec<&Club> = self
            .clubs
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by_key(|c| (c.name.to_lowercase() != needle, c.name.len(), c.name.clone()));
        Ok(matches.first().map(|c| (*c).clone()))
    }

    fn fetch_club_financial_records(&self, club_id: i64) -> Result<Vec<FinancialRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.club_id == club_id)
            .cloned()
            .collect())
    }
}
