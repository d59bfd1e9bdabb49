//! DuckDB connection wrapper with lazy table registration and query execution.

use crate::error::{ClubfinError, Result};
use crate::seed::SeedManager;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;

/// Wraps an in-memory DuckDB connection and loads seed files as tables.
///
/// Tables (`clubs`, `club_financials`) are created on first access from the
/// NDJSON seed files resolved by the [`SeedManager`]. Tables registered
/// directly through [`register_table_from_ndjson`](Self::register_table_from_ndjson)
/// take precedence and are never reloaded from seeds.
pub struct Connection {
    conn: DuckDbConnection,
    /// Seed resolver used to locate data files.
    pub seeds: SeedManager,
    registered_tables: RefCell<HashMap<String, TableOrigin>>,
}

/// How a table got registered; decides whether [`Connection::reset_tables`]
/// forgets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableOrigin {
    Seed,
    Direct,
}

impl Connection {
    /// Create a connection backed by the given seed manager.
    ///
    /// Opens an in-memory DuckDB database.
    pub fn new(seeds: SeedManager) -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            seeds,
            registered_tables: RefCell::new(HashMap::new()),
        })
    }

    /// Ensure one or more tables are registered, loading seed files if needed.
    pub fn ensure_tables(&self, tables: &[&str]) -> Result<()> {
        for name in tables {
            if !self.registered_tables.borrow().contains_key(*name) {
                self.load_seed_table(name)?;
            }
        }
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        tracing::trace!(sql, ?params, "execute");
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has executed
        let stmt_ref = rows
            .as_ref()
            .ok_or_else(|| ClubfinError::InvalidArgument("statement already finalized".into()))?;
        let column_names: Vec<String> = stmt_ref
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[String]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;
        match rows.next()? {
            Some(row) => Ok(Some(convert_value_ref(row.get_ref(0)?))),
            None => Ok(None),
        }
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    ///
    /// Replaces any table of the same name. The table survives
    /// [`reset_tables`](Self::reset_tables).
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        self.create_table_from_ndjson(table_name, ndjson_path, TableOrigin::Direct)
    }

    fn create_table_from_ndjson(
        &self,
        table_name: &str,
        ndjson_path: &str,
        origin: TableOrigin,
    ) -> Result<()> {
        let path_fwd = ndjson_path.replace('\\', "/");
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table}; \
             CREATE TABLE {table} AS SELECT * FROM read_json_auto('{path}', format='newline_delimited')",
            table = table_name,
            path = path_fwd
        ))?;
        self.registered_tables
            .borrow_mut()
            .insert(table_name.to_string(), origin);
        tracing::info!(table = table_name, path = %path_fwd, ?origin, "registered table");
        Ok(())
    }

    /// Check whether a table has been registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registered_tables.borrow().contains_key(name)
    }

    /// Return the names of all registered tables, sorted.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registered_tables.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget seed-loaded tables so they are reloaded on next access.
    ///
    /// Directly registered tables are kept.
    pub fn reset_tables(&self) {
        self.registered_tables
            .borrow_mut()
            .retain(|_, origin| *origin == TableOrigin::Direct);
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }

    fn load_seed_table(&self, table: &str) -> Result<()> {
        let path = self.seeds.ensure_seed(table)?;
        self.create_table_from_ndjson(table, &path.to_string_lossy(), TableOrigin::Seed)
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
///
/// Decimal columns come back as JSON numbers; temporal and nested types map
/// to `Null` since no table here uses them.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    use serde_json::Value;

    match val {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Bool(b),
        ValueRef::TinyInt(n) => Value::Number(n.into()),
        ValueRef::SmallInt(n) => Value::Number(n.into()),
        ValueRef::Int(n) => Value::Number(n.into()),
        ValueRef::BigInt(n) => Value::Number(n.into()),
        ValueRef::UTinyInt(n) => Value::Number(n.into()),
        ValueRef::USmallInt(n) => Value::Number(n.into()),
        ValueRef::UInt(n) => Value::Number(n.into()),
        ValueRef::UBigInt(n) => Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => Value::Number(i.into()),
            Err(_) => Value::String(n.to_string()),
        },
        ValueRef::Float(f) => float_value(f as f64),
        ValueRef::Double(f) => float_value(f),
        ValueRef::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map(float_value)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        _ => Value::Null,
    }
}

fn float_value(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
