//! Club financials SDK for Rust.
//!
//! Stores per-club, per-season financial records in an in-process DuckDB
//! database and derives year-over-year and CAGR revenue metrics for charts and
//! tables. A small pattern-matching resolver answers single-fact questions
//! such as "What was Arsenal's revenue in 2022?".
//!
//! # Quick start
//!
//! ```no_run
//! use clubfin_sdk::ClubfinSdk;
//!
//! let sdk = ClubfinSdk::builder().data_dir("./data").build().unwrap();
//!
//! // Year-ordered series with YoY annotations
//! let club = sdk.clubs().find_by_name("arsenal").unwrap().unwrap();
//! let series = sdk.metrics().time_series(club.id).unwrap();
//!
//! // Ask a question, answer in euros
//! let answer = sdk.ask("What was Arsenal's revenue in 2022?", Some("EUR")).unwrap();
//! println!("{}", answer.text);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod currency;
pub mod error;
pub mod models;
pub mod numeric;
pub mod queries;
pub mod resolver;
pub mod seed;
pub mod sql_builder;
pub mod timeseries;

#[cfg(feature = "async")]
pub use async_client::AsyncClubfinSdk;
pub use connection::Connection;
pub use currency::{CurrencyInfo, CurrencyTable};
pub use error::{ClubfinError, QueryError, Result};
pub use resolver::{FinancialSource, QueryResolver};
pub use seed::SeedManager;
pub use sql_builder::SqlBuilder;
pub use timeseries::{compute_cagr, compute_cagr_from_metrics, derive_yoy};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use models::Answer;

// ---------------------------------------------------------------------------
// ClubfinSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ClubfinSdk`] instance.
#[derive(Default)]
pub struct ClubfinSdkBuilder {
    data_dir: Option<PathBuf>,
    currencies: Option<CurrencyTable>,
}

impl ClubfinSdkBuilder {
    /// Set the directory holding the seed files.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/clubfin-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use an explicit currency table instead of loading one.
    pub fn currency_table(mut self, table: CurrencyTable) -> Self {
        self.currencies = Some(table);
        self
    }

    /// Build the SDK.
    ///
    /// The currency table is fixed here: an explicit table wins, then
    /// `currencies.json` from the data directory, then the built-in rates.
    /// Seed tables are loaded lazily on first query.
    pub fn build(self) -> Result<ClubfinSdk> {
        let seeds = SeedManager::new(self.data_dir)?;
        let currencies = match self.currencies {
            Some(table) => table,
            None => match seeds.load_json(config::CURRENCIES_FILE)? {
                Some(doc) => CurrencyTable::from_json(doc)?,
                None => CurrencyTable::default(),
            },
        };
        tracing::debug!(base = currencies.base(), codes = ?currencies.codes(), "currency table ready");

        let conn = Connection::new(seeds)?;
        Ok(ClubfinSdk { conn, currencies })
    }
}

// ---------------------------------------------------------------------------
// ClubfinSdk
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the DuckDB [`Connection`] and the [`CurrencyTable`], and hands out
/// lightweight borrowing query interfaces.
pub struct ClubfinSdk {
    conn: Connection,
    currencies: CurrencyTable,
}

impl ClubfinSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> ClubfinSdkBuilder {
        ClubfinSdkBuilder::default()
    }

    /// Build an SDK around an existing connection, e.g. one seeded in tests.
    pub fn from_connection(conn: Connection, currencies: CurrencyTable) -> Self {
        Self { conn, currencies }
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the club query interface.
    pub fn clubs(&self) -> queries::ClubQuery<'_> {
        queries::ClubQuery::new(&self.conn)
    }

    /// Access the raw financial record interface.
    pub fn financials(&self) -> queries::FinancialQuery<'_> {
        queries::FinancialQuery::new(&self.conn)
    }

    /// Access derived YoY/CAGR metrics.
    pub fn metrics(&self) -> queries::MetricsQuery<'_> {
        queries::MetricsQuery::new(&self.conn, &self.currencies)
    }

    /// Access the question resolver.
    pub fn resolver(&self) -> QueryResolver<'_, Connection> {
        QueryResolver::new(&self.conn, &self.currencies)
    }

    /// Answer a single-fact revenue question.
    ///
    /// Shorthand for `self.resolver().answer_question(question, currency)`.
    pub fn ask(&self, question: &str, currency: Option<&str>) -> Result<Answer> {
        self.resolver().answer_question(question, currency)
    }

    // -- Metadata and utility methods --------------------------------------

    /// The currency table in use.
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Return the names of registered tables.
    pub fn tables(&self) -> Vec<String> {
        self.conn.tables()
    }

    /// Execute a raw SQL query with `?` positional placeholders.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Forget seed-loaded tables so the next query re-reads the seed files.
    ///
    /// Tables registered directly on the connection stay as they are.
    pub fn reload(&self) {
        self.conn.reset_tables();
        tracing::info!("seed tables reset; seeds will be reloaded on next query");
    }

    /// Return a reference to the underlying [`Connection`].
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for ClubfinSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClubfinSdk(data_dir={}, tables=[{}], base_currency={})",
            self.conn.seeds.data_dir.display(),
            self.conn.tables().join(", "),
            self.currencies.base()
        )
    }
}
