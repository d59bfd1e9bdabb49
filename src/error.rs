/// Failures of the revenue question pipeline.
///
/// Each variant is user-facing and deterministic: asking the same question
/// against the same data fails the same way, so none of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Please include a year between 2000 and 2099 in your question")]
    MissingYear,

    #[error("Could not find a club name in your question")]
    MissingClubName,

    #[error("Club '{name}' not found")]
    ClubNotFound { name: String },

    #[error("No financial data for {club} in {year}")]
    YearDataNotFound { club: String, year: i32 },

    /// Internal guard: a non-first season without a computed change means the
    /// derived series is inconsistent.
    #[error("Year-over-year change unavailable for {club} in {year}")]
    YoYCalculationUnavailable { club: String, year: i32 },
}

impl QueryError {
    /// Stable machine-readable code for transports.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::MissingYear => "missing_year",
            QueryError::MissingClubName => "missing_club_name",
            QueryError::ClubNotFound { .. } => "club_not_found",
            QueryError::YearDataNotFound { .. } => "year_data_not_found",
            QueryError::YoYCalculationUnavailable { .. } => "yoy_calculation_unavailable",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClubfinError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

pub type Result<T> = std::result::Result<T, ClubfinError>;
