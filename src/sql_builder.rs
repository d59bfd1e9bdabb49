//! Parameterized SELECT construction for the club tables.
//!
//! Values are always bound through `?` placeholders, never interpolated.
//!
//! # Example
//!
//! ```rust
//! use clubfin_sdk::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("club_financials")
//!     .where_eq("club_id", "7")
//!     .where_gte("year", "2019")
//!     .order_by(&["year ASC"])
//!     .build();
//! assert_eq!(params, vec!["7", "2019"]);
//! ```

/// Builds parameterized SQL queries; methods return `&mut Self` for chaining.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    is_distinct: bool,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            is_distinct: false,
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.is_distinct = true;
        self
    }

    /// Add a raw WHERE condition using one `?` per entry in `params`.
    pub fn where_clause(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Case-insensitive literal substring: `contains(LOWER({column}), LOWER(?))`.
    ///
    /// `%` and `_` in `value` match themselves.
    pub fn where_contains(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clause(&format!("contains(LOWER({}), LOWER(?))", column), &[value])
    }

    /// Equality: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clause(&format!("{} = ?", column), &[value])
    }

    /// Integer comparison: `{column} >= CAST(? AS BIGINT)`.
    pub fn where_gte(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clause(&format!("{} >= CAST(? AS BIGINT)", column), &[value])
    }

    /// Integer comparison: `{column} <= CAST(? AS BIGINT)`.
    pub fn where_lte(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clause(&format!("{} <= CAST(? AS BIGINT)", column), &[value])
    }

    /// Add ORDER BY clauses (e.g. `"year ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let distinct = if self.is_distinct { "DISTINCT " } else { "" };
        let mut parts = vec![
            format!("SELECT {}{}", distinct, self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }
        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }
        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }
        if let Some(n) = self.offset_val {
            parts.push(format!("OFFSET {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
