//! Club lookups against the `clubs` table.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::Club;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// ClubQuery
// ---------------------------------------------------------------------------

/// Query interface for clubs backed by the `clubs` table.
pub struct ClubQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ClubQuery<'a> {
    /// Create a new `ClubQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get a single club by id.
    pub fn get(&self, id: i64) -> Result<Option<Club>> {
        self.conn.ensure_tables(&["clubs"])?;

        let (sql, params) = SqlBuilder::new("clubs")
            .where_clause("id = CAST(? AS BIGINT)", &[&id.to_string()])
            .limit(1)
            .build();

        Ok(self.conn.execute_into(&sql, &params)?.into_iter().next())
    }

    /// Resolve a free-text name fragment to one club.
    ///
    /// Matches case-insensitively anywhere in the name. The fragment is
    /// literal text, so `%` and `_` are not wildcards. When several clubs
    /// match, an exact (case-insensitive) name wins, then the shortest name,
    /// then alphabetical order.
    pub fn find_by_name(&self, fragment: &str) -> Result<Option<Club>> {
        self.conn.ensure_tables(&["clubs"])?;

        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(None);
        }

        let sql = r#"
            SELECT *
            FROM clubs
            WHERE contains(LOWER(name), LOWER(?))
            ORDER BY
                CASE WHEN LOWER(name) = LOWER(?) THEN 0 ELSE 1 END,
                LENGTH(name),
                name
            LIMIT 1
        "#;

        let params = [fragment.to_string(), fragment.to_string()];
        let club = self.conn.execute_into::<Club>(sql, &params)?.into_iter().next();
        tracing::debug!(fragment, matched = ?club.as_ref().map(|c| &c.name), "club lookup");
        Ok(club)
    }

    /// List clubs alphabetically, optionally filtered by a literal,
    /// case-insensitive name substring.
    pub fn list(
        &self,
        name: Option<&str>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Club>> {
        self.conn.ensure_tables(&["clubs"])?;

        let mut qb = SqlBuilder::new("clubs");
        qb.order_by(&["name ASC"]);

        if let Some(n) = name {
            qb.where_contains("name", n);
        }
        if let Some(l) = limit {
            qb.limit(l);
        }
        if let Some(o) = offset {
            qb.offset(o);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Count all clubs.
    pub fn count(&self) -> Result<i64> {
        self.conn.ensure_tables(&["clubs"])?;

        let (sql, params) = SqlBuilder::new("clubs")
            .select(&["COUNT(*) AS cnt"])
            .build();
        let cnt = self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(cnt)
    }
}
