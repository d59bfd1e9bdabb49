//! Raw season records from the `club_financials` table.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::FinancialRecord;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// FinancialQuery
// ---------------------------------------------------------------------------

/// Query interface for per-season financial records.
///
/// Records come back in storage order; ordering is the deriver's job.
pub struct FinancialQuery<'a> {
    conn: &'a Connection,
}

impl<'a> FinancialQuery<'a> {
    /// Create a new `FinancialQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All records for one club.
    pub fn for_club(&self, club_id: i64) -> Result<Vec<FinancialRecord>> {
        self.conn.ensure_tables(&["club_financials"])?;

        let (sql, params) = SqlBuilder::new("club_financials")
            .where_clause("club_id = CAST(? AS BIGINT)", &[&club_id.to_string()])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Records for one club within an inclusive year range.
    pub fn for_club_between(
        &self,
        club_id: i64,
        from_year: Option<i32>,
        to_year: Option<i32>,
    ) -> Result<Vec<FinancialRecord>> {
        self.conn.ensure_tables(&["club_financials"])?;

        let mut qb = SqlBuilder::new("club_financials");
        qb.where_clause("club_id = CAST(? AS BIGINT)", &[&club_id.to_string()]);
        if let Some(from) = from_year {
            qb.where_gte("year", &from.to_string());
        }
        if let Some(to) = to_year {
            qb.where_lte("year", &to.to_string());
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Distinct seasons present for any club, ascending.
    pub fn seasons(&self) -> Result<Vec<i32>> {
        self.conn.ensure_tables(&["club_financials"])?;

        let (sql, params) = SqlBuilder::new("club_financials")
            .select(&["year"])
            .distinct()
            .order_by(&["year ASC"])
            .build();
        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .iter()
            .filter_map(|r| r.get("year").and_then(|v| v.as_i64()))
            .filter_map(|y| i32::try_from(y).ok())
            .collect())
    }

    /// Count all records.
    pub fn count(&self) -> Result<i64> {
        self.conn.ensure_tables(&["club_financials"])?;

        let (sql, params) = SqlBuilder::new("club_financials")
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
