//! Derived YoY/CAGR metrics for charts and tables.
//!
//! Every call re-reads the club's records and derives from scratch.

use crate::connection::Connection;
use crate::currency::CurrencyTable;
use crate::error::Result;
use crate::models::{ClubSummary, DerivedMetric};
use crate::queries::{ClubQuery, FinancialQuery};
use crate::timeseries;

// ---------------------------------------------------------------------------
// MetricsQuery
// ---------------------------------------------------------------------------

/// Query interface combining stored records with the time-series deriver.
pub struct MetricsQuery<'a> {
    conn: &'a Connection,
    currencies: &'a CurrencyTable,
}

impl<'a> MetricsQuery<'a> {
    /// Create a new `MetricsQuery` bound to the given connection and currency table.
    pub fn new(conn: &'a Connection, currencies: &'a CurrencyTable) -> Self {
        Self { conn, currencies }
    }

    /// Year-ordered metrics for one club, in the base currency.
    pub fn time_series(&self, club_id: i64) -> Result<Vec<DerivedMetric>> {
        let records = FinancialQuery::new(self.conn).for_club(club_id)?;
        Ok(timeseries::derive_yoy(&records))
    }

    /// Year-ordered metrics with money fields converted to `currency`.
    ///
    /// Percentages are currency-independent and left untouched.
    pub fn time_series_in(&self, club_id: i64, currency: &str) -> Result<Vec<DerivedMetric>> {
        let base = self.currencies.base();
        self.time_series(club_id)?
            .into_iter()
            .map(|m| -> Result<DerivedMetric> {
                let convert = |v: f64| self.currencies.convert_amount(Some(v), base, currency);
                Ok(DerivedMetric {
                    revenue: convert(m.revenue)?.unwrap_or(0.0),
                    ebitda: convert(m.ebitda)?.unwrap_or(0.0),
                    wages: self.currencies.convert_amount(m.wages, base, currency)?,
                    yoy_change: self.currencies.convert_amount(m.yoy_change, base, currency)?,
                    ..m
                })
            })
            .collect()
    }

    /// Revenue CAGR in percent over every stored season of a club.
    pub fn cagr(&self, club_id: i64) -> Result<Option<f64>> {
        let records = FinancialQuery::new(self.conn).for_club(club_id)?;
        Ok(timeseries::compute_cagr(&records))
    }

    /// One overview row per club, alphabetical, amounts in `currency`.
    pub fn summary(&self, currency: &str) -> Result<Vec<ClubSummary>> {
        self.currencies.info(currency)?;
        let clubs = ClubQuery::new(self.conn).list(None, None, None)?;

        let mut rows = Vec::with_capacity(clubs.len());
        for club in clubs {
            let series = self.time_series(club.id)?;
            let latest = series.last();
            let latest_revenue = match latest {
                Some(m) => Some(self.currencies.from_base(m.revenue, currency)?),
                None => None,
            };
            rows.push(ClubSummary {
                club_id: club.id,
                club_name: club.name,
                currency: currency.to_uppercase(),
                seasons: series.len(),
                latest_year: latest.map(|m| m.year),
                latest_revenue,
                latest_yoy_percentage: latest.and_then(|m| m.yoy_percentage),
                cagr: timeseries::compute_cagr_from_metrics(&series),
            });
        }
        Ok(rows)
    }
}
