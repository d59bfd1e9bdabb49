use serde::{Deserialize, Serialize};

use crate::numeric;

// ---------------------------------------------------------------------------
// RawAmount — A money field as it arrives from the store
// ---------------------------------------------------------------------------

/// Either a plain number or locale-formatted text such as `"1,234,567"`.
///
/// Never used in arithmetic directly; see [`numeric::normalize_amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// FinancialRecord — One club-season row of `club_financials`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub club_id: i64,
    pub year: i32,
    pub revenue: Option<RawAmount>,
    pub ebitda: Option<RawAmount>,
    pub wages: Option<RawAmount>,

    // -- Revenue breakdown, carried but not derived from --
    #[serde(default)]
    pub matchday_revenue: Option<RawAmount>,
    #[serde(default)]
    pub commercial_revenue: Option<RawAmount>,
    #[serde(default)]
    pub broadcasting_revenue: Option<RawAmount>,

    /// Stored upstream but ignored: YoY is always recomputed.
    #[serde(default)]
    pub revenue_yoy: Option<RawAmount>,
}

impl FinancialRecord {
    /// Record with only the fields the derivation reads.
    pub fn new(club_id: i64, year: i32, revenue: Option<RawAmount>) -> Self {
        Self {
            club_id,
            year,
            revenue,
            ..Default::default()
        }
    }

    /// Revenue for arithmetic: missing or unparseable counts as zero.
    pub fn revenue_value(&self) -> f64 {
        numeric::amount_or_zero(self.revenue.as_ref())
    }

    pub fn ebitda_value(&self) -> f64 {
        numeric::amount_or_zero(self.ebitda.as_ref())
    }

    /// Wages keep their absence.
    pub fn wages_value(&self) -> Option<f64> {
        self.wages.as_ref().and_then(numeric::normalize_amount)
    }
}
