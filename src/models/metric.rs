use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DerivedMetric — A financial record annotated with its YoY change
// ---------------------------------------------------------------------------

/// Computed per derivation call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub club_id: i64,
    pub year: i32,
    pub revenue: f64,
    pub ebitda: f64,
    pub wages: Option<f64>,
    pub yoy_change: Option<f64>,
    pub yoy_percentage: Option<f64>,
}

// ---------------------------------------------------------------------------
// ClubSummary — One row of the dashboard overview table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub club_id: i64,
    pub club_name: String,
    pub currency: String,
    pub seasons: usize,
    pub latest_year: Option<i32>,
    pub latest_revenue: Option<f64>,
    pub latest_yoy_percentage: Option<f64>,
    pub cagr: Option<f64>,
}

// ---------------------------------------------------------------------------
// Answer — A resolved revenue question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub club: String,
    pub year: i32,
    pub currency: String,
    /// Revenue converted into `currency`.
    pub revenue: f64,
    pub yoy_percentage: Option<f64>,
    pub text: String,
}
