//! Query interfaces for the SDK.
//!
//! Each struct borrows the [`Connection`](crate::connection::Connection) and
//! returns typed rows from the `clubs` and `club_financials` tables or metrics
//! derived from them.

pub mod clubs;
pub mod financials;
pub mod metrics;

pub use clubs::ClubQuery;
pub use financials::FinancialQuery;
pub use metrics::MetricsQuery;
