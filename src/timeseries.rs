//! Year-over-year and CAGR derivation over one club's financial records.
//!
//! Pure functions over their inputs. Nothing is cached: callers recompute from
//! the stored records on every request, and the stored `revenue_yoy` column is
//! never consulted.

use crate::models::{DerivedMetric, FinancialRecord};

/// Order records by year and annotate each with its change from the previous
/// record.
///
/// Input order is irrelevant; equal years keep their input order and are not
/// deduplicated. "Previous" means the preceding record after sorting, so gaps
/// between seasons are treated as adjacent. The first record has no change.
/// `yoy_percentage` is `None` whenever the previous revenue is exactly zero.
pub fn derive_yoy(records: &[FinancialRecord]) -> Vec<DerivedMetric> {
    let mut sorted: Vec<&FinancialRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.year);

    let mut out: Vec<DerivedMetric> = Vec::with_capacity(sorted.len());
    for record in sorted {
        let revenue = record.revenue_value();
        let (yoy_change, yoy_percentage) = match out.last() {
            None => (None, None),
            Some(prev) => {
                let change = revenue - prev.revenue;
                let pct = (prev.revenue != 0.0).then(|| change / prev.revenue * 100.0);
                (Some(change), pct)
            }
        };

        out.push(DerivedMetric {
            club_id: record.club_id,
            year: record.year,
            revenue,
            ebitda: record.ebitda_value(),
            wages: record.wages_value(),
            yoy_change,
            yoy_percentage,
        });
    }
    out
}

/// Compound annual revenue growth, in percent, between the earliest and
/// latest record.
///
/// `None` for fewer than two records, a non-positive first or last revenue,
/// or a zero year span.
pub fn compute_cagr(records: &[FinancialRecord]) -> Option<f64> {
    let first = records.iter().min_by_key(|r| r.year)?;
    let last = records.iter().max_by_key(|r| r.year)?;
    if records.len() < 2 {
        return None;
    }
    cagr_between(
        (first.year, first.revenue_value()),
        (last.year, last.revenue_value()),
    )
}

/// [`compute_cagr`] over an already derived series.
///
/// The series need not be sorted.
pub fn compute_cagr_from_metrics(metrics: &[DerivedMetric]) -> Option<f64> {
    let first = metrics.iter().min_by_key(|m| m.year)?;
    let last = metrics.iter().max_by_key(|m| m.year)?;
    if metrics.len() < 2 {
        return None;
    }
    cagr_between((first.year, first.revenue), (last.year, last.revenue))
}

fn cagr_between(
    (first_year, first_revenue): (i32, f64),
    (last_year, last_revenue): (i32, f64),
) -> Option<f64> {
    if first_revenue <= 0.0 || last_revenue <= 0.0 {
        return None;
    }
    let span = last_year - first_year;
    if span <= 0 {
        tracing::debug!(first_year, last_year, "CAGR refused for empty year span");
        return None;
    }
    let growth = ((last_revenue / first_revenue).powf(1.0 / f64::from(span)) - 1.0) * 100.0;
    growth.is_finite().then_some(growth)
}
