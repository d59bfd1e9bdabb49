//! Derived metric queries over the sample DuckDB tables.

mod common;

use clubfin_sdk::queries::MetricsQuery;
use clubfin_sdk::{ClubfinError, CurrencyTable};
use common::{ARSENAL, BARCELONA, MAN_UNITED, NORTHSIDE};

#[test]
fn time_series_is_year_ordered_with_yoy() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    let series = MetricsQuery::new(&conn, &currencies).time_series(MAN_UNITED).unwrap();

    let years: Vec<i32> = series.iter().map(|m| m.year).collect();
    assert_eq!(years, vec![2020, 2021, 2022]);
    assert_eq!(series[0].yoy_change, None);
    assert_eq!(series[2].yoy_change, Some(89.0));
    assert!((series[2].yoy_percentage.unwrap() - 18.016).abs() < 0.001);
}

#[test]
fn time_series_for_club_without_records_is_empty() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    assert!(MetricsQuery::new(&conn, &currencies)
        .time_series(ARSENAL)
        .unwrap()
        .is_empty());
}

#[test]
fn converted_series_scales_money_but_not_percentages() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    let mq = MetricsQuery::new(&conn, &currencies);

    let base = mq.time_series(MAN_UNITED).unwrap();
    let usd = mq.time_series_in(MAN_UNITED, "USD").unwrap();

    assert!((usd[2].revenue - 583.0 * 1.27).abs() < 1e-9);
    assert!((usd[2].yoy_change.unwrap() - 89.0 * 1.27).abs() < 1e-9);
    assert_eq!(usd[1].wages, None);
    assert_eq!(usd[2].yoy_percentage, base[2].yoy_percentage);
}

#[test]
fn converted_series_rejects_unknown_currency() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    let result = MetricsQuery::new(&conn, &currencies).time_series_in(MAN_UNITED, "CHF");
    assert!(matches!(result, Err(ClubfinError::UnsupportedCurrency(_))));
}

#[test]
fn cagr_per_club() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    let mq = MetricsQuery::new(&conn, &currencies);

    let cagr = mq.cagr(MAN_UNITED).unwrap().unwrap();
    let expected = ((583.0f64 / 509.0).powf(0.5) - 1.0) * 100.0;
    assert!((cagr - expected).abs() < 1e-9);

    assert!((mq.cagr(BARCELONA).unwrap().unwrap() - 9.637).abs() < 0.01);
    assert_eq!(mq.cagr(NORTHSIDE).unwrap(), None);
    assert_eq!(mq.cagr(ARSENAL).unwrap(), None);
}

#[test]
fn summary_has_one_row_per_club() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    let rows = MetricsQuery::new(&conn, &currencies).summary("gbp").unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.currency == "GBP"));

    let arsenal = &rows[0];
    assert_eq!(arsenal.club_name, "Arsenal");
    assert_eq!(arsenal.seasons, 0);
    assert_eq!(arsenal.latest_year, None);
    assert_eq!(arsenal.cagr, None);

    let united = rows.iter().find(|r| r.club_id == MAN_UNITED).unwrap();
    assert_eq!(united.seasons, 3);
    assert_eq!(united.latest_year, Some(2022));
    assert_eq!(united.latest_revenue, Some(583.0));
    assert!(united.cagr.is_some());
}

#[test]
fn summary_converts_latest_revenue() {
    let (conn, _tmp) = common::setup_sample_db();
    let currencies = CurrencyTable::default();
    let rows = MetricsQuery::new(&conn, &currencies).summary("EUR").unwrap();

    let barca = rows.iter().find(|r| r.club_id == BARCELONA).unwrap();
    assert!((barca.latest_revenue.unwrap() - 638.2 * 1.17).abs() < 1e-9);
}
