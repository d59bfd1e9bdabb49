//! Answers single-fact revenue questions such as
//! "What was Arsenal's revenue in 2022?".
//!
//! A linear pipeline that stops at the first failure:
//!
//! 1. extract a year (`20xx` only)
//! 2. extract a club-name fragment with the ranked [`club_name_rules`]
//! 3. resolve the fragment through a [`FinancialSource`]
//! 4. derive the club's series and pick the requested year
//! 5. convert and render the sentence
//!
//! Matching is literal pattern matching; there is no language understanding.

use std::sync::OnceLock;

use regex::Regex;

use crate::connection::Connection;
use crate::currency::CurrencyTable;
use crate::error::{QueryError, Result};
use crate::models::{Answer, Club, FinancialRecord};
use crate::numeric;
use crate::queries::{ClubQuery, FinancialQuery};
use crate::timeseries;

const NO_PRIOR_YEAR: &str = "N/A (no prior year data)";

// ---------------------------------------------------------------------------
// FinancialSource
// ---------------------------------------------------------------------------

/// Read access the resolver needs from the store.
pub trait FinancialSource {
    /// Case-insensitive club lookup by (partial) name.
    fn lookup_club_by_name(&self, fragment: &str) -> Result<Option<Club>>;

    /// Every stored record for a club, in no particular order.
    fn fetch_club_financial_records(&self, club_id: i64) -> Result<Vec<FinancialRecord>>;
}

impl FinancialSource for Connection {
    fn lookup_club_by_name(&self, fragment: &str) -> Result<Option<Club>> {
        ClubQuery::new(self).find_by_name(fragment)
    }

    fn fetch_club_financial_records(&self, club_id: i64) -> Result<Vec<FinancialRecord>> {
        FinancialQuery::new(self).for_club(club_id)
    }
}

// ---------------------------------------------------------------------------
// Question parsing
// ---------------------------------------------------------------------------

/// One club-name extraction rule. Capture group 1 is the name fragment.
pub struct ClubNameRule {
    pub name: &'static str,
    pub pattern: Regex,
}

/// Club-name rules in evaluation order, most specific first.
///
/// The last rule matches nearly anything followed by "revenue", so order
/// decides the outcome whenever several rules match.
pub fn club_name_rules() -> &'static [ClubNameRule] {
    static RULES: OnceLock<Vec<ClubNameRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            ("what_was", r"(?i)what\s+was\s+(.+?)['’]s\s+revenue"),
            ("tell_me_about", r"(?i)tell\s+me\s+about\s+(.+?)['’]s\s+revenue"),
            ("name_revenue", r"(?i)(.+?)\s+revenue"),
        ]
        .into_iter()
        .map(|(name, pattern)| ClubNameRule {
            name,
            pattern: Regex::new(pattern).expect("club name pattern is valid"),
        })
        .collect()
    })
}

fn year_pattern() -> &'static Regex {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    YEAR.get_or_init(|| Regex::new(r"\b(20\d{2})\b").expect("year pattern is valid"))
}

/// First `20xx` token in the question.
pub fn extract_year(question: &str) -> Option<i32> {
    year_pattern()
        .captures(question)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Name fragment captured by the first matching rule, trimmed, together with
/// the rule's name.
pub fn extract_club_name(question: &str) -> Option<(&'static str, String)> {
    club_name_rules().iter().find_map(|rule| {
        let caps = rule.pattern.captures(question)?;
        let fragment = caps.get(1)?.as_str().trim();
        (!fragment.is_empty()).then(|| (rule.name, fragment.to_string()))
    })
}

/// Year and club fragment extracted from a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub year: i32,
    pub club_name: String,
    /// Name of the [`ClubNameRule`] that matched.
    pub rule: &'static str,
}

/// Run the two extraction steps.
pub fn parse_question(question: &str) -> std::result::Result<ParsedQuestion, QueryError> {
    let year = extract_year(question).ok_or(QueryError::MissingYear)?;
    let (rule, club_name) = extract_club_name(question).ok_or(QueryError::MissingClubName)?;
    Ok(ParsedQuestion {
        year,
        club_name,
        rule,
    })
}

// ---------------------------------------------------------------------------
// QueryResolver
// ---------------------------------------------------------------------------

/// Resolves questions against a [`FinancialSource`].
pub struct QueryResolver<'a, S: FinancialSource + ?Sized> {
    source: &'a S,
    currencies: &'a CurrencyTable,
}

impl<'a, S: FinancialSource + ?Sized> QueryResolver<'a, S> {
    pub fn new(source: &'a S, currencies: &'a CurrencyTable) -> Self {
        Self { source, currencies }
    }

    /// Answer `question`, reporting revenue in `currency` (base currency when
    /// `None`).
    ///
    /// Pipeline failures surface as [`ClubfinError::Query`](crate::ClubfinError::Query);
    /// an unknown currency is a configuration error and is rejected before
    /// the question is looked at.
    pub fn answer_question(&self, question: &str, currency: Option<&str>) -> Result<Answer> {
        let currency = currency.unwrap_or(self.currencies.base()).to_uppercase();
        let symbol = self.currencies.symbol(&currency)?.to_string();

        let parsed = parse_question(question)?;
        tracing::debug!(year = parsed.year, club = %parsed.club_name, rule = parsed.rule, "parsed question");

        let club = self
            .source
            .lookup_club_by_name(&parsed.club_name)?
            .ok_or_else(|| QueryError::ClubNotFound {
                name: parsed.club_name.clone(),
            })?;

        let records = self.source.fetch_club_financial_records(club.id)?;
        let series = timeseries::derive_yoy(&records);
        let (index, entry) = series
            .iter()
            .enumerate()
            .find(|(_, m)| m.year == parsed.year)
            .ok_or_else(|| QueryError::YearDataNotFound {
                club: club.name.clone(),
                year: parsed.year,
            })?;

        if index > 0 && entry.yoy_change.is_none() {
            return Err(QueryError::YoYCalculationUnavailable {
                club: club.name.clone(),
                year: parsed.year,
            }
            .into());
        }

        let revenue = self.currencies.from_base(entry.revenue, &currency)?;
        let change = match entry.yoy_percentage {
            Some(pct) => format!("{}%", numeric::format_percentage(pct)),
            None => NO_PRIOR_YEAR.to_string(),
        };
        let text = format!(
            "{}'s revenue in {} was {}{}M ({}). The year-over-year change was {}.",
            club.name,
            parsed.year,
            symbol,
            numeric::format_amount(revenue),
            currency,
            change
        );
        tracing::info!(club = %club.name, year = parsed.year, %currency, "answered question");

        Ok(Answer {
            club: club.name,
            year: parsed.year,
            currency,
            revenue,
            yoy_percentage: entry.yoy_percentage,
            text,
        })
    }
}
