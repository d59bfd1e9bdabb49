//! Fixed-rate currency table.
//!
//! Loaded once when the SDK is built and never mutated afterwards. Rates are
//! expressed as units of a currency per one unit of the base currency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{ClubfinError, Result};

/// Display and conversion data for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub symbol: String,
    pub name: String,
    /// Units of this currency per one unit of the base currency.
    pub rate: f64,
}

/// On-disk shape of `currencies.json`.
#[derive(Debug, Deserialize)]
struct CurrencyFile {
    base: String,
    currencies: BTreeMap<String, CurrencyInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    base: String,
    currencies: BTreeMap<String, CurrencyInfo>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let currencies = config::builtin_currencies()
            .into_iter()
            .map(|(code, symbol, name, rate)| {
                (
                    code.to_string(),
                    CurrencyInfo {
                        symbol: symbol.to_string(),
                        name: name.to_string(),
                        rate,
                    },
                )
            })
            .collect();
        Self {
            base: config::BASE_CURRENCY.to_string(),
            currencies,
        }
    }
}

impl CurrencyTable {
    /// Build a table, validating that the base currency is present with a
    /// rate of exactly one and every rate is positive.
    pub fn new(base: &str, currencies: BTreeMap<String, CurrencyInfo>) -> Result<Self> {
        let base = base.to_uppercase();
        let currencies: BTreeMap<String, CurrencyInfo> = currencies
            .into_iter()
            .map(|(code, info)| (code.to_uppercase(), info))
            .collect();

        match currencies.get(&base) {
            Some(info) if info.rate == 1.0 => {}
            Some(info) => {
                return Err(ClubfinError::InvalidArgument(format!(
                    "Base currency {} must have rate 1, got {}",
                    base, info.rate
                )))
            }
            None => return Err(ClubfinError::UnsupportedCurrency(base)),
        }
        if let Some((code, info)) = currencies
            .iter()
            .find(|(_, info)| !(info.rate.is_finite() && info.rate > 0.0))
        {
            return Err(ClubfinError::InvalidArgument(format!(
                "Currency {} has invalid rate {}",
                code, info.rate
            )));
        }

        Ok(Self { base, currencies })
    }

    /// Parse the `currencies.json` document.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let file: CurrencyFile = serde_json::from_value(value)?;
        Self::new(&file.base, file.currencies)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Supported currency codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        self.currencies.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(&code.to_uppercase())
    }

    pub fn info(&self, code: &str) -> Result<&CurrencyInfo> {
        self.currencies
            .get(&code.to_uppercase())
            .ok_or_else(|| ClubfinError::UnsupportedCurrency(code.to_string()))
    }

    pub fn symbol(&self, code: &str) -> Result<&str> {
        Ok(self.info(code)?.symbol.as_str())
    }

    pub fn display_name(&self, code: &str) -> Result<&str> {
        Ok(self.info(code)?.name.as_str())
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Identity when the codes match; `None` stays `None`.
    pub fn convert_amount(&self, amount: Option<f64>, from: &str, to: &str) -> Result<Option<f64>> {
        let from_info = self.info(from)?;
        let to_info = self.info(to)?;
        let Some(amount) = amount else {
            return Ok(None);
        };
        if from.eq_ignore_ascii_case(to) {
            return Ok(Some(amount));
        }
        Ok(Some(amount / from_info.rate * to_info.rate))
    }

    /// Convert an amount stored in the base currency.
    pub fn from_base(&self, amount: f64, to: &str) -> Result<f64> {
        let to_info = self.info(to)?;
        Ok(amount * to_info.rate)
    }
}
