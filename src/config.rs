use std::collections::HashMap;
use std::path::PathBuf;

/// Currency in which raw revenue figures are stored.
pub const BASE_CURRENCY: &str = "GBP";

/// Optional currency override file looked up in the data directory.
pub const CURRENCIES_FILE: &str = "currencies.json";

/// Seed files backing each DuckDB table.
pub fn seed_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("clubs", "clubs.ndjson"),
        ("club_financials", "club_financials.ndjson"),
    ])
}

/// Built-in currency table: `(code, symbol, display name, units per 1 GBP)`.
pub fn builtin_currencies() -> Vec<(&'static str, &'static str, &'static str, f64)> {
    vec![
        ("GBP", "£", "British Pound", 1.0),
        ("EUR", "€", "Euro", 1.17),
        ("USD", "$", "US Dollar", 1.27),
    ]
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("clubfin-sdk")
    } else {
        PathBuf::from(".clubfin-sdk-data")
    }
}
