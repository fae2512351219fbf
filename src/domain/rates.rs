//! Exchange-rate data model and pure reshaping logic.
//!
//! The wire field names of the upstream API (`exchangeRate`,
//! `saleRateNB`, `purchaseRateNB`) are preserved through serde renames;
//! the rate values themselves are passed through verbatim, no
//! computation is performed on them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One currency record from the upstream response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// Currency code (e.g. "USD")
    pub currency: String,
    /// National-bank sale rate
    #[serde(rename = "saleRateNB")]
    pub sale_rate_nb: f64,
    /// National-bank purchase rate
    #[serde(rename = "purchaseRateNB")]
    pub purchase_rate_nb: f64,
}

/// Raw upstream response for a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesSnapshot {
    /// Date label as the upstream reports it (DD.MM.YYYY)
    pub date: String,
    /// All currency records for that date
    #[serde(rename = "exchangeRate")]
    pub exchange_rate: Vec<CurrencyRate>,
}

/// Rates for one date, restricted to the requested currencies.
///
/// An empty `rates` list is a meaningful state ("no data for the
/// requested currencies that day"), distinct from the date being absent
/// because its fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRates {
    pub date: String,
    pub rates: Vec<CurrencyRate>,
}

/// Calendar dates to fetch: today back to `days - 1` ago, newest first.
pub fn date_range(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .collect()
}

/// Keep only the requested currencies, one output entry per input date.
///
/// A date that came back from the fetcher is never dropped here, even
/// when nothing matched the requested codes.
pub fn filter_rates(snapshots: Vec<RatesSnapshot>, currencies: &[String]) -> Vec<DailyRates> {
    snapshots
        .into_iter()
        .map(|snapshot| DailyRates {
            date: snapshot.date,
            rates: snapshot
                .exchange_rate
                .into_iter()
                .filter(|rate| currencies.iter().any(|code| code == &rate.currency))
                .collect(),
        })
        .collect()
}
