//! Message blocks for broadcast exchange reports.

use crate::domain::rates::DailyRates;

/// Banner line broadcast before the per-date blocks
pub const REPORT_BANNER: &str = "This is what you asked for!";

/// Build one message block per date, in input order.
///
/// A block with only a header (no matching currencies) is still a valid
/// block and is broadcast like any other.
pub fn format_report(daily: &[DailyRates]) -> Vec<String> {
    daily.iter().map(format_daily_block).collect()
}

fn format_daily_block(day: &DailyRates) -> String {
    let mut block = format!("Date: {}\n{}\n", day.date, "-".repeat(10));

    if day.rates.is_empty() {
        block.push_str("Unfortunately, we do not have any data for this day yet.");
        return block;
    }

    for rate in &day.rates {
        block.push_str(&format!(
            "{} sale: {}\n{} purchase: {}\n",
            rate.currency, rate.sale_rate_nb, rate.currency, rate.purchase_rate_nb
        ));
    }
    block
}
