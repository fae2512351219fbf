//! Inbound chat line parsing.
//!
//! Every line a client sends is relayed to the room as chat. A line of
//! the form `exchange <code[,code...]> <days>` additionally triggers the
//! exchange pipeline. Malformed command lines are downgraded to plain
//! chat; the sender is never shown an error.

/// Keyword that triggers the exchange pipeline
pub const EXCHANGE_KEYWORD: &str = "exchange";

/// Smallest supported day count (today only)
pub const MIN_DAYS: u32 = 1;

/// Largest supported day count
pub const MAX_DAYS: u32 = 10;

/// One parsed inbound chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Plain chat text, relayed as-is
    Chat,
    /// Recognized exchange command
    Exchange(ExchangeRequest),
}

/// Everything one exchange command carries, scoped to that command.
///
/// Constructed atomically at parse time and passed through the pipeline
/// explicitly, so concurrent clients can never observe each other's
/// request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    /// Requested currency codes, order preserved, duplicates allowed
    pub currencies: Vec<String>,
    /// Days to look back from today, clamped to `[MIN_DAYS, MAX_DAYS]`
    pub days: u32,
}

/// Parse one inbound line.
///
/// A command with too few tokens or a non-numeric day count is treated
/// as plain chat, even when the first token is literally `exchange`.
pub fn parse_line(line: &str) -> Inbound {
    let tokens: Vec<&str> = line.split(' ').collect();

    if tokens[0] != EXCHANGE_KEYWORD {
        return Inbound::Chat;
    }

    if tokens.len() < 3 {
        tracing::error!(
            "Parameters are not correct in request for \"exchange\": {}",
            line
        );
        return Inbound::Chat;
    }

    let currencies: Vec<String> = tokens[1].split(',').map(str::to_string).collect();

    let days: i64 = match tokens[2].parse() {
        Ok(days) => days,
        Err(_) => {
            tracing::error!(
                "Parameters are not correct in request for \"exchange\": {}",
                line
            );
            return Inbound::Chat;
        }
    };

    Inbound::Exchange(ExchangeRequest {
        currencies,
        days: clamp_days(days),
    })
}

/// Constrain a requested day count into the supported range.
pub fn clamp_days(days: i64) -> u32 {
    if days > MAX_DAYS as i64 {
        tracing::info!(
            "Maximum range is {} days. Will return results for {} days now!",
            MAX_DAYS,
            MAX_DAYS
        );
        MAX_DAYS
    } else if days <= 0 {
        tracing::info!(
            "Minimum range is {} day (for today). Will return results for today now!",
            MIN_DAYS
        );
        MIN_DAYS
    } else {
        days as u32
    }
}
