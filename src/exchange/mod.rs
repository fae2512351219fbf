//! Exchange-rate aggregation pipeline.
//!
//! Triggered from the chat dispatcher: date range → concurrent fetch →
//! currency filter → history sink → formatted message blocks.

pub mod api;
pub mod formatter;
pub mod history;
pub mod service;

pub use api::{PrivatBankClient, RateFetchError, RateSource};
pub use history::RateHistoryWriter;
pub use service::ExchangeService;
