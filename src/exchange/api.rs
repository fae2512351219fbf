//! 為替レート上流 API の実装
//!
//! ## 責務
//!
//! - 日付ごとの上流リクエスト発行（1 日付 = 1 リクエスト）
//! - レスポンス JSON のデコード
//!
//! ## 設計ノート
//!
//! 同時フェッチ（fan-out）は `ExchangeService` 側で行われます。
//! この実装は単一日付の取得のみを担当し、接続エラーや非 2xx は
//! その日付だけの回復可能な失敗として呼び出し側へ返します。

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::domain::rates::RatesSnapshot;

/// Default public endpoint, templated by a `DD.MM.YYYY` date suffix
pub const DEFAULT_RATE_API_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates?json&date=";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-date fetch errors
#[derive(Debug, Error)]
pub enum RateFetchError {
    /// Connection-level or body-decoding failure
    #[error("Error Connection: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Error status: {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Source of per-date exchange-rate snapshots.
///
/// Implementations must be shareable across connection tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch all currency records for one date
    async fn rates_for(&self, date: NaiveDate) -> Result<RatesSnapshot, RateFetchError>;
}

/// HTTP client for the PrivatBank public exchange-rate API
pub struct PrivatBankClient {
    http: Client,
    base_url: String,
}

impl PrivatBankClient {
    /// Create a client against the given endpoint (see
    /// [`DEFAULT_RATE_API_URL`] for the expected URL shape).
    pub fn new(base_url: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { http, base_url }
    }

    fn url_for(&self, date: NaiveDate) -> String {
        format!("{}{}", self.base_url, date.format("%d.%m.%Y"))
    }
}

#[async_trait]
impl RateSource for PrivatBankClient {
    async fn rates_for(&self, date: NaiveDate) -> Result<RatesSnapshot, RateFetchError> {
        let url = self.url_for(date);
        tracing::debug!("Requesting rates: {}", url);

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateFetchError::Status { url, status });
        }

        let snapshot = response.json::<RatesSnapshot>().await?;
        tracing::debug!(
            "Got {} currency records for {}",
            snapshot.exchange_rate.len(),
            snapshot.date
        );
        Ok(snapshot)
    }
}
