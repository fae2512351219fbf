//! Exchange pipeline orchestration.

use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future;

use crate::{
    common::time::Clock,
    domain::{
        command::ExchangeRequest,
        rates::{RatesSnapshot, date_range, filter_rates},
    },
};

use super::{api::RateSource, formatter::format_report, history::RateHistoryWriter};

/// Runs one triggered exchange request end to end:
/// date range → concurrent fetch → currency filter → history sink →
/// formatted message blocks.
///
/// The service is stateless between requests; everything a request needs
/// travels in its [`ExchangeRequest`].
pub struct ExchangeService {
    source: Arc<dyn RateSource>,
    history: RateHistoryWriter,
    clock: Arc<dyn Clock>,
}

impl ExchangeService {
    /// Create a service over the given rate source, history sink and clock
    pub fn new(source: Arc<dyn RateSource>, history: RateHistoryWriter, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            history,
            clock,
        }
    }

    /// Produce the broadcast blocks for one request.
    ///
    /// Partial upstream failure is the normal outcome: failed dates are
    /// dropped and the rest of the range proceeds. A history-sink failure
    /// is logged and never surfaces to the chat flow.
    pub async fn run(&self, request: &ExchangeRequest) -> Vec<String> {
        let dates = date_range(self.clock.today(), request.days);
        let snapshots = self.fetch_range(&dates).await;
        let filtered = filter_rates(snapshots, &request.currencies);

        if let Err(e) = self.history.record(&filtered).await {
            tracing::warn!(
                "Failed to record exchange history to {}: {}",
                self.history.path().display(),
                e
            );
        }

        format_report(&filtered)
    }

    /// One concurrent request per date, fan-in when all complete.
    ///
    /// Results come back in input date order; failed dates are excluded
    /// entirely rather than represented by a placeholder.
    async fn fetch_range(&self, dates: &[NaiveDate]) -> Vec<RatesSnapshot> {
        let requests = dates.iter().map(|date| self.source.rates_for(*date));
        let results = future::join_all(requests).await;

        results
            .into_iter()
            .zip(dates)
            .filter_map(|(result, date)| match result {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::error!("No rates for {}: {}", date, e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::time::FixedClock,
        domain::rates::CurrencyRate,
        exchange::api::{MockRateSource, RateFetchError},
    };
    use reqwest::StatusCode;
    use std::path::PathBuf;

    fn temp_history_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kawase-service-{}-{}.log", tag, std::process::id()))
    }

    fn snapshot_for(date: NaiveDate, rates: Vec<CurrencyRate>) -> RatesSnapshot {
        RatesSnapshot {
            date: date.format("%d.%m.%Y").to_string(),
            exchange_rate: rates,
        }
    }

    fn usd_and_eur() -> Vec<CurrencyRate> {
        vec![
            CurrencyRate {
                currency: "USD".to_string(),
                sale_rate_nb: 36.5686,
                purchase_rate_nb: 36.5686,
            },
            CurrencyRate {
                currency: "EUR".to_string(),
                sale_rate_nb: 38.951,
                purchase_rate_nb: 38.951,
            },
        ]
    }

    fn service_with(source: MockRateSource, tag: &str, today: NaiveDate) -> ExchangeService {
        let path = temp_history_path(tag);
        let _ = std::fs::remove_file(&path);
        ExchangeService::new(
            Arc::new(source),
            RateHistoryWriter::new(path),
            Arc::new(FixedClock::new(today)),
        )
    }

    #[tokio::test]
    async fn test_run_filters_to_requested_currencies() {
        // テスト項目: 要求した通貨のみがブロックに現れる
        // given (前提条件): 上流は USD と EUR を返すが、要求は USD のみ
        let today = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let mut source = MockRateSource::new();
        source
            .expect_rates_for()
            .returning(|date| Ok(snapshot_for(date, usd_and_eur())));
        let service = service_with(source, "filter", today);

        let request = ExchangeRequest {
            currencies: vec!["USD".to_string()],
            days: 1,
        };

        // when (操作):
        let blocks = service.run(&request).await;

        // then (期待する結果): USD の 2 行のみ、EUR は現れない
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Date: 03.01.2023"));
        assert!(blocks[0].contains("USD sale: 36.5686"));
        assert!(blocks[0].contains("USD purchase: 36.5686"));
        assert!(!blocks[0].contains("EUR"));
    }

    #[tokio::test]
    async fn test_run_drops_failed_dates_and_keeps_order() {
        // テスト項目: 失敗した日付は結果から除外され、残りは元の順序を保つ
        // given (前提条件): 3 日分のうち中央の日付だけ失敗する
        let today = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let failing = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let mut source = MockRateSource::new();
        source.expect_rates_for().returning(move |date| {
            if date == failing {
                Err(RateFetchError::Status {
                    url: "http://upstream.test/rates?date=02.01.2023".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                })
            } else {
                Ok(snapshot_for(date, usd_and_eur()))
            }
        });
        let service = service_with(source, "partial", today);

        let request = ExchangeRequest {
            currencies: vec!["USD".to_string()],
            days: 3,
        };

        // when (操作):
        let blocks = service.run(&request).await;

        // then (期待する結果): 02.01.2023 のブロックは存在しない
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Date: 03.01.2023"));
        assert!(blocks[1].starts_with("Date: 01.01.2023"));
        assert!(!blocks.iter().any(|b| b.contains("02.01.2023")));
    }

    #[tokio::test]
    async fn test_run_emits_no_data_block_for_unmatched_day() {
        // テスト項目: 要求通貨のデータがない日付は「データなし」ブロックになる
        // given (前提条件): 上流は USD/EUR のみ返すが、要求は CHF
        let today = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let mut source = MockRateSource::new();
        source
            .expect_rates_for()
            .returning(|date| Ok(snapshot_for(date, usd_and_eur())));
        let service = service_with(source, "nodata", today);

        let request = ExchangeRequest {
            currencies: vec!["CHF".to_string()],
            days: 1,
        };

        // when (操作):
        let blocks = service.run(&request).await;

        // then (期待する結果):
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Unfortunately, we do not have any data for this day yet."));
    }

    #[tokio::test]
    async fn test_run_records_history() {
        // テスト項目: 実行のたびに履歴ファイルへ 1 行追記される
        // given (前提条件):
        let today = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let mut source = MockRateSource::new();
        source
            .expect_rates_for()
            .returning(|date| Ok(snapshot_for(date, usd_and_eur())));
        let path = temp_history_path("record");
        let _ = std::fs::remove_file(&path);
        let service = ExchangeService::new(
            Arc::new(source),
            RateHistoryWriter::new(path.clone()),
            Arc::new(FixedClock::new(today)),
        );

        let request = ExchangeRequest {
            currencies: vec!["USD".to_string()],
            days: 2,
        };

        // when (操作):
        let _ = service.run(&request).await;

        // then (期待する結果):
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_run_survives_history_failure() {
        // テスト項目: 履歴の書き込み失敗があってもブロックは生成される
        // given (前提条件): 書き込めない履歴パス
        let today = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let mut source = MockRateSource::new();
        source
            .expect_rates_for()
            .returning(|date| Ok(snapshot_for(date, usd_and_eur())));
        let service = ExchangeService::new(
            Arc::new(source),
            RateHistoryWriter::new("/nonexistent-dir/kawase-history.log"),
            Arc::new(FixedClock::new(today)),
        );

        let request = ExchangeRequest {
            currencies: vec!["USD".to_string()],
            days: 1,
        };

        // when (操作):
        let blocks = service.run(&request).await;

        // then (期待する結果):
        assert_eq!(blocks.len(), 1);
    }
}
