//! 為替結果の永続化シンク
//!
//! ## 責務
//!
//! - パイプライン実行 1 回につき、フィルタ済み結果を JSON 1 行として
//!   ファイルへ追記する
//!
//! ここでの失敗はクライアント向けのフローに影響させない方針のため、
//! 呼び出し側（`ExchangeService`）が警告ログへ格下げします。

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::rates::DailyRates;

/// Append-only JSON-lines history of served exchange requests
pub struct RateHistoryWriter {
    path: PathBuf,
}

impl RateHistoryWriter {
    /// Create a writer targeting the given file; the file is created on
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this writer appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one filtered result as a single JSON line.
    pub async fn record(&self, daily: &[DailyRates]) -> io::Result<()> {
        let mut line = serde_json::to_string(daily).map_err(io::Error::other)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Recorded {} day(s) to {}", daily.len(), self.path.display());
        Ok(())
    }
}
