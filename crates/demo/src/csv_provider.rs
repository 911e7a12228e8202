// File: crates/demo/src/csv_provider.rs
// Summary: History provider backed by a directory of per-ticker OHLC CSV files (<dir>/<TICKER>.csv).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::provider::apply_period;
use chart_core::{weekly_bars, Frequency, HistoryProvider, HistoryRequest, PricePoint, PriceSeries, ProviderError, Timestamp};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, warn};

pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve `<dir>/<TICKER>.csv`, accepting the `.cvs` typo as well.
    fn path_for(&self, ticker: &str) -> Option<PathBuf> {
        ["csv", "cvs"]
            .iter()
            .map(|ext| self.dir.join(format!("{ticker}.{ext}")))
            .find(|p| p.exists())
    }
}

impl HistoryProvider for CsvProvider {
    fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        let ticker = request.ticker.trim().to_uppercase();
        let Some(path) = self.path_for(&ticker) else {
            debug!(ticker = %ticker, dir = %self.dir.display(), "no CSV for ticker");
            return Ok(PriceSeries::empty(ticker, request.frequency));
        };
        let bars = load_ohlc_csv(&path).map_err(|e| ProviderError::unavailable(&ticker, format!("{e:#}")))?;
        let daily = apply_period(&PriceSeries::normalized(ticker, Frequency::Daily, bars), request.period);
        Ok(match request.frequency {
            Frequency::Daily => daily,
            Frequency::Weekly => weekly_bars(&daily),
        })
    }
}

/// Load OHLC(V) rows. Header names are matched case-insensitively against common spellings;
/// rows with missing prices or broken OHLC invariants are skipped.
pub fn load_ohlc_csv(path: &Path) -> Result<Vec<PricePoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    debug!(?headers, file = %path.display(), "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["date", "datetime", "time", "timestamp", "open_time"])
        .with_context(|| format!("{}: no date/time column", path.display()))?;
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "adj close", "close_price"])
        .with_context(|| format!("{}: no close column", path.display()))?;
    let i_volume = idx(&["volume", "vol", "v"]);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading row {row}"))?;
        let num = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.parse::<f64>().ok());

        let Some(ts) = rec.get(i_time).and_then(parse_timestamp) else {
            skipped += 1;
            continue;
        };
        let Some(close) = num(Some(i_close)) else {
            skipped += 1;
            continue;
        };
        let open = num(i_open).unwrap_or(close);
        let high = num(i_high).unwrap_or(open.max(close));
        let low = num(i_low).unwrap_or(open.min(close));
        let volume = num(i_volume).map(|v| v.max(0.0) as u64).unwrap_or(0);

        match PricePoint::try_new(ts, open, high, low, close, volume) {
            Ok(p) => out.push(p),
            Err(e) => {
                warn!(row, error = %e, "skipping bar");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!(file = %path.display(), skipped, "rows skipped while loading");
    }
    Ok(out)
}

/// Dates (`2024-01-31`), date-times (`2024-01-31 16:00:00`, RFC 3339) or epoch seconds/milliseconds.
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(chrono::NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
        return DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.naive_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::Period;

    #[test]
    fn timestamps_in_common_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-31"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-31T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp("1706659200"), Some(midnight));
        assert_eq!(parse_timestamp("1706659200000"), Some(midnight));
        assert_eq!(parse_timestamp("31/01/2024"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn loads_csv_and_skips_broken_rows() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("ticker-dashboard-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        std::fs::write(
            dir.join("ACME.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,10,12,9,11,100\n\
             2024-01-03,11,10,9,12,100\n\
             not-a-date,1,1,1,1,1\n\
             2024-01-01,9,10,8,10,50\n",
        )?;

        let provider = CsvProvider::new(&dir);
        let daily = provider.history(&HistoryRequest::new("acme", Period::Max, Frequency::Daily))?;
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.first().map(|p| p.close), Some(10.0));

        let missing = provider.history(&HistoryRequest::new("NOPE", Period::Max, Frequency::Daily))?;
        assert!(missing.is_empty());

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
