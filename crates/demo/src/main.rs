// File: crates/demo/src/main.rs
// Summary: Demo loads per-ticker OHLC CSVs, prints the watchlist and trend, and writes the chart description as JSON.

mod csv_provider;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::{
    handle_interaction, DashboardConfig, DashboardError, DashboardSettings, IndicatorKind, IndicatorRequest, Interaction,
    Period, RowStatus, Trend, WatchlistRow,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::csv_provider::CsvProvider;

#[derive(Parser, Debug)]
#[command(name = "ticker-dashboard", about = "Compute indicators for a ticker and emit a renderer-agnostic chart description")]
struct Args {
    /// Directory holding one <TICKER>.csv per symbol.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// JSON dashboard configuration; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated watchlist, overrides the configuration.
    #[arg(long)]
    watchlist: Option<String>,
    /// Ticker to chart; defaults to the first watchlist entry.
    #[arg(long)]
    ticker: Option<String>,
    /// History depth: 1mo, 3mo, 6mo, 1y, 2y, 5y, max.
    #[arg(long)]
    period: Option<Period>,
    /// Indicator as kind[:window[:multiplier]], e.g. sma:50, wma:200, bb:20:2, rsi:14. Repeatable.
    #[arg(long = "indicator", value_parser = parse_indicator)]
    indicators: Vec<IndicatorRequest>,
    /// Output path for the chart JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chart_core=info,ticker_dashboard=info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(w) = &args.watchlist {
        config.watchlist = w.clone();
    }
    if let Some(p) = args.period {
        config.period = p;
    }
    if !args.indicators.is_empty() {
        config.indicators = args.indicators.clone();
    }

    let state = config.initial_state().context("invalid indicator configuration")?;
    let options = config.chart_options().context("invalid chart configuration")?;
    let settings = DashboardSettings { weekly_source: config.weekly_source, options };
    let provider = CsvProvider::new(&args.data_dir);
    info!(data_dir = %args.data_dir.display(), tickers = state.watchlist.len(), period = %state.period, "starting dashboard pass");

    let interaction = match &args.ticker {
        Some(t) => Interaction::Select(t.clone()),
        None => Interaction::Refresh,
    };
    let (state, view) = handle_interaction(&provider, state, interaction, &settings);

    print_watchlist(&view.watchlist);

    let Some(outcome) = view.chart else {
        println!("Enter a valid ticker to start.");
        return Ok(());
    };
    let dashboard = match outcome {
        Ok(d) => d,
        Err(DashboardError::NoData { ticker }) => {
            println!("No data for {ticker}. Enter a valid ticker to start.");
            return Ok(());
        }
        Err(e @ DashboardError::DataUnavailable(_)) => {
            warn!(error = %e, "chart data unavailable");
            println!("Data unavailable: {e}");
            return Ok(());
        }
    };

    let s = &dashboard.summary;
    println!("{} current price: ${:.2}", s.ticker, s.quote.price);
    match (&s.reference, s.trend) {
        (Some((name, avg)), Some(Trend::Bullish)) => println!("Vibe: BULLISH. Price is above the {name} (${avg:.2})"),
        (Some((name, avg)), Some(Trend::Bearish)) => println!("Vibe: BEARISH. Price is below the {name} (${avg:.2})"),
        _ => println!("Vibe: not enough history for a moving average yet"),
    }

    let out = args.out.unwrap_or_else(|| out_name_for(state.selected.as_deref().unwrap_or("chart")));
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = dashboard.chart.to_json_pretty().context("serialising chart")?;
    std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} ({} pane(s))", out.display(), dashboard.chart.pane_count());
    Ok(())
}

fn load_config(path: &Path) -> Result<DashboardConfig> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    DashboardConfig::from_json_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Produce output file name like target/out/chart_<ticker>.json
fn out_name_for(ticker: &str) -> PathBuf {
    let safe: String = ticker.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' }).collect();
    PathBuf::from("target/out").join(format!("chart_{safe}.json"))
}

fn parse_indicator(s: &str) -> Result<IndicatorRequest, String> {
    let mut parts = s.split(':');
    let kind = match parts.next().map(|k| k.trim().to_lowercase()).as_deref() {
        Some("sma") => IndicatorKind::Sma,
        Some("wma") | Some("weekly") => IndicatorKind::WeeklyRollingMean,
        Some("bb") | Some("bollinger") => IndicatorKind::BollingerBands,
        Some("rsi") => IndicatorKind::Rsi,
        other => return Err(format!("unknown indicator kind {:?}", other.unwrap_or(""))),
    };
    let window = parts.next().map(|w| w.trim().parse::<i64>().map_err(|e| format!("bad window '{w}': {e}"))).transpose()?;
    let multiplier = parts.next().map(|m| m.trim().parse::<f64>().map_err(|e| format!("bad multiplier '{m}': {e}"))).transpose()?;
    let request = IndicatorRequest { kind, window, multiplier };
    // reject bad parameters at the command line rather than mid-run
    request.validate().map_err(|e| e.to_string())?;
    Ok(request)
}

fn print_watchlist(rows: &[WatchlistRow]) {
    println!("{:<10} {:>12} {:>10} {:>9}", "Ticker", "Price", "Change", "Change %");
    for row in rows {
        match &row.status {
            RowStatus::Loaded(q) => {
                let change = q.change.map(|c| format!("{c:+.2}")).unwrap_or_else(|| "-".into());
                let pct = q.change_pct.map(|p| format!("{p:+.2}%")).unwrap_or_else(|| "-".into());
                println!("{:<10} {:>12.2} {:>10} {:>9}", row.ticker, q.price, change, pct);
            }
            RowStatus::NoData => println!("{:<10} {:>12}", row.ticker, "no data"),
            RowStatus::Failed { reason } => println!("{:<10} {:>12}  ({reason})", row.ticker, "failed"),
        }
    }
}
