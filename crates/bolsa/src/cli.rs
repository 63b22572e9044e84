use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, default_value = "info")]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tickers enumerated from the store.
    Tickers,

    /// List the metric catalog.
    Metrics,

    /// Export historical series as JSON, one trace per ticker.
    Historical {
        /// Tickers in selection order, e.g. `PETR3 MGLU3`.
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Window start, inclusive (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Window end, inclusive (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Metric key, e.g. `close` or `daily_return`.
        #[arg(long, default_value = "close")]
        metric: String,
    },

    /// Export a candlestick-ready OHLC series as JSON.
    Ohlc {
        ticker: String,

        /// Window start, inclusive (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Window end, inclusive (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}
