//! Assembly of chart-ready series, one trace per ticker.

use crate::catalog::{self, MetricDef};
use crate::error::{Error, Result};
use crate::query::{self, DateRange};
use crate::shape;
use crate::store::Store;
use crate::universe::TickerUniverse;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// The visual encoding the rendering collaborator applies to one trace.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Line,
    Waterfall,
    Candlestick,
    Ohlc,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Waterfall => "waterfall",
            Self::Candlestick => "candlestick",
            Self::Ohlc => "ohlc",
        }
    }
}

/// One named, date-aligned value sequence destined for a single trace.
/// `dates` and `values` are always the same length.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    pub render_mode: RenderMode,
}

/// A candlestick-ready series: four value sequences aligned to `dates`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OhlcSeries {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub low: Vec<f64>,
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    pub high: Vec<f64>,
}

// Derived metrics plot as waterfalls, raw ones as lines.
fn render_mode_for(metric: &MetricDef) -> RenderMode {
    if metric.is_derived() {
        RenderMode::Waterfall
    } else {
        RenderMode::Line
    }
}

/// Build one series per selected ticker, in selection order.
///
/// A ticker with no rows in range still yields a series with empty
/// sequences; the renderer draws nothing for that trace. Output is
/// deterministic for fixed inputs and store contents.
pub async fn build_historical(
    store: &Store,
    universe: &TickerUniverse,
    tickers: &[String],
    range: DateRange,
    metric_key: &str,
) -> Result<Vec<Series>> {
    let metric = catalog::lookup(metric_key)?;
    let render_mode = render_mode_for(metric);

    let mut traces = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let ticker = universe.resolve(ticker)?;
        let spec = query::historical(&ticker, range, metric);
        let rows = store.query(&spec).await?;
        let (dates, values) = shape::date_value(&rows)?;
        debug!(
            "[{}] {} rows shaped for metric '{}'",
            ticker.display,
            dates.len(),
            metric.key
        );
        traces.push(Series {
            name: ticker.display,
            dates,
            values,
            render_mode,
        });
    }
    Ok(traces)
}

/// Fetch the OHLC series behind a candlestick chart for one ticker.
///
/// A candlestick needs at least one point, so an empty window is an error
/// here, unlike the historical path. The caller picks `Candlestick` or
/// `Ohlc` rendering; the query is the same for both.
pub async fn build_ohlc(
    store: &Store,
    universe: &TickerUniverse,
    ticker: &str,
    range: DateRange,
) -> Result<OhlcSeries> {
    let ticker = universe.resolve(ticker)?;
    let spec = query::ohlc(&ticker, range);
    let rows = store.query(&spec).await?;
    if rows.is_empty() {
        return Err(Error::EmptyResult(ticker.display));
    }

    let columns = shape::ohlc(&rows)?;
    debug!("[{}] {} OHLC rows shaped", ticker.display, columns.dates.len());
    Ok(OhlcSeries {
        name: ticker.display,
        dates: columns.dates,
        low: columns.low,
        open: columns.open,
        close: columns.close,
        high: columns.high,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_metrics_render_as_lines() {
        for key in ["open", "close", "low", "high", "volume", "adj_close"] {
            let metric = catalog::lookup(key).unwrap();
            assert_eq!(render_mode_for(metric), RenderMode::Line);
        }
    }

    #[test]
    fn derived_metrics_render_as_waterfalls() {
        for key in ["price_diff", "daily_return"] {
            let metric = catalog::lookup(key).unwrap();
            assert_eq!(render_mode_for(metric), RenderMode::Waterfall);
        }
    }

    #[test]
    fn series_serialises_for_the_renderer() {
        let series = Series {
            name: "PETR3".into(),
            dates: vec![NaiveDate::from_ymd_opt(2021, 1, 4).unwrap()],
            values: vec![-0.1667],
            render_mode: RenderMode::Waterfall,
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["name"], "PETR3");
        assert_eq!(json["dates"][0], "2021-01-04");
        assert_eq!(json["render_mode"], "waterfall");
    }

    #[test]
    fn render_mode_names() {
        assert_eq!(RenderMode::Line.as_str(), "line");
        assert_eq!(RenderMode::Candlestick.as_str(), "candlestick");
        assert_eq!(
            serde_json::to_value(RenderMode::Ohlc).unwrap(),
            "ohlc"
        );
    }
}
