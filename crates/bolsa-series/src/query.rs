//! SQL construction for the two query shapes.
//!
//! Identifiers (table, column) are spliced into the text only after
//! allow-list validation: tables come from a resolved [`Ticker`], columns
//! from the static catalog. Date bounds always bind as `$1`/`$2`.

use crate::catalog::{Derivation, MetricDef, MetricKind};
use crate::error::{Error, Result};
use crate::universe::Ticker;
use chrono::NaiveDate;
use tokio_postgres::types::ToSql;

/// Inclusive date window of one request. `start == end` is a valid
/// single-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }
}

/// A ready-to-execute statement: SQL text plus its two date parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub sql: String,
    pub range: DateRange,
}

impl QuerySpec {
    pub fn params(&self) -> [&(dyn ToSql + Sync); 2] {
        [&self.range.start, &self.range.end]
    }
}

/// The `(date, value)` query for one ticker and metric.
///
/// Raw metrics project the stored column directly; a row whose projected
/// column is itself NULL is left out rather than failing the shape step.
/// Derived metrics compute over the FULL history first (so the predecessor
/// of the first in-window row is still the true previous trading day) and
/// apply the date window outside the window function. Null-close rows never
/// enter either path.
pub fn historical(ticker: &Ticker, range: DateRange, metric: &MetricDef) -> QuerySpec {
    let sql = match metric.kind {
        MetricKind::Raw { column } => {
            let mut sql = format!(
                "SELECT date, {column}::DOUBLE PRECISION AS value \
                 FROM stocks.\"{table}\" \
                 WHERE date >= $1 AND date <= $2 AND close IS NOT NULL",
                table = ticker.table,
            );
            if column != "close" {
                sql.push_str(&format!(" AND {column} IS NOT NULL"));
            }
            sql.push_str(" ORDER BY date");
            sql
        }
        MetricKind::Derived(derivation) => format!(
            "SELECT date, value FROM (\
                 SELECT date, ({expr})::DOUBLE PRECISION AS value \
                 FROM stocks.\"{table}\" \
                 WHERE close IS NOT NULL\
             ) derived \
             WHERE value IS NOT NULL AND date >= $1 AND date <= $2 \
             ORDER BY date",
            expr = derivation_expr(derivation),
            table = ticker.table,
        ),
    };
    QuerySpec { sql, range }
}

// LAG carries its own ORDER BY: an ORDER BY on a wrapping subquery does not
// constrain window evaluation order. `LAG` is NULL on the first row of
// history, which the `value IS NOT NULL` filter above drops.
fn derivation_expr(derivation: Derivation) -> &'static str {
    match derivation {
        Derivation::PriceDiff => "LAG(close, 1) OVER (ORDER BY date) - close",
        Derivation::DailyReturn => {
            "(LAG(close, 1) OVER (ORDER BY date) - close) / close"
        }
    }
}

/// The `(date, low, open, close, high)` query behind candlestick and OHLC
/// charts; identical for both render modes.
pub fn ohlc(ticker: &Ticker, range: DateRange) -> QuerySpec {
    let sql = format!(
        "SELECT date, \
             low::DOUBLE PRECISION AS low, \
             open::DOUBLE PRECISION AS open, \
             close::DOUBLE PRECISION AS close, \
             high::DOUBLE PRECISION AS high \
         FROM stocks.\"{table}\" \
         WHERE date >= $1 AND date <= $2 AND close IS NOT NULL \
         ORDER BY date",
        table = ticker.table,
    );
    QuerySpec { sql, range }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn petr3() -> Ticker {
        Ticker {
            table: "petr3".into(),
            display: "PETR3".into(),
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn inverted_range_rejected() {
        let err = DateRange::new(
            NaiveDate::from_ymd_opt(2021, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn single_day_range_allowed() {
        let day = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        assert!(DateRange::new(day, day).is_ok());
    }

    #[test]
    fn raw_query_projects_requested_column() {
        let metric = catalog::lookup("volume").unwrap();
        let spec = historical(&petr3(), range(), metric);
        assert!(spec.sql.starts_with("SELECT date, volume::DOUBLE PRECISION AS value"));
        assert!(spec.sql.contains("FROM stocks.\"petr3\""));
        assert!(spec.sql.contains("date >= $1 AND date <= $2"));
        assert!(spec.sql.contains("close IS NOT NULL"));
        assert!(spec.sql.ends_with("ORDER BY date"));
    }

    #[test]
    fn raw_query_excludes_null_values_of_projected_column() {
        // a row missing only its volume draws as a gap, not a failed chart
        let metric = catalog::lookup("volume").unwrap();
        let spec = historical(&petr3(), range(), metric);
        assert!(spec.sql.contains("AND volume IS NOT NULL"));
    }

    #[test]
    fn raw_close_query_filters_close_once() {
        let metric = catalog::lookup("close").unwrap();
        let spec = historical(&petr3(), range(), metric);
        assert_eq!(spec.sql.matches("close IS NOT NULL").count(), 1);
    }

    #[test]
    fn derived_query_orders_inside_window() {
        let metric = catalog::lookup("daily_return").unwrap();
        let spec = historical(&petr3(), range(), metric);
        assert!(spec.sql.contains("LAG(close, 1) OVER (ORDER BY date)"));
        assert!(spec.sql.contains(") / close"));
        // first-of-history row is dropped, window applied outside
        assert!(spec.sql.contains("WHERE value IS NOT NULL AND date >= $1"));
    }

    #[test]
    fn price_diff_query_has_no_division() {
        let metric = catalog::lookup("price_diff").unwrap();
        let spec = historical(&petr3(), range(), metric);
        assert!(spec.sql.contains("LAG(close, 1) OVER (ORDER BY date) - close"));
        assert!(!spec.sql.contains("/ close"));
    }

    #[test]
    fn derived_window_filter_is_outside_subquery() {
        let metric = catalog::lookup("price_diff").unwrap();
        let spec = historical(&petr3(), range(), metric);
        let subquery_end = spec.sql.find(") derived").unwrap();
        let date_filter = spec.sql.find("date >= $1").unwrap();
        assert!(date_filter > subquery_end);
    }

    #[test]
    fn ohlc_query_shape() {
        let spec = ohlc(&petr3(), range());
        for column in ["low", "open", "close", "high"] {
            assert!(spec.sql.contains(&format!("{column}::DOUBLE PRECISION AS {column}")));
        }
        assert!(spec.sql.contains("FROM stocks.\"petr3\""));
        assert!(spec.sql.ends_with("ORDER BY date"));
    }
}
