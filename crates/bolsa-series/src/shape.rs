//! Row-to-column conversion.
//!
//! The store hands back rows; the charts want columns. Both query shapes
//! are known statically, so shaping is a straight per-column pull with no
//! runtime reflection. Row order is preserved as returned (ascending by
//! date, by construction of the queries). Empty input yields empty columns;
//! whether that is an error is the caller's call.

use crate::error::Result;
use chrono::NaiveDate;
use tokio_postgres::Row;

/// Aligned columns of a `(date, low, open, close, high)` result set.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcColumns {
    pub dates: Vec<NaiveDate>,
    pub low: Vec<f64>,
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    pub high: Vec<f64>,
}

/// Shape a `(date, value)` result set into two positionally aligned
/// sequences.
pub fn date_value(rows: &[Row]) -> Result<(Vec<NaiveDate>, Vec<f64>)> {
    let mut dates = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        dates.push(row.try_get("date")?);
        values.push(row.try_get("value")?);
    }
    Ok((dates, values))
}

/// Shape an OHLC result set; all five columns stay aligned to `dates`.
pub fn ohlc(rows: &[Row]) -> Result<OhlcColumns> {
    let mut columns = OhlcColumns {
        dates: Vec::with_capacity(rows.len()),
        low: Vec::with_capacity(rows.len()),
        open: Vec::with_capacity(rows.len()),
        close: Vec::with_capacity(rows.len()),
        high: Vec::with_capacity(rows.len()),
    };
    for row in rows {
        columns.dates.push(row.try_get("date")?);
        columns.low.push(row.try_get("low")?);
        columns.open.push(row.try_get("open")?);
        columns.close.push(row.try_get("close")?);
        columns.high.push(row.try_get("high")?);
    }
    Ok(columns)
}
