//! Query-and-series layer for the daily B3 stock price dashboards.
//!
//! The store holds one table per ticker under the `stocks` schema, each with
//! daily `date`, `open`, `close`, `low`, `high`, `adj_close` and `volume`
//! rows. This crate turns a user selection of (tickers, date range, metric)
//! into chart-ready series:
//!
//! 1. `catalog` - which metrics exist, and whether each is a raw column or
//!    derived from consecutive closes.
//! 2. `universe` - the tickers enumerated from the store at startup;
//!    doubles as the identifier allow-list.
//! 3. `query` - SQL construction, with dates always bound as parameters.
//! 4. `shape` - row-to-column conversion, positionally aligned.
//! 5. `series` - one trace per ticker, plus the OHLC candlestick path.
//!
//! Rendering is someone else's job; the output stops at named, date-aligned
//! value sequences tagged with a [`RenderMode`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod series;
pub mod shape;
pub mod store;
pub mod universe;

pub use crate::error::{Error, Result};
pub use crate::query::DateRange;
pub use crate::series::{build_historical, build_ohlc, OhlcSeries, RenderMode, Series};
pub use crate::store::Store;
pub use crate::universe::{Ticker, TickerUniverse};
