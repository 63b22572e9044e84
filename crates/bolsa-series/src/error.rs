use chrono::NaiveDate;

/// Failure taxonomy of the series layer.
///
/// The first four variants are request-validation failures; the remainder
/// wrap anything the store throws at us. An error aborts only the chart
/// update that triggered it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown metric key: {0}")]
    UnknownMetric(String),

    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Raised only where at least one row is mandatory, e.g. a candlestick.
    #[error("no rows for {0} in the requested range")]
    EmptyResult(String),

    #[error("store connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("store setup: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("store query: {0}")]
    Store(#[from] tokio_postgres::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
