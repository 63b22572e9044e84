//! The ticker universe: every `stocks.*` table known to the store.
//!
//! Enumerated once at startup and fixed for the session. Besides feeding the
//! selection dropdowns, the universe is the allow-list that makes table-name
//! splicing safe: a [`Ticker`] only exists once its name matched an
//! enumerated table.

use crate::error::{Error, Result};
use crate::store::Store;
use tracing::debug;

/// A resolved ticker. `table` is the canonical lowercase form used in the
/// schema-qualified table name; `display` is the uppercase trace label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    pub table: String,
    pub display: String,
}

/// The known-ticker set for this session.
#[derive(Debug, Clone)]
pub struct TickerUniverse {
    tables: Vec<String>,
}

impl TickerUniverse {
    /// Enumerate the `stocks` schema; each table name becomes one
    /// selectable ticker. No live refresh afterwards.
    pub async fn load(store: &Store) -> Result<Self> {
        let tables = store.stock_tables().await?;
        debug!("{} tickers enumerated from the store", tables.len());
        Ok(Self::from_tables(tables))
    }

    pub(crate) fn from_tables(mut tables: Vec<String>) -> Self {
        tables.sort();
        Self { tables }
    }

    /// Case-insensitive resolution of user input into a [`Ticker`].
    pub fn resolve(&self, ticker: &str) -> Result<Ticker> {
        let table = ticker.to_lowercase();
        if self.tables.iter().any(|t| *t == table) {
            Ok(Ticker {
                display: table.to_uppercase(),
                table,
            })
        } else {
            Err(Error::UnknownTicker(ticker.to_string()))
        }
    }

    /// Uppercased ticker names, sorted, for the selection dropdowns.
    pub fn display_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.to_uppercase()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> TickerUniverse {
        TickerUniverse::from_tables(vec![
            "petr3".into(),
            "mglu3".into(),
            "vale3".into(),
        ])
    }

    #[test]
    fn resolution_is_case_insensitive() {
        let universe = universe();
        for input in ["PETR3", "petr3", "Petr3"] {
            let ticker = universe.resolve(input).unwrap();
            assert_eq!(ticker.table, "petr3");
            assert_eq!(ticker.display, "PETR3");
        }
    }

    #[test]
    fn unknown_ticker_errors() {
        let err = universe().resolve("AAPL").unwrap_err();
        assert!(matches!(err, Error::UnknownTicker(t) if t == "AAPL"));
    }

    #[test]
    fn hostile_input_never_resolves() {
        // anything outside the enumerated set is rejected before it can
        // reach a query string
        let resolved = universe().resolve("petr3\"; DROP TABLE stocks.petr3; --");
        assert!(resolved.is_err());
    }

    #[test]
    fn display_names_sorted_uppercase() {
        assert_eq!(
            universe().display_names(),
            vec!["MGLU3", "PETR3", "VALE3"]
        );
    }
}
