//! Static registry of the metrics a dashboard can plot.
//!
//! The catalog is fixed at compile time and read-only thereafter. Every
//! lookup re-checks the raw/derived partition; callers never infer it from
//! the key.

use crate::error::{Error, Result};

/// Where a metric's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Projected straight out of a stored column.
    Raw { column: &'static str },
    /// Computed from each row and its chronological predecessor.
    Derived(Derivation),
}

/// The two recognised derivations over consecutive closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// `previous_close - close`
    PriceDiff,
    /// `(previous_close - close) / close`
    DailyReturn,
}

/// One user-facing metric: a stable key, a dropdown label, and its kind.
#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: MetricKind,
}

impl MetricDef {
    pub fn is_derived(&self) -> bool {
        matches!(self.kind, MetricKind::Derived(_))
    }
}

/// Every metric the dashboards offer, keyed by `key`.
pub const CATALOG: &[MetricDef] = &[
    MetricDef {
        key: "open",
        label: "Abertura",
        kind: MetricKind::Raw { column: "open" },
    },
    MetricDef {
        key: "close",
        label: "Fechamento",
        kind: MetricKind::Raw { column: "close" },
    },
    MetricDef {
        key: "low",
        label: "Mínima",
        kind: MetricKind::Raw { column: "low" },
    },
    MetricDef {
        key: "high",
        label: "Alta",
        kind: MetricKind::Raw { column: "high" },
    },
    MetricDef {
        key: "volume",
        label: "Volume",
        kind: MetricKind::Raw { column: "volume" },
    },
    MetricDef {
        key: "adj_close",
        label: "Fechamento Ajustado",
        kind: MetricKind::Raw { column: "adj_close" },
    },
    MetricDef {
        key: "price_diff",
        label: "Diferença de Preço",
        kind: MetricKind::Derived(Derivation::PriceDiff),
    },
    MetricDef {
        key: "daily_return",
        label: "Retorno Diário",
        kind: MetricKind::Derived(Derivation::DailyReturn),
    },
];

/// Find the one definition behind `key`.
pub fn lookup(key: &str) -> Result<&'static MetricDef> {
    CATALOG
        .iter()
        .find(|metric| metric.key == key)
        .ok_or_else(|| Error::UnknownMetric(key.to_string()))
}

/// The dropdown label for `key`; pure projection of [`lookup`].
pub fn display_label(key: &str) -> Result<&'static str> {
    Ok(lookup(key)?.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn close_is_raw() {
        let metric = lookup("close").unwrap();
        assert!(!metric.is_derived());
        assert_eq!(metric.kind, MetricKind::Raw { column: "close" });
        assert_eq!(metric.label, "Fechamento");
    }

    #[test]
    fn daily_return_is_derived() {
        let metric = lookup("daily_return").unwrap();
        assert!(metric.is_derived());
        assert_eq!(
            metric.kind,
            MetricKind::Derived(Derivation::DailyReturn)
        );
    }

    #[test]
    fn unknown_key_errors() {
        let err = lookup("vwap").unwrap_err();
        assert!(matches!(err, Error::UnknownMetric(key) if key == "vwap"));
    }

    #[test]
    fn label_projection() {
        assert_eq!(display_label("volume").unwrap(), "Volume");
        assert!(display_label("").is_err());
    }
}
