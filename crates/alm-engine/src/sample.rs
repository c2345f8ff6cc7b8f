//! Recorded projection output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use alm_core::types::Date;

use crate::error::EngineError;

/// State of the projection at one step date.
///
/// `cash` is the balance after the step's cash flows and before any
/// trading; `residual_cash` is what the strategies left over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSample {
    /// Step date.
    pub date: Date,
    /// Asset cash flows paid in the step window.
    pub asset_cf: f64,
    /// Liability cash flows paid in the step window.
    pub liability_cf: f64,
    /// Asset portfolio value before trading.
    pub asset_mv: f64,
    /// Liability portfolio value.
    pub liability_mv: f64,
    /// Cash before trading.
    pub cash: f64,
    /// Cash after trading.
    pub residual_cash: f64,
}

impl ProjectionSample {
    /// Returns the value recorded for `metric`.
    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cash => self.cash,
            Metric::AssetCf => self.asset_cf,
            Metric::LiabilityCf => self.liability_cf,
            Metric::AssetMv => self.asset_mv,
            Metric::LiabilityMv => self.liability_mv,
        }
    }

    /// Asset value less liability value.
    #[must_use]
    pub fn surplus(&self) -> f64 {
        self.asset_mv - self.liability_mv
    }
}

/// A recorded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    /// Cash before trading
    Cash,
    /// Asset cash flows
    AssetCf,
    /// Liability cash flows
    LiabilityCf,
    /// Asset market value
    AssetMv,
    /// Liability market value
    LiabilityMv,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Metric; 5] = [
        Metric::Cash,
        Metric::AssetCf,
        Metric::LiabilityCf,
        Metric::AssetMv,
        Metric::LiabilityMv,
    ];

    /// Returns the series name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cash => "CASH",
            Metric::AssetCf => "ASSET_CF",
            Metric::LiabilityCf => "LIABILITY_CF",
            Metric::AssetMv => "ASSET_MV",
            Metric::LiabilityMv => "LIABILITY_MV",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == upper)
            .ok_or_else(|| EngineError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectionSample {
        ProjectionSample {
            date: Date::from_ymd(2024, 2, 29).unwrap(),
            asset_cf: 2_500.0,
            liability_cf: 1_000.0,
            asset_mv: 98_000.0,
            liability_mv: 60_000.0,
            cash: 1_500.0,
            residual_cash: 0.0,
        }
    }

    #[test]
    fn test_metric_names() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!("asset_mv".parse::<Metric>().unwrap(), Metric::AssetMv);
        assert!(matches!(
            "NAV".parse::<Metric>(),
            Err(EngineError::UnknownMetric(name)) if name == "NAV"
        ));
    }

    #[test]
    fn test_value_lookup() {
        let s = sample();
        assert_eq!(s.value(Metric::Cash), 1_500.0);
        assert_eq!(s.value(Metric::AssetCf), 2_500.0);
        assert_eq!(s.value(Metric::LiabilityCf), 1_000.0);
        assert_eq!(s.value(Metric::AssetMv), 98_000.0);
        assert_eq!(s.value(Metric::LiabilityMv), 60_000.0);
        assert_eq!(s.surplus(), 38_000.0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2024-02-29");
        assert_eq!(json["residual_cash"], 0.0);
        assert_eq!(serde_json::to_string(&Metric::LiabilityCf).unwrap(), "\"LIABILITY_CF\"");
    }
}
