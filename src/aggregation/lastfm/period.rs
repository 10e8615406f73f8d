use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::aggregation::domain::AggregationError;

/// Chart time window accepted by Last.fm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartPeriod {
    #[serde(rename = "7day")]
    SevenDays,
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3month")]
    ThreeMonths,
    #[serde(rename = "6month")]
    SixMonths,
    #[serde(rename = "12month")]
    TwelveMonths,
    #[serde(rename = "overall")]
    Overall,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 6] = [
        ChartPeriod::SevenDays,
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::TwelveMonths,
        ChartPeriod::Overall,
    ];

    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            ChartPeriod::SevenDays => "7day",
            ChartPeriod::OneMonth => "1month",
            ChartPeriod::ThreeMonths => "3month",
            ChartPeriod::SixMonths => "6month",
            ChartPeriod::TwelveMonths => "12month",
            ChartPeriod::Overall => "overall",
        }
    }

    /// Parse an optional period. Missing or blank input means "no period".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, AggregationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => v.parse().map(Some),
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AggregationError::InvalidPeriod(s.to_string()))
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
