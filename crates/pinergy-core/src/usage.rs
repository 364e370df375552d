//! Consumption records: usage series, level-pay usage and home comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::timestamp;
use crate::lenient;
use crate::result::BaseResult;

/// One consumption sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageSample {
    /// Start of the sampled period (unix seconds).
    #[serde(deserialize_with = "lenient::integer")]
    pub date: i64,
    /// Cost in euro.
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    /// Energy in kWh.
    #[serde(deserialize_with = "lenient::number")]
    pub kwh: f64,
    /// Emissions in kg.
    #[serde(deserialize_with = "lenient::number")]
    pub co2: f64,
}

impl UsageSample {
    /// The sample's period start, if set.
    #[must_use]
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        timestamp(self.date)
    }
}

/// Response to `GET /usage`: day, week and month series in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Daily samples.
    #[serde(deserialize_with = "lenient::records")]
    pub day: Vec<UsageSample>,
    /// Weekly samples.
    #[serde(deserialize_with = "lenient::records")]
    pub week: Vec<UsageSample>,
    /// Monthly samples.
    #[serde(deserialize_with = "lenient::records")]
    pub month: Vec<UsageSample>,
}

/// Response to `GET /levelPayUsage`, the usage feed of the rebranded app.
///
/// Its payload shape is not stable, so `usage_data` is kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LevelPayUsageWire")]
pub struct LevelPayUsage {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Raw usage payload; empty when the server sent none.
    pub usage_data: Map<String, Value>,
}

/// Both spellings of the payload key have been observed.
#[derive(Default, Deserialize)]
#[serde(default)]
struct LevelPayUsageWire {
    #[serde(flatten)]
    base: BaseResult,
    #[serde(rename = "usageData", deserialize_with = "lenient::object")]
    camel: Map<String, Value>,
    #[serde(rename = "usage_data", deserialize_with = "lenient::object")]
    snake: Map<String, Value>,
}

impl From<LevelPayUsageWire> for LevelPayUsage {
    fn from(wire: LevelPayUsageWire) -> Self {
        let usage_data = if wire.camel.is_empty() {
            wire.snake
        } else {
            wire.camel
        };
        Self {
            base: wire.base,
            usage_data,
        }
    }
}

/// The user's figure against the average home for one measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareDatum {
    /// Average home.
    #[serde(deserialize_with = "lenient::number")]
    pub average_home: f64,
    /// This home.
    #[serde(deserialize_with = "lenient::number")]
    pub users_home: f64,
}

/// Comparison for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparePeriod {
    /// Whether the server had enough data for this period.
    #[serde(deserialize_with = "lenient::flag")]
    pub available: bool,
    /// Energy comparison.
    #[serde(deserialize_with = "lenient::record")]
    pub kwh: Option<CompareDatum>,
    /// Emissions comparison.
    #[serde(deserialize_with = "lenient::record")]
    pub co2: Option<CompareDatum>,
}

/// Response to `GET /compare`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Monthly comparison.
    #[serde(deserialize_with = "lenient::record")]
    pub month: Option<ComparePeriod>,
    /// Weekly comparison.
    #[serde(deserialize_with = "lenient::record")]
    pub week: Option<ComparePeriod>,
}
