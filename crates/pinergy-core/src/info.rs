//! Reference data: top-up options and household defaults.

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::result::BaseResult;

/// An id/name option pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedOption {
    /// Option id.
    #[serde(deserialize_with = "lenient::integer")]
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
}

/// Response to `GET /configinfo`: selectable top-up amounts and thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigInfoResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Amounts offered for automatic top-up.
    #[serde(deserialize_with = "lenient::integers")]
    pub auto_up_amounts: Vec<i64>,
    /// Amounts offered for scheduled top-up.
    #[serde(deserialize_with = "lenient::integers")]
    pub scheduled_top_up_amounts: Vec<i64>,
    /// Balance thresholds offered for automatic top-up.
    #[serde(deserialize_with = "lenient::integers")]
    pub thresholds: Vec<i64>,
    /// Amounts offered for immediate top-up.
    #[serde(deserialize_with = "lenient::integers")]
    pub top_up_amounts: Vec<i64>,
}

/// Response to `GET /defaultsinfo`: household defaults, limits and option lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsInfoResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Suggested number of adults.
    #[serde(deserialize_with = "lenient::integer")]
    pub default_adults: i64,
    /// Suggested number of bedrooms.
    #[serde(deserialize_with = "lenient::integer")]
    pub default_bedrooms: i64,
    /// Suggested number of children.
    #[serde(deserialize_with = "lenient::integer")]
    pub default_children: i64,
    /// Upper bound for adults.
    #[serde(deserialize_with = "lenient::integer")]
    pub max_adults: i64,
    /// Upper bound for bedrooms.
    #[serde(deserialize_with = "lenient::integer")]
    pub max_bedrooms: i64,
    /// Upper bound for children.
    #[serde(deserialize_with = "lenient::integer")]
    pub max_children: i64,
    /// Heating type options.
    #[serde(deserialize_with = "lenient::records")]
    pub heating_types: Vec<NamedOption>,
    /// House type options.
    #[serde(deserialize_with = "lenient::records")]
    pub house_types: Vec<NamedOption>,
}
