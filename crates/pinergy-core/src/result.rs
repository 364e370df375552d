//! The outcome fields shared by every API response.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Outcome block present at the top level of (almost) every response.
///
/// Response records embed it as a flattened `base` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseResult {
    /// Whether the server reports the call as successful.
    #[serde(deserialize_with = "lenient::flag")]
    pub success: bool,
    /// Human-readable server message.
    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
    /// Server error code, `0` when none.
    #[serde(deserialize_with = "lenient::integer")]
    pub error_code: i64,
}
