//! Balance and top-up records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::timestamp;
use crate::lenient;
use crate::result::BaseResult;

/// Response to `GET /balance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Current credit in euro.
    #[serde(deserialize_with = "lenient::number")]
    pub balance: f64,
    /// Credit is below the warning threshold.
    #[serde(deserialize_with = "lenient::flag")]
    pub credit_low: bool,
    /// Running on emergency credit.
    #[serde(deserialize_with = "lenient::flag")]
    pub emergency_credit: bool,
    /// Last meter reading time (unix seconds).
    #[serde(deserialize_with = "lenient::integer")]
    pub last_reading: i64,
    /// Last top-up time (unix seconds).
    #[serde(deserialize_with = "lenient::integer")]
    pub last_top_up_time: i64,
    /// Last top-up amount in euro.
    #[serde(deserialize_with = "lenient::number")]
    pub last_top_up_amount: f64,
    /// A top-up is still being applied.
    #[serde(deserialize_with = "lenient::flag")]
    pub pending_top_up: bool,
    /// Who initiated the pending top-up.
    #[serde(deserialize_with = "lenient::text")]
    pub pending_top_up_by: String,
    /// Supply is off.
    #[serde(deserialize_with = "lenient::flag")]
    pub power_off: bool,
    /// Estimated days until a top-up is needed.
    #[serde(deserialize_with = "lenient::integer")]
    pub top_up_in_days: i64,
}

/// Response to `POST /topup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopUpResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Time of this top-up (unix seconds).
    #[serde(deserialize_with = "lenient::integer")]
    pub last_top_up_time: i64,
    /// Balance after the top-up.
    #[serde(deserialize_with = "lenient::number")]
    pub latest_balance: f64,
    /// The top-up has not reached the meter yet.
    #[serde(deserialize_with = "lenient::flag")]
    pub pending_top_up: bool,
    /// Manual entry code for meters without a WAN link.
    #[serde(deserialize_with = "lenient::text")]
    pub top_up_code: String,
    /// Estimated days until the next top-up is needed.
    #[serde(deserialize_with = "lenient::integer")]
    pub top_up_in_days: i64,
    /// Server message specific to the top-up.
    #[serde(deserialize_with = "lenient::text")]
    pub top_up_message: String,
}

/// One past top-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopUpRecord {
    /// Server id.
    #[serde(deserialize_with = "lenient::text")]
    pub top_up_id: String,
    /// Amount in euro.
    #[serde(deserialize_with = "lenient::number")]
    pub top_up_amount: f64,
    /// Time of the top-up (unix seconds).
    #[serde(deserialize_with = "lenient::integer")]
    pub top_up_date: i64,
    /// How the top-up was triggered.
    #[serde(deserialize_with = "lenient::text")]
    pub top_up_action: String,
    /// Manual entry code, if any.
    #[serde(deserialize_with = "lenient::text")]
    pub top_up_code: String,
}

impl TopUpRecord {
    /// The top-up time, if set.
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        timestamp(self.top_up_date)
    }
}

/// An active scheduled or automatic top-up rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopUpRule {
    /// Customer label.
    #[serde(deserialize_with = "lenient::text")]
    pub customer: String,
    /// The rule belongs to the logged-in user.
    #[serde(deserialize_with = "lenient::flag")]
    pub current_user: bool,
    /// Amount in euro.
    #[serde(deserialize_with = "lenient::number")]
    pub top_up_amount: f64,
    /// Day of month for scheduled rules.
    #[serde(deserialize_with = "lenient::integer")]
    pub top_up_day: i64,
    /// Balance threshold for automatic rules.
    #[serde(deserialize_with = "lenient::integer")]
    pub top_up_threshold: i64,
}

/// Response to `GET /activetopups`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveTopUpsResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Threshold-triggered rules.
    #[serde(deserialize_with = "lenient::records")]
    pub auto_top_ups: Vec<TopUpRule>,
    /// Day-of-month rules.
    #[serde(deserialize_with = "lenient::records")]
    pub scheduled: Vec<TopUpRule>,
}

/// Response to `GET /topuphistory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopUpHistoryResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Past top-ups in server order.
    #[serde(deserialize_with = "lenient::records")]
    pub top_ups: Vec<TopUpRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use serde_json::json;

    #[test]
    fn balance() {
        let response: BalanceResponse = decode(&json!({
            "success": true,
            "balance": 25.50,
            "credit_low": false,
            "top_up_in_days": 5,
            "last_top_up_amount": "20"
        }));
        assert!(response.base.success);
        assert!((response.balance - 25.5).abs() < f64::EPSILON);
        assert!((response.last_top_up_amount - 20.0).abs() < f64::EPSILON);
        assert_eq!(response.top_up_in_days, 5);
        assert_eq!(response.pending_top_up_by, "");
    }

    #[test]
    fn balance_empty_body() {
        let response: BalanceResponse = decode(&json!({}));
        assert_eq!(response, BalanceResponse::default());
    }

    #[test]
    fn top_up_response() {
        let response: TopUpResponse = decode(&json!({
            "success": true,
            "latest_balance": 45,
            "top_up_code": "1234-5678",
            "pending_top_up": true
        }));
        assert!((response.latest_balance - 45.0).abs() < f64::EPSILON);
        assert_eq!(response.top_up_code, "1234-5678");
        assert!(response.pending_top_up);
        assert_eq!(response.top_up_message, "");
    }

    #[test]
    fn active_top_ups() {
        let response: ActiveTopUpsResponse = decode(&json!({
            "success": true,
            "auto_top_ups": [{"customer": "me", "top_up_amount": 20, "top_up_threshold": 5}],
            "scheduled": null
        }));
        assert_eq!(response.auto_top_ups.len(), 1);
        assert_eq!(response.auto_top_ups[0].top_up_threshold, 5);
        assert!(response.scheduled.is_empty());
    }

    #[test]
    fn history_preserves_order() {
        let response: TopUpHistoryResponse = decode(&json!({
            "success": true,
            "top_ups": [
                {"top_up_id": "3", "top_up_date": 1_700_000_300},
                null,
                {"top_up_id": "1", "top_up_date": 1_700_000_100},
                {"top_up_id": "2", "top_up_date": 0}
            ]
        }));
        let ids: Vec<&str> = response.top_ups.iter().map(|t| t.top_up_id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
        assert!(response.top_ups[0].date().is_some());
        assert!(response.top_ups[2].date().is_none());
    }
}
