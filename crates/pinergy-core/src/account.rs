//! Account, profile and preference records.

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::result::BaseResult;

/// Household profile. Also sent back verbatim by the house-details edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseProfile {
    /// House type id (see `DefaultsInfoResponse::house_types`).
    #[serde(rename = "type", deserialize_with = "lenient::integer")]
    pub house_type: i64,
    /// Number of adults.
    #[serde(deserialize_with = "lenient::integer")]
    pub adult_count: i64,
    /// Number of bedrooms.
    #[serde(deserialize_with = "lenient::integer")]
    pub bedroom_count: i64,
    /// Number of children.
    #[serde(deserialize_with = "lenient::integer")]
    pub children_count: i64,
    /// Heating type id (see `DefaultsInfoResponse::heating_types`).
    #[serde(deserialize_with = "lenient::integer")]
    pub heating_type: i64,
}

/// Account holder profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Display name.
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    /// Salutation.
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    /// Account id used by top-up requests.
    #[serde(deserialize_with = "lenient::text")]
    pub pinergy_id: String,
    /// Mobile number on file.
    #[serde(deserialize_with = "lenient::text")]
    pub mobile_number: String,
    /// Email notifications enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub email_notifications: bool,
    /// SMS notifications enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub sms_notifications: bool,
}

/// Stored payment card reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditCard {
    /// Cardholder label.
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    /// Card token used by top-up and card deletion.
    #[serde(deserialize_with = "lenient::text")]
    pub cc_token: String,
    /// Payment processor token.
    #[serde(deserialize_with = "lenient::text")]
    pub payment_token: String,
    /// Last four digits of the card number.
    #[serde(deserialize_with = "lenient::text")]
    pub last_4_digits: String,
    /// Opaque processor field.
    #[serde(deserialize_with = "lenient::text")]
    pub z50: String,
    /// Receipt email.
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
}

/// Response to `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Session credential; empty when login failed.
    #[serde(deserialize_with = "lenient::text")]
    pub auth_token: String,
    /// Account holder, if sent.
    #[serde(deserialize_with = "lenient::record")]
    pub user: Option<UserProfile>,
    /// Household profile, if sent.
    #[serde(deserialize_with = "lenient::record")]
    pub house: Option<HouseProfile>,
    /// Stored cards in server order.
    #[serde(deserialize_with = "lenient::records")]
    pub credit_cards: Vec<CreditCard>,
    /// Meter premises number.
    #[serde(deserialize_with = "lenient::text")]
    pub premises_number: String,
    /// Meter predates smart top-up.
    #[serde(deserialize_with = "lenient::flag")]
    pub is_legacy_meter: bool,
    /// Meter has no WAN link.
    #[serde(deserialize_with = "lenient::flag")]
    pub is_no_wan_meter: bool,
}

/// Response to `GET /getnotif`. This endpoint carries no outcome block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    /// Email notifications enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub email: bool,
    /// Phone notifications enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub phone: bool,
    /// SMS notifications enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub sms: bool,
    /// Whether the app should show the preferences prompt.
    #[serde(deserialize_with = "lenient::flag")]
    pub should_show: bool,
    /// Prompt text.
    #[serde(deserialize_with = "lenient::text")]
    pub should_show_message: String,
}

/// Response to `POST /updatenotif`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettingsResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Email notifications now enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub email: bool,
    /// SMS notifications now enabled.
    #[serde(deserialize_with = "lenient::flag")]
    pub sms: bool,
}

/// Response to `GET /landlordcheck`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandlordCheckResponse {
    /// Outcome.
    #[serde(flatten)]
    pub base: BaseResult,
    /// Whether the premises belongs to a landlord account.
    #[serde(deserialize_with = "lenient::flag")]
    pub is_landlord_account: bool,
}
