//! Request payloads sent by the side-effecting operations.
//!
//! Field declaration order is the wire order; see [`crate::encode`].

use serde::{Serialize, Serializer};

use crate::account::HouseProfile;

/// Body of `POST /login`.
///
/// The server matches this exact shape: `email`, `password`, `device_token`,
/// in that order and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Derived credential, see [`crate::derive_login_credential`].
    pub password: String,
    /// Device identifier.
    pub device_token: String,
}

impl LoginRequest {
    /// Build a login body from already-derived values.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        device_token: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            device_token: device_token.into(),
        }
    }
}

/// Body of `POST /changepass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordRequest {
    /// The new password, sent as given.
    pub new_password: String,
}

/// Body of `POST /editprofile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditProfileRequest {
    /// Salutation.
    pub title: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Mobile number.
    pub mobile: String,
}

/// Body of `POST /updatehouse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditHouseDetailsRequest {
    /// The full household profile.
    pub house: HouseProfile,
}

/// Body of `POST /topup`, `POST /scheduletopup` and `POST /autotopup`.
///
/// `threshold` applies to automatic top-ups and `day_of_month` to scheduled
/// ones. Unset values are left out of the payload entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopUpRequest {
    /// Account id, see `UserProfile::pinergy_id`.
    pub pinergy_id: String,
    /// Stored card token.
    pub cc_token: String,
    /// Amount in euro.
    pub amount: f64,
    /// Balance threshold that triggers an automatic top-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Day of month for a scheduled top-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

impl TopUpRequest {
    /// An immediate top-up.
    pub fn new(pinergy_id: impl Into<String>, cc_token: impl Into<String>, amount: f64) -> Self {
        Self {
            pinergy_id: pinergy_id.into(),
            cc_token: cc_token.into(),
            amount,
            threshold: None,
            day_of_month: None,
        }
    }

    /// Set the automatic top-up threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the scheduled top-up day.
    #[must_use]
    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }
}

/// Body of `POST /updatenotif`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationSettingsRequest {
    /// SMS notifications.
    pub sms: bool,
    /// Email notifications.
    pub email: bool,
    /// Phone notifications.
    pub phone: bool,
}

/// Body of `POST /updatedevicetoken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateDeviceTokenRequest {
    /// Push notification token.
    pub device_token: String,
    /// Platform label.
    pub device_type: String,
    /// Platform version; an empty value is sent as `"1"`.
    #[serde(serialize_with = "os_version_or_placeholder")]
    pub os_version: String,
}

impl UpdateDeviceTokenRequest {
    /// Platform label sent when none is given.
    pub const DEFAULT_DEVICE_TYPE: &'static str = "android";

    /// A request with the default platform label and no OS version.
    pub fn new(device_token: impl Into<String>) -> Self {
        Self {
            device_token: device_token.into(),
            device_type: Self::DEFAULT_DEVICE_TYPE.to_string(),
            os_version: String::new(),
        }
    }
}

fn os_version_or_placeholder<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if value.is_empty() { "1" } else { value })
}

/// Body of `POST /landlordverify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandlordRequest {
    /// Landlord password.
    pub password: String,
    /// Meter premises number.
    pub premises_number: String,
}

/// Body of `POST /deletecc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteCreditCardRequest {
    /// Token of the card to remove.
    pub cc_token: String,
}
