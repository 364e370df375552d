//! Wire entities and credential derivation for the Pinergy API.
//!
//! This crate has no I/O. It provides:
//!
//! - **Codec**: [`decode`] turns a response body into a typed record and never
//!   fails; [`encode`] turns a request payload into an order-stable JSON object.
//! - **Responses**: [`BaseResult`] and the per-operation records that embed it.
//! - **Requests**: the payloads sent by side-effecting operations.
//! - **Credentials**: [`derive_login_credential`] and [`derive_device_identifier`].
//!
//! # Tolerant decoding
//!
//! The upstream API is undocumented and its payloads drift. Every field of
//! every response degrades to a type-appropriate default when it is missing or
//! malformed. Nested sub-records are the one exception: a `null` or missing
//! object stays `None`, while `{}` decodes to `Some` of the default record.
//!
//! ```
//! use pinergy_core::{decode, UsageResponse};
//!
//! let raw = serde_json::json!({"day": [{"date": 123, "kwh": 5.0}], "week": null});
//! let usage: UsageResponse = decode(&raw);
//! assert_eq!(usage.day.len(), 1);
//! assert!(usage.week.is_empty());
//! assert!(!usage.base.success);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod codec;
pub mod credential;
pub mod info;
mod lenient;
pub mod requests;
pub mod result;
pub mod topup;
pub mod usage;

pub use account::{
    CreditCard, HouseProfile, LandlordCheckResponse, LoginResponse, NotificationPreferences,
    NotificationSettingsResponse, UserProfile,
};
pub use codec::{decode, encode, timestamp};
pub use credential::{
    derive_device_identifier, derive_login_credential, DEVICE_IDENTIFIER_LEN,
    DEVICE_IDENTIFIER_PREFIX,
};
pub use info::{ConfigInfoResponse, DefaultsInfoResponse, NamedOption};
pub use requests::{
    ChangePasswordRequest, DeleteCreditCardRequest, EditHouseDetailsRequest, EditProfileRequest,
    LandlordRequest, LoginRequest, NotificationSettingsRequest, TopUpRequest,
    UpdateDeviceTokenRequest,
};
pub use result::BaseResult;
pub use topup::{
    ActiveTopUpsResponse, BalanceResponse, TopUpHistoryResponse, TopUpRecord, TopUpResponse,
    TopUpRule,
};
pub use usage::{
    CompareDatum, ComparePeriod, CompareResponse, LevelPayUsage, UsageResponse, UsageSample,
};
