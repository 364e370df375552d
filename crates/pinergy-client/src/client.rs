//! Pinergy API client.

use std::fmt;
use std::time::Duration;

use pinergy_core::{
    decode, derive_device_identifier, derive_login_credential, encode, ActiveTopUpsResponse,
    BalanceResponse, BaseResult, ChangePasswordRequest, CompareResponse, ConfigInfoResponse,
    DefaultsInfoResponse, DeleteCreditCardRequest, EditHouseDetailsRequest, EditProfileRequest,
    LandlordCheckResponse, LandlordRequest, LevelPayUsage, LoginRequest, LoginResponse,
    NotificationPreferences, NotificationSettingsRequest, NotificationSettingsResponse,
    TopUpHistoryResponse, TopUpRequest, TopUpResponse, UpdateDeviceTokenRequest, UsageResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::executor::{Access, Executor};
use crate::http::{HttpMethod, ReqwestTransport, Transport};
use crate::trace::DebugTrace;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.pinergy.ie/api";

/// User agent of the Android app the API expects.
pub const DEFAULT_USER_AGENT: &str = "Pinergy/1.0 (Android 14)";

/// Default connect and total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Client options for customization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API root; a trailing slash is ignored.
    pub base_url: String,
    /// Connect timeout (default: 90 s).
    pub connect_timeout: Duration,
    /// Total request timeout (default: 90 s).
    pub request_timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Write a redacted request/response trace to stderr.
    pub debug: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            debug: false,
        }
    }
}

impl ClientOptions {
    /// Defaults overridden by `PINERGY_BASE_URL`, `PINERGY_TIMEOUT_SECONDS`,
    /// `PINERGY_USER_AGENT` and `PINERGY_DEBUG`.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if let Some(url) = lookup("PINERGY_BASE_URL").filter(|v| !v.trim().is_empty()) {
            options.base_url = url;
        }
        if let Some(raw) = lookup("PINERGY_TIMEOUT_SECONDS") {
            match raw.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => {
                    options = options.with_timeout(Duration::from_secs(seconds));
                }
                _ => tracing::warn!(value = %raw, "ignoring invalid PINERGY_TIMEOUT_SECONDS"),
            }
        }
        if let Some(agent) = lookup("PINERGY_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            options.user_agent = agent;
        }
        if let Some(raw) = lookup("PINERGY_DEBUG") {
            options.debug = parse_flag(&raw);
        }

        options
    }

    /// Set the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set both the connect and the total timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.request_timeout = timeout;
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable the stderr trace.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Pinergy API client.
///
/// Holds the session credential. Operations that need it fail with
/// [`ClientError::Authentication`] before any network traffic when none is
/// attached. Only [`login`](Self::login), [`set_auth_token`](Self::set_auth_token)
/// and [`clear_auth_token`](Self::clear_auth_token) change the credential, and
/// errors never do.
pub struct PinergyClient {
    executor: Executor,
}

impl PinergyClient {
    /// Create a client for `base_url` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(ClientOptions::default().with_base_url(base_url))
    }

    /// Create a client from explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn with_options(options: ClientOptions) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&options)?;
        Ok(Self::with_transport(&options, transport))
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// The options' timeouts are the transport's concern and are not applied here.
    #[must_use]
    pub fn with_transport(options: &ClientOptions, transport: impl Transport + 'static) -> Self {
        let mut executor = Executor::new(
            &options.base_url,
            options.user_agent.clone(),
            Box::new(transport),
        );
        if options.debug {
            executor.set_trace(Some(DebugTrace::stderr()));
        }
        Self { executor }
    }

    /// Replace the diagnostic trace sink.
    #[must_use]
    pub fn with_trace(mut self, trace: DebugTrace) -> Self {
        self.executor.set_trace(Some(trace));
        self
    }

    /// Attach a previously issued credential.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    /// API root with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// The attached credential, if any.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.executor.credential()
    }

    /// True when a credential is attached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.executor.credential().is_some()
    }

    /// Attach a credential. An empty token detaches the current one.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.executor.set_credential(token);
    }

    /// Detach the credential.
    pub fn clear_auth_token(&mut self) {
        self.executor.clear_credential();
    }

    /// Send a raw request through the shared request path.
    ///
    /// # Errors
    ///
    /// See [`ClientError`]. Non-GET calls whose body reports `success: false`
    /// are errors even on a 2xx status.
    pub fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
        access: Access,
    ) -> Result<Value, ClientError> {
        self.executor.execute(method, path, body, query, access)
    }

    // ---- account ----

    /// Sign in and attach the returned credential.
    ///
    /// The password is sent as its derived credential, never raw. A blank
    /// `device_token` is replaced with a generated identifier. The session is
    /// only updated when the server returns a non-empty token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the login.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        device_token: Option<&str>,
    ) -> Result<LoginResponse, ClientError> {
        let device_token = match device_token.map(str::trim) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => derive_device_identifier(),
        };
        let request = LoginRequest::new(
            email.trim(),
            derive_login_credential(password),
            device_token,
        );

        let response: LoginResponse = self.submit("/login", &request, &[], Access::Public)?;
        if response.auth_token.is_empty() {
            tracing::warn!("login succeeded without an auth token, session unchanged");
        } else {
            self.executor.set_credential(response.auth_token.clone());
            tracing::info!("logged in");
        }
        Ok(response)
    }

    /// End the server-side session. The local credential stays attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn logout(&self) -> Result<BaseResult, ClientError> {
        self.submit("/logout", &Map::new(), &[], Access::Authenticated)
    }

    /// Ask the server to send a password reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn forgot_password(&self, email: &str) -> Result<BaseResult, ClientError> {
        self.submit(
            "/forgot",
            &Map::new(),
            &[("email", email.trim())],
            Access::Public,
        )
    }

    /// Change the account password. The new password is sent as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn change_password(&self, new_password: &str) -> Result<BaseResult, ClientError> {
        let request = ChangePasswordRequest {
            new_password: new_password.to_string(),
        };
        self.submit("/changepass", &request, &[], Access::Authenticated)
    }

    // ---- balance and top-ups ----

    /// Current balance and meter state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn balance(&self) -> Result<BalanceResponse, ClientError> {
        self.fetch("/balance", &[], Access::Authenticated)
    }

    /// Immediate card top-up.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the top-up is declined.
    pub fn top_up(&self, request: &TopUpRequest) -> Result<TopUpResponse, ClientError> {
        self.submit("/topup", request, &[], Access::Authenticated)
    }

    /// Monthly top-up on `request.day_of_month`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn schedule_top_up(&self, request: &TopUpRequest) -> Result<BaseResult, ClientError> {
        self.submit("/scheduletopup", request, &[], Access::Authenticated)
    }

    /// Top-up triggered when the balance falls below `request.threshold`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn auto_top_up(&self, request: &TopUpRequest) -> Result<BaseResult, ClientError> {
        self.submit("/autotopup", request, &[], Access::Authenticated)
    }

    /// Configured scheduled and automatic top-ups.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn active_top_ups(&self) -> Result<ActiveTopUpsResponse, ClientError> {
        self.fetch("/activetopups", &[], Access::Authenticated)
    }

    /// Past top-ups, newest first as the server orders them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn top_up_history(&self) -> Result<TopUpHistoryResponse, ClientError> {
        self.fetch("/topuphistory", &[], Access::Authenticated)
    }

    // ---- usage ----

    /// Daily, weekly and monthly consumption.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn usage(&self) -> Result<UsageResponse, ClientError> {
        self.fetch("/usage", &[], Access::Authenticated)
    }

    /// Level-pay consumption, passed through untyped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn level_pay_usage(&self) -> Result<LevelPayUsage, ClientError> {
        self.fetch("/levelPayUsage", &[], Access::Authenticated)
    }

    /// Consumption compared with similar homes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn compare(&self) -> Result<CompareResponse, ClientError> {
        self.fetch("/compare", &[], Access::Authenticated)
    }

    // ---- profile and preferences ----

    /// Update the account holder's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn edit_profile(&self, request: &EditProfileRequest) -> Result<BaseResult, ClientError> {
        self.submit("/editprofile", request, &[], Access::Authenticated)
    }

    /// Update the household profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn update_house(
        &self,
        request: &EditHouseDetailsRequest,
    ) -> Result<BaseResult, ClientError> {
        self.submit("/updatehouse", request, &[], Access::Authenticated)
    }

    /// Current notification channels.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn notification_preferences(&self) -> Result<NotificationPreferences, ClientError> {
        self.fetch("/getnotif", &[], Access::Authenticated)
    }

    /// Change notification channels.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn update_notification_settings(
        &self,
        request: &NotificationSettingsRequest,
    ) -> Result<NotificationSettingsResponse, ClientError> {
        self.submit("/updatenotif", request, &[], Access::Authenticated)
    }

    /// Register a push notification token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn update_device_token(
        &self,
        request: &UpdateDeviceTokenRequest,
    ) -> Result<BaseResult, ClientError> {
        self.submit("/updatedevicetoken", request, &[], Access::Authenticated)
    }

    /// Remove a stored card.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub fn delete_credit_card(&self, cc_token: &str) -> Result<BaseResult, ClientError> {
        let request = DeleteCreditCardRequest {
            cc_token: cc_token.to_string(),
        };
        self.submit("/deletecc", &request, &[], Access::Authenticated)
    }

    // ---- reference data and landlord ----

    /// Allowed top-up amounts and thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn config_info(&self) -> Result<ConfigInfoResponse, ClientError> {
        self.fetch("/configinfo", &[], Access::Authenticated)
    }

    /// Household defaults and option lists. No login needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn defaults_info(&self) -> Result<DefaultsInfoResponse, ClientError> {
        self.fetch("/defaultsinfo", &[], Access::Public)
    }

    /// Whether a premises belongs to a landlord account. No login needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn landlord_check(
        &self,
        premises_number: &str,
    ) -> Result<LandlordCheckResponse, ClientError> {
        self.fetch(
            "/landlordcheck",
            &[("premises_number", premises_number)],
            Access::Public,
        )
    }

    /// Verify a landlord password for a premises. No login needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or verification is refused.
    pub fn landlord_verify(&self, request: &LandlordRequest) -> Result<BaseResult, ClientError> {
        self.submit("/landlordverify", request, &[], Access::Public)
    }

    fn fetch<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        access: Access,
    ) -> Result<T, ClientError> {
        let raw = self
            .executor
            .execute(HttpMethod::Get, path, None, query, access)?;
        Ok(decode(&raw))
    }

    fn submit<B, T>(
        &self,
        path: &str,
        body: &B,
        query: &[(&str, &str)],
        access: Access,
    ) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned + Default,
    {
        let body = encode(body)?;
        let raw = self
            .executor
            .execute(HttpMethod::Post, path, Some(body), query, access)?;
        Ok(decode(&raw))
    }
}

impl fmt::Debug for PinergyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinergyClient")
            .field("base_url", &self.executor.base_url())
            .field("authenticated", &self.is_authenticated())
            .field("tracing", &self.executor.is_tracing())
            .finish()
    }
}
