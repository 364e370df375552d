//! Blocking client for the Pinergy API.
//!
//! [`PinergyClient`] wraps every endpoint in a typed operation. All calls go
//! through one request path that attaches the session credential, classifies
//! failures into [`ClientError`] and optionally writes a redacted trace.
//!
//! # Example
//!
//! ```no_run
//! use pinergy_client::{ClientError, PinergyClient};
//!
//! # fn example() -> Result<(), ClientError> {
//! let mut client = PinergyClient::new("https://api.pinergy.ie/api")?;
//! client.login("user@example.ie", "password", None)?;
//!
//! let balance = client.balance()?;
//! if balance.base.success {
//!     println!("Balance: {:.2}", balance.balance);
//! } else {
//!     println!("Server said: {}", balance.base.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Reads (`GET`) hand a `success: false` body back as data; writes turn it
//! into [`ClientError::Api`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod executor;
mod http;
mod trace;

pub use client::{
    ClientOptions, PinergyClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use error::ClientError;
pub use executor::{Access, AUTH_HEADER};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use trace::{DebugTrace, REDACTED};
