//! Opt-in request/response trace for operator debugging.
//!
//! The credential header, the credential field of response bodies and password
//! fields are replaced with [`REDACTED`] before anything is written. Sink
//! failures are logged and otherwise ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::Value;

use crate::http::HttpRequest;

/// Replacement text for redacted values.
pub const REDACTED: &str = "***REDACTED***";

const REDACTED_HEADERS: [&str; 2] = ["auth_token", "authorization"];
const REDACTED_FIELDS: [&str; 3] = ["password", "new_password", "auth_token"];

/// Writes a redacted trace of each call to a sink.
pub struct DebugTrace {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl DebugTrace {
    /// Trace to an arbitrary sink.
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Trace to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub(crate) fn request(&self, request: &HttpRequest) {
        let headers: BTreeMap<&str, &str> = request
            .headers
            .iter()
            .map(|(name, value)| {
                let redact = REDACTED_HEADERS
                    .iter()
                    .any(|h| name.eq_ignore_ascii_case(h));
                (name.as_str(), if redact { REDACTED } else { value.as_str() })
            })
            .collect();

        let mut text = format!(
            "=== PinergyClient request ===\n{} {}\n",
            request.method, request.url
        );
        if !request.query.is_empty() {
            let params: BTreeMap<&str, &str> = request
                .query
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            text.push_str(&format!("params={}\n", pretty(&params)));
        }
        text.push_str(&format!("headers={}\n", pretty(&headers)));
        match &request.body {
            Some(body) => text.push_str(&format!("json_body={}\n", pretty(&redact(body)))),
            None => text.push_str("json_body=None\n"),
        }

        self.emit(&text);
    }

    pub(crate) fn response(&self, status: u16, body: &Value) {
        self.emit(&format!(
            "=== PinergyClient response ({status}) ===\n{}\n",
            pretty(&redact(body))
        ));
    }

    fn emit(&self, text: &str) {
        let Ok(mut sink) = self.sink.lock() else {
            tracing::warn!("debug trace sink is poisoned");
            return;
        };
        if let Err(err) = sink.write_all(text.as_bytes()).and_then(|()| sink.flush()) {
            tracing::warn!(error = %err, "failed to write debug trace");
        }
    }
}

impl fmt::Debug for DebugTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugTrace").finish_non_exhaustive()
    }
}

fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = if REDACTED_FIELDS.contains(&key.as_str()) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact(value)
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "<unprintable>".to_string())
}
