//! Single request path shared by every operation.
//!
//! Each call checks the credential precondition, builds the fixed header
//! set, performs exactly one transport round-trip, normalizes the body to a
//! JSON value and classifies the outcome.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::trace::DebugTrace;

/// Name of the header that carries the session credential.
pub const AUTH_HEADER: &str = "auth_token";

const JSON: &str = "application/json";

/// Whether an operation needs an attached credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Refused locally when no credential is attached.
    Authenticated,
    /// Sent with or without a credential.
    Public,
}

pub(crate) struct Executor {
    base_url: String,
    user_agent: String,
    transport: Box<dyn Transport>,
    credential: Option<String>,
    trace: Option<DebugTrace>,
}

impl Executor {
    pub(crate) fn new(
        base_url: &str,
        user_agent: impl Into<String>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
            transport,
            credential: None,
            trace: None,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// An empty token detaches the credential.
    pub(crate) fn set_credential(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.credential = if token.is_empty() { None } else { Some(token) };
    }

    pub(crate) fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub(crate) fn set_trace(&mut self, trace: Option<DebugTrace>) {
        self.trace = trace;
    }

    pub(crate) fn is_tracing(&self) -> bool {
        self.trace.is_some()
    }

    pub(crate) fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
        access: Access,
    ) -> Result<Value, ClientError> {
        if access == Access::Authenticated && self.credential.is_none() {
            return Err(ClientError::Authentication(format!(
                "{method} {path} requires a login or an injected auth token"
            )));
        }

        let request = self.build_request(method, path, body, query);
        if let Some(trace) = &self.trace {
            trace.request(&request);
        }
        tracing::debug!(method = %method, path, "sending request");

        let HttpResponse { status, body } = self.transport.send(&request)?;
        let body = parse_body(&body, status);
        tracing::debug!(method = %method, path, status, "received response");
        if let Some(trace) = &self.trace {
            trace.response(status, &body);
        }

        classify(method, status, body)
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> HttpRequest {
        let mut headers = vec![
            ("Content-Type".to_string(), JSON.to_string()),
            ("Accept".to_string(), JSON.to_string()),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ];
        if let Some(token) = &self.credential {
            headers.push((AUTH_HEADER.to_string(), token.clone()));
        }

        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            headers,
            body,
        }
    }
}

fn parse_body(text: &str, status: u16) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|err| {
        tracing::warn!(status, error = %err, "response body is not JSON, treating as empty");
        Value::Object(Map::new())
    })
}

fn classify(method: HttpMethod, status: u16, body: Value) -> Result<Value, ClientError> {
    if !(200..300).contains(&status) {
        let message = server_message(&body).unwrap_or_else(|| reason(status));
        return Err(ClientError::Api {
            message,
            status: Some(status),
            body,
        });
    }

    // Reads hand a reported failure back as data; writes escalate it.
    if method != HttpMethod::Get && body.get("success") == Some(&Value::Bool(false)) {
        return Err(ClientError::Api {
            message: server_message(&body).unwrap_or_else(|| "Request failed".to_string()),
            status: Some(status),
            body,
        });
    }

    Ok(body)
}

/// The body's `message` whenever present, even when empty.
fn server_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::RecordingTransport;
    use crate::trace::testing::SharedBuffer;
    use serde_json::json;

    fn executor(transport: &RecordingTransport) -> Executor {
        Executor::new(
            "https://api.example/api/",
            "Pinergy/1.0 (Android 14)",
            Box::new(transport.clone()),
        )
    }

    #[test]
    fn unauthenticated_call_is_refused_locally() {
        let transport = RecordingTransport::default();
        let err = executor(&transport)
            .execute(HttpMethod::Get, "/balance", None, &[], Access::Authenticated)
            .unwrap_err();

        assert!(matches!(err, ClientError::Authentication(_)));
        assert!(err.is_api_error());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn public_call_sends_fixed_headers_without_credential() {
        let transport = RecordingTransport::default();
        executor(&transport)
            .execute(HttpMethod::Get, "/defaultsinfo", None, &[], Access::Public)
            .unwrap();

        let request = transport.last();
        assert_eq!(request.url, "https://api.example/api/defaultsinfo");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("user-agent"), Some("Pinergy/1.0 (Android 14)"));
        assert_eq!(request.header(AUTH_HEADER), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn credential_header_is_attached() {
        let transport = RecordingTransport::default();
        let mut exec = executor(&transport);
        exec.set_credential("tok");
        exec.execute(HttpMethod::Get, "/balance", None, &[], Access::Authenticated)
            .unwrap();

        assert_eq!(transport.last().header(AUTH_HEADER), Some("tok"));
    }

    #[test]
    fn empty_credential_detaches() {
        let transport = RecordingTransport::default();
        let mut exec = executor(&transport);
        exec.set_credential("tok");
        exec.set_credential("");
        assert!(exec.credential().is_none());
    }

    #[test]
    fn query_pairs_are_forwarded() {
        let transport = RecordingTransport::default();
        executor(&transport)
            .execute(
                HttpMethod::Get,
                "/landlordcheck",
                None,
                &[("premises_number", "12345")],
                Access::Public,
            )
            .unwrap();

        assert_eq!(
            transport.last().query,
            vec![("premises_number".to_string(), "12345".to_string())]
        );
    }

    #[test]
    fn non_success_status_uses_server_message() {
        let transport = RecordingTransport::default();
        transport.respond(500, &json!({"message": "Server error"}));
        let err = executor(&transport)
            .execute(HttpMethod::Get, "/defaultsinfo", None, &[], Access::Public)
            .unwrap_err();

        match err {
            ClientError::Api { message, status, body } => {
                assert_eq!(message, "Server error");
                assert_eq!(status, Some(500));
                assert_eq!(body["message"], "Server error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_success_status_falls_back_to_reason() {
        let transport = RecordingTransport::default();
        transport.respond_raw(404, "");
        let err = executor(&transport)
            .execute(HttpMethod::Get, "/defaultsinfo", None, &[], Access::Public)
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error: Not Found");
        assert_eq!(err.body(), Some(&json!({})));
    }

    #[test]
    fn present_empty_message_is_kept() {
        let transport = RecordingTransport::default();
        transport
            .respond(404, &json!({"message": ""}))
            .respond(200, &json!({"success": false, "message": ""}))
            .respond(500, &json!({"message": null}));
        let exec = executor(&transport);

        let err = exec
            .execute(HttpMethod::Get, "/defaultsinfo", None, &[], Access::Public)
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: ");

        let err = exec
            .execute(HttpMethod::Post, "/landlordverify", Some(json!({})), &[], Access::Public)
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: ");

        let err = exec
            .execute(HttpMethod::Get, "/defaultsinfo", None, &[], Access::Public)
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: Internal Server Error");
    }

    #[test]
    fn unknown_status_renders_code() {
        assert_eq!(reason(599), "HTTP 599");
        assert_eq!(reason(503), "Service Unavailable");
    }

    #[test]
    fn write_failure_is_escalated() {
        let transport = RecordingTransport::default();
        transport.respond(200, &json!({"success": false, "message": "Card declined"}));
        let mut exec = executor(&transport);
        exec.set_credential("tok");
        let err = exec
            .execute(HttpMethod::Post, "/topup", Some(json!({})), &[], Access::Authenticated)
            .unwrap_err();

        assert!(err.is_api_error());
        assert_eq!(err.to_string(), "API error: Card declined");
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn write_failure_without_message() {
        let transport = RecordingTransport::default();
        transport.respond(200, &json!({"success": false}));
        let err = executor(&transport)
            .execute(HttpMethod::Post, "/landlordverify", Some(json!({})), &[], Access::Public)
            .unwrap_err();

        assert_eq!(err.to_string(), "API error: Request failed");
    }

    #[test]
    fn read_failure_is_returned_as_data() {
        let transport = RecordingTransport::default();
        transport.respond(200, &json!({"success": false, "message": "No data"}));
        let mut exec = executor(&transport);
        exec.set_credential("tok");
        let body = exec
            .execute(HttpMethod::Get, "/balance", None, &[], Access::Authenticated)
            .unwrap();

        assert_eq!(body["message"], "No data");
    }

    #[test]
    fn empty_and_garbage_bodies_become_empty_objects() {
        let transport = RecordingTransport::default();
        transport.respond_raw(200, "   ").respond_raw(200, "<html>oops</html>");
        let exec = executor(&transport);

        for _ in 0..2 {
            let body = exec
                .execute(HttpMethod::Get, "/defaultsinfo", None, &[], Access::Public)
                .unwrap();
            assert_eq!(body, json!({}));
        }
    }

    #[test]
    fn trace_never_leaks_credential() {
        let transport = RecordingTransport::default();
        let buffer = SharedBuffer::default();
        let mut exec = executor(&transport);
        exec.set_credential("secret-token");
        exec.set_trace(Some(DebugTrace::new(buffer.clone())));
        exec.execute(
            HttpMethod::Post,
            "/changepass",
            Some(json!({"new_password": "hunter2"})),
            &[],
            Access::Authenticated,
        )
        .unwrap();

        let out = buffer.contents();
        assert!(out.contains("POST https://api.example/api/changepass"));
        assert!(out.contains("=== PinergyClient request ==="));
        assert!(out.contains("=== PinergyClient response (200) ==="));
        assert!(!out.contains("secret-token"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn traced_login_hides_issued_token() {
        let transport = RecordingTransport::default();
        transport.respond(200, &json!({"success": true, "auth_token": "SECRET-TOKEN-XYZ"}));
        let buffer = SharedBuffer::default();
        let mut exec = executor(&transport);
        exec.set_trace(Some(DebugTrace::new(buffer.clone())));

        let body = exec
            .execute(
                HttpMethod::Post,
                "/login",
                Some(json!({"email": "a@b.ie", "password": "digest", "device_token": "d"})),
                &[],
                Access::Public,
            )
            .unwrap();

        assert_eq!(body["auth_token"], "SECRET-TOKEN-XYZ");
        let out = buffer.contents();
        assert!(!out.contains("SECRET-TOKEN-XYZ"));
        assert!(!out.contains("digest"));
    }
}
