use http::StatusCode;
use serde_json::Value;

pub const REAUTHENTICATE_MESSAGE: &str = "Authentication failed, please log in again";
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission denied, unable to perform this operation";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource does not exist";
pub const VALIDATION_PREFIX: &str = "Invalid request parameters: ";

/// Every way a call through the API client can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    /// A 2xx body was not the JSON we expected.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// A 2xx body reported an application-level failure.
    #[error("{0}")]
    Rejected(String),
    #[error("cannot encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid request URL '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Builds the classified error for a non-2xx response from its raw body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let detail = ErrorBody::parse(body).message_or(status);
        ApiError::Status {
            status,
            message: classify(status, detail),
        }
    }
}

/// Outcome of reading a non-2xx body. Parse failures never replace the status error.
#[derive(Debug, PartialEq)]
pub enum ErrorBody {
    Parsed(ErrorDetail),
    Unparsed,
}

/// The two fields an error body may explain itself with. Each is read on its
/// own, so an odd type in one never hides the other.
#[derive(Debug, Default, PartialEq)]
pub struct ErrorDetail {
    pub detail: Option<Value>,
    pub message: Option<String>,
}

impl ErrorDetail {
    fn from_value(mut body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let detail = body.get_mut("detail").map(Value::take);
        ErrorDetail { detail, message }
    }
}

impl ErrorBody {
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => ErrorBody::Parsed(ErrorDetail::from_value(value)),
            Err(_) => ErrorBody::Unparsed,
        }
    }

    /// `detail`, else `message`, else the `HTTP <code>: <reason>` status line.
    pub fn message_or(self, status: StatusCode) -> String {
        let parsed = match self {
            ErrorBody::Parsed(detail) => detail,
            ErrorBody::Unparsed => return status_line(status),
        };
        if let Some(detail) = parsed.detail.and_then(render_detail) {
            return detail;
        }
        match parsed.message {
            Some(message) if !message.is_empty() => message,
            _ => status_line(status),
        }
    }
}

// FastAPI validation errors carry a list in `detail`; keep it readable as JSON text.
fn render_detail(detail: Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn status_line(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

/// Maps a status and the extracted detail to the message shown to the user.
/// 401 discards the detail on purpose.
pub fn classify(status: StatusCode, detail: String) -> String {
    match status {
        StatusCode::UNAUTHORIZED => REAUTHENTICATE_MESSAGE.to_string(),
        StatusCode::BAD_REQUEST => detail,
        StatusCode::FORBIDDEN => PERMISSION_DENIED_MESSAGE.to_string(),
        StatusCode::NOT_FOUND => NOT_FOUND_MESSAGE.to_string(),
        StatusCode::UNPROCESSABLE_ENTITY => format!("{}{}", VALIDATION_PREFIX, detail),
        _ => detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: u16, body: &str) -> String {
        let status = StatusCode::from_u16(status).unwrap();
        ApiError::from_response(status, body.as_bytes()).to_string()
    }

    #[test]
    fn test_401_is_opaque_whatever_the_body() {
        for body in [
            r#"{"detail": "token expired at 12:00"}"#,
            r#"{"message": "nope"}"#,
            "<html>gateway</html>",
            "",
        ] {
            assert_eq!(message(401, body), REAUTHENTICATE_MESSAGE);
        }
    }

    #[test]
    fn test_400_passes_detail_through() {
        assert_eq!(message(400, r#"{"detail": "missing text"}"#), "missing text");
    }

    #[test]
    fn test_message_used_when_detail_missing() {
        assert_eq!(message(400, r#"{"message": "bad payload"}"#), "bad payload");
    }

    #[test]
    fn test_detail_survives_unexpected_message_type() {
        assert_eq!(
            message(400, r#"{"detail": "OAuth not configured", "message": 123}"#),
            "OAuth not configured"
        );
        assert_eq!(
            message(500, r#"{"detail": {"code": 7}, "message": false}"#),
            r#"{"code":7}"#
        );
    }

    #[test]
    fn test_non_string_message_is_ignored() {
        assert_eq!(message(500, r#"{"message": {"nested": 1}}"#), "HTTP 500: Internal Server Error");
        assert_eq!(message(400, r#"["just", "a", "list"]"#), "HTTP 400: Bad Request");
    }

    #[test]
    fn test_403_and_404_use_fixed_messages() {
        assert_eq!(message(403, r#"{"detail": "admin only"}"#), PERMISSION_DENIED_MESSAGE);
        assert_eq!(message(404, r#"{"detail": "no row 9"}"#), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_422_prefixes_backend_detail() {
        let msg = message(422, r#"{"detail": "cpu_cores must be >= 1"}"#);
        assert!(msg.starts_with(VALIDATION_PREFIX));
        assert!(msg.contains("cpu_cores must be >= 1"));
    }

    #[test]
    fn test_422_renders_structured_detail() {
        let msg = message(422, r#"{"detail": [{"loc": ["body", "code"], "msg": "field required"}]}"#);
        assert!(msg.starts_with(VALIDATION_PREFIX));
        assert!(msg.contains("field required"));
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status_line() {
        assert_eq!(message(500, "Internal explosion"), "HTTP 500: Internal Server Error");
        assert_eq!(message(502, r#"{"unrelated": true}"#), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_error_body_discriminates_parse_outcome() {
        assert_eq!(ErrorBody::parse(b"not json"), ErrorBody::Unparsed);
        assert!(matches!(
            ErrorBody::parse(br#"{"detail": "x"}"#),
            ErrorBody::Parsed(_)
        ));
    }

    #[test]
    fn test_status_accessor() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, b"");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(ApiError::Rejected("x".into()).status(), None);
    }
}
