// Normalized API responses.
//
// The device answers every command with `{success, data, error}` over HTTP
// 200, but a call can also fail before that envelope exists. All four
// outcomes land in one `ApiResponse` so callers check a single `error`
// field instead of juggling transport and application errors separately.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::payload::RequestEcho;

/// Why a call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// No HTTP response: connection refused, DNS, TLS, timeout.
    #[error("connection error: {0}")]
    Connection(String),

    /// The device answered with a status other than 200.
    #[error("http error")]
    Http,

    /// Status 200 but the body is not the expected JSON envelope.
    #[error("json decode error")]
    JsonDecode,

    /// The device reported `success: false`.
    #[error("{0}")]
    Api(String),
}

impl ResponseError {
    /// `true` when the request never got an HTTP answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl Serialize for ResponseError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Uniform result of one API call.
///
/// `status` is the HTTP status code, or `0` when the request never reached
/// the device. `result` is the `data` member of a successful answer and an
/// empty object otherwise. `request` echoes the payload without the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub request: RequestEcho,
    pub result: Value,
    #[serde(serialize_with = "error_or_false")]
    pub error: Option<ResponseError>,
}

/// Serialize a missing error as `false`, matching the device client's
/// historical output shape.
fn error_or_false<S: Serializer>(
    error: &Option<ResponseError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => err.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// The `{success, data, error}` envelope returned with HTTP 200.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Value,
}

pub(crate) fn empty_result() -> Value {
    Value::Object(Map::new())
}

impl ApiResponse {
    /// The request never produced an HTTP response.
    pub(crate) fn connection_failure(request: RequestEcho, message: String) -> Self {
        Self {
            status: 0,
            request,
            result: empty_result(),
            error: Some(ResponseError::Connection(message)),
        }
    }

    /// Classify an HTTP answer from its status code and body text.
    pub(crate) fn from_http(status: u16, request: RequestEcho, body: &str) -> Self {
        let (result, error) = if status == 200 {
            classify_body(body)
        } else {
            (empty_result(), Some(ResponseError::Http))
        };

        Self {
            status,
            request,
            result,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Error text, as it would be shown to a user.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Convert into a `Result`, keeping only the payload or the error.
    pub fn into_result(self) -> Result<Value, ResponseError> {
        match self.error {
            None => Ok(self.result),
            Some(err) => Err(err),
        }
    }
}

/// Decode a 200 body into `(result, error)`.
fn classify_body(body: &str) -> (Value, Option<ResponseError>) {
    let Ok(envelope) = serde_json::from_str::<Envelope>(body) else {
        return (empty_result(), Some(ResponseError::JsonDecode));
    };

    if envelope.success {
        return (envelope.data, None);
    }

    let message = match envelope.error {
        Value::String(message) => message,
        Value::Null => "unspecified error".to_owned(),
        other => other.to_string(),
    };
    (empty_result(), Some(ResponseError::Api(message)))
}
