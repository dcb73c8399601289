// Request payload construction.
//
// Everything in here is pure: the same operation, path and attachments
// always produce the same wire shape, and nothing touches the network. The
// executor in `client.rs` is the only caller that sends what is built here.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::operation::Op;
use crate::path::{ConfigPath, PathElement};

/// Optional fields some commands carry next to `op` and `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    /// Config file on the device (`config-file` save/load).
    pub file: Option<String>,
    /// Image download URL (`image add`).
    pub url: Option<String>,
    /// Image name (`image delete`).
    pub name: Option<String>,
}

impl Attachments {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// One `{op, path, ...}` object as the device expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub op: Op,
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl OperationRequest {
    fn new(op: Op, path: Vec<String>, attachments: &Attachments) -> Self {
        Self {
            op,
            path,
            file: attachments.file.clone(),
            url: attachments.url.clone(),
            name: attachments.name.clone(),
        }
    }
}

/// The decoded content of the `data` form field: one request or a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationData {
    Single(OperationRequest),
    Batch(Vec<OperationRequest>),
}

impl OperationData {
    /// All requests in submission order.
    pub fn requests(&self) -> &[OperationRequest] {
        match self {
            Self::Single(request) => std::slice::from_ref(request),
            Self::Batch(requests) => requests,
        }
    }

    pub fn len(&self) -> usize {
        self.requests().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests().is_empty()
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// Serialized JSON body of the `data` field.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("operation requests always serialize")
    }
}

/// Form body of one API call. Holds the key until it is sent.
#[derive(Debug, Clone)]
pub struct Payload {
    operations: OperationData,
    data: String,
    key: SecretString,
}

impl Payload {
    /// Serialized `data` field.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn operations(&self) -> &OperationData {
        &self.operations
    }

    /// Form fields in wire order. This is the only place the key is exposed.
    pub(crate) fn form(&self) -> [(&'static str, &str); 2] {
        [("data", self.data.as_str()), ("key", self.key.expose_secret())]
    }

    /// Drop the key, keeping what may be shown back to the caller.
    pub fn redact(self) -> RequestEcho {
        RequestEcho { data: self.data }
    }
}

/// The request as echoed back in an [`ApiResponse`], without the key.
///
/// [`ApiResponse`]: crate::ApiResponse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEcho {
    pub data: String,
}

impl RequestEcho {
    /// Parse the echoed `data` field back into operation requests.
    pub fn operations(&self) -> serde_json::Result<OperationData> {
        serde_json::from_str(&self.data)
    }
}

/// Build the form payload for one call.
pub fn build(
    op: Op,
    path: &ConfigPath,
    attachments: &Attachments,
    api_key: &SecretString,
) -> Payload {
    let operations = operations(op, path, attachments);
    let data = operations.to_json();
    trace!(op = %op, requests = operations.len(), batch = operations.is_batch(), "built payload");
    Payload {
        operations,
        data,
        key: api_key.clone(),
    }
}

/// Translate path input into the request object or batch.
///
/// Flat input, and a batch holding a single nested location, become one
/// request. Otherwise plain segments accumulate into an open location that
/// is flushed whenever a nested location is reached and at the end; each
/// nested location is a request of its own.
pub fn operations(op: Op, path: &ConfigPath, attachments: &Attachments) -> OperationData {
    let single = |segments: Vec<String>| {
        OperationData::Single(OperationRequest::new(op, segments, attachments))
    };

    match path {
        ConfigPath::Empty => single(Vec::new()),
        ConfigPath::Location(segments) => single(segments.clone()),
        ConfigPath::Batch(elements) => match elements.as_slice() {
            [] => single(Vec::new()),
            [PathElement::Location(location)] => single(location.clone()),
            _ if elements.iter().all(|e| matches!(e, PathElement::Segment(_))) => single(
                elements
                    .iter()
                    .filter_map(|e| match e {
                        PathElement::Segment(s) => Some(s.clone()),
                        PathElement::Location(_) => None,
                    })
                    .collect(),
            ),
            _ => OperationData::Batch(split_batch(op, elements, attachments)),
        },
    }
}

fn split_batch(op: Op, elements: &[PathElement], attachments: &Attachments) -> Vec<OperationRequest> {
    let mut batch = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for element in elements {
        match element {
            PathElement::Segment(segment) => pending.push(segment.clone()),
            PathElement::Location(location) => {
                if !pending.is_empty() {
                    batch.push(OperationRequest::new(
                        op,
                        std::mem::take(&mut pending),
                        attachments,
                    ));
                }
                batch.push(OperationRequest::new(op, location.clone(), attachments));
            }
        }
    }

    if !pending.is_empty() {
        batch.push(OperationRequest::new(op, pending, attachments));
    }

    batch
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    fn key() -> SecretString {
        SecretString::from("s3cr3t-key".to_owned())
    }

    fn data_json(payload: &Payload) -> Value {
        serde_json::from_str(payload.data()).unwrap()
    }

    #[test]
    fn empty_path_sends_empty_list() {
        let payload = build(Op::ShowConfig, &ConfigPath::Empty, &Attachments::none(), &key());
        assert_eq!(data_json(&payload), json!({"op": "showConfig", "path": []}));
    }

    #[test]
    fn flat_path_is_single_request_unchanged() {
        let path = ConfigPath::location(["interfaces", "dummy", "dum1", "address", "10.0.0.1/24"]);
        let payload = build(Op::Set, &path, &Attachments::none(), &key());
        assert_eq!(
            data_json(&payload),
            json!({"op": "set", "path": ["interfaces", "dummy", "dum1", "address", "10.0.0.1/24"]})
        );
    }

    #[test]
    fn single_segment_stays_a_list() {
        let payload = build(Op::Reboot, &ConfigPath::now(), &Attachments::none(), &key());
        assert_eq!(data_json(&payload), json!({"op": "reboot", "path": ["now"]}));
    }

    #[test]
    fn single_nested_location_is_unwrapped() {
        let path = ConfigPath::Batch(vec![vec!["a", "b"].into()]);
        let ops = operations(Op::Set, &path, &Attachments::none());
        assert!(!ops.is_batch());
        assert_eq!(ops.requests()[0].path, vec!["a", "b"]);
    }

    #[test]
    fn flat_batch_elements_are_single_request() {
        let path = ConfigPath::Batch(vec!["a".into(), "b".into()]);
        let ops = operations(Op::Delete, &path, &Attachments::none());
        let expected = OperationRequest::new(
            Op::Delete,
            vec!["a".into(), "b".into()],
            &Attachments::none(),
        );
        assert_eq!(ops, OperationData::Single(expected));
    }

    #[test]
    fn mixed_input_splits_at_locations() {
        let path = ConfigPath::Batch(vec![
            "a".into(),
            vec!["b", "c"].into(),
            "d".into(),
            vec!["e"].into(),
        ]);
        let payload = build(Op::Set, &path, &Attachments::none(), &key());
        assert_eq!(
            data_json(&payload),
            json!([
                {"op": "set", "path": ["a"]},
                {"op": "set", "path": ["b", "c"]},
                {"op": "set", "path": ["d"]},
                {"op": "set", "path": ["e"]},
            ])
        );
    }

    #[test]
    fn consecutive_locations_each_become_a_request() {
        let path = ConfigPath::batch([
            vec!["interfaces", "dummy", "dum1", "address", "10.0.0.1/24"],
            vec!["interfaces", "dummy", "dum1", "description", "lab"],
        ]);
        let ops = operations(Op::Set, &path, &Attachments::none());
        assert_eq!(ops.len(), 2);
        assert_eq!(ops.requests()[1].path.last().map(String::as_str), Some("lab"));
    }

    #[test]
    fn leading_segments_flush_before_location() {
        let path = ConfigPath::Batch(vec!["x".into(), "y".into(), vec!["z"].into()]);
        let ops = operations(Op::Delete, &path, &Attachments::none());
        let paths: Vec<_> = ops.requests().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![vec!["x", "y"], vec!["z"]]);
    }

    #[test]
    fn empty_nested_location_passes_through() {
        let path = ConfigPath::Batch(vec!["a".into(), PathElement::Location(Vec::new()), "b".into()]);
        let ops = operations(Op::Set, &path, &Attachments::none());
        let paths: Vec<_> = ops.requests().iter().map(|r| r.path.len()).collect();
        assert_eq!(paths, vec![1, 0, 1]);
    }

    #[test]
    fn attachments_ride_inside_data() {
        let payload = build(
            Op::Save,
            &ConfigPath::Empty,
            &Attachments::file("/config/test300.config"),
            &key(),
        );
        assert_eq!(
            data_json(&payload),
            json!({"op": "save", "path": [], "file": "/config/test300.config"})
        );

        let payload = build(
            Op::Add,
            &ConfigPath::Empty,
            &Attachments::url("https://example.com/vyos.iso"),
            &key(),
        );
        assert_eq!(data_json(&payload)["url"], "https://example.com/vyos.iso");

        let payload = build(Op::Delete, &ConfigPath::Empty, &Attachments::name("1.4-rolling"), &key());
        assert_eq!(data_json(&payload)["name"], "1.4-rolling");
    }

    #[test]
    fn attachments_copied_to_every_batch_entry() {
        let path = ConfigPath::batch([vec!["a"], vec!["b"]]);
        let ops = operations(Op::Load, &path, &Attachments::file("/config/x"));
        assert!(ops.requests().iter().all(|r| r.file.as_deref() == Some("/config/x")));
    }

    #[test]
    fn form_carries_key_but_echo_does_not() {
        let payload = build(Op::Show, &ConfigPath::location(["version"]), &Attachments::none(), &key());
        let form = payload.form();
        assert_eq!(form[1], ("key", "s3cr3t-key"));

        let echo = payload.redact();
        let rendered = serde_json::to_string(&echo).unwrap();
        assert!(!rendered.contains("s3cr3t-key"));
        assert!(!rendered.contains("\"key\""));
        assert_eq!(echo.operations().unwrap().requests()[0].op, Op::Show);
    }

    #[test]
    fn payload_debug_hides_key() {
        let payload = build(Op::Show, &ConfigPath::Empty, &Attachments::none(), &key());
        assert!(!format!("{payload:?}").contains("s3cr3t-key"));
    }

    #[test]
    fn builder_is_deterministic() {
        let path = ConfigPath::Batch(vec!["a".into(), vec!["b"].into()]);
        let first = build(Op::Set, &path, &Attachments::none(), &key());
        let second = build(Op::Set, &path, &Attachments::none(), &key());
        assert_eq!(first.data(), second.data());
    }
}
