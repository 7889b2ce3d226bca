//! Option structures for operations and the decoded API response.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Decoded JSON object returned by a successful call.
///
/// The object is kept exactly as the service sent it; use [`ApiResponse::get`]
/// for ad-hoc access or [`ApiResponse::parse`] to deserialize into your own type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    /// The `status` field, if it is a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// The `message` field, if it is a string.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Whether `status` is `ok`, compared case-insensitively.
    pub fn is_ok(&self) -> bool {
        self.status()
            .is_some_and(|status| status.eq_ignore_ascii_case("ok"))
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the decoded object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the decoded object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize the whole object into `T`.
    ///
    /// # Examples
    /// ```
    /// # use samotpravil_client::ApiResponse;
    /// #[derive(serde::Deserialize)]
    /// struct Sent {
    ///     issue_id: u64,
    /// }
    ///
    /// let response: ApiResponse =
    ///     serde_json::from_str(r#"{"status":"ok","issue_id":7}"#).unwrap();
    /// let sent: Sent = response.parse().unwrap();
    /// assert_eq!(sent.issue_id, 7);
    /// ```
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(Error::Decode)
    }
}

impl From<ApiResponse> for Value {
    fn from(response: ApiResponse) -> Self {
        Value::Object(response.0)
    }
}

/// Optional fields for [`Client::send_email`](crate::Client::send_email).
///
/// Fields left as `None` are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendEmailOptions {
    /// Display name; the sender becomes `"{name_from} <{email_from}>"`.
    #[serde(skip)]
    pub name_from: Option<String>,
    /// Template parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_track_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_click: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_stop_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_local_stop_list: Option<bool>,
    /// Domain used for the DKIM signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_for_dkim: Option<String>,
    /// Extra message headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl SendEmailOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the sender as `"{name} <email_from>"`.
    pub fn name_from(mut self, name: impl Into<String>) -> Self {
        self.name_from = Some(name.into());
        self
    }

    /// Set template parameters.
    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a caller-chosen tracking id.
    pub fn x_track_id(mut self, id: impl Into<String>) -> Self {
        self.x_track_id = Some(id.into());
        self
    }

    /// Enable or disable open tracking.
    pub fn track_open(mut self, value: bool) -> Self {
        self.track_open = Some(value);
        self
    }

    /// Enable or disable click tracking.
    pub fn track_click(mut self, value: bool) -> Self {
        self.track_click = Some(value);
        self
    }

    /// Domain used in tracking links.
    pub fn track_domain(mut self, domain: impl Into<String>) -> Self {
        self.track_domain = Some(domain.into());
        self
    }

    /// Check the shared stop-list before sending.
    pub fn check_stop_list(mut self, value: bool) -> Self {
        self.check_stop_list = Some(value);
        self
    }

    /// Check the account's own stop-list before sending.
    pub fn check_local_stop_list(mut self, value: bool) -> Self {
        self.check_local_stop_list = Some(value);
        self
    }

    /// Sign with the DKIM key of this domain.
    pub fn domain_for_dkim(mut self, domain: impl Into<String>) -> Self {
        self.domain_for_dkim = Some(domain.into());
        self
    }

    /// Add one extra header; repeated calls accumulate.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Filter for [`Client::get_status`](crate::Client::get_status).
///
/// Only the keys that are set go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_track_id: Option<String>,
}

impl StatusQuery {
    /// Status of mail sent to `email`.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Status of one send request.
    pub fn by_issue_id(issue_id: u64) -> Self {
        Self {
            issue_id: Some(issue_id),
            ..Self::default()
        }
    }

    /// Status of mail tagged with `x_track_id`.
    pub fn by_x_track_id(x_track_id: impl Into<String>) -> Self {
        Self {
            x_track_id: Some(x_track_id.into()),
            ..Self::default()
        }
    }
}

/// Paging for the date-range reports.
///
/// Unset values fall back to [`Pagination::DEFAULT_LIMIT`] and a cursor of `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub cursor_next: Option<u64>,
}

impl Pagination {
    /// Page size used when `limit` is unset.
    pub const DEFAULT_LIMIT: u32 = 100;

    /// Explicit page size and cursor.
    pub fn new(limit: u32, cursor_next: u64) -> Self {
        Self {
            limit: Some(limit),
            cursor_next: Some(cursor_next),
        }
    }

    pub(crate) fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub(crate) fn cursor_or_default(&self) -> u64 {
        self.cursor_next.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ApiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn status_is_case_insensitive() {
        assert!(response(json!({"status": "OK"})).is_ok());
        assert!(response(json!({"status": "ok"})).is_ok());
        assert!(response(json!({"status": "Ok"})).is_ok());
        assert!(!response(json!({"status": "error"})).is_ok());
        assert!(!response(json!({"status": 1})).is_ok());
        assert!(!response(json!({"id": 42})).is_ok());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_value::<ApiResponse>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<ApiResponse>(json!("ok")).is_err());
    }

    #[test]
    fn converts_back_unchanged() {
        let body = json!({"status": "OK", "id": 42, "nested": {"a": [1]}});
        assert_eq!(Value::from(response(body.clone())), body);
    }

    #[test]
    fn parse_failure_is_decode_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            missing: String,
        }
        let err = response(json!({"status": "ok"}))
            .parse::<Needs>()
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn unset_options_serialize_to_nothing() {
        let value = serde_json::to_value(SendEmailOptions::new().name_from("Jane")).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn headers_accumulate() {
        let options = SendEmailOptions::new()
            .header("X-A", "1")
            .header("X-B", "2");
        assert_eq!(
            serde_json::to_value(options).unwrap(),
            json!({"headers": {"X-A": "1", "X-B": "2"}})
        );
    }

    #[test]
    fn pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page.limit_or_default(), 100);
        assert_eq!(page.cursor_or_default(), 0);

        let page = Pagination::new(5, 9);
        assert_eq!(page.limit_or_default(), 5);
        assert_eq!(page.cursor_or_default(), 9);
    }
}
