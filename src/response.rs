//! Decoded ip-api response record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::IpApiError;

/// Outcome reported by the API inside the response body.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The lookup succeeded and the location fields are populated.
    Success,
    /// The lookup failed; `message` says why.
    Fail,
}

/// A single geolocation answer.
///
/// Every attribute is optional: the API only sends what the field selector
/// asked for, and a `fail` answer carries little beyond `status`, `message`
/// and `query`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// IP address the answer is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Failure reason, e.g. `"reserved range"` or `"invalid query"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Region or state short code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// IANA time zone name, e.g. `"Europe/Berlin"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// UTC offset of `timezone` in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// AS number and organization, e.g. `"AS15169 Google LLC"`.
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_info: Option<String>,
    #[serde(
        rename = "asname",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub as_name: Option<String>,
    /// Reverse DNS of the IP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting: Option<bool>,
}

impl Response {
    /// Decodes a response body.
    ///
    /// The body must be a JSON object; a sequence such as `[]` is a
    /// decoding error even though the derived `Deserialize` accepts one.
    pub fn from_json(body: &[u8]) -> Result<Self, IpApiError> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    /// Returns true if the API reported `"status": "success"`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(Status::Success)
    }

    /// The failure message, only when the API reported `"status": "fail"`.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self.status {
            Some(Status::Fail) => self.message.as_deref(),
            _ => None,
        }
    }

    /// `(lat, lon)` when both were returned.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::float_cmp)]
    #[test]
    fn test_decode_success_body() {
        let body = r#"{
            "status": "success",
            "country": "United States",
            "countryCode": "US",
            "region": "VA",
            "regionName": "Virginia",
            "city": "Ashburn",
            "zip": "20149",
            "lat": 39.03,
            "lon": -77.5,
            "timezone": "America/New_York",
            "offset": -14400,
            "isp": "Google LLC",
            "org": "Google Public DNS",
            "as": "AS15169 Google LLC",
            "asname": "GOOGLE",
            "mobile": false,
            "proxy": false,
            "hosting": true,
            "query": "8.8.8.8"
        }"#;

        let response: Response = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.failure_reason(), None);
        assert_eq!(response.country_code.as_deref(), Some("US"));
        assert_eq!(response.region_name.as_deref(), Some("Virginia"));
        assert_eq!(response.as_info.as_deref(), Some("AS15169 Google LLC"));
        assert_eq!(response.as_name.as_deref(), Some("GOOGLE"));
        assert_eq!(response.offset, Some(-14400));
        assert_eq!(response.hosting, Some(true));
        assert_eq!(response.coordinates(), Some((39.03, -77.5)));
        assert!(response.message.is_none());
        assert!(response.district.is_none());
    }

    #[test]
    fn test_decode_fail_body() {
        let body = r#"{"status":"fail","message":"reserved range","query":"127.0.0.1"}"#;
        let response: Response = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, Some(Status::Fail));
        assert!(!response.is_success());
        assert_eq!(response.failure_reason(), Some("reserved range"));
        assert_eq!(response.query.as_deref(), Some("127.0.0.1"));
        assert!(response.coordinates().is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let response: Response = serde_json::from_str(r#"{"status":"success","extra":1}"#).unwrap();
        assert!(response.is_success());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        for body in [
            r#"{"status":"maybe"}"#,
            r#"{"lat":"north"}"#,
            "[]",
            r#"["success"]"#,
            "null",
            "42",
            "",
        ] {
            assert!(
                matches!(Response::from_json(body.as_bytes()), Err(IpApiError::Decoding(_))),
                "expected Decoding error for {body:?}"
            );
        }
        assert!(Response::from_json(b"{}").unwrap() == Response::default());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let response = Response {
            status: Some(Status::Fail),
            message: Some("invalid query".to_owned()),
            as_info: Some("AS1".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"status":"fail","message":"invalid query","as":"AS1"}"#
        );
    }
}
