//! Media types the API reads and writes.

use erudio_core::{ErudioError, ErudioResult};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderMap,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const APPLICATION_YAML: &str = "application/x-yaml";

/// A body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Json,
    Xml,
    Yaml,
}

impl MediaType {
    /// The `Content-Type` written for this format.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => APPLICATION_JSON,
            Self::Xml => APPLICATION_XML,
            Self::Yaml => APPLICATION_YAML,
        }
    }

    /// Matches one media range; wildcards resolve to JSON.
    fn parse(range: &str) -> Option<Self> {
        let essence = range.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/json" | "application/hal+json" | "application/*" | "*/*" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            "application/x-yaml" | "application/yaml" | "text/yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Picks the response format from `Accept`, honouring `q` weights.
    ///
    /// A missing or empty header means JSON.
    pub fn from_accept(headers: &HeaderMap) -> ErudioResult<Self> {
        let Some(accept) = headers.get(ACCEPT).and_then(|h| h.to_str().ok()) else {
            return Ok(Self::Json);
        };
        if accept.trim().is_empty() {
            return Ok(Self::Json);
        }

        let mut best: Option<(Self, f32)> = None;
        for range in accept.split(',') {
            let Some(media) = Self::parse(range) else {
                continue;
            };
            let weight = quality(range);
            if weight > 0.0 && best.map_or(true, |(_, w)| weight > w) {
                best = Some((media, weight));
            }
        }

        best.map(|(media, _)| media)
            .ok_or_else(|| ErudioError::NotAcceptable(format!("cannot produce any of '{accept}'")))
    }

    /// Reads the request body format from `Content-Type`; missing means JSON.
    pub fn from_content_type(headers: &HeaderMap) -> ErudioResult<Self> {
        match headers.get(CONTENT_TYPE).and_then(|h| h.to_str().ok()) {
            None => Ok(Self::Json),
            Some(value) => Self::parse(value)
                .ok_or_else(|| ErudioError::UnsupportedMediaType(format!("cannot read '{value}'"))),
        }
    }

    /// Decodes a request body. An empty body or a JSON/YAML `null` is `None`.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> ErudioResult<Option<T>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| malformed(self, e)),
            Self::Yaml => serde_yaml::from_slice(bytes).map_err(|e| malformed(self, e)),
            Self::Xml => {
                let text = std::str::from_utf8(bytes).map_err(|e| malformed(self, e))?;
                quick_xml::de::from_str(text).map(Some).map_err(|e| malformed(self, e))
            }
        }
    }

    /// Encodes a value in this format.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> ErudioResult<String> {
        match self {
            Self::Json => Ok(serde_json::to_string(value)?),
            Self::Xml => quick_xml::se::to_string(value)
                .map_err(|e| ErudioError::Serialization(format!("XML: {e}"))),
            Self::Yaml => serde_yaml::to_string(value)
                .map_err(|e| ErudioError::Serialization(format!("YAML: {e}"))),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Yaml => "YAML",
        })
    }
}

fn malformed(media: MediaType, error: impl fmt::Display) -> ErudioError {
    ErudioError::validation(format!("Malformed {media} body: {error}"))
}

fn quality(range: &str) -> f32 {
    range
        .split(';')
        .skip(1)
        .filter_map(|param| param.trim().strip_prefix("q="))
        .find_map(|q| q.trim().parse::<f32>().ok())
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    fn headers(name: axum::http::HeaderName, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Named {
        first_name: String,
    }

    #[test]
    fn test_accept_defaults_to_json() {
        assert_eq!(MediaType::from_accept(&HeaderMap::new()).unwrap(), MediaType::Json);
        assert_eq!(MediaType::from_accept(&headers(ACCEPT, "*/*")).unwrap(), MediaType::Json);
    }

    #[test]
    fn test_accept_picks_supported_type() {
        assert_eq!(MediaType::from_accept(&headers(ACCEPT, "application/xml")).unwrap(), MediaType::Xml);
        assert_eq!(
            MediaType::from_accept(&headers(ACCEPT, "text/html, application/x-yaml")).unwrap(),
            MediaType::Yaml
        );
    }

    #[test]
    fn test_accept_honours_quality() {
        let accept = headers(ACCEPT, "application/json;q=0.5, application/xml;q=0.9");
        assert_eq!(MediaType::from_accept(&accept).unwrap(), MediaType::Xml);
    }

    #[test]
    fn test_accept_unsupported() {
        let err = MediaType::from_accept(&headers(ACCEPT, "text/csv")).unwrap_err();
        assert_eq!(err.status_code(), 406);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(
            MediaType::from_content_type(&headers(CONTENT_TYPE, "application/json; charset=utf-8")).unwrap(),
            MediaType::Json
        );
        let err = MediaType::from_content_type(&headers(CONTENT_TYPE, "text/plain")).unwrap_err();
        assert_eq!(err.status_code(), 415);
    }

    #[test]
    fn test_decode_each_format() {
        let json: Option<Named> = MediaType::Json.decode(br#"{"firstName":"Nelson"}"#).unwrap();
        let yaml: Option<Named> = MediaType::Yaml.decode(b"firstName: Nelson\n").unwrap();
        let xml: Option<Named> = MediaType::Xml
            .decode(b"<PersonVO><firstName>Nelson</firstName></PersonVO>")
            .unwrap();
        let expected = Some(Named {
            first_name: "Nelson".to_string(),
        });
        assert_eq!(json, expected);
        assert_eq!(yaml, expected);
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_decode_empty_and_null() {
        assert_eq!(MediaType::Json.decode::<Named>(b"  ").unwrap(), None);
        assert_eq!(MediaType::Json.decode::<Named>(b"null").unwrap(), None);
    }

    #[test]
    fn test_decode_malformed_is_bad_request() {
        let err = MediaType::Json.decode::<Named>(b"{").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
