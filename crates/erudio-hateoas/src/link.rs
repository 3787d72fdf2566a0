//! Links and the builder that produces their targets.

use erudio_core::{ErudioError, ErudioResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use url::Url;

/// Standard relation names.
pub mod rel {
    pub const SELF: &str = "self";
    pub const FIRST: &str = "first";
    pub const PREV: &str = "prev";
    pub const NEXT: &str = "next";
    pub const LAST: &str = "last";
}

/// A named relation to a target URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// Creates a `self` link.
    #[must_use]
    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new(rel::SELF, href)
    }

    #[must_use]
    pub fn is_self(&self) -> bool {
        self.rel == rel::SELF
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>; rel=\"{}\"", self.href, self.rel)
    }
}

/// Builds absolute link targets from the public origin of the API.
///
/// The origin is validated once; after that every operation is a pure
/// string concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    origin: String,
}

impl LinkBuilder {
    /// Creates a builder for an absolute origin such as `http://localhost:8888`.
    pub fn new(origin: &str) -> ErudioResult<Self> {
        let parsed = Url::parse(origin)
            .map_err(|e| ErudioError::Configuration(format!("invalid link origin '{origin}': {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ErudioError::Configuration(format!(
                "link origin '{origin}' cannot carry a path"
            )));
        }
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    /// Joins path segments onto the origin: `resource(&["api", "person", "v1"])`.
    #[must_use]
    pub fn resource(&self, segments: &[&str]) -> String {
        let mut href = self.origin.clone();
        for segment in segments {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            href.push('/');
            href.push_str(segment);
        }
        href
    }

    /// Appends an identifier segment to a collection URI.
    #[must_use]
    pub fn item(collection: &str, id: i64) -> String {
        format!("{}/{id}", collection.trim_end_matches('/'))
    }

    /// Appends ordered query parameters to a URI.
    ///
    /// Values are percent-encoded except for `,`, which stays literal so
    /// sort parameters read as `sort=firstName,asc`.
    #[must_use]
    pub fn with_query(href: &str, params: &[(&str, String)]) -> String {
        let mut out = href.to_string();
        for (i, (key, value)) in params.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            encode_into(&mut out, key);
            out.push('=');
            encode_into(&mut out, value);
        }
        out
    }
}

fn encode_into(out: &mut String, raw: &str) {
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b',') {
            out.push(char::from(byte));
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "%{byte:02X}");
        }
    }
}
