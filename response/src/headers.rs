use std::borrow::Cow;
use std::str::FromStr;

use lambda_http::http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use tracing::debug;

use crate::config::CORS_HEADERS_VAR;
use crate::error::ResponseError;
use crate::sink::ResponseSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderOp {
    /// Replaces every existing value of the header.
    Set,
    /// Appends another value under the same name.
    Add,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    pub op: HeaderOp,
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl HeaderRule {
    pub fn set(name: HeaderName, value: HeaderValue) -> Self {
        HeaderRule {
            op: HeaderOp::Set,
            name,
            value,
        }
    }

    pub fn add(name: HeaderName, value: HeaderValue) -> Self {
        HeaderRule {
            op: HeaderOp::Add,
            name,
            value,
        }
    }

    pub fn parse(op: HeaderOp, name: &str, value: &str) -> Result<Self, ResponseError> {
        Ok(HeaderRule {
            op,
            name: HeaderName::from_bytes(name.as_bytes())?,
            value: HeaderValue::from_str(value)?,
        })
    }

    pub fn apply<S>(&self, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        match self.op {
            HeaderOp::Set => sink.set_header(self.name.clone(), self.value.clone()),
            HeaderOp::Add => sink.add_header(self.name.clone(), self.value.clone()),
        }
    }
}

// Same order and set/add mix as the headers older clients were built against,
// including the repeated Content-Type entry.
const LEGACY: [(HeaderOp, HeaderName, &str); 10] = [
    (HeaderOp::Set, ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (HeaderOp::Set, ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (HeaderOp::Add, ACCESS_CONTROL_ALLOW_HEADERS, "Content-Length"),
    (HeaderOp::Add, ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (HeaderOp::Add, ACCESS_CONTROL_ALLOW_HEADERS, "Accept-Encoding"),
    (HeaderOp::Add, ACCESS_CONTROL_ALLOW_HEADERS, "X-CSRF-Token"),
    (HeaderOp::Set, ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (HeaderOp::Set, CONTENT_TYPE, "application/json"),
    (HeaderOp::Add, ACCESS_CONTROL_ALLOW_METHODS, "POST, GET, OPTIONS"),
    (HeaderOp::Add, ACCESS_CONTROL_ALLOW_METHODS, "PUT, DELETE"),
];

const DEDUPLICATED: [(HeaderOp, HeaderName, &str); 5] = [
    (HeaderOp::Set, ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        HeaderOp::Set,
        ACCESS_CONTROL_ALLOW_HEADERS,
        "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token",
    ),
    (HeaderOp::Set, ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (HeaderOp::Set, CONTENT_TYPE, "application/json"),
    (
        HeaderOp::Set,
        ACCESS_CONTROL_ALLOW_METHODS,
        "POST, GET, OPTIONS, PUT, DELETE",
    ),
];

fn table<const N: usize>(entries: [(HeaderOp, HeaderName, &'static str); N]) -> Vec<HeaderRule> {
    entries
        .into_iter()
        .map(|(op, name, value)| HeaderRule {
            op,
            name,
            value: HeaderValue::from_static(value),
        })
        .collect()
}

/// The header set written by `set_standard_api_headers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsHeaders {
    /// One value per header.
    #[default]
    Deduplicated,
    /// Multi-valued `Access-Control-Allow-Headers` / `-Methods`, duplicates included.
    Legacy,
    Custom(Vec<HeaderRule>),
}

impl CorsHeaders {
    pub fn rules(&self) -> Cow<'_, [HeaderRule]> {
        match self {
            CorsHeaders::Deduplicated => Cow::Owned(table(DEDUPLICATED)),
            CorsHeaders::Legacy => Cow::Owned(table(LEGACY)),
            CorsHeaders::Custom(rules) => Cow::Borrowed(rules),
        }
    }

    pub fn apply<S>(&self, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        let rules = self.rules();
        debug!(table = self.name(), rules = rules.len(), "applying standard API headers");
        for rule in rules.iter() {
            rule.apply(sink);
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CorsHeaders::Deduplicated => "deduplicated",
            CorsHeaders::Legacy => "legacy",
            CorsHeaders::Custom(_) => "custom",
        }
    }
}

impl FromStr for CorsHeaders {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("deduplicated") {
            Ok(CorsHeaders::Deduplicated)
        } else if s.eq_ignore_ascii_case("legacy") {
            Ok(CorsHeaders::Legacy)
        } else {
            Err(ResponseError::InvalidSetting {
                key: CORS_HEADERS_VAR,
                value: s.to_string(),
            })
        }
    }
}
