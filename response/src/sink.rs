use std::mem;

use lambda_http::http::header::{HeaderMap, HeaderName, HeaderValue};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::Value;
use tracing::warn;

/// An in-flight HTTP response that helpers write into.
pub trait ResponseSink {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    fn add_header(&mut self, name: HeaderName, value: HeaderValue);

    fn write_status(&mut self, status: StatusCode);

    fn write_body(&mut self, bytes: &[u8]);
}

fn into_body(bytes: Vec<u8>) -> Body {
    match String::from_utf8(bytes) {
        Ok(text) => Body::Text(text),
        Err(err) => Body::Binary(err.into_bytes()),
    }
}

/// Status writes overwrite, body writes append.
impl ResponseSink for Response<Body> {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().append(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, bytes: &[u8]) {
        let body = match mem::take(self.body_mut()) {
            Body::Empty => into_body(bytes.to_vec()),
            Body::Text(text) => {
                let mut buffer = text.into_bytes();
                buffer.extend_from_slice(bytes);
                into_body(buffer)
            }
            Body::Binary(mut buffer) => {
                buffer.extend_from_slice(bytes);
                Body::Binary(buffer)
            }
        };
        *self.body_mut() = body;
    }
}

/// In-memory sink. Only the first status write counts; later ones are
/// recorded as superfluous and ignored.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    status: Option<StatusCode>,
    status_writes: usize,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// The committed status, `200 OK` if nothing was written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn status_writes(&self) -> usize {
        self.status_writes
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.body)
    }

    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(into_body(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for Recorder {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status_writes += 1;
        match self.status {
            Some(committed) => {
                warn!(%committed, ignored = %status, "superfluous status write");
            }
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::header::CONTENT_TYPE;

    fn text(response: &Response<Body>) -> &str {
        match response.body() {
            Body::Text(text) => text,
            other => panic!("expected a text body, got {:?}", other),
        }
    }

    #[test]
    fn response_appends_body_writes() {
        let mut response = Response::new(Body::Empty);
        response.write_body(b"{\"a\":");
        response.write_body(b"1}");
        assert_eq!(text(&response), "{\"a\":1}");
    }

    #[test]
    fn response_falls_back_to_binary_for_invalid_utf8() {
        let mut response = Response::new(Body::Empty);
        response.write_body(&[0xff, 0xfe]);
        assert!(matches!(response.body(), Body::Binary(bytes) if bytes == &vec![0xff, 0xfe]));
    }

    #[test]
    fn response_headers_follow_set_and_add() {
        let mut response = Response::new(Body::Empty);
        response.add_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        response.add_header(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        assert_eq!(response.headers().get_all(CONTENT_TYPE).iter().count(), 2);

        response.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(response.headers().get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn recorder_keeps_first_status() {
        let mut recorder = Recorder::new();
        recorder.write_status(StatusCode::CREATED);
        recorder.write_status(StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(recorder.status(), StatusCode::CREATED);
        assert_eq!(recorder.status_writes(), 2);
    }

    #[test]
    fn recorder_converts_into_response() {
        let mut recorder = Recorder::new();
        recorder.write_status(StatusCode::NOT_FOUND);
        recorder.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        recorder.write_body(b"{}");

        let response = recorder.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(text(&response), "{}");
    }
}
