use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;
use tracing::error;

use crate::config::ResponseConfig;
use crate::envelope::{DataResponse, MessageResponse};
use crate::error::ResponseError;
use crate::sink::ResponseSink;

pub const MARSHAL_FAILURE: &str = "Failed to marshal response";

// 1xx, 204 and 304 responses never carry a body.
fn body_allowed(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}

/// Writes JSON envelopes and the standard API headers into a response sink.
#[derive(Debug, Clone, Default)]
pub struct Responder {
    config: ResponseConfig,
}

impl Responder {
    pub fn new(config: ResponseConfig) -> Self {
        Responder { config }
    }

    pub fn from_env() -> Result<Self, ResponseError> {
        Ok(Responder::new(ResponseConfig::from_env()?))
    }

    pub fn config(&self) -> &ResponseConfig {
        &self.config
    }

    /// Builds a fresh `Response` with the standard API headers applied,
    /// then lets `write` fill in status and body.
    pub fn response<F>(&self, write: F) -> Response<Body>
    where
        F: FnOnce(&Self, &mut Response<Body>),
    {
        let mut response = Response::new(Body::Empty);
        self.set_standard_api_headers(&mut response);
        write(self, &mut response);
        response
    }

    pub fn write_message<S>(&self, sink: &mut S, message: &str, status: StatusCode)
    where
        S: ResponseSink + ?Sized,
    {
        sink.write_status(status);
        if !body_allowed(status) {
            return;
        }
        match MessageResponse::new(self.config.naming, status, message).to_bytes() {
            Ok(body) => sink.write_body(&body),
            Err(err) => error!(%err, %status, "failed to encode message response"),
        }
    }

    pub fn error<S>(&self, sink: &mut S, message: &str, status: StatusCode)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, message, status);
    }

    pub fn ok<S>(&self, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, "OK", StatusCode::OK);
    }

    /// Replies with 400.
    pub fn bad_request<S>(&self, sink: &mut S, message: &str)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, message, StatusCode::BAD_REQUEST);
    }

    /// Replies with 201.
    pub fn created<S>(&self, sink: &mut S, message: &str)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, message, StatusCode::CREATED);
    }

    /// Replies with 202.
    pub fn accepted<S>(&self, sink: &mut S, message: &str)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, message, StatusCode::ACCEPTED);
    }

    /// Replies with 204. The reason phrase is the message, though no body
    /// reaches the wire for this status.
    pub fn no_content<S>(&self, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        let status = StatusCode::NO_CONTENT;
        self.write_message(sink, status.canonical_reason().unwrap_or("No Content"), status);
    }

    /// Replies with 404.
    pub fn not_found<S>(&self, sink: &mut S, message: &str)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, message, StatusCode::NOT_FOUND);
    }

    /// Replies with 500.
    pub fn server_error<S>(&self, sink: &mut S, message: &str)
    where
        S: ResponseSink + ?Sized,
    {
        self.write_message(sink, message, StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Replies with `status` and `data` wrapped in a data envelope. If the
    /// envelope cannot be serialized a 500 message goes out instead.
    pub fn data<S, T>(&self, sink: &mut S, data: &T, status: StatusCode)
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        if let Err(err) = self.try_data(sink, data, status) {
            error!(%err, %status, "{}", MARSHAL_FAILURE);
            self.error(sink, MARSHAL_FAILURE, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    /// Like `data`, but hands the serialization error back. Nothing is
    /// written to the sink on error.
    pub fn try_data<S, T>(&self, sink: &mut S, data: &T, status: StatusCode) -> Result<(), ResponseError>
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        let envelope = DataResponse::new(self.config.naming, status, data);
        self.write_envelope(sink, &envelope)
    }

    /// Writes a prepared envelope, e.g. one carrying `errors`.
    pub fn envelope<S, T>(&self, sink: &mut S, envelope: &DataResponse<'_, T>)
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        if let Err(err) = self.write_envelope(sink, envelope) {
            error!(%err, status = %envelope.status(), "{}", MARSHAL_FAILURE);
            self.error(sink, MARSHAL_FAILURE, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    fn write_envelope<S, T>(&self, sink: &mut S, envelope: &DataResponse<'_, T>) -> Result<(), ResponseError>
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        let status = envelope.status();
        let body = envelope.to_bytes()?;
        sink.write_status(status);
        if body_allowed(status) {
            sink.write_body(&body);
        }
        Ok(())
    }

    pub fn set_standard_api_headers<S>(&self, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        self.config.cors.apply(sink);
    }
}
