mod config;
mod envelope;
mod error;
mod headers;
mod responder;
mod sink;

pub use config::{ResponseConfig, CORS_HEADERS_VAR, FIELD_NAMING_VAR};
pub use envelope::{DataResponse, FieldNaming, MessageResponse};
pub use error::ResponseError;
pub use headers::{CorsHeaders, HeaderOp, HeaderRule};
pub use responder::{Responder, MARSHAL_FAILURE};
pub use sink::{Recorder, ResponseSink};

use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;

pub fn ok() -> Response<Body> {
    Responder::default().response(|r, res| r.ok(res))
}

pub fn bad_request(message: &str) -> Response<Body> {
    Responder::default().response(|r, res| r.bad_request(res, message))
}

pub fn created(message: &str) -> Response<Body> {
    Responder::default().response(|r, res| r.created(res, message))
}

pub fn accepted(message: &str) -> Response<Body> {
    Responder::default().response(|r, res| r.accepted(res, message))
}

pub fn no_content() -> Response<Body> {
    Responder::default().response(|r, res| r.no_content(res))
}

pub fn not_found(message: &str) -> Response<Body> {
    Responder::default().response(|r, res| r.not_found(res, message))
}

pub fn server_error(message: &str) -> Response<Body> {
    Responder::default().response(|r, res| r.server_error(res, message))
}

pub fn error(message: &str, status: StatusCode) -> Response<Body> {
    Responder::default().response(|r, res| r.error(res, message, status))
}

pub fn data<T>(body: &T, status: StatusCode) -> Response<Body>
where
    T: Serialize + ?Sized,
{
    Responder::default().response(|r, res| r.data(res, body, status))
}
