use lambda_http::http::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Failed to serialize response envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid value `{value}` for `{key}`")]
    InvalidSetting { key: &'static str, value: String },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}
