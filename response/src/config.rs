use std::env;

use crate::envelope::FieldNaming;
use crate::error::ResponseError;
use crate::headers::CorsHeaders;

pub const FIELD_NAMING_VAR: &str = "RESPONSE_FIELD_NAMING";
pub const CORS_HEADERS_VAR: &str = "RESPONSE_CORS_HEADERS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseConfig {
    pub naming: FieldNaming,
    pub cors: CorsHeaders,
}

impl ResponseConfig {
    /// `code` / `status` field names with the duplicated header table, the
    /// exact output of the older helpers.
    pub fn legacy_short() -> Self {
        ResponseConfig {
            naming: FieldNaming::Short,
            cors: CorsHeaders::Legacy,
        }
    }

    /// `statusCode` field names with the duplicated header table.
    pub fn legacy_status_code() -> Self {
        ResponseConfig {
            naming: FieldNaming::StatusCode,
            cors: CorsHeaders::Legacy,
        }
    }

    /// Reads `RESPONSE_FIELD_NAMING` and `RESPONSE_CORS_HEADERS`; unset or
    /// blank variables keep the defaults.
    pub fn from_env() -> Result<Self, ResponseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ResponseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = ResponseConfig::default();
        if let Some(naming) = setting(FIELD_NAMING_VAR) {
            config.naming = naming.parse()?;
        }
        if let Some(cors) = setting(CORS_HEADERS_VAR) {
            config.cors = cors.parse()?;
        }
        Ok(config)
    }
}
