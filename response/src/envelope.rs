use std::io;
use std::str::FromStr;

use lambda_http::http::StatusCode;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::Formatter;

use crate::config::FIELD_NAMING_VAR;
use crate::error::ResponseError;

/// Which key carries the HTTP status in an envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldNaming {
    /// `code` on message envelopes, `status` on data envelopes.
    Short,
    /// `statusCode` on both.
    #[default]
    StatusCode,
}

impl FieldNaming {
    pub fn message_field(self) -> &'static str {
        match self {
            FieldNaming::Short => "code",
            FieldNaming::StatusCode => "statusCode",
        }
    }

    pub fn data_field(self) -> &'static str {
        match self {
            FieldNaming::Short => "status",
            FieldNaming::StatusCode => "statusCode",
        }
    }
}

impl FromStr for FieldNaming {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "code" | "short" => Ok(FieldNaming::Short),
            "statusCode" | "status_code" => Ok(FieldNaming::StatusCode),
            other => Err(ResponseError::InvalidSetting {
                key: FIELD_NAMING_VAR,
                value: other.to_string(),
            }),
        }
    }
}

/// `{"statusCode": 404, "message": "missing"}`
#[derive(Debug, Clone, Copy)]
pub struct MessageResponse<'a> {
    naming: FieldNaming,
    status: StatusCode,
    message: &'a str,
}

impl<'a> MessageResponse<'a> {
    pub fn new(naming: FieldNaming, status: StatusCode, message: &'a str) -> Self {
        MessageResponse {
            naming,
            status,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Serializes with `": "` and `", "` separators so the body keeps the
    /// layout clients already parse, while `message` gets proper escaping.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ResponseError> {
        let mut body = Vec::with_capacity(32 + self.message.len());
        let mut serializer = serde_json::Serializer::with_formatter(&mut body, SpacedFormatter);
        self.serialize(&mut serializer)?;
        Ok(body)
    }
}

impl Serialize for MessageResponse<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.naming.message_field(), &self.status.as_u16())?;
        map.serialize_entry("message", self.message)?;
        map.end()
    }
}

/// General JSON envelope: status, optional errors and optional data. The
/// payload is borrowed and serialized in place, so struct fields keep their
/// declaration order.
#[derive(Debug)]
pub struct DataResponse<'a, T: ?Sized = ()> {
    naming: FieldNaming,
    status: StatusCode,
    errors: Vec<String>,
    data: Option<&'a T>,
}

impl DataResponse<'_, ()> {
    pub fn empty(naming: FieldNaming, status: StatusCode) -> Self {
        DataResponse {
            naming,
            status,
            errors: Vec::new(),
            data: None,
        }
    }
}

impl<'a, T> DataResponse<'a, T>
where
    T: Serialize + ?Sized,
{
    /// A payload that serializes to `null` is treated as absent and left out
    /// of the body. Unlike Go's `omitempty`, this also drops typed nils
    /// such as `Some(None)` or a null `Value`.
    pub fn new(naming: FieldNaming, status: StatusCode, data: &'a T) -> Self {
        DataResponse {
            naming,
            status,
            errors: Vec::new(),
            data: (!serializes_to_null(data)).then_some(data),
        }
    }

    pub fn with_errors<I, S>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.extend(errors.into_iter().map(Into::into));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn data(&self) -> Option<&'a T> {
        self.data
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ResponseError> {
        Ok(serde_json::to_vec(self)?)
    }
}

// Values `to_value` cannot hold (e.g. u128 above u64::MAX) are not null.
fn serializes_to_null<T>(data: &T) -> bool
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(data).map_or(false, |value| value.is_null())
}

impl<T> Serialize for DataResponse<'_, T>
where
    T: Serialize + ?Sized,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = 1 + usize::from(!self.errors.is_empty()) + usize::from(self.data.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.naming.data_field(), &self.status.as_u16())?;
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        if let Some(data) = self.data {
            map.serialize_entry("data", data)?;
        }
        map.end()
    }
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
