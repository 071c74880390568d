//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are decoded into DTOs with optional fields and then checked
//! here so every failure carries the same `details` shape:
//! `{ "field": ..., "code": ..., "value"?: ... }`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, QUANTITY_MAX, Quantity, QuantityError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidQuantity,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidQuantity => "invalid_quantity",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Error for a field whose value fails a domain rule.
pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::InvalidValue)
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a date in YYYY-MM-DD form"))
            .with_value(ErrorCode::InvalidDate, value)
    })
}

/// Parse a positive item count. JSON numbers arrive as `i64` so negative
/// input reaches this check instead of failing body decoding.
pub(crate) fn parse_quantity(value: i64, field: FieldName) -> Result<Quantity, Error> {
    let name = field.as_str();
    let invalid = |message: String| {
        ValidationError::new(name, message).with_value(ErrorCode::InvalidQuantity, value.to_string())
    };
    let raw = u32::try_from(value)
        .map_err(|_| invalid(format!("{name} must be between 1 and {QUANTITY_MAX}")))?;
    Quantity::new(raw).map_err(|err| match err {
        QuantityError::Zero | QuantityError::TooLarge { .. } => {
            invalid(format!("{name} must be between 1 and {QUANTITY_MAX}"))
        }
    })
}

/// Unwrap a JSON body taken as `Result` so decoding errors surface only
/// after the caller has been authenticated and authorized.
///
/// Errors produced by [`json_config`] keep their envelope; any other
/// extractor failure becomes a generic `invalid_request`.
pub(crate) fn decode_body<T>(
    payload: Result<web::Json<T>, actix_web::Error>,
) -> Result<T, Error> {
    payload.map(web::Json::into_inner).map_err(|err| {
        err.as_error::<Error>()
            .cloned()
            .unwrap_or_else(|| Error::invalid_request("invalid request body"))
    })
}

/// JSON extractor configuration that reports malformed bodies with the
/// domain error envelope instead of actix's plain-text default.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use foodshare::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "rejected malformed JSON body");
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        _ => "invalid request body".to_owned(),
    };
    Error::invalid_request(message).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    const QUANTITY: FieldName = FieldName::new("quantity");

    #[rstest]
    fn missing_field_reports_field_and_code() {
        let err = missing_field_error(FieldName::new("name"));
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "name", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn invalid_uuid_echoes_value() {
        let err = parse_uuid("nope", FieldName::new("foodId")).expect_err("invalid uuid");
        assert_eq!(err.message(), "foodId must be a valid UUID");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "foodId", "value": "nope", "code": "invalid_uuid"}))
        );
    }

    #[rstest]
    #[case("2026-11-01", true)]
    #[case("2026-02-30", false)]
    #[case("01/11/2026", false)]
    #[case("", false)]
    fn dates_must_be_iso_calendar_days(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(parse_date(raw, FieldName::new("expiryDate")).is_ok(), ok);
    }

    #[rstest]
    #[case(1, Some(1))]
    #[case(10, Some(10))]
    #[case(0, None)]
    #[case(-3, None)]
    #[case(i64::from(QUANTITY_MAX) + 1, None)]
    fn quantity_bounds(#[case] raw: i64, #[case] expected: Option<u32>) {
        let parsed = parse_quantity(raw, QUANTITY).ok().map(Quantity::get);
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn decode_body_keeps_configured_envelope() {
        let err = Error::invalid_request("invalid request body: expected a number");
        let decoded = decode_body::<Value>(Err(err.clone().into())).expect_err("decode failure");
        assert_eq!(decoded, err);
    }

    #[rstest]
    fn decode_body_maps_foreign_errors_to_invalid_request() {
        let err = actix_web::error::ErrorBadRequest("boom");
        let decoded = decode_body::<Value>(Err(err)).expect_err("decode failure");
        assert_eq!(decoded.code(), DomainCode::InvalidRequest);
        assert_eq!(decoded.message(), "invalid request body");
    }

    #[rstest]
    fn quantity_error_carries_code() {
        let err = parse_quantity(0, QUANTITY).expect_err("zero rejected");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "quantity", "value": "0", "code": "invalid_quantity"}))
        );
    }
}
