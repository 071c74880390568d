//! HTTP mapping for domain errors.
//!
//! Every [`ErrorCode`] maps to exactly one status. Refusals the service
//! decided on (forbidden, conflict) are logged at `debug`, storage outages
//! at `warn` and internal failures at `error`, each with the error code and
//! trace id. Internal messages are replaced before they reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_response(error: &Error, status: StatusCode) {
    let trace_id = error.trace_id().unwrap_or_default();
    let code = error.code();
    let message = error.message();
    match code {
        ErrorCode::Forbidden | ErrorCode::Conflict => {
            debug!(?code, status = status.as_u16(), trace_id, message, "request refused");
        }
        ErrorCode::ServiceUnavailable => {
            warn!(?code, status = status.as_u16(), trace_id, message, "backing store unavailable");
        }
        ErrorCode::InternalError => {
            error!(?code, status = status.as_u16(), trace_id, message, "request failed");
        }
        ErrorCode::InvalidRequest | ErrorCode::Unauthorized | ErrorCode::NotFound => {}
    }
}

/// Body sent to the client. Internal errors keep only their trace id.
fn client_body(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log_response(self, status);

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_body(self))
    }
}

/// Recover a domain error carried inside an actix error; anything else
/// becomes a redacted internal error.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if let Some(domain) = err.as_error::<Error>() {
            return domain.clone();
        }
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}
