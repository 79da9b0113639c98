use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    header::{HeaderValue, CONTENT_TYPE},
    Response, StatusCode,
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    models::wallet::InvalidAddressBody, prometheus_handler::PrometheusError,
    providers::aggregator::error::AggregateError,
};

/// Response type produced by every route.
pub type HttpResponse = Response<Full<Bytes>>;

/// Message of the body returned for malformed addresses.
pub const INVALID_ADDRESS_FORMAT: &str = "Invalid address format.";

/// Error that can occur while serving a request, before or after the
/// aggregation itself.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Request body too large.")]
    BodyTooLarge,
    #[error("Not found.")]
    NotFound,
    #[error("Method not allowed.")]
    MethodNotAllowed,
    #[error("Error gathering metrics: {0}")]
    Metrics(#[from] PrometheusError),
}

impl From<&ApiError> for StatusCode {
    fn from(error: &ApiError) -> Self {
        match error {
            ApiError::Aggregate(err) => err.into(),
            ApiError::InvalidBody(_) => Self::BAD_REQUEST,
            ApiError::BodyTooLarge => Self::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => Self::NOT_FOUND,
            ApiError::MethodNotAllowed => Self::METHOD_NOT_ALLOWED,
            ApiError::Metrics(_) => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Malformed addresses get a structured body listing them, every other
    /// error is reported as a plain message.
    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        match self {
            Self::Aggregate(AggregateError::InvalidAddressFormat { invalid_addresses }) => {
                json(status, &InvalidAddressBody { error: INVALID_ADDRESS_FORMAT, invalid_addresses })
            }
            err => text(status, err.to_string()),
        }
    }
}

/// Maps the outcome of an operation to a response: 200 with the JSON body on
/// success, the error's status and body otherwise.
pub fn build<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<ApiError>,
{
    match result {
        Ok(body) => json(StatusCode::OK, &body),
        Err(err) => {
            let err: ApiError = err.into();
            err.into_response()
        }
    }
}

pub fn json<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => with_content_type(status, bytes.into(), HeaderValue::from_static("application/json")),
        Err(err) => {
            tracing::error!(%err, "failed to serialize response");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Failed to serialize response.".to_string())
        }
    }
}

pub fn text(status: StatusCode, message: String) -> HttpResponse {
    with_content_type(status, message.into(), HeaderValue::from_static("text/plain; charset=utf-8"))
}

pub fn with_content_type(status: StatusCode, body: Bytes, content_type: HeaderValue) -> HttpResponse {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    response
}
