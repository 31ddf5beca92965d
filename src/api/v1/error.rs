use crate::api::v1::handler::ApiResponse;
use crate::application_port::{AuthError, CatalogError};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

/// Convert any rejection into the fixed status codes of the error
/// taxonomy. Auth failures never escape as anything but 401/403.
pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    // A malformed body can reach the fallback route, which adds its own
    // NotFound; the deserialize error is the more specific cause.
    let code = if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        ApiErrorCode::BadRequest
    } else if let Some(code) = err.find::<ApiErrorCode>() {
        code.clone()
    } else if err.is_not_found() {
        ApiErrorCode::NotFound
    } else {
        warn!("unhandled rejection: {:?}", err);
        ApiErrorCode::InternalError
    };

    let json = warp::reply::json(&ApiResponse::<()>::err(code.clone(), code.to_string()));
    Ok(warp::reply::with_status(json, code.status()))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("Invalid session")]
    InvalidSession,
    #[error("Forbidden")]
    Forbidden,
    #[error("Not found")]
    NotFound,
    #[error("Bad request")]
    BadRequest,
    #[error("Store unavailable")]
    StoreUnavailable,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::InvalidCredentials
            | ApiErrorCode::AuthenticationRequired
            | ApiErrorCode::InvalidSession => StatusCode::UNAUTHORIZED,
            ApiErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ApiErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("internal error: {}", error);
        ApiErrorCode::InternalError
    }

    fn store<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("store fault: {}", error);
        ApiErrorCode::StoreUnavailable
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => ApiErrorCode::InvalidCredentials,
            AuthError::InvalidSession => ApiErrorCode::InvalidSession,
            AuthError::Store(e) => ApiErrorCode::store(e),
            AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<CatalogError> for ApiErrorCode {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound => ApiErrorCode::NotFound,
            CatalogError::Store(e) => ApiErrorCode::store(e),
        }
    }
}
