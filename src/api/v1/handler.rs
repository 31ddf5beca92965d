use super::error::*;
use super::policy::Caller;
use crate::application_port::{AuthService, CatalogService, LoginInput};
use crate::domain_model::{Role, Verdura, VerduraId, VerduraInput};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, http, reject};

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "SESSION";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
}

pub async fn login(
    _caller: Caller,
    form: LoginForm,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let login_input = LoginInput {
        username: form.username,
        password: form.password,
    };
    let result = auth_service
        .login(login_input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let response = ApiResponse::ok(LoginResponse {
        username: result.principal.username,
        role: result.principal.role,
    });
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax",
        SESSION_COOKIE, result.token
    );
    Ok(warp::reply::with_header(
        warp::reply::json(&response),
        http::header::SET_COOKIE,
        cookie,
    ))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse;

pub async fn logout(
    caller: Caller,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Caller::Authenticated { token, .. } = caller {
        auth_service
            .logout(&token)
            .await
            .map_err(ApiErrorCode::from)
            .map_err(reject::custom)?;
    }

    // Expire the cookie client-side as well.
    let cookie = format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE);
    Ok(warp::reply::with_header(
        warp::reply::json(&ApiResponse::ok(LogoutResponse)),
        http::header::SET_COOKIE,
        cookie,
    ))
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub content: Vec<Verdura>,
}

pub async fn list_verduras(
    _caller: Caller,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let content = catalog_service
        .list()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ListResponse { content }))
}

pub async fn get_verdura(
    id: i64,
    _caller: Caller,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let verdura = catalog_service
        .get(VerduraId(id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&verdura))
}

pub async fn create_verdura(
    _caller: Caller,
    input: VerduraInput,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let verdura = catalog_service
        .create(input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let location = format!("/verduras/{}", verdura.id);
    let reply = warp::reply::with_header(
        warp::reply::json(&verdura),
        http::header::LOCATION,
        location,
    );
    Ok(warp::reply::with_status(reply, StatusCode::CREATED))
}

pub async fn update_verdura(
    id: i64,
    _caller: Caller,
    input: VerduraInput,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let verdura = catalog_service
        .update(VerduraId(id), input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&verdura))
}

pub async fn delete_verdura(
    id: i64,
    _caller: Caller,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    catalog_service
        .delete(VerduraId(id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply(),
        StatusCode::NO_CONTENT,
    ))
}

/// Minimal public service description; the real documentation UI is out
/// of scope, this only keeps a discovery endpoint on the allow-list.
pub async fn api_docs(_caller: Caller) -> Result<impl warp::Reply, warp::Rejection> {
    let docs = json!({
        "service": "verduleria",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": {
            "/login": ["POST"],
            "/logout": ["POST"],
            "/verduras": ["GET", "POST"],
            "/verduras/{id}": ["GET", "PUT", "DELETE"],
        },
    });
    Ok(warp::reply::json(&docs))
}

/// Catch-all behind the gate: unmatched paths still require a session
/// before they reveal a 404.
pub async fn fallback(_caller: Caller) -> Result<warp::reply::Json, warp::Rejection> {
    Err(reject::custom(ApiErrorCode::NotFound))
}
