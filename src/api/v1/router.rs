use super::error::*;
use super::handler;
use super::handler::SESSION_COOKIE;
use super::policy::{Caller, Decision};
use crate::application_port::AuthError;
use crate::domain_model::SessionToken;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::Method;
use warp::path::FullPath;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let gate = with_gate(server.clone());

    let api_docs = warp::get()
        .and(warp::path("api-docs"))
        .and(warp::path::end())
        .and(gate.clone())
        .and_then(handler::api_docs);

    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(gate.clone())
        .and(warp::body::form())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let logout = warp::post()
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(gate.clone())
        .and(with(server.auth_service.clone()))
        .and_then(handler::logout);

    let list_verduras = warp::get()
        .and(warp::path("verduras"))
        .and(warp::path::end())
        .and(gate.clone())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::list_verduras);

    let get_verdura = warp::get()
        .and(warp::path("verduras"))
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(gate.clone())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::get_verdura);

    let create_verdura = warp::post()
        .and(warp::path("verduras"))
        .and(warp::path::end())
        .and(gate.clone())
        .and(warp::body::json())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::create_verdura);

    let update_verdura = warp::put()
        .and(warp::path("verduras"))
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(gate.clone())
        .and(warp::body::json())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::update_verdura);

    let delete_verdura = warp::delete()
        .and(warp::path("verduras"))
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(gate.clone())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::delete_verdura);

    // The fallback keeps unrouted paths behind the same policy table.
    let fallback = warp::any().and(gate).and_then(handler::fallback);

    api_docs
        .or(login)
        .or(logout)
        .or(list_verduras)
        .or(get_verdura)
        .or(create_verdura)
        .or(update_verdura)
        .or(delete_verdura)
        .or(fallback)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// The access control gate. Runs once per request before any handler:
/// resolves the session cookie (if any), looks the route up in the policy
/// table and either rejects or hands the caller to the handler.
fn with_gate(
    server: Arc<Server>,
) -> impl Filter<Extract = (Caller,), Error = warp::Rejection> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(warp::cookie::optional::<String>(SESSION_COOKIE))
        .and_then(move |method: Method, path: FullPath, cookie: Option<String>| {
            let server = server.clone();
            async move {
                let mut presented_invalid_token = false;
                let caller = match cookie {
                    None => Caller::Anonymous,
                    Some(value) => {
                        let token = SessionToken(value);
                        match server.auth_service.resolve(&token).await {
                            Ok(principal) => Caller::Authenticated { principal, token },
                            Err(AuthError::InvalidSession) => {
                                presented_invalid_token = true;
                                Caller::Anonymous
                            }
                            Err(e) => return Err(reject::custom(ApiErrorCode::from(e))),
                        }
                    }
                };

                match server.policy.evaluate(&method, path.as_str(), &caller) {
                    Decision::Allow => Ok(caller),
                    Decision::RequireAuthentication => {
                        let code = if presented_invalid_token {
                            ApiErrorCode::InvalidSession
                        } else {
                            ApiErrorCode::AuthenticationRequired
                        };
                        Err(reject::custom(code))
                    }
                    Decision::Forbid => Err(reject::custom(ApiErrorCode::Forbidden)),
                }
            }
        })
}
