use std::sync::Arc;
use verduleria::api;
use verduleria::server::Server;
use verduleria::settings::{Auth, Http, Log, Settings, Store};
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::{Filter, Reply};

fn mem_settings() -> Settings {
    Settings {
        auth: Auth {
            session_ttl_secs: 3600,
            sweep_interval_secs: 60,
        },
        http: Http {
            address: "127.0.0.1:0".to_string(),
        },
        log: Log {
            filter: "warn".to_string(),
        },
        store: Store {
            backend: "mem".to_string(),
            mysql_dsn: None,
        },
    }
}

/// Full router with the mem backend: carmen/lechuguita123 (ADMIN, enabled),
/// pepe/acelga456 (USER, enabled), mario/patata789 (USER, disabled), and a
/// three-row seeded catalog.
async fn test_api() -> BoxedFilter<(warp::reply::Response,)> {
    let server = Arc::new(
        Server::try_new(&mem_settings())
            .await
            .expect("server with mem backend"),
    );
    api::v1::routes(server)
        .recover(api::v1::recover_error)
        .map(warp::Reply::into_response)
        .boxed()
}

async fn login(api: &BoxedFilter<(warp::reply::Response,)>, username: &str, password: &str) -> String {
    let resp = warp::test::request()
        .method("POST")
        .path("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(format!("username={username}&password={password}"))
        .reply(api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK, "login should succeed");

    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("login sets cookie")
        .to_str()
        .expect("ascii cookie");
    let pair = set_cookie.split(';').next().expect("cookie pair");
    assert!(pair.starts_with("SESSION="), "unexpected cookie: {pair}");
    pair.to_string()
}

#[tokio::test]
async fn login_issues_session_cookie_and_reports_role() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("POST")
        .path("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("username=carmen&password=lechuguita123")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("set-cookie").is_some());

    let body: serde_json::Value = serde_json::from_slice(resp.body()).expect("json body");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "carmen");
    assert_eq!(body["data"]["role"], "ADMIN");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized_without_cookie() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("POST")
        .path("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("username=carmen&password=wrong")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn disabled_account_cannot_login_even_with_correct_password() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("POST")
        .path("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("username=mario&password=patata789")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn bad_logins_are_indistinguishable() {
    let api = test_api().await;

    // unknown user, wrong password and disabled account must all produce
    // the exact same response
    let mut bodies = Vec::new();
    for body in [
        "username=nobody&password=whatever",
        "username=carmen&password=wrong",
        "username=mario&password=patata789",
    ] {
        let resp = warp::test::request()
            .method("POST")
            .path("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        bodies.push(resp.body().clone());
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[1], bodies[2]);
}

#[tokio::test]
async fn public_docs_path_allows_anonymous() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("GET")
        .path("/api-docs")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn catalog_reads_require_a_session() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("GET")
        .path("/verduras")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = login(&api, "pepe", "acelga456").await;
    let resp = warp::test::request()
        .method("GET")
        .path("/verduras")
        .header("cookie", &cookie)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(resp.body()).expect("json body");
    let content = body["content"].as_array().expect("content array");
    assert_eq!(content.len(), 3);
}

#[tokio::test]
async fn garbage_cookie_is_rejected_as_invalid_session() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("GET")
        .path("/verduras")
        .header("cookie", "SESSION=not-a-real-token")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_can_create_verdura_and_fetch_it_back() {
    let api = test_api().await;
    let cookie = login(&api, "carmen", "lechuguita123").await;

    let resp = warp::test::request()
        .method("POST")
        .path("/verduras")
        .header("cookie", &cookie)
        .json(&serde_json::json!({
            "nombre": "Remolacha",
            "precio": 4.52,
            "troceable": false,
        }))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get("location")
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_string();
    assert!(location.starts_with("/verduras/"));

    let created: serde_json::Value = serde_json::from_slice(resp.body()).expect("json body");
    assert_eq!(created["nombre"], "Remolacha");
    assert_eq!(created["precio"], 4.52);
    assert_eq!(created["troceable"], false);

    let resp = warp::test::request()
        .method("GET")
        .path(&location)
        .header("cookie", &cookie)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: serde_json::Value = serde_json::from_slice(resp.body()).expect("json body");
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["nombre"], "Remolacha");
}

#[tokio::test]
async fn create_without_cookie_is_unauthorized() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("POST")
        .path("/verduras")
        .json(&serde_json::json!({
            "nombre": "Remolacha",
            "precio": 4.52,
            "troceable": false,
        }))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_with_non_admin_session_is_forbidden() {
    let api = test_api().await;
    let cookie = login(&api, "pepe", "acelga456").await;

    let resp = warp::test::request()
        .method("POST")
        .path("/verduras")
        .header("cookie", &cookie)
        .json(&serde_json::json!({
            "nombre": "Remolacha",
            "precio": 4.52,
            "troceable": false,
        }))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn update_and_delete_are_admin_only() {
    let api = test_api().await;
    let admin = login(&api, "carmen", "lechuguita123").await;
    let user = login(&api, "pepe", "acelga456").await;

    let resp = warp::test::request()
        .method("PUT")
        .path("/verduras/1")
        .header("cookie", &user)
        .json(&serde_json::json!({
            "nombre": "Tomate pera",
            "precio": 4.10,
            "troceable": false,
        }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = warp::test::request()
        .method("PUT")
        .path("/verduras/1")
        .header("cookie", &admin)
        .json(&serde_json::json!({
            "nombre": "Tomate pera",
            "precio": 4.10,
            "troceable": false,
        }))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = serde_json::from_slice(resp.body()).expect("json body");
    assert_eq!(updated["nombre"], "Tomate pera");

    let resp = warp::test::request()
        .method("DELETE")
        .path("/verduras/1")
        .header("cookie", &admin)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = warp::test::request()
        .method("GET")
        .path("/verduras/1")
        .header("cookie", &admin)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let api = test_api().await;
    let cookie = login(&api, "carmen", "lechuguita123").await;

    let resp = warp::test::request()
        .method("POST")
        .path("/logout")
        .header("cookie", &cookie)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = warp::test::request()
        .method("GET")
        .path("/verduras")
        .header("cookie", &cookie)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unrouted_paths_stay_behind_the_gate() {
    let api = test_api().await;

    let resp = warp::test::request()
        .method("GET")
        .path("/secret")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = login(&api, "pepe", "acelga456").await;
    let resp = warp::test::request()
        .method("GET")
        .path("/secret")
        .header("cookie", &cookie)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
