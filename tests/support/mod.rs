#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chirp::{AppState, db};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub async fn app() -> (Router, SqlitePool) {
    let db_pool = db::connect_in_memory().await.expect("in-memory pool");
    db::run_migrations(&db_pool).await.expect("migrations");
    let app = chirp::app(AppState { db_pool: db_pool.clone() }, time::Duration::minutes(5));
    (app, db_pool)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::get(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(form.to_owned())).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The `name=value` part of the session cookie set on `resp`.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_owned)
}

pub async fn register(app: &Router, username: &str, password: &str) -> Response<Body> {
    let form = format!("username={username}&password={password}&password2={password}");
    send(app, post_form("/registration", &form, None)).await
}

pub async fn sign_in(app: &Router, username: &str, password: &str) -> String {
    let form = format!("username={username}&password={password}");
    let resp = send(app, post_form("/login", &form, None)).await;
    assert_eq!(location(&resp), "/", "sign in as {username} failed");
    session_cookie(&resp).expect("session cookie")
}
