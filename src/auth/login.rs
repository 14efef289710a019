use axum::{debug_handler, extract::{Query, State}, response::{Html, Redirect}, Form};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db::{self, Role}, include_res, res, session::{ADMIN, USERNAME, USER_ID}, AppResult, AppState};

use super::password;

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    error: Option<String>,
    registered: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    username: String,
    password: String,
}

#[debug_handler]
pub(crate) async fn login_page(
    Query(LoginQuery { error, registered }): Query<LoginQuery>,
) -> Html<String> {
    let error = if error.is_some() { "Invalid username or password" } else { "" };
    let notice = if registered.is_some() { "Registration complete, sign in to continue" } else { "" };

    Html(res::fill(
        include_res!(str, "/pages/login.html"),
        &[("error", error), ("notice", notice)],
    ))
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,

    Form(LoginForm { username, password: raw }): Form<LoginForm>,
) -> AppResult<Redirect> {
    let user = db::users::find_by_username(&db_pool, &username)
        .await?
        .filter(|user| user.active && password::matches(&raw, &user.password));

    let Some(user) = user else {
        tracing::warn!(%username, "failed sign in");
        return Ok(Redirect::to("/login?error"));
    };

    session.cycle_id().await?;
    session.insert(USER_ID, user.id.to_string()).await?;
    session.insert(USERNAME, &user.username).await?;
    let admin = user.has_role(Role::Admin);
    session.insert(ADMIN, admin).await?;
    tracing::info!(user_id = %user.id, username = %user.username, admin, "signed in");

    Ok(Redirect::to("/"))
}
