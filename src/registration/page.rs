use std::collections::{BTreeMap, BTreeSet};

use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}, Form};
use sqlx::SqlitePool;

use crate::{
    auth::password,
    db::{self, NewUser, Role},
    include_res, res, AppResult, AppState,
};

use super::form::{RegistrationForm, PASSWORDS_DIFFER, USER_EXISTS};

/// Page attributes keyed by template placeholder, e.g. `usernameError`.
type Model = BTreeMap<String, String>;

const PLACEHOLDERS: [&str; 6] = [
    "message",
    "username",
    "usernameError",
    "passwordError",
    "password2Error",
    "passwordEqualsError",
];

fn render(model: &Model) -> Html<String> {
    let values: Vec<(&str, String)> = PLACEHOLDERS
        .iter()
        .map(|key| (*key, model.get(*key).map(|v| res::escape(v)).unwrap_or_default()))
        .collect();
    let values: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();

    Html(res::fill(include_res!(str, "/pages/registration.html"), &values))
}

#[debug_handler]
pub(crate) async fn registration_page() -> Html<String> {
    render(&Model::new())
}

#[debug_handler(state = AppState)]
pub(crate) async fn add_user(
    State(db_pool): State<SqlitePool>,

    Form(form): Form<RegistrationForm>,
) -> AppResult<Response> {
    let mut model = Model::new();
    if let Some(username) = &form.username {
        model.insert("username".to_owned(), username.clone());
    }

    if form.passwords_differ() {
        model.insert("passwordEqualsError".to_owned(), PASSWORDS_DIFFER.to_owned());
        return Ok(render(&model).into_response());
    }

    let errors = form.field_errors();
    if !errors.is_empty() {
        for error in errors {
            model.insert(format!("{}Error", error.field), error.message.to_owned());
        }
        return Ok(render(&model).into_response());
    }

    // validation guarantees both are present
    let (Some(username), Some(raw_password)) = (form.username, form.password) else {
        return Ok(render(&model).into_response());
    };

    if db::users::find_by_username(&db_pool, &username).await?.is_some() {
        model.insert("message".to_owned(), USER_EXISTS.to_owned());
        return Ok(render(&model).into_response());
    }

    create_user(&db_pool, model, username, &raw_password).await
}

/// Saves a new active `USER`. A name taken since the lookup in [`add_user`]
/// renders the same page as one taken before it.
async fn create_user(
    db_pool: &SqlitePool,
    mut model: Model,
    username: String,
    raw_password: &str,
) -> AppResult<Response> {
    let user = NewUser {
        username,
        password: password::encode(raw_password)?,
        active: true,
        roles: BTreeSet::from([Role::User]),
    };
    let Some(user) = db::users::save(db_pool, user).await? else {
        tracing::warn!("username taken during registration");
        model.insert("message".to_owned(), USER_EXISTS.to_owned());
        return Ok(render(&model).into_response());
    };
    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(Redirect::to("/login?registered").into_response())
}
