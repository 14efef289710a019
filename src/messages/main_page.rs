use axum::{debug_handler, extract::State, response::Html, Form};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    db::{self, Message, NewMessage},
    include_res, res,
    session::{ADMIN, USERNAME},
    AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct AddMessageForm {
    text: String,
    tag: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn main(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Html<String>> {
    let messages = db::messages::find_all(&db_pool).await?;
    render(&session, &messages, "").await
}

#[debug_handler(state = AppState)]
pub(crate) async fn add_message(
    State(db_pool): State<SqlitePool>,
    session: Session,

    Form(AddMessageForm { text, tag }): Form<AddMessageForm>,
) -> AppResult<Html<String>> {
    let author = session.get::<String>(USERNAME).await?;
    let message = db::messages::save(&db_pool, NewMessage::new(text, tag).by(author)).await?;
    tracing::info!(id = message.id, tag = %message.tag, "message posted");

    let messages = db::messages::find_all(&db_pool).await?;
    render(&session, &messages, "").await
}

/// Fills the main page with `messages`, echoing `filter` back into the filter box.
pub(crate) async fn render(session: &Session, messages: &[Message], filter: &str) -> AppResult<Html<String>> {
    let admin = session.get::<bool>(ADMIN).await?.unwrap_or(false);
    let nav = match session.get::<String>(USERNAME).await? {
        Some(username) => format!(
            r#"Signed in as <b>{}</b>{} <form method="post" action="/logout" style="display:inline"><button type="submit">Sign out</button></form>"#,
            res::escape(&username),
            if admin { " (admin)" } else { "" },
        ),
        None => r#"<a href="/login">Sign in</a> <a href="/registration">Add new user</a>"#.to_owned(),
    };

    let mut items = String::new();
    for message in messages {
        items += &message_to_html(message);
    }
    if messages.is_empty() {
        items = "        <p>No message</p>\n".to_owned();
    }

    Ok(Html(res::fill(
        include_res!(str, "/pages/main.html"),
        &[
            ("nav", nav.as_str()),
            ("filter", res::escape(filter).as_str()),
            ("messages", items.as_str()),
        ],
    )))
}

fn message_to_html(message: &Message) -> String {
    let author = match &message.author {
        Some(author) => res::escape(author),
        None => "&lt;none&gt;".to_owned(),
    };

    res::fill(
        include_res!(str, "/pages/message.html"),
        &[
            ("id", message.id.to_string().as_str()),
            ("tag", res::escape(&message.tag).as_str()),
            ("author", author.as_str()),
            ("text", res::markdown(&message.text).as_str()),
        ],
    )
}
