use axum::{debug_handler, extract::State, response::Html, Form};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db, AppResult, AppState};

use super::main_page;

#[derive(Debug, Deserialize)]
pub(crate) struct FilterForm {
    filter: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn filter(
    State(db_pool): State<SqlitePool>,
    session: Session,

    Form(FilterForm { filter }): Form<FilterForm>,
) -> AppResult<Html<String>> {
    let messages = if filter.trim().is_empty() {
        db::messages::find_all(&db_pool).await?
    } else {
        db::messages::find_by_tag(&db_pool, &filter).await?
    };
    tracing::debug!(%filter, found = messages.len(), "filtered messages");

    main_page::render(&session, &messages, &filter).await
}
