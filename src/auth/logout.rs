use axum::{debug_handler, response::Redirect};
use tower_sessions::Session;

use crate::{session::USERNAME, AppResult};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Redirect> {
    if let Some(username) = session.get::<String>(USERNAME).await? {
        tracing::info!(%username, "signed out");
    }
    session.flush().await?;
    Ok(Redirect::to("/login"))
}
