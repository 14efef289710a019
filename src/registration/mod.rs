mod form;
mod page;

use axum::{Router, routing::get};

use crate::AppState;

pub use form::{FieldError, RegistrationForm};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registration", get(page::registration_page).post(page::add_user))
}
