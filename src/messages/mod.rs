mod filter;
mod greeting;
mod main_page;

use axum::{Router, routing::{get, post}};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(main_page::main).post(main_page::add_message))
        .route("/filter", post(filter::filter))
        .route("/greeting", get(greeting::greeting))
}
