use axum::{debug_handler, extract::Query, response::Html};
use serde::Deserialize;

use crate::{include_res, res};

#[derive(Deserialize)]
pub(crate) struct GreetingQuery {
    name: Option<String>,
}

#[debug_handler]
pub(crate) async fn greeting(
    Query(GreetingQuery { name }): Query<GreetingQuery>,
) -> Html<String> {
    let name = name.unwrap_or_else(|| "World".to_owned());

    Html(res::fill(
        include_res!(str, "/pages/greeting.html"),
        &[("name", res::escape(&name).as_str())],
    ))
}
