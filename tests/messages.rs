mod support;

use axum::http::StatusCode;
use chirp::db;
use support::{body_string, get, post_form, send};

#[tokio::test]
async fn main_page_starts_empty() {
    let (app, _) = support::app().await;
    let resp = send(&app, get("/", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert!(body.contains("No message"));
    assert!(body.contains(r#"action="/filter""#));
}

#[tokio::test]
async fn posting_a_message_lists_every_message() {
    let (app, db_pool) = support::app().await;
    send(&app, post_form("/", "text=first+post&tag=news", None)).await;

    let resp = send(&app, post_form("/", "text=second+post&tag=misc", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("first post"));
    assert!(body.contains("second post"));
    assert!(body.find("first post") < body.find("second post"));

    let stored = db::messages::find_all(&db_pool).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].tag, "misc");
    assert_eq!(stored[1].author, None);
}

#[tokio::test]
async fn posting_without_a_tag_is_rejected() {
    let (app, db_pool) = support::app().await;
    let resp = send(&app, post_form("/", "text=lonely", None)).await;
    assert!(resp.status().is_client_error());
    assert!(db::messages::find_all(&db_pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn filter_shows_only_the_exact_tag() {
    let (app, _) = support::app().await;
    send(&app, post_form("/", "text=about+rust&tag=rust", None)).await;
    send(&app, post_form("/", "text=about+go&tag=go", None)).await;
    send(&app, post_form("/", "text=shouting&tag=RUST", None)).await;

    let body = body_string(send(&app, post_form("/filter", "filter=rust", None)).await).await;
    assert!(body.contains("about rust"));
    assert!(!body.contains("about go"));
    assert!(!body.contains("shouting"));
    assert!(body.contains(r#"value="rust""#));
}

#[tokio::test]
async fn filter_with_unknown_tag_lists_nothing() {
    let (app, _) = support::app().await;
    send(&app, post_form("/", "text=about+rust&tag=rust", None)).await;

    let body = body_string(send(&app, post_form("/filter", "filter=cobol", None)).await).await;
    assert!(body.contains("No message"));
}

#[tokio::test]
async fn empty_filter_lists_everything() {
    let (app, _) = support::app().await;
    send(&app, post_form("/", "text=about+rust&tag=rust", None)).await;
    send(&app, post_form("/", "text=about+go&tag=go", None)).await;

    let body = body_string(send(&app, post_form("/filter", "filter=", None)).await).await;
    assert!(body.contains("about rust"));
    assert!(body.contains("about go"));
}

#[tokio::test]
async fn message_text_cannot_inject_markup() {
    let (app, _) = support::app().await;
    let resp = send(&app, post_form("/", "text=%3Cscript%3Ealert(1)%3C%2Fscript%3E&tag=%3Cb%3E", None)).await;

    let body = body_string(resp).await;
    assert!(!body.contains("<script>alert"));
    assert!(body.contains("&lt;script&gt;"));
    assert!(body.contains("&lt;b&gt;"));
}

#[tokio::test]
async fn greeting_defaults_to_world() {
    let (app, _) = support::app().await;
    let body = body_string(send(&app, get("/greeting", None)).await).await;
    assert!(body.contains("Hello, World!"));
}

#[tokio::test]
async fn greeting_uses_the_given_name() {
    let (app, _) = support::app().await;
    let body = body_string(send(&app, get("/greeting?name=Ann", None)).await).await;
    assert!(body.contains("Hello, Ann!"));
}

#[tokio::test]
async fn script_links_in_messages_are_defused() {
    let (app, _) = support::app().await;
    let resp = send(
        &app,
        post_form("/", "text=%5Bclick%5D(javascript%3Aalert(1))+%3Cjavascript%3Aalert(2)%3E&tag=x", None),
    )
    .await;

    let body = body_string(resp).await;
    assert!(!body.contains(r#"href="javascript:"#));
    assert!(body.contains(r##"<a href="#">click</a>"##));
}
