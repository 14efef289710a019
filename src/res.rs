use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

#[macro_export]
macro_rules! include_res {
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

/// Replaces each `{key}` in `template` with its value in one pass, so
/// substituted values are never scanned for placeholders themselves.
/// Unknown placeholders are left as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let found = values.iter().find(|(key, _)| {
            tail.starts_with(key) && tail[key.len()..].starts_with('}')
        });
        match found {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escapes `text` for use inside HTML element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    html::push_html(&mut out, std::iter::once(Event::Text(text.into())));
    // body-text escaping leaves quotes alone
    out.replace('"', "&quot;")
}

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether a link destination is relative or uses an allowed scheme.
fn is_safe_url(url: &str) -> bool {
    // browsers drop whitespace and control characters before reading the scheme
    let url: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match url.find([':', '/', '?', '#']) {
        Some(i) if url[i..].starts_with(':') => SAFE_SCHEMES
            .iter()
            .any(|scheme| url[..i].eq_ignore_ascii_case(scheme)),
        _ => true,
    }
}

fn safe_dest(dest_url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&dest_url) { dest_url } else { "#".into() }
}

/// Renders message text as Markdown. Raw HTML in the input is shown as text
/// and links to scripting schemes point nowhere.
pub fn markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_dest(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_dest(dest_url),
                title,
                id,
            }),
            _ => event,
        });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
