//! Template dispatch integration tests
//!
//! These tests cover template resolution through the adapter: built-in
//! templates, caller overrides, rendering functions and the prefix fallback.

use html_block_adapter::test_utils::extract_text;
use html_block_adapter::{assert_html_eq, Adapter, AdapterBuilder, Error, Template};
use serde_json::{json, Map, Value};

fn data(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_builtin_templates_render_visible_content() {
    let adapter = Adapter::new();
    let blocks = json!([
        {"type": "text", "data": {"text": "Paragraph"}},
        {"type": "heading", "data": {"text": "Heading"}},
        {"type": "quote", "data": {"text": "Quoted"}},
        {"type": "list", "data": {"listItems": [{"content": "Alpha"}, {"content": "Beta"}]}},
        {"type": "widget", "data": {"text": "Widget"}}
    ]);

    let html = adapter.to_html(&blocks);
    assert_eq!(
        extract_text(&html),
        "Paragraph Heading Quoted AlphaBeta Widget"
    );
}

#[test]
fn test_image_template_markup() {
    let adapter = Adapter::new();
    let html = adapter
        .render_type("image", &data(json!({"file": {"url": "/img/a.png"}})))
        .unwrap();
    assert_html_eq!(&html, r#"<div><img src="/img/a.png"></div>"#);
}

#[test]
fn test_render_type_missing_type_is_fatal() {
    let adapter = Adapter::new();
    let err = adapter.render_type("", &data(json!({"text": "x"}))).unwrap_err();
    assert!(matches!(err, Error::MissingType));
    assert!(err.is_contract_violation());
}

#[test]
fn test_render_type_unknown_type_is_empty() {
    let adapter = Adapter::new();
    assert_eq!(adapter.render_type("carousel", &Map::new()).unwrap(), "");
}

#[test]
fn test_prefix_fallback_requested_type_is_leading_substring() {
    let adapter = AdapterBuilder::new()
        .without_defaults()
        .with_template_source("image_edit", "<figure><%= caption %></figure>")
        .build()
        .unwrap();

    // "image_edit".substring(0, "image".len()) == "image", so `image`
    // falls back to the `image_edit` template.
    let html = adapter
        .render_type("image", &data(json!({"caption": "Cat"})))
        .unwrap();
    assert_eq!(html, "<figure>Cat</figure>");
}

#[test]
fn test_prefix_fallback_does_not_match_longer_requested_type() {
    let adapter = AdapterBuilder::new()
        .without_defaults()
        .with_template_source("image", "<img src=\"<%- url %>\">")
        .build()
        .unwrap();

    let fields = data(json!({"url": "/a.png"}));
    // "image".substring(0, "image_edit".len()) == "image" != "image_edit"
    assert_eq!(adapter.render_type("image_edit", &fields).unwrap(), "");
    assert_eq!(adapter.render_type("imagex", &fields).unwrap(), "");
    assert_eq!(adapter.render_type("imag", &fields).unwrap(), "<img src=\"/a.png\">");
}

#[test]
fn test_prefix_fallback_first_registered_wins() {
    let adapter = AdapterBuilder::new()
        .with_template_source("tweet_embed", "<blockquote>embed</blockquote>")
        .build()
        .unwrap();

    // Overrides are scanned before the built-ins, but an exact match still wins.
    assert_eq!(adapter.render_type("tweet", &Map::new()).unwrap(), "<div></div>");
    assert_eq!(
        adapter.render_type("tweet_", &Map::new()).unwrap(),
        "<blockquote>embed</blockquote>"
    );
    assert_eq!(
        adapter.render_type("tw", &Map::new()).unwrap(),
        "<blockquote>embed</blockquote>"
    );
}

#[test]
fn test_fallback_rendering_through_map() {
    let adapter = Adapter::new();
    let block = json!({"type": "vid", "data": {"source": "vimeo", "remote_id": "7"}});

    let html = adapter.to_html(&block);
    assert!(html.contains(r#"class="st-render st-render-vid""#));
    assert!(html.contains("player.vimeo.com/video/7"));
}

#[test]
fn test_caller_override_wins() {
    let adapter = AdapterBuilder::new()
        .with_template_source("heading", "<h1><%= text %></h1>")
        .build()
        .unwrap();

    let html = adapter.to_html(&json!({"type": "heading", "data": {"text": "Big"}}));
    assert!(html.contains("<h1>Big</h1>"));
    assert!(!html.contains("<h2>"));

    // Default adapters are unaffected.
    let html = Adapter::new().to_html(&json!({"type": "heading", "data": {"text": "Big"}}));
    assert!(html.contains("<h2>Big</h2>"));
}

#[test]
fn test_function_template_with_sub_template() {
    let card = html_block_adapter::CompiledTemplate::compile(
        r#"<div class="card"><%= title %> (<%= count %>)</div>"#,
    )
    .unwrap();

    let adapter = AdapterBuilder::new()
        .with_function("card", move |data| {
            let items = data
                .get("items")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::render_static("items must be an array"))?;
            card.render_with(&json!({
                "title": data.get("title").cloned().unwrap_or(Value::Null),
                "count": items.len(),
            }))
        })
        .build()
        .unwrap();

    let html = adapter
        .render_type("card", &data(json!({"title": "<Cards>", "items": [1, 2, 3]})))
        .unwrap();
    assert_eq!(html, r#"<div class="card">&lt;Cards&gt; (3)</div>"#);

    // A failing function degrades to empty markup.
    assert_eq!(adapter.render_type("card", &data(json!({"title": "x"}))).unwrap(), "");
}

#[test]
fn test_panicking_function_is_contained() {
    let adapter = AdapterBuilder::new()
        .with_template("explode", Template::function(|_| panic!("template bug")))
        .build()
        .unwrap();

    let blocks = json!([
        {"type": "explode", "data": {}},
        {"type": "text", "data": {"text": "survivor"}}
    ]);
    let html = adapter.to_html(&blocks);
    assert!(html.contains("survivor"));
    assert_eq!(adapter.to_json(&html).len(), 2);
}

#[test]
fn test_default_templates_are_read_only_and_shared() {
    let defaults = Adapter::default_templates();
    assert!(defaults.get("list").unwrap().source().is_some());
    assert!(defaults.get("button").unwrap().is_function());

    let adapter = AdapterBuilder::new()
        .with_template_source("list", "<ol></ol>")
        .build()
        .unwrap();
    assert_eq!(adapter.templates().get("list").unwrap().source(), Some("<ol></ol>"));
    assert_ne!(defaults.get("list").unwrap().source(), Some("<ol></ol>"));
}
