//! Built-in templates for the standard block types
//!
//! [`default_templates`] exposes the table every adapter starts from. It is
//! built once and never mutated; adapters merge their own overrides over a
//! copy of it.
//!
//! | type      | strategy |
//! |-----------|----------|
//! | `text`    | `<%= text %>` |
//! | `quote`   | `<quote><%= text %></quote>` |
//! | `image`   | `<div><img src="<%- file.url %>"/></div>` |
//! | `heading` | `<h2><%= text %></h2>` |
//! | `list`    | one `<li>` per entry of `listItems` |
//! | `tweet`   | empty `<div></div>` |
//! | `widget`  | `<%= text %>` |
//! | `button`  | styled `<a>` built from `text`, `href` and `css-*` fields |
//! | `video`   | Vimeo or YouTube `<iframe>` from `source` and `remote_id` |
//! | `map`     | static map image linking to a maps query |

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value as JsonValue};

use crate::error::Result;
use crate::markup;
use crate::registry::TemplateRegistry;
use crate::template::{CompiledTemplate, Template};
use crate::value::display;

const PROTOCOL: &str = "https:";

const BUTTON_STYLE: &[(&str, &str)] = &[
    ("display", "block"),
    ("box-sizing", "border-box"),
    ("border-style", "solid"),
    ("padding-top", "0.8em"),
    ("padding-bottom", "0.5em"),
    ("text-align", "center"),
    ("margin", "0 auto"),
];

static VIMEO: Lazy<CompiledTemplate> = Lazy::new(|| {
    compile_builtin(
        r#"<iframe src="<%= protocol %>//player.vimeo.com/video/<%= remote_id %>?title=0&byline=0" width="580" height="320" frameborder="0"></iframe>"#,
    )
});

static YOUTUBE: Lazy<CompiledTemplate> = Lazy::new(|| {
    compile_builtin(
        r#"<iframe src="<%= protocol %>//www.youtube.com/embed/<%= remote_id %>" width="580" height="320" frameborder="0" allowfullscreen></iframe>"#,
    )
});

static MAP_IMAGE: Lazy<CompiledTemplate> = Lazy::new(|| {
    compile_builtin(
        "https://maps.googleapis.com/maps/api/staticmap?size=<%= width %>x<%= height %>&center=<%= address %>&markers=|<%= address %>&zoom=<%= zoom %>&scale=2",
    )
});

static MAP_LINK: Lazy<CompiledTemplate> =
    Lazy::new(|| compile_builtin("http://maps.google.com/maps?q=<%= address %>"));

static MAP_ANCHOR: Lazy<CompiledTemplate> =
    Lazy::new(|| compile_builtin(r#"<a href="<%= map_ref %>"><img src="<%= img_src %>" /></a>"#));

static DEFAULT_TEMPLATES: Lazy<TemplateRegistry> = Lazy::new(|| {
    let mut registry = TemplateRegistry::new();
    let sources = [
        ("text", "<%= text %>"),
        ("quote", "<quote><%= text %></quote>"),
        ("image", r#"<div><img src="<%- file.url %>"/></div>"#),
        ("heading", "<h2><%= text %></h2>"),
        (
            "list",
            "<ul><% for e in listItems %><li><%- e.content %></li><% end %></ul>",
        ),
        ("tweet", "<div></div>"),
        ("widget", "<%= text %>"),
    ];
    for (kind, source) in sources {
        registry.register(kind, Template::from(compile_builtin(source)));
    }
    registry.register("button", Template::function(button));
    registry.register("video", Template::function(video));
    registry.register("map", Template::function(map));
    registry
});

fn compile_builtin(source: &str) -> CompiledTemplate {
    CompiledTemplate::compile(source).expect("Invalid built-in template")
}

/// The built-in template table, read-only
pub fn default_templates() -> &'static TemplateRegistry {
    &DEFAULT_TEMPLATES
}

/// Anchor styled as a block button
///
/// Every `css-<property>` field becomes an inline style declaration, followed
/// by the fixed button layout rules. `text` is inserted as markup.
pub fn button(data: &Map<String, JsonValue>) -> Result<String> {
    let mut style: Vec<(String, String)> = Vec::new();
    let declarations = data
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix("css-")
                .map(|prop| (prop.to_string(), display(Some(value)).into_owned()))
        })
        .chain(
            BUTTON_STYLE
                .iter()
                .map(|(prop, value)| (prop.to_string(), value.to_string())),
        );
    for (prop, value) in declarations {
        match style.iter_mut().find(|(existing, _)| *existing == prop) {
            Some(entry) => entry.1 = value,
            None => style.push((prop, value)),
        }
    }
    let style = style
        .iter()
        .map(|(prop, value)| format!("{}: {};", prop, value))
        .collect::<Vec<_>>()
        .join(" ");

    let href = data.get("href").map(|href| display(Some(href)).into_owned());
    let mut attrs = Vec::with_capacity(2);
    if let Some(href) = &href {
        attrs.push(("href", href.as_str()));
    }
    attrs.push(("style", style.as_str()));

    let text = data
        .get("text")
        .map(|text| display(Some(text)).into_owned())
        .unwrap_or_default();
    markup::element("a", &[], &attrs, &text)
}

/// Embedded player for a supported video provider
///
/// Unknown providers render nothing.
pub fn video(data: &Map<String, JsonValue>) -> Result<String> {
    let template = match data.get("source").and_then(JsonValue::as_str) {
        Some("vimeo") => &*VIMEO,
        Some("youtube") => &*YOUTUBE,
        _ => return Ok(String::new()),
    };
    template.render_with(&json!({
        "protocol": PROTOCOL,
        "remote_id": data.get("remote_id").cloned().unwrap_or(JsonValue::Null),
    }))
}

/// Static map image linking to the full map
pub fn map(data: &Map<String, JsonValue>) -> Result<String> {
    let img_src = MAP_IMAGE.render(data)?;
    let map_ref = MAP_LINK.render(data)?;
    MAP_ANCHOR.render_with(&json!({
        "img_src": img_src,
        "map_ref": map_ref,
    }))
}
