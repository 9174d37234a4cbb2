//! Debug overlay marking each rendered layout in the output HTML

use super::descriptor::LayoutDescriptor;
use crate::error::Result;
use crate::request::Request;
use crate::resource::ResourceRef;
use regex::Regex;
use serde::Serialize;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::LazyLock;

/// Opening `<html ...>` tag
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html\b[^>]*>").expect("valid html tag pattern"));

/// Prefix of the metadata comment injected in debug mode
pub const LAYOUT_COMMENT_PREFIX: &str = "<!-- layout:";

#[derive(Debug, Serialize)]
struct LayoutInfo<'a> {
    name: &'a str,
    #[serde(rename = "parent-layout")]
    parent_layout: Option<&'a str>,
    #[serde(rename = "layout-factory")]
    layout_factory: &'a str,
    renderer: Option<&'a str>,
    context: String,
    #[serde(rename = "context-path")]
    context_path: String,
}

/// Border color for a layout, stable across requests
fn border_color(name: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    (hasher.finish() & 0xFF_FFFF) as u32
}

/// Escape text placed inside a double-quoted HTML attribute
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Mark `content` as rendered by `layout` at `context`
///
/// Adds a colored border with the layout name as tooltip, either on the
/// `<html>` tag when present or on a wrapping `<div>`, and prepends a
/// comment with the layout metadata as JSON.
pub fn layout_info(
    layout: &LayoutDescriptor,
    context: &ResourceRef,
    request: &Request,
    content: &str,
) -> Result<String> {
    let intr = layout.introspection();
    let info = LayoutInfo {
        name: &intr.name,
        parent_layout: intr.parent.as_deref(),
        layout_factory: intr.view.as_deref().unwrap_or("None"),
        renderer: intr.renderer.as_deref(),
        context: context.type_tag().to_string(),
        context_path: request.resource_url(context),
    };

    let color = border_color(info.name);
    let title = escape_attr(info.name);
    let marked = match HTML_TAG.find(content) {
        Some(tag) => {
            let pos = tag.end() - 1;
            format!(
                "{} style=\"border: 2px solid #{:06x}\" title=\"{}\"{}",
                &content[..pos],
                color,
                title,
                &content[pos..]
            )
        }
        None => format!(
            "<div style=\"border: 2px solid #{:06x}\" title=\"{}\">{}</div>",
            color, title, content
        ),
    };

    Ok(format!(
        "\n{}\n{} \n-->\n{}",
        LAYOUT_COMMENT_PREFIX,
        serde_json::to_string_pretty(&info)?,
        marked
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutRegistration, LayoutRegistry, LayoutView};
    use crate::resource::ResourceNode;

    fn layout(registration: LayoutRegistration) -> std::sync::Arc<LayoutDescriptor> {
        let mut builder = LayoutRegistry::builder();
        builder.add_layout(registration);
        let registry = builder.build().unwrap();
        std::sync::Arc::clone(&registry.layouts()[0])
    }

    fn request() -> (Request, ResourceRef) {
        let root = ResourceNode::root("", "root");
        let docs = root.add_child("docs", "context");
        let request = Request::new(root.as_resource(), docs.as_resource());
        (request, docs.as_resource())
    }

    #[test]
    fn test_layout_info_without_view() {
        let layout = layout(LayoutRegistration::new("test"));
        let (request, context) = request();

        let res = layout_info(&layout, &context, &request, "content").unwrap();
        assert!(res.starts_with("\n<!-- layout:\n"));
        assert!(res.contains("\"layout-factory\": \"None\""));
        assert!(res.contains("\"context-path\": \"http://localhost/docs/\""));
        assert!(res.contains("\"context\": \"context\""));
        assert!(res.contains("content</div>"));
    }

    #[test]
    fn test_layout_info_with_view() {
        let layout = layout(
            LayoutRegistration::new("test2").with_view(LayoutView::new("tests.View", |_, _| None)),
        );
        let (request, context) = request();

        let res = layout_info(&layout, &context, &request, "content").unwrap();
        assert!(res.contains("\"layout-factory\": \"tests.View\""));
    }

    #[test]
    fn test_layout_info_html_tag() {
        let layout = layout(LayoutRegistration::new("test"));
        let (request, context) = request();

        let res = layout_info(&layout, &context, &request, "<html lang=\"en\"><h1>text</h1></html>")
            .unwrap();
        assert!(res.contains("<html lang=\"en\" style=\"border: 2px solid #"));
        assert!(res.contains("title=\"test\"><h1>text</h1></html>"));
        assert!(!res.contains("<div style="));
    }

    #[test]
    fn test_layout_info_escapes_title() {
        let layout = layout(LayoutRegistration::new("a\"b<c>&d"));
        let (request, context) = request();

        let res = layout_info(&layout, &context, &request, "x").unwrap();
        assert!(res.contains("title=\"a&quot;b&lt;c&gt;&amp;d\">x</div>"));

        let res = layout_info(&layout, &context, &request, "<html><p>x</p></html>").unwrap();
        assert!(res.contains("title=\"a&quot;b&lt;c&gt;&amp;d\"><p>x</p></html>"));
    }

    #[test]
    fn test_metadata_key_order() {
        let layout = layout(LayoutRegistration::new("test").with_parent("."));
        let (request, context) = request();

        let res = layout_info(&layout, &context, &request, "x").unwrap();
        let name = res.find("\"name\"").unwrap();
        let parent = res.find("\"parent-layout\": \".\"").unwrap();
        let path = res.find("\"context-path\"").unwrap();
        assert!(name < parent && parent < path);
    }

    #[test]
    fn test_border_color_is_stable() {
        assert_eq!(border_color("test"), border_color("test"));
        assert!(border_color("test") <= 0xFF_FFFF);
    }
}
