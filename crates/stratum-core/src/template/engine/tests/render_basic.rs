//! Placeholder substitution tests

use super::helpers::{nested_context, simple_context};
use super::*;
use serde_json::json;

#[test]
fn test_render_simple_placeholder() {
    let context = simple_context();
    let result = render("Title: {{title}}", &context).unwrap();
    assert_eq!(result, "Title: My Title");
}

#[test]
fn test_render_placeholder_with_spaces() {
    let context = simple_context();
    let result = render("<h1>{{ title }}</h1>", &context).unwrap();
    assert_eq!(result, "<h1>My Title</h1>");
}

#[test]
fn test_render_scalars() {
    let context = simple_context();
    let result = render("{{count}} {{price}} {{enabled}}", &context).unwrap();
    assert_eq!(result, "42 9.99 true");
}

#[test]
fn test_render_null_is_empty() {
    let context = simple_context();
    let result = render("[{{missing}}]", &context).unwrap();
    assert_eq!(result, "[]");
}

#[test]
fn test_render_dotted_key() {
    let context = nested_context();
    let result = render("{{page.title}} ({{page.lang}})", &context).unwrap();
    assert_eq!(result, "Release notes (en)");
}

#[test]
fn test_render_content_is_not_escaped() {
    let context = nested_context();
    let result = render("<main>{{ content }}</main>", &context).unwrap();
    assert_eq!(result, "<main><p>body</p></main>");
}

#[test]
fn test_render_without_placeholders() {
    let context = TemplateContext::new(json!({}));
    let template = "<html>\n  plain } { text\n</html>\n";
    assert_eq!(render(template, &context).unwrap(), template);
}

#[test]
fn test_engine_matches_free_function() {
    let context = simple_context();
    let engine = TemplateEngine::new();
    assert_eq!(
        engine.render("{{title}}", &context).unwrap(),
        render("{{title}}", &context).unwrap()
    );
}
