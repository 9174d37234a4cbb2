//! Error handling tests

use super::helpers::{nested_context, simple_context};
use super::*;
use serde_json::json;

#[test]
fn test_error_undefined_key() {
    let context = simple_context();
    match render("Value: {{nonexistent}}", &context) {
        Err(TemplateError::UndefinedKey { key, line }) => {
            assert_eq!(key, "nonexistent");
            assert_eq!(line, 1);
        }
        other => panic!("Expected UndefinedKey, got {:?}", other),
    }
}

#[test]
fn test_error_line_number() {
    let context = simple_context();
    match render("<html>\n<body>\n{{ nonexistent }}\n</html>", &context) {
        Err(TemplateError::UndefinedKey { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected UndefinedKey, got {:?}", other),
    }
}

#[test]
fn test_error_undefined_nested_key() {
    let context = nested_context();
    match render("{{page.nonexistent}}", &context) {
        Err(TemplateError::UndefinedKey { key, .. }) => assert_eq!(key, "page.nonexistent"),
        other => panic!("Expected UndefinedKey, got {:?}", other),
    }
}

#[test]
fn test_error_array_in_placeholder() {
    let context = nested_context();
    match render("{{page.authors}}", &context) {
        Err(TemplateError::ArrayInNonEachContext { key }) => assert_eq!(key, "page.authors"),
        other => panic!("Expected ArrayInNonEachContext, got {:?}", other),
    }
}

#[test]
fn test_error_object_in_placeholder() {
    let context = nested_context();
    match render("{{page}}", &context) {
        Err(TemplateError::ObjectInPlaceholder { key }) => assert_eq!(key, "page"),
        other => panic!("Expected ObjectInPlaceholder, got {:?}", other),
    }
}

#[test]
fn test_error_unclosed_placeholder() {
    let context = simple_context();
    match render("{{title", &context) {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("Unclosed placeholder"));
        }
        other => panic!("Expected MalformedSyntax, got {:?}", other),
    }
}

#[test]
fn test_error_unclosed_each() {
    let context = nested_context();
    match render("{{each page.authors |a|}}{{a.name}}", &context) {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("Unclosed each loop for key 'page.authors'"));
        }
        other => panic!("Expected MalformedSyntax, got {:?}", other),
    }
}

#[test]
fn test_error_stray_end() {
    let context = simple_context();
    match render("text{{/each}}", &context) {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("without matching"));
        }
        other => panic!("Expected MalformedSyntax, got {:?}", other),
    }
}

#[test]
fn test_error_each_without_variable() {
    let context = nested_context();
    let result = render("{{each page.authors}}x{{/each}}", &context);
    assert!(matches!(result, Err(TemplateError::MalformedSyntax { .. })));
}

#[test]
fn test_error_each_over_scalar() {
    let context = TemplateContext::new(json!({ "n": 1 }));
    match render("{{each n |i|}}{{i}}{{/each}}", &context) {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("not an array"));
        }
        other => panic!("Expected MalformedSyntax, got {:?}", other),
    }
}

#[test]
fn test_error_display() {
    let err = TemplateError::UndefinedKey {
        key: "title".to_string(),
        line: 2,
    };
    assert!(err.to_string().contains("title"));
    assert!(err.to_string().contains('2'));
}
