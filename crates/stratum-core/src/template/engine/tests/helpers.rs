//! Shared test helpers for template engine tests

use crate::template::engine::TemplateContext;
use serde_json::json;

/// Scalar values only
pub(super) fn simple_context() -> TemplateContext {
    TemplateContext::new(json!({
        "title": "My Title",
        "count": 42,
        "price": 9.99,
        "enabled": true,
        "missing": null
    }))
}

/// Page data with a nested author list, the shape layout views produce
pub(super) fn nested_context() -> TemplateContext {
    TemplateContext::new(json!({
        "page": {
            "title": "Release notes",
            "lang": "en",
            "authors": [
                { "name": "John Doe", "email": "john@example.com" },
                { "name": "Jane Smith", "email": "jane@example.com" }
            ]
        },
        "content": "<p>body</p>"
    }))
}
