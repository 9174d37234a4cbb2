//! Helper functions for template rendering

use crate::template::error::TemplateError;
use serde_json::{Map, Value};

use super::TemplateContext;

/// Resolve a dotted key from JSON data
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(data, |current, part| current.as_object()?.get(part))
}

/// Stringify a JSON value for template output
///
/// `null` renders as an empty string.
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(TemplateError::ArrayInNonEachContext {
            key: key.to_string(),
        }),
        Value::Object(_) => Err(TemplateError::ObjectInPlaceholder {
            key: key.to_string(),
        }),
    }
}

/// Create a loop context with a variable binding
pub(crate) fn create_loop_context(
    base_data: &Value,
    var_name: &str,
    item: Value,
) -> TemplateContext {
    let mut object = base_data.as_object().cloned().unwrap_or_else(Map::new);
    object.insert(var_name.to_string(), item);
    TemplateContext::new(Value::Object(object))
}

/// Count backslashes immediately before a position
pub(crate) fn count_backslashes_before(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

/// Count newlines in text
pub(crate) fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
