//! Template engine implementation

mod blocks;
mod helpers;

use crate::template::error::TemplateError;
use serde_json::Value;

use blocks::find_each_end;
use helpers::{
    count_backslashes_before, count_newlines, create_loop_context, resolve_key, stringify_value,
};

/// Parse each loop syntax: "items |item|" → (key, var_name)
fn parse_each_syntax(rest: &str, line: usize) -> Result<(&str, &str), TemplateError> {
    let malformed = |message: String| TemplateError::MalformedSyntax { message, line };

    let pipe_pos = rest
        .find('|')
        .ok_or_else(|| malformed(format!("Invalid each syntax: expected |var| in 'each {}'", rest)))?;
    let var_end = rest[pipe_pos + 1..]
        .find('|')
        .ok_or_else(|| malformed(format!("Invalid each syntax: unclosed |var| in 'each {}'", rest)))?;

    let key = rest[..pipe_pos].trim();
    let var_name = rest[pipe_pos + 1..pipe_pos + 1 + var_end].trim();
    Ok((key, var_name))
}

/// Template context holding JSON data for rendering
#[derive(Debug, Clone)]
pub struct TemplateContext {
    data: Value,
}

impl TemplateContext {
    /// Create a new template context from a JSON value
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Get the underlying JSON value
    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// Placeholder engine for layout templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let mut output = String::with_capacity(template.len());
        let mut line = 1;
        let mut pos = 0;

        while let Some(offset) = template[pos..].find("{{") {
            let start = pos + offset;

            // Text before the placeholder; each pair of backslashes is one literal backslash
            let backslashes = count_backslashes_before(&template[pos..], offset);
            let text = &template[pos..start - backslashes];
            output.push_str(text);
            line += count_newlines(text);
            for _ in 0..(backslashes / 2) {
                output.push('\\');
            }
            let escaped = backslashes % 2 == 1;

            let close = template[start + 2..].find("}}").ok_or_else(|| {
                TemplateError::MalformedSyntax {
                    message: if escaped {
                        "Unclosed escaped placeholder".to_string()
                    } else {
                        "Unclosed placeholder or each loop".to_string()
                    },
                    line,
                }
            })?;
            let raw = &template[start + 2..start + 2 + close];
            let tag_end = start + 2 + close + 2;

            if escaped {
                output.push_str("{{");
                output.push_str(raw);
                output.push_str("}}");
                line += count_newlines(raw);
                pos = tag_end;
                continue;
            }

            let expr = raw.trim();
            if let Some(rest) = expr.strip_prefix("each ") {
                let end = self.render_each(template, tag_end, rest, line, context, &mut output)?;
                line += count_newlines(&template[start..end]);
                pos = end;
            } else if expr.starts_with("/each") {
                return Err(TemplateError::MalformedSyntax {
                    message: "Unexpected {{/each}} without matching {{each}}".to_string(),
                    line,
                });
            } else {
                let value = resolve_key(context.data(), expr).ok_or_else(|| {
                    TemplateError::UndefinedKey {
                        key: expr.to_string(),
                        line,
                    }
                })?;
                output.push_str(&stringify_value(value, expr)?);
                line += count_newlines(raw);
                pos = tag_end;
            }
        }

        output.push_str(&template[pos..]);
        Ok(output)
    }

    /// Render an each loop whose body starts at `body_start`
    ///
    /// Returns the position just past the matching `{{/each}}`.
    fn render_each(
        &self,
        template: &str,
        body_start: usize,
        rest: &str,
        line: usize,
        context: &TemplateContext,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        let (key, var_name) = parse_each_syntax(rest, line)?;

        let (body_len, end_len) = find_each_end(&template[body_start..]).ok_or_else(|| {
            TemplateError::MalformedSyntax {
                message: format!("Unclosed each loop for key '{}'", key),
                line,
            }
        })?;
        let body = &template[body_start..body_start + body_len];

        let items = resolve_key(context.data(), key)
            .ok_or_else(|| TemplateError::UndefinedKey {
                key: key.to_string(),
                line,
            })?
            .as_array()
            .ok_or_else(|| TemplateError::MalformedSyntax {
                message: format!("Key '{}' is not an array", key),
                line,
            })?;

        for item in items {
            let loop_context = create_loop_context(context.data(), var_name, item.clone());
            output.push_str(&self.render(body, &loop_context)?);
        }

        Ok(body_start + body_len + end_len)
    }
}

/// Convenience function to render a template
pub fn render(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
mod tests;
