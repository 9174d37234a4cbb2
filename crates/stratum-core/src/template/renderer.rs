//! [`Renderer`] backed by a placeholder template

use super::engine::{TemplateContext, TemplateEngine};
use crate::error::{LayoutError, Result};
use crate::render::{RenderError, Renderer, SystemContext};
use crate::request::{LayoutData, Request};
use crate::resource::resource_path;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Layout template rendered with [`TemplateEngine`]
///
/// The template sees the layout data merged over the system values:
///
/// | key                | value                                     |
/// |--------------------|-------------------------------------------|
/// | `content`          | content rendered so far                   |
/// | `wrapped_content`  | same as `content`                         |
/// | `original_content` | view output before any layout             |
/// | `view`             | active view name, or null                 |
/// | `renderer`         | this template's name                      |
/// | `context.name`     | name of the resource the layout matched at|
/// | `context.type`     | type tag of that resource                 |
/// | `context.path`     | slash separated path of that resource     |
/// | `context.url`      | URL of that resource                      |
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    name: String,
    source: String,
    engine: TemplateEngine,
}

impl TemplateRenderer {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            engine: TemplateEngine::new(),
        }
    }

    /// Load a template file; the path becomes the renderer name
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| LayoutError::TemplateInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(path.display().to_string(), source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn namespace(&self, data: &LayoutData, system: &SystemContext<'_>, request: &Request) -> Value {
        let mut namespace = json!({
            "content": system.content,
            "wrapped_content": system.wrapped_content,
            "original_content": system.original_content,
            "view": system.view,
            "renderer": system.renderer.describe(),
            "context": {
                "name": system.context.name(),
                "type": system.context.type_tag().as_str(),
                "path": resource_path(system.context),
                "url": request.resource_url(system.context),
            },
        });
        if let Value::Object(map) = &mut namespace {
            map.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        namespace
    }
}

impl Renderer for TemplateRenderer {
    fn render(
        &self,
        data: &LayoutData,
        system: &SystemContext<'_>,
        request: &Request,
    ) -> std::result::Result<String, RenderError> {
        let context = TemplateContext::new(self.namespace(data, system, request));
        self.engine
            .render(&self.source, &context)
            .map_err(|e| format!("{}: {}", self.name, e).into())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
