//! Request lifecycle integration
//!
//! A [`LayoutPredicate`] attached to a view records which layout the view
//! wants; after the view ran, [`LayoutHook::handle`] wraps the response body
//! in that layout.

use super::registry::LayoutRegistry;
use super::wrap::LayoutRenderer;
use crate::config::LayoutSettings;
use crate::error::Result;
use crate::request::Request;
use std::sync::Arc;

/// View predicate selecting a layout for matched requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPredicate {
    layout: String,
}

impl LayoutPredicate {
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
        }
    }

    pub fn text(&self) -> String {
        format!("layout = {}", self.layout)
    }

    /// Record the layout on the request; never rejects a request
    pub fn matches(&self, request: &mut Request) -> bool {
        request.select_layout(self.layout.clone());
        true
    }
}

/// Wraps response bodies of requests that selected a layout
#[derive(Debug, Clone)]
pub struct LayoutHook {
    registry: Arc<LayoutRegistry>,
    settings: LayoutSettings,
}

impl LayoutHook {
    pub fn new(registry: Arc<LayoutRegistry>, settings: LayoutSettings) -> Self {
        Self { registry, settings }
    }

    /// Post-process the body produced by the main view
    ///
    /// Bodies of requests without a selected layout (or with an empty
    /// layout name) pass through untouched.
    pub fn handle(&self, request: &mut Request, body: String) -> Result<String> {
        let Some(layout) = request
            .selected_layout()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            return Ok(body);
        };

        let context = Arc::clone(request.context());
        LayoutRenderer::new(layout, Arc::clone(&self.registry), self.settings.clone())
            .render(body, &context, request)
    }
}
