//! Wrapping rendered content in its layout chain

use super::chain::{ChainLink, resolve_layout_chain};
use super::debug::layout_info;
use super::registry::LayoutRegistry;
use crate::config::LayoutSettings;
use crate::error::{LayoutError, Result};
use crate::render::SystemContext;
use crate::request::{LayoutData, Request};
use crate::resource::ResourceRef;
use std::sync::Arc;
use tracing::{debug, warn};

/// Applies the chain of a named layout around view output
#[derive(Debug, Clone)]
pub struct LayoutRenderer {
    layout: String,
    registry: Arc<LayoutRegistry>,
    settings: LayoutSettings,
}

impl LayoutRenderer {
    pub fn new(
        layout: impl Into<String>,
        registry: Arc<LayoutRegistry>,
        settings: LayoutSettings,
    ) -> Self {
        Self {
            layout: layout.into(),
            registry,
            settings,
        }
    }

    /// Name of the layout this renderer starts from
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Wrap `content` rendered for `context` in the layout chain
    ///
    /// Layouts are applied innermost first, each one wrapping the output of
    /// the previous one. Data returned by layout views is merged into the
    /// request's layout data and stays there after the call.
    ///
    /// Returns `content` unchanged when no layout matches.
    ///
    /// # Errors
    ///
    /// Renderer failures are returned as [`LayoutError::Render`];
    /// a matched layout without renderer is [`LayoutError::MissingRenderer`].
    pub fn render(
        &self,
        content: String,
        context: &ResourceRef,
        request: &mut Request,
    ) -> Result<String> {
        let root = Arc::clone(request.root());
        let chain = resolve_layout_chain(&self.registry, &*root, context, request, &self.layout);

        if chain.is_empty() {
            warn!(
                layout = %self.layout,
                context = %context.type_tag(),
                "can't find layout '{}' for context '{}'",
                self.layout,
                context.name()
            );
            return Ok(content);
        }

        debug!(layout = %self.layout, depth = chain.len(), "wrapping content");

        let mut data = request.take_layout_data();
        let result = self.apply_chain(&chain, content, &mut data, request);
        request.restore_layout_data(data);
        result
    }

    fn apply_chain(
        &self,
        chain: &[ChainLink],
        content: String,
        data: &mut LayoutData,
        request: &Request,
    ) -> Result<String> {
        let original = content.clone();
        let mut content = content;

        for link in chain {
            if let Some(view) = link.layout.view()
                && let Some(extra) = view.call(&link.context, request)
            {
                data.extend(extra);
            }

            let renderer = link
                .layout
                .renderer()
                .ok_or_else(|| LayoutError::MissingRenderer(link.layout.name().to_string()))?;

            let system = SystemContext {
                view: request.view(),
                renderer: renderer.as_ref(),
                context: &link.context,
                request,
                content: &content,
                wrapped_content: &content,
                original_content: &original,
            };
            let rendered = renderer
                .render(data, &system, request)
                .map_err(LayoutError::Render)?;

            content = if self.settings.debug {
                layout_info(&link.layout, &link.context, request, &rendered)?
            } else {
                rendered
            };
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutRegistration, LayoutView};
    use crate::render::{RenderError, Renderer};
    use crate::resource::ResourceNode;
    use serde_json::json;

    /// Renders `<name data-keys>content</name>`
    #[derive(Debug)]
    struct TagRenderer(&'static str);

    impl Renderer for TagRenderer {
        fn render(
            &self,
            data: &LayoutData,
            system: &SystemContext<'_>,
            _request: &Request,
        ) -> std::result::Result<String, RenderError> {
            let keys: Vec<&str> = data.keys().map(String::as_str).collect();
            Ok(format!(
                "<{0} data=\"{1}\">{2}</{0}>",
                self.0,
                keys.join(","),
                system.content
            ))
        }

        fn describe(&self) -> String {
            self.0.to_string()
        }
    }

    #[derive(Debug)]
    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(
            &self,
            _data: &LayoutData,
            _system: &SystemContext<'_>,
            _request: &Request,
        ) -> std::result::Result<String, RenderError> {
            Err("template exploded".into())
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn data(key: &str, value: &str) -> LayoutData {
        let mut data = LayoutData::new();
        data.insert(key.to_string(), json!(value));
        data
    }

    fn renderer(builder: crate::layout::LayoutRegistryBuilder, debug: bool) -> LayoutRenderer {
        let registry = Arc::new(builder.build().unwrap());
        LayoutRenderer::new("test", registry, LayoutSettings { debug })
    }

    #[test]
    fn test_no_layout_returns_content() {
        let renderer = renderer(LayoutRegistry::builder(), false);
        let root = ResourceNode::root("", "root");
        let mut request = Request::new(root.as_resource(), root.as_resource());

        let res = renderer
            .render("View: test".to_string(), &root.as_resource(), &mut request)
            .unwrap();
        assert_eq!(res, "View: test");
    }

    #[test]
    fn test_nested_wrapping_and_data_merge() {
        let mut builder = LayoutRegistry::builder();
        builder.add_layout(
            LayoutRegistration::new("test")
                .with_parent(".")
                .with_renderer(Arc::new(TagRenderer("div")))
                .with_view(LayoutView::from_data("inner", data("inner", "1"))),
        );
        builder.add_layout(
            LayoutRegistration::new("")
                .with_context("root")
                .with_renderer(Arc::new(TagRenderer("html")))
                .with_view(LayoutView::from_data("outer", data("outer", "2"))),
        );
        let renderer = renderer(builder, false);

        let root = ResourceNode::root("", "root");
        let page = root.add_child("page", "context");
        let mut request = Request::new(root.as_resource(), page.as_resource());
        request.set_layout_data([("preset", "0")]);

        let res = renderer
            .render("body".to_string(), &page.as_resource(), &mut request)
            .unwrap();
        assert_eq!(
            res,
            "<html data=\"inner,outer,preset\"><div data=\"inner,preset\">body</div></html>"
        );
        assert_eq!(request.layout_data().len(), 3);
    }

    #[test]
    fn test_later_view_overrides_key() {
        let mut builder = LayoutRegistry::builder();
        builder.add_layout(
            LayoutRegistration::new("test")
                .with_parent("base")
                .with_renderer(Arc::new(TagRenderer("div")))
                .with_view(LayoutView::from_data("a", data("title", "inner"))),
        );
        builder.add_layout(
            LayoutRegistration::new("base")
                .with_renderer(Arc::new(TagRenderer("div")))
                .with_view(LayoutView::from_data("b", data("title", "outer"))),
        );
        let renderer = renderer(builder, false);

        let root = ResourceNode::root("", "root");
        let mut request = Request::new(root.as_resource(), root.as_resource());
        renderer
            .render("x".to_string(), &root.as_resource(), &mut request)
            .unwrap();
        assert_eq!(request.layout_data()["title"], json!("outer"));
    }

    #[test]
    fn test_missing_renderer() {
        let mut builder = LayoutRegistry::builder();
        builder.add_layout(LayoutRegistration::new("test"));
        let renderer = renderer(builder, false);

        let root = ResourceNode::root("", "root");
        let mut request = Request::new(root.as_resource(), root.as_resource());
        let err = renderer
            .render("x".to_string(), &root.as_resource(), &mut request)
            .unwrap_err();
        assert!(matches!(err, LayoutError::MissingRenderer(ref n) if n == "test"));
    }

    #[test]
    fn test_render_error_is_propagated_unchanged() {
        let mut builder = LayoutRegistry::builder();
        builder.add_layout(LayoutRegistration::new("test").with_renderer(Arc::new(FailingRenderer)));
        let renderer = renderer(builder, false);

        let root = ResourceNode::root("", "root");
        let mut request = Request::new(root.as_resource(), root.as_resource());
        request.set_layout_data([("kept", true)]);
        let err = renderer
            .render("x".to_string(), &root.as_resource(), &mut request)
            .unwrap_err();

        assert_eq!(err.to_string(), "template exploded");
        assert!(request.layout_data().contains_key("kept"));
    }

    #[test]
    fn test_debug_overlay() {
        let mut builder = LayoutRegistry::builder();
        builder.add_layout(
            LayoutRegistration::new("test")
                .with_renderer(Arc::new(TagRenderer("div")))
                .with_view(LayoutView::new("View", |_, _| None)),
        );
        let renderer = renderer(builder, true);

        let root = ResourceNode::root("", "root");
        let mut request = Request::new(root.as_resource(), root.as_resource());
        let res = renderer
            .render("<h1>text</h1>".to_string(), &root.as_resource(), &mut request)
            .unwrap();

        assert!(res.contains("<!-- layout:"));
        assert!(res.contains("<h1>text</h1>"));
        assert!(res.contains("\"layout-factory\": \"View\""));
    }
}
