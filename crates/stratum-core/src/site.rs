//! Sites loaded from a `stratum.toml` file
//!
//! A site bundles everything needed to wrap content: the frozen layout
//! registry, the layout settings and the resource tree.

use crate::config::{LayoutDecl, LayoutSettings, SiteConfig, TreeDecl};
use crate::error::{LayoutError, Result};
use crate::layout::{LayoutHook, LayoutRegistration, LayoutRegistry, LayoutRenderer, LayoutView};
use crate::request::Request;
use crate::resource::{ResourceNode, ResourceRef};
use crate::template::TemplateRenderer;
use crate::types::TypeTag;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Site {
    settings: LayoutSettings,
    registry: Arc<LayoutRegistry>,
    root: Arc<ResourceNode>,
}

impl Site {
    /// Load a site file; template paths resolve relative to its directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = SiteConfig::from_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let site = Self::from_config(config, base_dir)?;
        info!(
            path = %path.display(),
            layouts = site.registry.len(),
            "loaded site"
        );
        Ok(site)
    }

    pub fn from_config(config: SiteConfig, base_dir: &Path) -> Result<Self> {
        let mut builder = LayoutRegistry::builder();

        for decl in &config.types {
            builder.declare_type(
                decl.name.as_str(),
                decl.extends.iter().map(|s| TypeTag::new(s.as_str())),
            );
        }
        for route in &config.routes {
            builder.add_route(route.name.as_str(), route.use_global_views);
        }
        for (index, decl) in config.layouts.iter().enumerate() {
            builder.add_layout(registration(index, decl, base_dir)?);
        }

        let registry = Arc::new(builder.build()?);
        let root = build_tree(&config.tree);

        Ok(Self {
            settings: config.layout,
            registry,
            root,
        })
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Override the debug overlay flag from the site file
    pub fn set_debug(&mut self, debug: bool) {
        self.settings.debug = debug;
    }

    pub fn registry(&self) -> &Arc<LayoutRegistry> {
        &self.registry
    }

    pub fn root(&self) -> &Arc<ResourceNode> {
        &self.root
    }

    /// Resource at a `/`-separated path below the root
    pub fn find(&self, path: &str) -> Result<ResourceRef> {
        self.root
            .find(path)
            .map(|node| node.as_resource())
            .ok_or_else(|| LayoutError::ResourceNotFound(path.to_string()))
    }

    /// Request for `context`, optionally matched by a declared route
    pub fn request(&self, context: ResourceRef, route: Option<&str>) -> Result<Request> {
        let mut request = Request::new(self.root.as_resource(), context);
        if let Some(route) = route {
            let request_type = self
                .registry
                .route_request_type(route)
                .ok_or_else(|| LayoutError::RouteNotFound(route.to_string()))?;
            request.set_request_type(Some(request_type));
        }
        Ok(request)
    }

    pub fn renderer(&self, layout: impl Into<String>) -> LayoutRenderer {
        LayoutRenderer::new(layout, Arc::clone(&self.registry), self.settings.clone())
    }

    pub fn hook(&self) -> LayoutHook {
        LayoutHook::new(Arc::clone(&self.registry), self.settings.clone())
    }
}

fn registration(index: usize, decl: &LayoutDecl, base_dir: &Path) -> Result<LayoutRegistration> {
    let mut registration = LayoutRegistration::new(decl.name.as_str())
        .with_global_views(decl.use_global_views);

    if let Some(context) = &decl.context {
        registration = registration.with_context(context.as_str());
    }
    if let Some(root) = &decl.root {
        registration = registration.with_root(root.as_str());
    }
    if let Some(parent) = &decl.parent {
        registration = registration.with_parent(parent.as_str());
    }
    if let Some(route) = &decl.route {
        registration = registration.with_route(route.as_str());
    }

    if let Some(template) = &decl.template {
        let renderer = TemplateRenderer::from_file(&base_dir.join(template))?;
        registration = registration.with_renderer(Arc::new(renderer));
    } else if let Some(source) = &decl.source {
        let name = format!("layouts[{}]", index);
        registration =
            registration.with_renderer(Arc::new(TemplateRenderer::new(name, source.as_str())));
    }

    if let Some(data) = &decl.data {
        let label = format!("{}.data", display_name(&decl.name));
        registration = registration.with_view(LayoutView::from_data(label, data.clone()));
    }

    debug!(name = %decl.name, context = ?decl.context, "layout declared");
    Ok(registration)
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "<default>" } else { name }
}

fn build_tree(decl: &TreeDecl) -> Arc<ResourceNode> {
    let root = ResourceNode::root(decl.name.as_str(), decl.type_name.as_str());
    attach_children(&root, &decl.children);
    root
}

fn attach_children(node: &Arc<ResourceNode>, children: &[TreeDecl]) {
    for decl in children {
        let child = node.add_child(decl.name.as_str(), decl.type_name.as_str());
        attach_children(&child, &decl.children);
    }
}
