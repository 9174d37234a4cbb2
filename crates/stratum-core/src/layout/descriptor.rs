//! Registered layout descriptors

use crate::render::Renderer;
use crate::request::{LayoutData, Request};
use crate::resource::ResourceRef;
use crate::types::TypeTag;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

type ViewFn = dyn Fn(&ResourceRef, &Request) -> Option<LayoutData> + Send + Sync;

/// Callable supplying extra template data for a layout
#[derive(Clone)]
pub struct LayoutView {
    label: String,
    func: Arc<ViewFn>,
}

impl LayoutView {
    /// Wrap a callable; `label` identifies it in debug output
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ResourceRef, &Request) -> Option<LayoutData> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// A view that always returns the same data
    pub fn from_data(label: impl Into<String>, data: LayoutData) -> Self {
        Self::new(label, move |_, _| Some(data.clone()))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call(&self, context: &ResourceRef, request: &Request) -> Option<LayoutData> {
        (self.func)(context, request)
    }
}

impl fmt::Debug for LayoutView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutView")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Registration details kept for debugging and listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutIntrospection {
    pub name: String,
    /// Parent exactly as declared (`"."` and `""` are kept as written)
    pub parent: Option<String>,
    pub context: TypeTag,
    pub root: TypeTag,
    pub route_name: Option<String>,
    pub renderer: Option<String>,
    pub use_global_views: bool,
    pub view: Option<String>,
}

/// A registered layout
///
/// Immutable once registered; shared between requests.
#[derive(Debug)]
pub struct LayoutDescriptor {
    name: String,
    parent: Option<String>,
    view: Option<LayoutView>,
    renderer: Option<Arc<dyn Renderer>>,
    introspection: LayoutIntrospection,
}

impl LayoutDescriptor {
    pub(crate) fn new(
        name: String,
        parent: Option<String>,
        view: Option<LayoutView>,
        renderer: Option<Arc<dyn Renderer>>,
        introspection: LayoutIntrospection,
    ) -> Self {
        Self {
            name,
            parent,
            view,
            renderer,
            introspection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the layout wrapping this one; `None` ends the chain
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn view(&self) -> Option<&LayoutView> {
        self.view.as_ref()
    }

    pub fn renderer(&self) -> Option<&Arc<dyn Renderer>> {
        self.renderer.as_ref()
    }

    pub fn introspection(&self) -> &LayoutIntrospection {
        &self.introspection
    }
}

/// Normalize a declared parent name
///
/// Missing or empty means no parent, `"."` names the default (unnamed)
/// layout.
pub fn normalize_parent(parent: Option<&str>) -> Option<String> {
    match parent {
        None | Some("") => None,
        Some(".") => Some(String::new()),
        Some(name) => Some(name.to_string()),
    }
}
