//! Layout registration and most-specific lookup
//!
//! Registrations are collected by [`LayoutRegistryBuilder`] during startup
//! and frozen into a read-only [`LayoutRegistry`] by
//! [`LayoutRegistryBuilder::build`]. A lookup is keyed on
//! (root type, request type, context type, name); each type is tried from
//! most to least specific through the [`TypeHierarchy`].

use super::descriptor::{LayoutDescriptor, LayoutIntrospection, LayoutView, normalize_parent};
use crate::error::{LayoutError, Result};
use crate::render::Renderer;
use crate::request::Request;
use crate::resource::{Resource, ResourceRef, lineage};
use crate::types::{TypeHierarchy, TypeTag};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// One layout registration waiting for [`LayoutRegistryBuilder::build`]
#[derive(Debug, Clone)]
pub struct LayoutRegistration {
    pub name: String,
    /// Context type; `None` registers for any resource
    pub context: Option<TypeTag>,
    /// Root type; `None` registers for any root
    pub root: Option<TypeTag>,
    /// Declared parent (`"."` is the default layout)
    pub parent: Option<String>,
    pub renderer: Option<Arc<dyn Renderer>>,
    /// Only apply to requests matched by this route
    pub route_name: Option<String>,
    /// Apply to every request type, overriding `route_name`
    pub use_global_views: bool,
    pub view: Option<LayoutView>,
}

impl LayoutRegistration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: None,
            root: None,
            parent: None,
            renderer: None,
            route_name: None,
            use_global_views: true,
            view: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<TypeTag>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<TypeTag>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_route(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    pub fn with_global_views(mut self, use_global_views: bool) -> Self {
        self.use_global_views = use_global_views;
        self
    }

    pub fn with_view(mut self, view: LayoutView) -> Self {
        self.view = Some(view);
        self
    }
}

impl Default for LayoutRegistration {
    fn default() -> Self {
        Self::new("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LayoutKey {
    root: TypeTag,
    request: TypeTag,
    context: TypeTag,
    name: String,
}

/// Collects types, routes and layouts before the registry is frozen
#[derive(Debug, Default)]
pub struct LayoutRegistryBuilder {
    types: TypeHierarchy,
    routes: Vec<String>,
    pending: Vec<LayoutRegistration>,
}

impl LayoutRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type and its supertypes
    pub fn declare_type(
        &mut self,
        tag: impl Into<TypeTag>,
        supertypes: impl IntoIterator<Item = TypeTag>,
    ) -> &mut Self {
        self.types.declare(tag.into(), supertypes);
        self
    }

    /// Declare a route; its requests get the type `route:<name>`
    ///
    /// With `use_global_views` the route type extends `request`, so layouts
    /// keyed on plain requests also match routed requests. Otherwise only
    /// route layouts and layouts registered for any request do.
    pub fn add_route(&mut self, name: impl Into<String>, use_global_views: bool) -> &mut Self {
        let name = name.into();
        let supertypes = if use_global_views {
            vec![TypeTag::REQUEST]
        } else {
            Vec::new()
        };
        self.types.declare(TypeTag::route(&name), supertypes);
        if !self.routes.contains(&name) {
            self.routes.push(name);
        }
        self
    }

    /// Queue a layout registration
    pub fn add_layout(&mut self, registration: LayoutRegistration) -> &mut Self {
        self.pending.push(registration);
        self
    }

    /// Resolve pending registrations and freeze the registry
    ///
    /// # Errors
    ///
    /// - [`LayoutError::LayoutConflict`] when two registrations share
    ///   (name, context, route)
    /// - [`LayoutError::RouteNotFound`] when a registration names an
    ///   undeclared route
    pub fn build(self) -> Result<LayoutRegistry> {
        let mut index = HashMap::new();
        let mut layouts = Vec::with_capacity(self.pending.len());
        let mut discriminators = HashSet::new();

        for registration in self.pending {
            let context = registration.context.clone().unwrap_or(TypeTag::ANY);
            let root = registration.root.clone().unwrap_or(TypeTag::ANY);

            let discriminator = (
                registration.name.clone(),
                context.clone(),
                registration.route_name.clone(),
            );
            if !discriminators.insert(discriminator) {
                return Err(LayoutError::LayoutConflict {
                    name: registration.name,
                    context,
                });
            }

            let mut request = TypeTag::REQUEST;
            if let Some(route_name) = &registration.route_name {
                if !self.routes.contains(route_name) {
                    return Err(LayoutError::RouteNotFound(route_name.clone()));
                }
                request = TypeTag::route(route_name);
            }
            if registration.use_global_views {
                request = TypeTag::ANY;
            }

            let introspection = LayoutIntrospection {
                name: registration.name.clone(),
                parent: registration.parent.clone(),
                context: context.clone(),
                root: root.clone(),
                route_name: registration.route_name.clone(),
                renderer: registration.renderer.as_ref().map(|r| r.describe()),
                use_global_views: registration.use_global_views,
                view: registration.view.as_ref().map(|v| v.label().to_string()),
            };

            let descriptor = Arc::new(LayoutDescriptor::new(
                registration.name.clone(),
                normalize_parent(registration.parent.as_deref()),
                registration.view,
                registration.renderer,
                introspection,
            ));

            let key = LayoutKey {
                root,
                request,
                context,
                name: registration.name,
            };
            if index.insert(key, Arc::clone(&descriptor)).is_some() {
                debug!(layout = %descriptor.name(), "layout registration overrides an earlier one");
            }
            layouts.push(descriptor);
        }

        debug!(count = layouts.len(), "layout registry built");

        Ok(LayoutRegistry {
            types: self.types,
            routes: self.routes,
            index,
            layouts,
        })
    }
}

/// Frozen, read-only layout registry
#[derive(Debug)]
pub struct LayoutRegistry {
    types: TypeHierarchy,
    routes: Vec<String>,
    index: HashMap<LayoutKey, Arc<LayoutDescriptor>>,
    layouts: Vec<Arc<LayoutDescriptor>>,
}

impl LayoutRegistry {
    pub fn builder() -> LayoutRegistryBuilder {
        LayoutRegistryBuilder::new()
    }

    pub fn types(&self) -> &TypeHierarchy {
        &self.types
    }

    /// All registered layouts in registration order
    pub fn layouts(&self) -> &[Arc<LayoutDescriptor>] {
        &self.layouts
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Request type for a declared route
    pub fn route_request_type(&self, route_name: &str) -> Option<TypeTag> {
        self.routes
            .iter()
            .any(|r| r == route_name)
            .then(|| TypeTag::route(route_name))
    }

    /// Most specific layout registered under `name` for the given types
    ///
    /// The root type dominates, then the request type, then the context
    /// type: the first key present when iterating their resolution orders
    /// in that nesting wins.
    pub fn lookup(
        &self,
        root: &TypeTag,
        request: &TypeTag,
        context: &TypeTag,
        name: &str,
    ) -> Option<Arc<LayoutDescriptor>> {
        let roots = self.types.resolution_order(root);
        let requests = self.types.resolution_order(request);
        let contexts = self.types.resolution_order(context);
        self.lookup_ordered(&roots, &requests, &contexts, name)
    }

    fn lookup_ordered(
        &self,
        roots: &[TypeTag],
        requests: &[TypeTag],
        contexts: &[TypeTag],
        name: &str,
    ) -> Option<Arc<LayoutDescriptor>> {
        for root in roots {
            for request in requests {
                for context in contexts {
                    let key = LayoutKey {
                        root: root.clone(),
                        request: request.clone(),
                        context: context.clone(),
                        name: name.to_string(),
                    };
                    if let Some(descriptor) = self.index.get(&key) {
                        return Some(Arc::clone(descriptor));
                    }
                }
            }
        }
        None
    }

    /// Find the layout `name` for `resource` or its nearest ancestor
    ///
    /// Returns the descriptor together with the ancestor it matched at.
    pub fn query_layout(
        &self,
        root: &dyn Resource,
        resource: &ResourceRef,
        request: &Request,
        name: &str,
    ) -> Option<(Arc<LayoutDescriptor>, ResourceRef)> {
        let roots = self.types.resolution_order(&root.type_tag());
        let requests = self
            .types
            .resolution_order(&request.effective_request_type());

        lineage(Arc::clone(resource)).find_map(|ancestor| {
            let contexts = self.types.resolution_order(&ancestor.type_tag());
            self.lookup_ordered(&roots, &requests, &contexts, name)
                .map(|descriptor| (descriptor, ancestor))
        })
    }
}

/// Find the layout `name` for `resource` or its nearest ancestor
pub fn query_layout(
    registry: &LayoutRegistry,
    root: &dyn Resource,
    resource: &ResourceRef,
    request: &Request,
    name: &str,
) -> Option<(Arc<LayoutDescriptor>, ResourceRef)> {
    registry.query_layout(root, resource, request, name)
}
