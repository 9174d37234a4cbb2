//! Resource tree
//!
//! Layouts are resolved against a tree of resources. The resolver only
//! climbs from a resource towards the root through [`Resource::parent`];
//! ownership of the tree flows top-down.

use crate::types::TypeTag;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Shared handle to a resource anywhere in the tree
pub type ResourceRef = Arc<dyn Resource>;

/// A node of the application's content tree
pub trait Resource: fmt::Debug + Send + Sync {
    /// Type used for layout dispatch
    fn type_tag(&self) -> TypeTag;

    /// Path segment of this resource (empty for the root)
    fn name(&self) -> &str;

    /// Parent resource, `None` at the root
    fn parent(&self) -> Option<ResourceRef>;
}

/// Iterate `resource` and its ancestors up to and including the root
pub fn lineage(resource: ResourceRef) -> Lineage {
    Lineage {
        next: Some(resource),
    }
}

/// Iterator returned by [`lineage`]
pub struct Lineage {
    next: Option<ResourceRef>,
}

impl Iterator for Lineage {
    type Item = ResourceRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

/// Slash separated path of `resource`, `/` for the root
///
/// Non-root resources get a trailing slash: `/docs/intro/`.
pub fn resource_path(resource: &ResourceRef) -> String {
    let mut segments: Vec<String> = lineage(Arc::clone(resource))
        .filter(|r| r.parent().is_some())
        .map(|r| r.name().to_string())
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    segments.reverse();
    format!("/{}/", segments.join("/"))
}

/// Concrete tree node owning its children
///
/// Children are held strongly, the parent only through a weak reference, so
/// dropping the root releases the whole tree.
pub struct ResourceNode {
    name: String,
    type_tag: TypeTag,
    parent: Weak<ResourceNode>,
    children: RwLock<Vec<Arc<ResourceNode>>>,
}

impl ResourceNode {
    /// Create a root node
    pub fn root(name: impl Into<String>, type_tag: impl Into<TypeTag>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            type_tag: type_tag.into(),
            parent: Weak::new(),
            children: RwLock::new(Vec::new()),
        })
    }

    /// Create a child of `self` and attach it
    pub fn add_child(
        self: &Arc<Self>,
        name: impl Into<String>,
        type_tag: impl Into<TypeTag>,
    ) -> Arc<Self> {
        let child = Arc::new(Self {
            name: name.into(),
            type_tag: type_tag.into(),
            parent: Arc::downgrade(self),
            children: RwLock::new(Vec::new()),
        });
        self.children
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&child));
        child
    }

    /// Snapshot of the direct children
    pub fn children(&self) -> Vec<Arc<ResourceNode>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Direct child by name
    pub fn child(&self, name: &str) -> Option<Arc<ResourceNode>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    /// Descendant at a `/`-separated path relative to this node
    ///
    /// Empty segments are ignored, so `""`, `"/"` and `"/docs/"` all work.
    pub fn find(self: &Arc<Self>, path: &str) -> Option<Arc<ResourceNode>> {
        let mut current = Arc::clone(self);
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Upcast to a shared trait object
    pub fn as_resource(self: &Arc<Self>) -> ResourceRef {
        Arc::clone(self) as ResourceRef
    }
}

impl Resource for ResourceNode {
    fn type_tag(&self) -> TypeTag {
        self.type_tag.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<ResourceRef> {
        self.parent.upgrade().map(|p| p as ResourceRef)
    }
}

impl fmt::Debug for ResourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceNode")
            .field("name", &self.name)
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}
