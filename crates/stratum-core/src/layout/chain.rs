//! Layout chain resolution
//!
//! Starting from a layout name and a resource, follow the parent pointers
//! of the matched layouts while searching the resource lineage for each
//! parent. When a parent name was already matched at some resource, the
//! search for it restarts one level above that resource, so same-named
//! layouts registered at different depths nest instead of looping.

use super::descriptor::LayoutDescriptor;
use super::registry::LayoutRegistry;
use crate::request::Request;
use crate::resource::{Resource, ResourceRef};
use std::collections::HashMap;
use std::sync::Arc;

/// One layout of a resolved chain and the resource it was found at
#[derive(Debug, Clone)]
pub struct ChainLink {
    pub layout: Arc<LayoutDescriptor>,
    pub context: ResourceRef,
}

/// Resolve the chain of layouts to apply, innermost first
///
/// Returns an empty chain when `layout_name` matches nothing. A parent that
/// matches nothing ends the chain early.
pub fn resolve_layout_chain(
    registry: &LayoutRegistry,
    root: &dyn Resource,
    resource: &ResourceRef,
    request: &Request,
    layout_name: &str,
) -> Vec<ChainLink> {
    let mut chain = Vec::new();

    let Some((mut layout, layout_context)) =
        registry.query_layout(root, resource, request, layout_name)
    else {
        return chain;
    };

    let mut contexts: HashMap<String, ResourceRef> = HashMap::new();
    contexts.insert(layout_name.to_string(), Arc::clone(&layout_context));
    chain.push(ChainLink {
        layout: Arc::clone(&layout),
        context: layout_context,
    });

    while let Some(parent_name) = layout.parent().map(str::to_owned) {
        let search_from = match contexts.get(&parent_name) {
            Some(seen) => match seen.parent() {
                Some(above) => above,
                // already matched at the root, nothing left above it
                None => break,
            },
            None => Arc::clone(resource),
        };

        let Some((parent, parent_context)) =
            registry.query_layout(root, &search_from, request, &parent_name)
        else {
            break;
        };

        contexts.insert(parent.name().to_string(), Arc::clone(&parent_context));
        chain.push(ChainLink {
            layout: Arc::clone(&parent),
            context: parent_context,
        });
        layout = parent;
    }

    chain
}
