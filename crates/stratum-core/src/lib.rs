// Core modules
pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod request;
pub mod resource;
pub mod site;
pub mod template;
pub mod types;

// Re-export commonly used types
pub use error::{LayoutError, Result};
pub use layout::{
    ChainLink, LayoutDescriptor, LayoutHook, LayoutPredicate, LayoutRegistration, LayoutRegistry,
    LayoutRegistryBuilder, LayoutRenderer, LayoutView, query_layout, resolve_layout_chain,
};
pub use render::{RenderError, Renderer, SystemContext};
pub use request::{LayoutData, Request};
pub use resource::{Resource, ResourceNode, ResourceRef, lineage};
pub use types::{TypeHierarchy, TypeTag};
