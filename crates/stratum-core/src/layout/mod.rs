//! Layout registration, chain resolution and content wrapping

pub mod chain;
pub mod debug;
pub mod descriptor;
pub mod hook;
pub mod registry;
pub mod wrap;

pub use chain::{ChainLink, resolve_layout_chain};
pub use debug::{LAYOUT_COMMENT_PREFIX, layout_info};
pub use descriptor::{LayoutDescriptor, LayoutIntrospection, LayoutView, normalize_parent};
pub use hook::{LayoutHook, LayoutPredicate};
pub use registry::{LayoutRegistration, LayoutRegistry, LayoutRegistryBuilder, query_layout};
pub use wrap::LayoutRenderer;
