//! Site file and layout settings

pub mod model;

pub use model::{LayoutDecl, LayoutSettings, RouteDecl, SiteConfig, TreeDecl, TypeDecl, parse_bool};
