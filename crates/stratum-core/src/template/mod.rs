//! Template module - placeholder renderer for layout templates
//!
//! Layout templates are plain text with placeholders filled from the layout
//! data and the system values of the current fold step (`content`,
//! `wrapped_content`, `original_content`, `view`, `context`, `renderer`).
//!
//! ## Syntax
//!
//! - Basic placeholders: `{{key}}` or `{{ key }}` (spaces optional)
//! - Nested access: `{{context.url}}`
//! - List iteration: `{{each items |item|}} ... {{/each}}`
//! - Escape sequences: `\{{literal}}`
//!
//! Values are substituted verbatim; no HTML escaping is applied.

pub mod engine;
pub mod error;
pub mod renderer;

pub use engine::{TemplateContext, TemplateEngine, render};
pub use error::TemplateError;
pub use renderer::TemplateRenderer;
