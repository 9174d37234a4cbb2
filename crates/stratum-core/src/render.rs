//! Template rendering seam
//!
//! Layout resolution does not render anything itself. Each layout carries a
//! [`Renderer`], which receives the accumulated layout data and a
//! [`SystemContext`] describing where in the chain it is being applied.

use crate::request::{LayoutData, Request};
use crate::resource::ResourceRef;
use std::fmt;

/// Error produced by a renderer, propagated to callers unchanged
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// System values available to a renderer for one step of the fold
pub struct SystemContext<'a> {
    /// Active top-level view
    pub view: Option<&'a str>,
    /// Renderer being invoked
    pub renderer: &'a dyn Renderer,
    /// Resource at which the layout was found
    pub context: &'a ResourceRef,
    pub request: &'a Request,
    /// Content rendered so far
    pub content: &'a str,
    /// Same as `content`
    pub wrapped_content: &'a str,
    /// Content before any layout was applied
    pub original_content: &'a str,
}

impl fmt::Debug for SystemContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemContext")
            .field("view", &self.view)
            .field("renderer", &self.renderer.describe())
            .field("context", &self.context)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// Renders one layout around the content so far
pub trait Renderer: fmt::Debug + Send + Sync {
    fn render(
        &self,
        data: &LayoutData,
        system: &SystemContext<'_>,
        request: &Request,
    ) -> Result<String, RenderError>;

    /// Human readable description (template name, path, ...)
    fn describe(&self) -> String;
}
