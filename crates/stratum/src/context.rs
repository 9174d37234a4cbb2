//! Loaded site and request setup for CLI commands

use crate::cli::Target;
use anyhow::{Context as _, Result};
use std::path::Path;
use stratum_core::site::Site;
use stratum_core::{Request, ResourceRef};
use tracing::debug;

/// Site loaded for a command run
pub struct Context {
    pub site: Site,
    pub verbose: bool,
}

impl Context {
    /// Load the site file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a template
    /// cannot be loaded, or the layout registrations are inconsistent.
    pub fn load(path: &Path, verbose: bool) -> Result<Self> {
        let site = Site::load(path)
            .with_context(|| format!("Failed to load site {}", path.display()))?;
        Ok(Self { site, verbose })
    }

    /// Resource and request addressed by `target`
    pub fn request(&self, target: &Target) -> Result<(ResourceRef, Request)> {
        let resource = self.site.find(&target.path)?;
        let request = self
            .site
            .request(resource.clone(), target.route.as_deref())?;
        debug!(path = %target.path, request_type = %request.effective_request_type(), "request prepared");
        Ok((resource, request))
    }
}
