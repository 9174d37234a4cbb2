//! Render command - wrap content in a resource's layouts

use crate::cli::Target;
use crate::context::Context;
use crate::output::print_raw;
use anyhow::{Context as _, Result};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Wrap content and print the result
///
/// Content comes from `--content`, `--content-file` or stdin, in that order.
pub fn run(
    target: Target,
    content: Option<String>,
    content_file: Option<PathBuf>,
    debug: bool,
    verbose: bool,
) -> Result<()> {
    let mut ctx = Context::load(&target.site, verbose)?;
    if debug {
        ctx.site.set_debug(true);
    }

    let content = read_content(content, content_file)?;
    let (resource, mut request) = ctx.request(&target)?;

    let wrapped = ctx
        .site
        .renderer(target.layout.as_str())
        .render(content, &resource, &mut request)?;
    debug!(bytes = wrapped.len(), "content wrapped");

    print_raw(&wrapped)?;
    Ok(())
}

fn read_content(content: Option<String>, content_file: Option<PathBuf>) -> Result<String> {
    if let Some(content) = content {
        return Ok(content);
    }
    if let Some(path) = content_file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read content from stdin")?;
    Ok(buf)
}
