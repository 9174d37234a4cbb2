//! Chain command - show which layouts wrap a resource

use crate::cli::Target;
use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use stratum_core::{ChainLink, Request, resolve_layout_chain};

#[derive(Debug, Serialize)]
struct LinkReport {
    name: String,
    parent: Option<String>,
    context: String,
    context_path: String,
    renderer: Option<String>,
    view: Option<String>,
}

impl LinkReport {
    fn new(link: &ChainLink, request: &Request) -> Self {
        let intr = link.layout.introspection();
        Self {
            name: link.layout.name().to_string(),
            parent: link.layout.parent().map(str::to_owned),
            context: link.context.type_tag().to_string(),
            context_path: request.resource_url(&link.context),
            renderer: intr.renderer.clone(),
            view: intr.view.clone(),
        }
    }
}

/// Print the layout chain, innermost layout first
pub fn run(target: Target, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::load(&target.site, verbose)?;
    let (resource, request) = ctx.request(&target)?;

    let root = ctx.site.root();
    let chain = resolve_layout_chain(ctx.site.registry(), &**root, &resource, &request, &target.layout);
    let report: Vec<LinkReport> = chain
        .iter()
        .map(|link| LinkReport::new(link, &request))
        .collect();

    if json {
        return print_json(&report);
    }

    if report.is_empty() {
        println!(
            "{} No layout '{}' for {}",
            "!".yellow(),
            target.layout,
            target.path
        );
        return Ok(());
    }

    for (depth, link) in report.iter().enumerate() {
        println!(
            "{} {} {} {}",
            format!("{}.", depth + 1).dimmed(),
            display_name(&link.name).bold(),
            "@".dimmed(),
            link.context_path
        );
        if ctx.verbose {
            println!("     context:  {}", link.context);
            println!(
                "     renderer: {}",
                link.renderer.as_deref().unwrap_or("-")
            );
            println!("     view:     {}", link.view.as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}

/// Printable name of a layout; the default layout has none
pub(crate) fn display_name(name: &str) -> String {
    if name.is_empty() {
        "(default)".to_string()
    } else {
        name.to_string()
    }
}
