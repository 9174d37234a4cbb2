//! Layouts command - list registered layouts

use super::chain::display_name;
use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use stratum_core::layout::LayoutIntrospection;

pub fn run(site: PathBuf, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::load(&site, verbose)?;
    let layouts: Vec<&LayoutIntrospection> = ctx
        .site
        .registry()
        .layouts()
        .iter()
        .map(|layout| layout.introspection())
        .collect();

    if json {
        return print_json(&layouts);
    }

    if layouts.is_empty() {
        println!("{} No layouts registered", "!".yellow());
        return Ok(());
    }

    for layout in &layouts {
        let mut line = format!(
            "{} {} {}",
            display_name(&layout.name).bold(),
            "context:".dimmed(),
            layout.context
        );
        if let Some(parent) = &layout.parent {
            line.push_str(&format!(" {} {}", "parent:".dimmed(), display_parent(parent)));
        }
        if let Some(route) = &layout.route_name {
            line.push_str(&format!(" {} {}", "route:".dimmed(), route));
        }
        println!("{}", line);

        if ctx.verbose {
            println!("     root:     {}", layout.root);
            println!(
                "     renderer: {}",
                layout.renderer.as_deref().unwrap_or("-")
            );
            println!("     view:     {}", layout.view.as_deref().unwrap_or("-"));
        }
    }

    println!("\n{} {} layout(s)", "✓".green(), layouts.len());
    Ok(())
}

fn display_parent(parent: &str) -> &str {
    if parent == "." { "(default)" } else { parent }
}
