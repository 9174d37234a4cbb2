//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stratum")]
#[command(version, about = "Compose page layouts over a resource tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Site, resource and layout selection shared by `chain` and `render`
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Path to the site file (stratum.toml)
    pub site: PathBuf,

    /// Resource path inside the site tree
    #[arg(short, long, default_value = "/")]
    pub path: String,

    /// Layout name; the default layout is unnamed
    #[arg(short, long, default_value = "")]
    pub layout: String,

    /// Treat the request as matched by this route
    #[arg(short, long)]
    pub route: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the layout chain for a resource
    Chain {
        #[command(flatten)]
        target: Target,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wrap content in the layout chain of a resource
    Render {
        #[command(flatten)]
        target: Target,

        /// Content to wrap (reads stdin when neither this nor --content-file is given)
        #[arg(short, long, conflicts_with = "content_file")]
        content: Option<String>,

        /// File holding the content to wrap
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Mark each layout in the output
        #[arg(long, env = "STRATUM_DEBUG")]
        debug: bool,
    },

    /// List registered layouts
    Layouts {
        /// Path to the site file (stratum.toml)
        site: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
