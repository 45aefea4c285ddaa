//! # resumark CLI
//!
//! Command-line interface for rendering and paginating resumark documents.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resumark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "resumark.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter resume and configuration
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Render a resume to HTML
    Render {
        /// Markdown source
        file: PathBuf,

        /// Avatar image used for local @avatar{…} references
        #[arg(long)]
        avatar: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the result in a complete preview page
        #[arg(long)]
        standalone: bool,
    },

    /// Highlight the source as the live editor shows it
    Highlight {
        /// Markdown source
        file: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the column widths used for @flex rows
    Columns {
        /// Markdown source
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show how the rendered blocks split into print pages
    Paginate {
        /// Markdown source
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export a print-ready HTML document
    Export {
        /// Markdown source
        file: PathBuf,

        /// Avatar image used for local @avatar{…} references
        #[arg(long)]
        avatar: Option<String>,

        /// Output path (defaults to the source path with an .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Render {
            file,
            avatar,
            output,
            standalone,
        } => {
            let opts = commands::RenderOptions {
                avatar,
                output,
                standalone,
            };
            commands::render_document(&cli.config, &file, opts)
        }
        Commands::Highlight { file, output } => {
            commands::highlight_document(&file, output.as_deref())
        }
        Commands::Columns { file, json } => commands::show_columns(&cli.config, &file, json),
        Commands::Paginate { file, json } => commands::show_pages(&cli.config, &file, json),
        Commands::Export {
            file,
            avatar,
            output,
        } => commands::export_document(&cli.config, &file, avatar.as_deref(), output.as_deref()),
    }
}
