//! Contribution graph CLI.
//!
//! Renders a GitHub-style heatmap of the last 52 weeks from local event
//! files and git repositories.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use contribution_graph::{logging, ConfigOverrides, GraphConfig};

#[derive(Parser, Debug)]
#[command(name = "contribution-graph")]
#[command(about = "Generates a GitHub-style heatmap to visualize contributions", long_about = None)]
struct Cli {
    /// Configuration file path (default: contribution-graph.yaml if present)
    #[arg(short, long, global = true, env = "CONTRIBUTION_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate all sources and write the SVG document
    Render {
        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Validate the configuration and print it with overrides applied
    CheckConfig {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(Args, Debug)]
struct OverrideArgs {
    /// Last day of the graph (YYYY-MM-DD)
    #[arg(long)]
    last_date: Option<String>,

    /// Primary color (#rrggbb)
    #[arg(long)]
    color: Option<String>,

    /// Number of color levels (5-255)
    #[arg(long)]
    levels: Option<u32>,

    /// Output file, "-" for stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Indent the document instead of writing compact markup
    #[arg(long)]
    no_minify: bool,

    /// Additional event file (.json, .ndjson, .jsonl or .csv); repeatable
    #[arg(short, long = "events")]
    events: Vec<PathBuf>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        ConfigOverrides {
            last_date: args.last_date,
            color: args.color,
            levels: args.levels,
            output: args.output,
            no_minify: args.no_minify,
            events: args.events,
        }
    }
}

fn load_config(path: Option<&PathBuf>, overrides: OverrideArgs) -> Result<GraphConfig> {
    let mut config = GraphConfig::load(path.map(PathBuf::as_path))?;
    config.apply_overrides(overrides.into());
    Ok(config)
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.verbose, cli.log_json)?;

    match cli.command {
        Commands::Render { overrides } => {
            let config = load_config(cli.config.as_ref(), overrides)?;
            let graph = contribution_graph::run(&config)?;
            info!(
                total = graph.render.total,
                accepted = graph.events.accepted,
                dropped = graph.events.dropped,
                "Done"
            );
            if !config.writes_to_stdout() {
                eprintln!(
                    "Contribution graph written to '{}'",
                    config.output.filename
                );
            }
            Ok(())
        }
        Commands::CheckConfig { overrides } => {
            let config = load_config(cli.config.as_ref(), overrides)?;
            config.validate()?;
            println!("✓ Configuration is valid");
            println!("  Last date: {}", config.last_date()?);
            println!("  Sources: {}", config.sources.len());
            println!();
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}
