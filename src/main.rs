use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skilltree::cli;
use skilltree::cli::generate::GenerateOptions;

#[derive(Parser)]
#[command(name = "skilltree", version)]
#[command(about = "Turn a resume PDF into an interactive skill tree", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract skills from a resume PDF and write skill_tree.json + skill_tree.html
    Generate {
        /// Resume PDF path
        #[arg(default_value = "resume.pdf")]
        pdf: String,

        /// JSON output path (default: from config, skill_tree.json)
        #[arg(long)]
        json_output: Option<String>,

        /// HTML output path (default: from config, skill_tree.html)
        #[arg(long)]
        html_output: Option<String>,

        /// Path to config file (defaults to ./skilltree.toml or ~/.config/skilltree/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Override model id (e.g., "grok-4-latest")
        #[arg(long)]
        model: Option<String>,

        /// Override OpenAI-compatible base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Skip the model and use keyword matching only
        #[arg(long)]
        offline: bool,

        /// Use a canned model response instead of the network
        #[arg(long)]
        dry_run: bool,

        /// Also write the classified skill record (levels, relationships) as JSON
        #[arg(long)]
        save_record: Option<String>,

        /// Open the HTML page in the default browser when done
        #[arg(long)]
        open: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            pdf,
            json_output,
            html_output,
            config,
            model,
            base_url,
            timeout,
            offline,
            dry_run,
            save_record,
            open,
        } => {
            cli::generate::run(GenerateOptions {
                pdf,
                json_output,
                html_output,
                config,
                model,
                base_url,
                timeout,
                offline,
                dry_run,
                save_record,
                open,
            })
            .await?;
        }
    }

    Ok(())
}
