use clap::{Parser, Subcommand};
use quotegen::{config, output, run, stock};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quotegen")]
#[command(about = "Render a backlog of quotes into image cards")]
#[command(long_about = "\
Render a backlog of quotes into image cards

Each run selects the first unused quotes from the stock file, renders one
image per quote, and marks each quote used the moment its image is written.
Re-running never reposts a quote, even after a crash mid-run.

Expected layout (all paths overridable):

  quotes/stock.json            # Quote backlog: [{id, quote, topic?, used?}]
  templates/                   # Optional background images (jpg/png/webp)
  fonts/                       # TrueType candidates, first readable wins
  output/images/               # One .jpg per rendered quote
  logs/posts.csv               # Append-only audit log
  config.toml                  # Optional; run 'quotegen gen-config'

An exhausted backlog is not an error: the run reports it and exits 0.")]
#[command(version)]
struct Cli {
    /// Quote stock file
    #[arg(long, default_value = "quotes/stock.json", global = true)]
    stock: PathBuf,

    /// Directory of background template images
    #[arg(long, default_value = "templates", global = true)]
    templates: PathBuf,

    /// Directory for rendered images
    #[arg(long, default_value = "output/images", global = true)]
    output: PathBuf,

    /// Audit log file
    #[arg(long, default_value = "logs/posts.csv", global = true)]
    log: PathBuf,

    /// Config file (defaults used when absent)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select, render, and commit the next batch of quotes
    Run {
        /// Render at most this many quotes (overrides max_per_run)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Show backlog counts without rendering anything
    Status,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { count } => {
            let mut render_config = config::RenderConfig::load_or_default(&cli.config)?;
            if let Some(count) = count {
                render_config.max_per_run = count;
            }
            render_config.validate()?;

            let paths = run::RunPaths {
                stock: cli.stock,
                templates: cli.templates,
                output_dir: cli.output,
                audit_log: cli.log,
            };
            let report = run::render_batch(&paths, &render_config)?;
            output::print_run_report(&report);
        }
        Command::Status => {
            let backlog = stock::Backlog::load(&cli.stock)?;
            output::print_status(&backlog);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
