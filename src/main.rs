use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use release_tracker::config::{DEFAULT_CONFIG_FILE, TrackerConfig, load_config};
use release_tracker::version::tracker::ReleaseTracker;

#[derive(Parser)]
#[command(name = "release-tracker")]
#[command(version, about = "Find the latest semantic version of a release channel")]
struct Cli {
    /// Release channel file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory commands run in and local sources resolve against
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the highest version satisfying a constraint
    Latest {
        /// Semver constraint, e.g. "> 1.0.0" (default: any released version)
        #[arg(short = 'C', long, default_value = "")]
        constraint: String,

        /// Also print the channel description
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print every version, lowest first
    List,
}

/// Logs go to stderr so stdout only carries versions.
///
/// Level comes from `--debug`, then `RUST_LOG`, then defaults to INFO.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("release_tracker=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)?;

    let mut builder = TrackerConfig::builder();
    if let Some(work_dir) = cli.work_dir {
        builder = builder.work_dir(work_dir);
    }
    let tracker = ReleaseTracker::new(config.release_channel, builder.build())?;

    match cli.command {
        Command::Latest {
            constraint,
            verbose,
        } => {
            let release = tracker.latest(&constraint).await?;
            match release.description.as_deref() {
                Some(description) if verbose => println!("{}\t{}", release.raw, description),
                _ => println!("{}", release.raw),
            }
        }
        Command::List => {
            for release in tracker.list_releases().await? {
                println!("{}", release.raw);
            }
        }
    }

    Ok(())
}
