//! fmdt CLI - find where a branch has been merged

mod cli;

use anstream::eprintln;
use clap::{Parser, Subcommand};
use cli::branches::{BranchesOptions, run_branches};
use cli::configure::run_configure;
use cli::history::run_history;
use cli::projects::run_projects;
use cli::status::{StatusOptions, run_status};
use cli::style::Stylize;
use fmdt::config::ConfigOverrides;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fmdt")]
#[command(about = "Track a branch through dev, qa, staging and master across Azure DevOps repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Azure DevOps organization (overrides config and AZURE_DEVOPS_ORG)
    #[arg(long, global = true)]
    org: Option<String>,

    /// Azure DevOps project (overrides config and AZURE_DEVOPS_PROJECT)
    #[arg(long, global = true)]
    project: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where a branch has been merged in every repository
    Status {
        /// Branch name (a leading refs/heads/ is ignored)
        branch: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List branch names across the project (cached for 24 hours)
    Branches {
        /// Only show branches containing this text
        filter: Option<String>,

        /// Refetch branch names even if the cache is fresh
        #[arg(long)]
        refresh: bool,

        /// Maximum number of branches to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Show recently searched branches
    History {
        /// Forget all searched branches
        #[arg(long)]
        clear: bool,
    },

    /// List projects in the organization
    Projects,

    /// Save organization and project to the config file
    Configure,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fmdt=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        organization: cli.org,
        project: cli.project,
    };

    match cli.command {
        Commands::Status { branch, json } => {
            run_status(&overrides, &branch, StatusOptions { json }).await?;
        }
        Commands::Branches {
            filter,
            refresh,
            limit,
        } => {
            run_branches(
                &overrides,
                BranchesOptions {
                    filter,
                    refresh,
                    limit,
                },
            )
            .await?;
        }
        Commands::History { clear } => run_history(clear)?,
        Commands::Projects => run_projects(&overrides).await?,
        Commands::Configure => run_configure(&overrides).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", "Error:".error());
        std::process::exit(1);
    }
}
