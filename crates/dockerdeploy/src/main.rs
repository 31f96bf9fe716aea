mod commands;
mod prompt;

use clap::{Parser, Subcommand};
use colored::Colorize;
use dockerdeploy_core::WorkflowError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockerdeploy")]
#[command(
    about = "Build an image, push it to the dockerdeploy registry and run it on dockerdeploy.cloud",
    long_about = None
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the image and push it to registry.dockerdeploy.cloud
    Publish {
        /// Path to the Dockerfile
        #[arg(short = 'f', long = "file", default_value = "Dockerfile")]
        file: PathBuf,
        /// Version tags; the first one is pushed
        #[arg(
            short = 'v',
            long = "version",
            num_args = 1..,
            default_value = "latest"
        )]
        versions: Vec<String>,
        /// Install the ARM emulator without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Deploy the last published image
    Deploy,
    /// Inspect or change the stored configuration
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show the version
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file path and stored values
    Show,
    /// Store the API token
    SetToken {
        /// API token from the dashboard
        token: String,
    },
    /// Forget the image name and the published image
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        let message = match e.downcast_ref::<WorkflowError>() {
            Some(workflow) => workflow.user_message(),
            None => format!("{:#}", e),
        };
        eprintln!("{} {}", "✗".red().bold(), message);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Publish {
            file,
            versions,
            yes,
        } => commands::publish::handle(file, versions, yes).await,
        Commands::Deploy => commands::deploy::handle().await,
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(),
        Commands::Config(ConfigCommands::SetToken { token }) => {
            commands::config::handle_set_token(&token)
        }
        Commands::Config(ConfigCommands::Reset) => commands::config::handle_reset(),
        Commands::Version => {
            println!("dockerdeploy {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
