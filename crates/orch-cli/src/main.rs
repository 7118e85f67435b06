//! Orch CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use orch_catalog::{HttpCatalogClient, ProjectId};
use orch_cli::cli::{Cli, Commands};
use orch_cli::commands::{
    ApplicationCommand, ArtifactCommand, PackageCommand, RegistryCommand, WipeCommand,
};
use orch_cli::gating::Capabilities;
use orch_cli::output::OutputFormat;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), orch_cli::CliError> {
    let capabilities = Capabilities::fetch(&cli.api_endpoint).await;
    capabilities.ensure_enabled(&cli.command)?;

    let client = HttpCatalogClient::new(&cli.api_endpoint, cli.api_token.clone())?;
    let project = ProjectId::new(cli.project.clone());
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Package { command } => {
            let cmd = PackageCommand::new(&client, &project);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Application { command } => {
            let cmd = ApplicationCommand::new(&client, &project);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Artifact { command } => {
            let cmd = ArtifactCommand::new(&client, &project);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Registry { command } => {
            let cmd = RegistryCommand::new(&client, &project);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Wipe(args) => {
            let cmd = WipeCommand::new(&client, &project);
            cmd.execute(&mut stdout, &format, &args).await?;
        }
    }

    Ok(())
}
