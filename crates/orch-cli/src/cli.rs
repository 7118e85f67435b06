//! Command-line argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};

/// Orch CLI - edge-orchestration catalog management.
#[derive(Parser, Debug, Clone)]
#[command(name = "orch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Catalog service endpoint.
    #[arg(
        short = 'e',
        long,
        env = "ORCH_API_ENDPOINT",
        default_value = "http://localhost:8080"
    )]
    pub api_endpoint: String,

    /// Project whose catalog is operated on.
    #[arg(short, long, env = "ORCH_PROJECT")]
    pub project: String,

    /// Bearer token for the catalog service.
    #[arg(long, env = "ORCH_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Deployment package commands.
    Package {
        /// Package subcommand to execute.
        #[command(subcommand)]
        command: PackageCommands,
    },

    /// Application commands.
    Application {
        /// Application subcommand to execute.
        #[command(subcommand)]
        command: ApplicationCommands,
    },

    /// Artifact commands.
    Artifact {
        /// Artifact subcommand to execute.
        #[command(subcommand)]
        command: ArtifactCommands,
    },

    /// Registry commands.
    Registry {
        /// Registry subcommand to execute.
        #[command(subcommand)]
        command: RegistryCommands,
    },

    /// Delete every catalog entity in the project.
    ///
    /// Severs deployment-package and application references first so the
    /// service's referential-integrity checks do not block deletion.
    Wipe(WipeArgs),
}

/// Deployment package subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum PackageCommands {
    /// List deployment packages in the project.
    List,

    /// Show one deployment package.
    Get {
        /// Package name.
        name: String,
        /// Package version.
        version: String,
    },

    /// Delete one deployment package.
    Delete {
        /// Package name.
        name: String,
        /// Package version.
        version: String,
    },
}

/// Application subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ApplicationCommands {
    /// List applications in the project.
    List,

    /// Show one application.
    Get {
        /// Application name.
        name: String,
        /// Application version.
        version: String,
    },

    /// Delete one application.
    Delete {
        /// Application name.
        name: String,
        /// Application version.
        version: String,
    },
}

/// Artifact subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ArtifactCommands {
    /// List artifacts in the project.
    List,

    /// Delete one artifact.
    Delete {
        /// Artifact name.
        name: String,
    },
}

/// Registry subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum RegistryCommands {
    /// List registries in the project.
    List,

    /// Delete one registry.
    Delete {
        /// Registry name.
        name: String,
    },
}

/// Arguments for the wipe command.
#[derive(Parser, Debug, Clone)]
pub struct WipeArgs {
    /// Skip the interactive confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_package_list() {
        let cli = Cli::parse_from(["orch", "-p", "proj", "package", "list"]);
        match cli.command {
            Commands::Package { command } => assert!(matches!(command, PackageCommands::List)),
            _ => panic!("expected package command"),
        }
    }

    #[test]
    fn cli_parses_package_delete_with_key() {
        let cli = Cli::parse_from(["orch", "-p", "proj", "package", "delete", "pkg", "1.0"]);
        match cli.command {
            Commands::Package {
                command: PackageCommands::Delete { name, version },
            } => {
                assert_eq!(name, "pkg");
                assert_eq!(version, "1.0");
            }
            _ => panic!("expected package delete"),
        }
    }

    #[test]
    fn cli_parses_wipe_with_yes() {
        let cli = Cli::parse_from(["orch", "-p", "proj", "wipe", "--yes"]);
        match cli.command {
            Commands::Wipe(args) => assert!(args.yes),
            _ => panic!("expected wipe command"),
        }
    }

    #[test]
    fn wipe_requires_no_positional_args() {
        let cli = Cli::parse_from(["orch", "-p", "proj", "wipe"]);
        match cli.command {
            Commands::Wipe(args) => assert!(!args.yes),
            _ => panic!("expected wipe command"),
        }
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["orch", "-p", "proj", "--format", "json", "artifact", "list"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn cli_respects_endpoint_flag() {
        let cli = Cli::parse_from([
            "orch",
            "-p",
            "proj",
            "-e",
            "https://catalog.example",
            "registry",
            "list",
        ]);
        assert_eq!(cli.api_endpoint, "https://catalog.example");
    }

    #[test]
    fn project_flag_is_required_without_env() {
        // The project flag has an env fallback but no default.
        let result = Cli::try_parse_from(["orch", "package", "list"]);
        if std::env::var("ORCH_PROJECT").is_err() {
            assert!(result.is_err());
        }
    }
}
