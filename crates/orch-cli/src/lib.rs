//! # orch-cli
//!
//! Command-line interface for the orch edge-orchestration catalog.
//!
//! Provides commands for:
//! - Deployment package inspection and deletion
//! - Application inspection and deletion
//! - Artifact and registry management
//! - Project-wide catalog wipe
//!
//! # Architecture
//!
//! The CLI talks REST to the catalog service through
//! [`orch_catalog::HttpCatalogClient`]. Command subtrees can be disabled
//! remotely via the capability document fetched by [`gating`].
//!
//! ```text
//! ┌──────────┐      REST/JSON       ┌──────────────────┐
//! │   orch   │◄────────────────────►│  catalog service │
//! └──────────┘                      └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod gating;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use gating::Capabilities;
pub use output::OutputFormat;
