//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command family:
//! - [`package`] - Deployment package management
//! - [`application`] - Application management
//! - [`artifact`] - Artifact management
//! - [`registry`] - Registry management
//! - [`wipe`] - Project-wide catalog wipe
//!
//! Every handler takes its catalog client as a constructor argument; tests
//! drive them with the in-memory stub in [`testing`].

pub mod application;
pub mod artifact;
pub mod package;
pub mod registry;
pub mod wipe;

pub use application::ApplicationCommand;
pub use artifact::ArtifactCommand;
pub use package::PackageCommand;
pub use registry::RegistryCommand;
pub use wipe::WipeCommand;
