//! # orch-catalog
//!
//! Client library for the orch catalog service.
//!
//! Provides:
//! - Typed catalog entities (deployment packages, applications, artifacts,
//!   registries)
//! - The [`client::CatalogClient`] trait, the seam between command handlers
//!   and the remote service
//! - [`http::HttpCatalogClient`], the REST implementation
//! - [`wipe::Wiper`], the dependency-severing bulk deleter that empties a
//!   project's catalog
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐              ┌──────────────────┐
//! │ orch-cli │─────────────►│  catalog service │
//! └──────────┘  REST/JSON   └──────────────────┘
//!       │
//!       └── Wiper<C: CatalogClient>  (constructor-injected client)
//! ```
//!
//! The wipe engine never talks HTTP directly; it is generic over
//! [`client::CatalogClient`] so tests drive it with an in-memory fake.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod wipe;

pub use client::{CatalogClient, ListOutcome, Page, PageRequest, Pager, MAX_PAGE_SIZE};
pub use error::{CatalogError, CatalogResult};
pub use http::HttpCatalogClient;
pub use model::{
    Application, ApplicationDependency, ApplicationReference, Artifact, DeploymentPackage,
    Profile, ProjectId, Registry,
};
pub use wipe::{WipeError, Wiper};
