//! Dependency-severing bulk deletion of a project's catalog.
//!
//! The catalog service enforces referential integrity: a deployment package
//! cannot be deleted while it is deployed or still carries profiles,
//! application references, application dependencies, default namespaces or a
//! default profile name; an application cannot be deleted while it still
//! carries profile data. [`Wiper::wipe`] therefore runs two passes:
//!
//! 1. **Preparation**: every package and application is fetched and
//!    resubmitted with its reference-bearing fields explicitly cleared.
//! 2. **Deletion**: packages, then applications, then artifacts, then
//!    registries are listed afresh and deleted one by one.
//!
//! The preparation pass runs to completion (best effort) before any delete
//! is issued. Deleting package A must not be blocked by stale references
//! still held in a not-yet-prepared package B, so clearing is a single
//! pre-pass, not interleaved per entity.
//!
//! Failures never abort the sweep: every per-entity failure is collected
//! and the sweep moves on. Only a transport failure while *listing* an
//! entity type ends that type's remaining work for the current phase.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{CatalogClient, Pager};
use crate::error::CatalogError;
use crate::model::ProjectId;

/// The entity type an error relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A deployment package.
    DeploymentPackage,
    /// An application.
    Application,
    /// An artifact.
    Artifact,
    /// A registry.
    Registry,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeploymentPackage => f.write_str("deployment package"),
            Self::Application => f.write_str("application"),
            Self::Artifact => f.write_str("artifact"),
            Self::Registry => f.write_str("registry"),
        }
    }
}

/// The remote call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeAction {
    /// Fetching an entity's current representation.
    Fetch,
    /// Resubmitting an entity with its references cleared.
    Clear,
    /// Deleting an entity.
    Delete,
}

impl fmt::Display for WipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => f.write_str("fetch"),
            Self::Clear => f.write_str("clear"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// One failure collected during a wipe.
///
/// A wipe never aborts on these; [`Wiper::wipe`] returns every failure it
/// collected and the caller decides how to present them.
#[derive(Debug, Error)]
pub enum WipeError {
    /// Listing an entity type failed at the transport level; the remaining
    /// work for that type in the current phase was skipped.
    #[error("failed to list {kind}s: {source}")]
    List {
        /// Entity type whose listing failed.
        kind: EntityKind,
        /// Underlying failure.
        source: CatalogError,
    },

    /// A call against one specific entity failed; the sweep continued with
    /// the next entity.
    #[error("failed to {action} {kind} {entity}: {source}")]
    Entity {
        /// Entity type.
        kind: EntityKind,
        /// Entity identifier, `name` or `name:version`.
        entity: String,
        /// The call that failed.
        action: WipeAction,
        /// Underlying failure.
        source: CatalogError,
    },
}

impl WipeError {
    fn list(kind: EntityKind, source: CatalogError) -> Self {
        Self::List { kind, source }
    }

    fn entity(
        kind: EntityKind,
        entity: impl Into<String>,
        action: WipeAction,
        source: CatalogError,
    ) -> Self {
        Self::Entity {
            kind,
            entity: entity.into(),
            action,
            source,
        }
    }

    /// The entity type this error relates to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::List { kind, .. } | Self::Entity { kind, .. } => *kind,
        }
    }
}

fn versioned(name: &str, version: &str) -> String {
    format!("{name}:{version}")
}

/// Bulk deleter for a project's catalog.
///
/// Takes its catalog client as a constructor argument; tests drive it with
/// an in-memory fake.
#[derive(Debug)]
pub struct Wiper<C> {
    client: C,
}

impl<C: CatalogClient> Wiper<C> {
    /// Creates a wiper over the given client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Removes every deployment package, application, artifact and registry
    /// in the project.
    ///
    /// Returns the collected failures; an empty vector means full success.
    /// Individual failures never abort the sweep and this method never
    /// returns early with an `Err`.
    pub async fn wipe(&self, project: &ProjectId) -> Vec<WipeError> {
        info!(%project, "wiping project catalog");
        let mut errors = Vec::new();

        // Preparation pass: sever reference edges everywhere before any
        // deletion is attempted.
        self.prepare_packages(project, &mut errors).await;
        self.prepare_applications(project, &mut errors).await;

        // Deletion pass, leaf-ward: packages first, registries last.
        self.delete_packages(project, &mut errors).await;
        self.delete_applications(project, &mut errors).await;
        self.delete_artifacts(project, &mut errors).await;
        self.delete_registries(project, &mut errors).await;

        if errors.is_empty() {
            info!(%project, "project catalog wiped");
        } else {
            warn!(%project, failures = errors.len(), "project wipe finished with failures");
        }
        errors
    }

    async fn prepare_packages(&self, project: &ProjectId, errors: &mut Vec<WipeError>) {
        let kind = EntityKind::DeploymentPackage;
        let mut pager = Pager::new(|page| self.client.list_deployment_packages(project, page));
        loop {
            let pkg = match pager.next().await {
                Ok(Some(pkg)) => pkg,
                Ok(None) => return,
                Err(err) => {
                    errors.push(WipeError::list(kind, err));
                    return;
                }
            };
            let id = versioned(&pkg.name, &pkg.version);
            debug!(package = %id, "clearing deployment package references");

            let current = match self
                .client
                .get_deployment_package(project, &pkg.name, &pkg.version)
                .await
            {
                Ok(current) => current,
                Err(err) => {
                    errors.push(WipeError::entity(kind, id, WipeAction::Fetch, err));
                    continue;
                }
            };
            if let Err(err) = self
                .client
                .update_deployment_package(project, &current.cleared_for_delete())
                .await
            {
                errors.push(WipeError::entity(kind, id, WipeAction::Clear, err));
            }
        }
    }

    async fn prepare_applications(&self, project: &ProjectId, errors: &mut Vec<WipeError>) {
        let kind = EntityKind::Application;
        let mut pager = Pager::new(|page| self.client.list_applications(project, page));
        loop {
            let app = match pager.next().await {
                Ok(Some(app)) => app,
                Ok(None) => return,
                Err(err) => {
                    errors.push(WipeError::list(kind, err));
                    return;
                }
            };
            let id = versioned(&app.name, &app.version);
            debug!(application = %id, "clearing application profiles");

            let current = match self
                .client
                .get_application(project, &app.name, &app.version)
                .await
            {
                Ok(current) => current,
                Err(err) => {
                    errors.push(WipeError::entity(kind, id, WipeAction::Fetch, err));
                    continue;
                }
            };
            if let Err(err) = self
                .client
                .update_application(project, &current.cleared_for_delete())
                .await
            {
                errors.push(WipeError::entity(kind, id, WipeAction::Clear, err));
            }
        }
    }

    // The deletion phases drain their listing into a snapshot before the
    // first delete. Deleting while paging would shrink the collection under
    // the cursor and skip the survivors of every later page.

    async fn delete_packages(&self, project: &ProjectId, errors: &mut Vec<WipeError>) {
        let kind = EntityKind::DeploymentPackage;
        let packages = match Pager::new(|page| self.client.list_deployment_packages(project, page))
            .collect()
            .await
        {
            Ok(packages) => packages,
            Err(err) => {
                errors.push(WipeError::list(kind, err));
                return;
            }
        };
        for pkg in packages {
            let id = versioned(&pkg.name, &pkg.version);
            debug!(package = %id, "deleting deployment package");
            if let Err(err) = self
                .client
                .delete_deployment_package(project, &pkg.name, &pkg.version)
                .await
            {
                errors.push(WipeError::entity(kind, id, WipeAction::Delete, err));
            }
        }
    }

    async fn delete_applications(&self, project: &ProjectId, errors: &mut Vec<WipeError>) {
        let kind = EntityKind::Application;
        let applications = match Pager::new(|page| self.client.list_applications(project, page))
            .collect()
            .await
        {
            Ok(applications) => applications,
            Err(err) => {
                errors.push(WipeError::list(kind, err));
                return;
            }
        };
        for app in applications {
            let id = versioned(&app.name, &app.version);
            debug!(application = %id, "deleting application");
            if let Err(err) = self
                .client
                .delete_application(project, &app.name, &app.version)
                .await
            {
                errors.push(WipeError::entity(kind, id, WipeAction::Delete, err));
            }
        }
    }

    async fn delete_artifacts(&self, project: &ProjectId, errors: &mut Vec<WipeError>) {
        let kind = EntityKind::Artifact;
        let artifacts = match Pager::new(|page| self.client.list_artifacts(project, page))
            .collect()
            .await
        {
            Ok(artifacts) => artifacts,
            Err(err) => {
                errors.push(WipeError::list(kind, err));
                return;
            }
        };
        for artifact in artifacts {
            debug!(artifact = %artifact.name, "deleting artifact");
            if let Err(err) = self.client.delete_artifact(project, &artifact.name).await {
                errors.push(WipeError::entity(
                    kind,
                    &artifact.name,
                    WipeAction::Delete,
                    err,
                ));
            }
        }
    }

    async fn delete_registries(&self, project: &ProjectId, errors: &mut Vec<WipeError>) {
        let kind = EntityKind::Registry;
        let registries = match Pager::new(|page| self.client.list_registries(project, page))
            .collect()
            .await
        {
            Ok(registries) => registries,
            Err(err) => {
                errors.push(WipeError::list(kind, err));
                return;
            }
        };
        for registry in registries {
            debug!(registry = %registry.name, "deleting registry");
            if let Err(err) = self.client.delete_registry(project, &registry.name).await {
                errors.push(WipeError::entity(
                    kind,
                    &registry.name,
                    WipeAction::Delete,
                    err,
                ));
            }
        }
    }
}
