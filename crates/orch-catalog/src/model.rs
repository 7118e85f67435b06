//! Catalog entity types.
//!
//! These mirror the catalog service's REST representations. All entities are
//! owned by the remote service; this crate never persists them.
//!
//! Optional collections are `Option<Vec<_>>` on purpose: `None` means the
//! field is absent from the JSON body, `Some(vec![])` serializes an explicit
//! empty list. The wipe preparation pass relies on the latter to clear
//! reference-bearing fields server-side.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the project whose catalog is being operated on.
///
/// Every catalog call is scoped by a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A named parameter set attached to an application or deployment package,
/// selectable at deploy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Profile name, unique within its parent entity.
    pub name: String,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Override values applied when this profile is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_values: Option<String>,
}

impl Profile {
    /// Creates a profile with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            chart_values: None,
        }
    }
}

/// An edge from a deployment package to a specific application name+version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReference {
    /// Referenced application name.
    pub name: String,
    /// Referenced application version.
    pub version: String,
}

/// A directed "requires" edge between two application names within a
/// package's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDependency {
    /// The application that has the requirement.
    pub name: String,
    /// The application it requires.
    pub requires: String,
}

/// A named, versioned bundle referencing one or more applications plus
/// deployment profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPackage {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Applications bundled by this package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_references: Option<Vec<ApplicationReference>>,
    /// Requires-edges between bundled applications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_dependencies: Option<Vec<ApplicationDependency>>,
    /// Deployment profiles carried by the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
    /// Default namespace per application name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_namespaces: Option<BTreeMap<String, String>>,
    /// Name of the profile used when none is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile_name: Option<String>,
    /// Whether the package is currently deployed. The backend refuses to
    /// delete a package while this is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deployed: Option<bool>,
}

impl DeploymentPackage {
    /// Creates a package with only its identifying key set.
    #[must_use]
    pub fn keyed(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            display_name: None,
            description: None,
            application_references: None,
            application_dependencies: None,
            profiles: None,
            default_namespaces: None,
            default_profile_name: None,
            is_deployed: None,
        }
    }

    /// Returns this package with every reference-bearing field explicitly
    /// cleared and `is_deployed` forced to false, ready to be resubmitted as
    /// an update.
    ///
    /// The backend refuses to delete a package that is deployed or that
    /// still carries profiles, application references, application
    /// dependencies, default namespaces or a default profile name. Clearing
    /// uses explicit empty values, not absent fields, so the update
    /// overwrites what is stored. This is a pure overwrite: applying it
    /// twice yields the same representation.
    #[must_use]
    pub fn cleared_for_delete(mut self) -> Self {
        self.is_deployed = Some(false);
        self.profiles = Some(Vec::new());
        self.application_references = Some(Vec::new());
        self.application_dependencies = Some(Vec::new());
        self.default_namespaces = Some(BTreeMap::new());
        self.default_profile_name = Some(String::new());
        self
    }
}

/// A deployable application, identified by name and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Helm chart name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_name: Option<String>,
    /// Helm chart version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_version: Option<String>,
    /// Registry serving the Helm chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_registry_name: Option<String>,
    /// Registry serving container images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_registry_name: Option<String>,
    /// Deployment profiles attached to the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
    /// Name of the profile used when none is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile_name: Option<String>,
}

impl Application {
    /// Creates an application with only its identifying key set.
    #[must_use]
    pub fn keyed(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            display_name: None,
            description: None,
            chart_name: None,
            chart_version: None,
            helm_registry_name: None,
            image_registry_name: None,
            profiles: None,
            default_profile_name: None,
        }
    }

    /// Returns this application with its profile data explicitly cleared,
    /// ready to be resubmitted as an update before deletion.
    ///
    /// Pure overwrite; applying it twice yields the same representation.
    #[must_use]
    pub fn cleared_for_delete(mut self) -> Self {
        self.profiles = Some(Vec::new());
        self.default_profile_name = Some(String::new());
        self
    }
}

/// An uploaded artifact. Leaf entity, no outbound references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Artifact name.
    pub name: String,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type of the artifact payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// A chart or image registry. Leaf entity; applications reference it by
/// name but the backend does not enforce deletion ordering on that edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    /// Registry name.
    pub name: String,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Registry root URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    /// Registry kind, e.g. "HELM" or "IMAGE".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub registry_type: Option<String>,
}
