//! Capability gating for command subtrees.
//!
//! The backend publishes a small capability document; deployments that run
//! without, say, a registry service advertise `"registries": false` and the
//! matching command subtree is refused up front instead of failing deep in a
//! request. Fetching is best effort: an unreachable or malformed document
//! leaves everything enabled.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::cli::Commands;
use crate::error::CliError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Which command subtrees the backend supports.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    /// Deployment package commands.
    pub packages: bool,
    /// Application commands.
    pub applications: bool,
    /// Registry commands.
    pub registries: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            packages: true,
            applications: true,
            registries: true,
        }
    }
}

impl Capabilities {
    /// Fetches the capability document from the backend.
    ///
    /// Never fails: any transport, status or decode problem falls back to
    /// all subtrees enabled.
    pub async fn fetch(api_endpoint: &str) -> Self {
        let url = format!("{}/v3/capabilities", api_endpoint.trim_end_matches('/'));
        let response = reqwest::Client::new()
            .get(&url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await;
        match response {
            Ok(response) if response.status().is_success() => {
                response.json::<Self>().await.unwrap_or_else(|e| {
                    debug!(error = %e, "malformed capability document, enabling everything");
                    Self::default()
                })
            }
            Ok(response) => {
                debug!(status = %response.status(), "capability fetch non-success, enabling everything");
                Self::default()
            }
            Err(e) => {
                debug!(error = %e, "capability fetch failed, enabling everything");
                Self::default()
            }
        }
    }

    /// Refuses commands whose subtree is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Disabled`] naming the subtree. The wipe command
    /// is never gated; it has to clean up whatever the catalog holds.
    pub fn ensure_enabled(&self, command: &Commands) -> Result<(), CliError> {
        let refused = match command {
            Commands::Package { .. } if !self.packages => Some("package"),
            Commands::Application { .. } if !self.applications => Some("application"),
            Commands::Registry { .. } if !self.registries => Some("registry"),
            _ => None,
        };
        match refused {
            Some(subtree) => Err(CliError::Disabled(subtree.to_string())),
            None => Ok(()),
        }
    }
}
