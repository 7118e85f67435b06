//! Artifact command implementation.

use std::io::Write;

use orch_catalog::client::{CatalogClient, Pager};
use orch_catalog::model::ProjectId;

use crate::cli::ArtifactCommands;
use crate::error::CliError;
use crate::output::{ArtifactList, DeleteOutcome, OutputFormat};

/// Handler for artifact subcommands.
pub struct ArtifactCommand<'a, C> {
    client: &'a C,
    project: &'a ProjectId,
}

impl<'a, C: CatalogClient> ArtifactCommand<'a, C> {
    /// Creates a new artifact command handler.
    #[must_use]
    pub const fn new(client: &'a C, project: &'a ProjectId) -> Self {
        Self { client, project }
    }

    /// Executes the artifact subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ArtifactCommands,
    ) -> Result<(), CliError> {
        match command {
            ArtifactCommands::List => self.list(out, format).await,
            ArtifactCommands::Delete { name } => self.delete(out, format, name).await,
        }
    }

    async fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let artifacts = Pager::new(|page| self.client.list_artifacts(self.project, page))
            .collect()
            .await?;
        format.write(out, &ArtifactList { artifacts })?;
        Ok(())
    }

    async fn delete<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        self.client.delete_artifact(self.project, name).await?;
        format.write(
            out,
            &DeleteOutcome {
                entity: name.to_string(),
                message: format!("Artifact '{name}' deleted"),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use orch_catalog::model::Artifact;

    use super::*;
    use crate::commands::testing::{StubCatalog, project};

    fn artifact(name: &str) -> Artifact {
        Artifact {
            name: name.into(),
            display_name: None,
            description: None,
            mime_type: Some("application/yaml".into()),
        }
    }

    #[tokio::test]
    async fn list_renders_artifacts() {
        let stub = StubCatalog::default();
        stub.artifacts.borrow_mut().push(artifact("values"));

        let project = project();
        let cmd = ArtifactCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(&mut out, &OutputFormat::default(), &ArtifactCommands::List)
            .await
            .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("values"));
        assert!(rendered.contains("application/yaml"));
    }

    #[tokio::test]
    async fn delete_removes_artifact() {
        let stub = StubCatalog::default();
        stub.artifacts.borrow_mut().push(artifact("values"));

        let project = project();
        let cmd = ArtifactCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::default(),
            &ArtifactCommands::Delete {
                name: "values".into(),
            },
        )
        .await
        .unwrap();

        assert!(stub.artifacts.borrow().is_empty());
    }
}
