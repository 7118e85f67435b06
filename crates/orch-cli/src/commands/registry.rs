//! Registry command implementation.

use std::io::Write;

use orch_catalog::client::{CatalogClient, Pager};
use orch_catalog::model::ProjectId;

use crate::cli::RegistryCommands;
use crate::error::CliError;
use crate::output::{DeleteOutcome, OutputFormat, RegistryList};

/// Handler for registry subcommands.
pub struct RegistryCommand<'a, C> {
    client: &'a C,
    project: &'a ProjectId,
}

impl<'a, C: CatalogClient> RegistryCommand<'a, C> {
    /// Creates a new registry command handler.
    #[must_use]
    pub const fn new(client: &'a C, project: &'a ProjectId) -> Self {
        Self { client, project }
    }

    /// Executes the registry subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &RegistryCommands,
    ) -> Result<(), CliError> {
        match command {
            RegistryCommands::List => self.list(out, format).await,
            RegistryCommands::Delete { name } => self.delete(out, format, name).await,
        }
    }

    async fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let registries = Pager::new(|page| self.client.list_registries(self.project, page))
            .collect()
            .await?;
        format.write(out, &RegistryList { registries })?;
        Ok(())
    }

    async fn delete<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        self.client.delete_registry(self.project, name).await?;
        format.write(
            out,
            &DeleteOutcome {
                entity: name.to_string(),
                message: format!("Registry '{name}' deleted"),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use orch_catalog::model::Registry;

    use super::*;
    use crate::commands::testing::{StubCatalog, project};

    fn registry(name: &str) -> Registry {
        Registry {
            name: name.into(),
            display_name: None,
            root_url: Some("https://harbor.example".into()),
            registry_type: Some("HELM".into()),
        }
    }

    #[tokio::test]
    async fn list_renders_registries() {
        let stub = StubCatalog::default();
        stub.registries.borrow_mut().push(registry("harbor"));

        let project = project();
        let cmd = RegistryCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(&mut out, &OutputFormat::default(), &RegistryCommands::List)
            .await
            .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("harbor"));
        assert!(rendered.contains("HELM"));
    }

    #[tokio::test]
    async fn delete_removes_registry() {
        let stub = StubCatalog::default();
        stub.registries.borrow_mut().push(registry("harbor"));

        let project = project();
        let cmd = RegistryCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::default(),
            &RegistryCommands::Delete {
                name: "harbor".into(),
            },
        )
        .await
        .unwrap();

        assert!(stub.registries.borrow().is_empty());
    }
}
