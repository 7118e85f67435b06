//! Deployment package command implementation.

use std::io::Write;

use orch_catalog::client::{CatalogClient, Pager};
use orch_catalog::model::ProjectId;

use crate::cli::PackageCommands;
use crate::error::CliError;
use crate::output::{DeleteOutcome, OutputFormat, PackageDetail, PackageList};

/// Handler for deployment package subcommands.
pub struct PackageCommand<'a, C> {
    client: &'a C,
    project: &'a ProjectId,
}

impl<'a, C: CatalogClient> PackageCommand<'a, C> {
    /// Creates a new package command handler.
    #[must_use]
    pub const fn new(client: &'a C, project: &'a ProjectId) -> Self {
        Self { client, project }
    }

    /// Executes the package subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &PackageCommands,
    ) -> Result<(), CliError> {
        match command {
            PackageCommands::List => self.list(out, format).await,
            PackageCommands::Get { name, version } => {
                self.get(out, format, name, version).await
            }
            PackageCommands::Delete { name, version } => {
                self.delete(out, format, name, version).await
            }
        }
    }

    async fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let packages =
            Pager::new(|page| self.client.list_deployment_packages(self.project, page))
                .collect()
                .await?;
        format.write(out, &PackageList { packages })?;
        Ok(())
    }

    async fn get<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
        version: &str,
    ) -> Result<(), CliError> {
        let package = self
            .client
            .get_deployment_package(self.project, name, version)
            .await?;
        format.write(out, &PackageDetail { package })?;
        Ok(())
    }

    async fn delete<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
        version: &str,
    ) -> Result<(), CliError> {
        self.client
            .delete_deployment_package(self.project, name, version)
            .await?;
        format.write(
            out,
            &DeleteOutcome {
                entity: format!("{name}:{version}"),
                message: format!("Deployment package '{name}:{version}' deleted"),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use orch_catalog::model::DeploymentPackage;

    use super::*;
    use crate::commands::testing::{StubCatalog, project};

    #[tokio::test]
    async fn list_renders_all_packages() {
        let stub = StubCatalog::default();
        stub.packages
            .borrow_mut()
            .push(DeploymentPackage::keyed("pkg-a", "1.0"));
        stub.packages
            .borrow_mut()
            .push(DeploymentPackage::keyed("pkg-b", "2.0"));

        let project = project();
        let cmd = PackageCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(&mut out, &OutputFormat::default(), &PackageCommands::List)
            .await
            .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("pkg-a"));
        assert!(rendered.contains("pkg-b"));
        assert!(rendered.contains("2 package(s)"));
    }

    #[tokio::test]
    async fn get_unknown_package_fails() {
        let stub = StubCatalog::default();
        let project = project();
        let cmd = PackageCommand::new(&stub, &project);
        let mut out = Vec::new();

        let result = cmd
            .execute(
                &mut out,
                &OutputFormat::default(),
                &PackageCommands::Get {
                    name: "missing".into(),
                    version: "1.0".into(),
                },
            )
            .await;
        assert!(matches!(result, Err(CliError::Catalog(_))));
    }

    #[tokio::test]
    async fn delete_removes_only_named_version() {
        let stub = StubCatalog::default();
        stub.packages
            .borrow_mut()
            .push(DeploymentPackage::keyed("pkg", "1.0"));
        stub.packages
            .borrow_mut()
            .push(DeploymentPackage::keyed("pkg", "2.0"));

        let project = project();
        let cmd = PackageCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::default(),
            &PackageCommands::Delete {
                name: "pkg".into(),
                version: "1.0".into(),
            },
        )
        .await
        .unwrap();

        let remaining = stub.packages.borrow();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].version, "2.0");
    }
}
