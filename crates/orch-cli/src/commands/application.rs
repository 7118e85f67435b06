//! Application command implementation.

use std::io::Write;

use orch_catalog::client::{CatalogClient, Pager};
use orch_catalog::model::ProjectId;

use crate::cli::ApplicationCommands;
use crate::error::CliError;
use crate::output::{ApplicationDetail, ApplicationList, DeleteOutcome, OutputFormat};

/// Handler for application subcommands.
pub struct ApplicationCommand<'a, C> {
    client: &'a C,
    project: &'a ProjectId,
}

impl<'a, C: CatalogClient> ApplicationCommand<'a, C> {
    /// Creates a new application command handler.
    #[must_use]
    pub const fn new(client: &'a C, project: &'a ProjectId) -> Self {
        Self { client, project }
    }

    /// Executes the application subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ApplicationCommands,
    ) -> Result<(), CliError> {
        match command {
            ApplicationCommands::List => self.list(out, format).await,
            ApplicationCommands::Get { name, version } => {
                self.get(out, format, name, version).await
            }
            ApplicationCommands::Delete { name, version } => {
                self.delete(out, format, name, version).await
            }
        }
    }

    async fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let applications = Pager::new(|page| self.client.list_applications(self.project, page))
            .collect()
            .await?;
        format.write(out, &ApplicationList { applications })?;
        Ok(())
    }

    async fn get<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
        version: &str,
    ) -> Result<(), CliError> {
        let application = self.client.get_application(self.project, name, version).await?;
        format.write(out, &ApplicationDetail { application })?;
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
            .delete_application(self.project, name, version)
            .await?;
        format.write(
            out,
            &DeleteOutcome {
                entity: format!("{name}:{version}"),
                message: format!("Application '{name}:{version}' deleted"),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use orch_catalog::model::Application;

    use super::*;
    use crate::commands::testing::{StubCatalog, project};

    #[tokio::test]
    async fn list_renders_applications() {
        let stub = StubCatalog::default();
        stub.applications
            .borrow_mut()
            .push(Application::keyed("web", "1.0"));

        let project = project();
        let cmd = ApplicationCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(&mut out, &OutputFormat::default(), &ApplicationCommands::List)
            .await
            .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("web"));
        assert!(rendered.contains("1 application(s)"));
    }

    #[tokio::test]
    async fn get_renders_detail() {
        let stub = StubCatalog::default();
        let mut app = Application::keyed("web", "1.0");
        app.chart_name = Some("nginx".into());
        stub.applications.borrow_mut().push(app);

        let project = project();
        let cmd = ApplicationCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::default(),
            &ApplicationCommands::Get {
                name: "web".into(),
                version: "1.0".into(),
            },
        )
        .await
        .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Chart:            nginx"));
    }

    #[tokio::test]
    async fn delete_removes_application() {
        let stub = StubCatalog::default();
        stub.applications
            .borrow_mut()
            .push(Application::keyed("web", "1.0"));

        let project = project();
        let cmd = ApplicationCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::default(),
            &ApplicationCommands::Delete {
                name: "web".into(),
                version: "1.0".into(),
            },
        )
        .await
        .unwrap();

        assert!(stub.applications.borrow().is_empty());
    }
}
