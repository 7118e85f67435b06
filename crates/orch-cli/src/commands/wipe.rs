//! Project wipe command implementation.
//!
//! The one destructive multi-entity operation in the CLI. Requires an
//! explicit `--yes` or a typed "yes" acknowledgment before anything is
//! touched. Partial failures are printed one per line to stderr and the
//! command still exits successfully; the sweep is best effort by design.

use std::io::{self, BufRead, Write};

use orch_catalog::client::CatalogClient;
use orch_catalog::model::ProjectId;
use orch_catalog::wipe::Wiper;

use crate::cli::WipeArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, WipeSummary};

/// Handler for the wipe command.
pub struct WipeCommand<'a, C> {
    client: &'a C,
    project: &'a ProjectId,
}

impl<'a, C: CatalogClient> WipeCommand<'a, C> {
    /// Creates a new wipe command handler.
    #[must_use]
    pub const fn new(client: &'a C, project: &'a ProjectId) -> Self {
        Self { client, project }
    }

    /// Executes the wipe command, prompting on stdin unless `--yes` was
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Aborted`] if the operator declines. Individual
    /// wipe failures are reported, not returned.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &WipeArgs,
    ) -> Result<(), CliError> {
        if !args.yes {
            let stdin = io::stdin();
            let confirmed = self.confirm(&mut stdin.lock())?;
            if !confirmed {
                return Err(CliError::Aborted);
            }
        }

        let errors = Wiper::new(self.client).wipe(self.project).await;
        for err in &errors {
            eprintln!("{err}");
        }

        let summary = WipeSummary {
            project: self.project.to_string(),
            success: errors.is_empty(),
            failures: errors.iter().map(ToString::to_string).collect(),
        };
        format.write(out, &summary)?;
        Ok(())
    }

    fn confirm<R: BufRead>(&self, input: &mut R) -> Result<bool, CliError> {
        eprint!(
            "This permanently deletes every deployment package, application, \
             artifact and registry in project '{}'. Type 'yes' to continue: ",
            self.project
        );
        io::stderr().flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(line.trim().eq_ignore_ascii_case("yes"))
    }
}

#[cfg(test)]
mod tests {
    use orch_catalog::model::{Application, DeploymentPackage, Registry};

    use super::*;
    use crate::commands::testing::{StubCatalog, project};

    #[tokio::test]
    async fn wipe_with_yes_flag_skips_prompt_and_empties_catalog() {
        let stub = StubCatalog::default();
        stub.packages
            .borrow_mut()
            .push(DeploymentPackage::keyed("pkg", "1.0"));
        stub.applications
            .borrow_mut()
            .push(Application::keyed("app", "1.0"));
        stub.registries.borrow_mut().push(Registry {
            name: "harbor".into(),
            display_name: None,
            root_url: None,
            registry_type: None,
        });

        let project = project();
        let cmd = WipeCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(&mut out, &OutputFormat::default(), &WipeArgs { yes: true })
            .await
            .unwrap();

        assert!(stub.packages.borrow().is_empty());
        assert!(stub.applications.borrow().is_empty());
        assert!(stub.registries.borrow().is_empty());

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("catalog wiped"));
    }

    #[tokio::test]
    async fn clean_wipe_reports_success() {
        let stub = StubCatalog::default();
        let project = project();
        let cmd = WipeCommand::new(&stub, &project);
        let mut out = Vec::new();
        cmd.execute(&mut out, &OutputFormat::default(), &WipeArgs { yes: true })
            .await
            .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(!rendered.contains("failure"));
    }

    #[test]
    fn confirm_accepts_yes_in_any_case() {
        let stub = StubCatalog::default();
        let project = project();
        let cmd = WipeCommand::new(&stub, &project);

        let mut input = "YES\n".as_bytes();
        assert!(cmd.confirm(&mut input).unwrap());

        let mut input = "no\n".as_bytes();
        assert!(!cmd.confirm(&mut input).unwrap());

        let mut input = "".as_bytes();
        assert!(!cmd.confirm(&mut input).unwrap());
    }
}
