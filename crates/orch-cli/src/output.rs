//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use serde::Serialize;

use orch_catalog::{Application, Artifact, DeploymentPackage, Registry};

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

fn len_of<T>(field: &Option<Vec<T>>) -> usize {
    field.as_ref().map_or(0, Vec::len)
}

fn or_dash(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("-")
}

/// A listing of deployment packages.
#[derive(Debug, Clone, Serialize)]
pub struct PackageList {
    /// Packages in the project.
    pub packages: Vec<DeploymentPackage>,
}

impl TableDisplay for PackageList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "{:<24} {:<12} {:<9} {:<6} {:<9}",
            "NAME", "VERSION", "DEPLOYED", "APPS", "PROFILES"
        )?;
        for pkg in &self.packages {
            writeln!(
                writer,
                "{:<24} {:<12} {:<9} {:<6} {:<9}",
                pkg.name,
                pkg.version,
                pkg.is_deployed.unwrap_or(false),
                len_of(&pkg.application_references),
                len_of(&pkg.profiles),
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{} package(s)", self.packages.len())?;
        Ok(())
    }
}

/// A single deployment package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDetail {
    /// The package.
    pub package: DeploymentPackage,
}

impl TableDisplay for PackageDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let pkg = &self.package;
        writeln!(writer, "Deployment Package")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Name:             {}", pkg.name)?;
        writeln!(writer, "Version:          {}", pkg.version)?;
        writeln!(writer, "Display Name:     {}", or_dash(&pkg.display_name))?;
        writeln!(
            writer,
            "Deployed:         {}",
            pkg.is_deployed.unwrap_or(false)
        )?;
        writeln!(
            writer,
            "Default Profile:  {}",
            or_dash(&pkg.default_profile_name)
        )?;
        writeln!(writer)?;
        writeln!(writer, "Application References")?;
        match &pkg.application_references {
            Some(refs) if !refs.is_empty() => {
                for r in refs {
                    writeln!(writer, "  {}:{}", r.name, r.version)?;
                }
            }
            _ => writeln!(writer, "  (none)")?,
        }
        writeln!(writer)?;
        writeln!(writer, "Profiles")?;
        match &pkg.profiles {
            Some(profiles) if !profiles.is_empty() => {
                for p in profiles {
                    writeln!(writer, "  {}", p.name)?;
                }
            }
            _ => writeln!(writer, "  (none)")?,
        }
        Ok(())
    }
}

/// A listing of applications.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationList {
    /// Applications in the project.
    pub applications: Vec<Application>,
}

impl TableDisplay for ApplicationList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "{:<24} {:<12} {:<20} {:<9}",
            "NAME", "VERSION", "CHART", "PROFILES"
        )?;
        for app in &self.applications {
            writeln!(
                writer,
                "{:<24} {:<12} {:<20} {:<9}",
                app.name,
                app.version,
                or_dash(&app.chart_name),
                len_of(&app.profiles),
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{} application(s)", self.applications.len())?;
        Ok(())
    }
}

/// A single application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    /// The application.
    pub application: Application,
}

impl TableDisplay for ApplicationDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let app = &self.application;
        writeln!(writer, "Application")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Name:             {}", app.name)?;
        writeln!(writer, "Version:          {}", app.version)?;
        writeln!(writer, "Display Name:     {}", or_dash(&app.display_name))?;
        writeln!(writer, "Chart:            {}", or_dash(&app.chart_name))?;
        writeln!(writer, "Chart Version:    {}", or_dash(&app.chart_version))?;
        writeln!(
            writer,
            "Helm Registry:    {}",
            or_dash(&app.helm_registry_name)
        )?;
        writeln!(
            writer,
            "Image Registry:   {}",
            or_dash(&app.image_registry_name)
        )?;
        writeln!(
            writer,
            "Default Profile:  {}",
            or_dash(&app.default_profile_name)
        )?;
        writeln!(writer, "Profiles:         {}", len_of(&app.profiles))?;
        Ok(())
    }
}

/// A listing of artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactList {
    /// Artifacts in the project.
    pub artifacts: Vec<Artifact>,
}

impl TableDisplay for ArtifactList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{:<24} {:<20}", "NAME", "MIME TYPE")?;
        for artifact in &self.artifacts {
            writeln!(
                writer,
                "{:<24} {:<20}",
                artifact.name,
                or_dash(&artifact.mime_type)
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{} artifact(s)", self.artifacts.len())?;
        Ok(())
    }
}

/// A listing of registries.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryList {
    /// Registries in the project.
    pub registries: Vec<Registry>,
}

impl TableDisplay for RegistryList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{:<24} {:<8} {:<32}", "NAME", "TYPE", "URL")?;
        for registry in &self.registries {
            writeln!(
                writer,
                "{:<24} {:<8} {:<32}",
                registry.name,
                or_dash(&registry.registry_type),
                or_dash(&registry.root_url)
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{} registry(ies)", self.registries.len())?;
        Ok(())
    }
}

/// Result of a single-entity delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    /// Identifier of the deleted entity.
    pub entity: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl TableDisplay for DeleteOutcome {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        Ok(())
    }
}

/// Result of a project wipe.
#[derive(Debug, Clone, Serialize)]
pub struct WipeSummary {
    /// Project that was wiped.
    pub project: String,
    /// Whether every entity was removed.
    pub success: bool,
    /// Collected failures, one message per entity or phase.
    pub failures: Vec<String>,
}

impl TableDisplay for WipeSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.success {
            writeln!(writer, "Project '{}' catalog wiped", self.project)?;
        } else {
            writeln!(
                writer,
                "Project '{}' catalog wiped with {} failure(s)",
                self.project,
                self.failures.len()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Serialize + TableDisplay>(format: &OutputFormat, value: &T) -> String {
        let mut buf = Vec::new();
        format.write(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn package_list_table_has_header_and_count() {
        let mut pkg = DeploymentPackage::keyed("nginx-bundle", "1.2");
        pkg.is_deployed = Some(true);
        let list = PackageList {
            packages: vec![pkg],
        };

        let out = render(&OutputFormat::default(), &list);
        assert!(out.contains("NAME"));
        assert!(out.contains("nginx-bundle"));
        assert!(out.contains("1 package(s)"));
    }

    #[test]
    fn package_list_json_is_parseable() {
        let list = PackageList {
            packages: vec![DeploymentPackage::keyed("pkg", "1.0")],
        };
        let out = render(&OutputFormat::new(Format::Json), &list);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["packages"][0]["name"], "pkg");
    }

    #[test]
    fn package_detail_renders_empty_sections() {
        let detail = PackageDetail {
            package: DeploymentPackage::keyed("pkg", "1.0"),
        };
        let out = render(&OutputFormat::default(), &detail);
        assert!(out.contains("(none)"));
        assert!(out.contains("Default Profile:  -"));
    }

    #[test]
    fn wipe_summary_reports_failures() {
        let summary = WipeSummary {
            project: "edge-1".into(),
            success: false,
            failures: vec!["failed to delete registry reg1: boom".into()],
        };
        let out = render(&OutputFormat::default(), &summary);
        assert!(out.contains("1 failure(s)"));

        let clean = WipeSummary {
            project: "edge-1".into(),
            success: true,
            failures: Vec::new(),
        };
        let out = render(&OutputFormat::default(), &clean);
        assert!(out.contains("catalog wiped"));
        assert!(!out.contains("failure"));
    }

    #[test]
    fn format_selector() {
        assert!(OutputFormat::new(Format::Json).is_json());
        assert!(!OutputFormat::default().is_json());
    }
}
