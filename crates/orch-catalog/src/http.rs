//! REST implementation of [`CatalogClient`].
//!
//! Talks HTTP+JSON to the catalog service. List calls that come back with a
//! non-success status are mapped to [`ListOutcome::Unavailable`] instead of
//! an error; the service answers that way for collections with nothing in
//! them and callers treat it as "nothing to do". Mutations (get, update,
//! delete) map non-success statuses to [`CatalogError::Api`].
//!
//! No retries, no backoff: every call is attempted exactly once, bounded
//! only by the transport's own timeout.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::client::{CatalogClient, ListOutcome, Page, PageRequest};
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Application, Artifact, DeploymentPackage, ProjectId, Registry};

/// HTTP client for the catalog service.
pub struct HttpCatalogClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageListBody {
    #[serde(default)]
    deployment_packages: Vec<DeploymentPackage>,
    #[serde(default)]
    total_elements: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationListBody {
    #[serde(default)]
    applications: Vec<Application>,
    #[serde(default)]
    total_elements: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactListBody {
    #[serde(default)]
    artifacts: Vec<Artifact>,
    #[serde(default)]
    total_elements: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryListBody {
    #[serde(default)]
    registries: Vec<Registry>,
    #[serde(default)]
    total_elements: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageGetBody {
    deployment_package: DeploymentPackage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationGetBody {
    application: Application,
}

impl HttpCatalogClient {
    /// Creates a client against the given base URL with an optional bearer
    /// token.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not use http or https.
    pub fn new(base_url: &str, token: Option<String>) -> CatalogResult<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::Config(format!(
                "invalid api endpoint: {base_url}, must start with http:// or https://"
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        })
    }

    fn url(&self, project: &ProjectId, path: &str) -> String {
        format!(
            "{}/v3/projects/{}/catalog/{path}",
            self.base_url,
            project.as_str()
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn list<B: DeserializeOwned>(
        &self,
        project: &ProjectId,
        collection: &str,
        page: PageRequest,
    ) -> CatalogResult<Option<(B, u32)>> {
        let url = self.url(project, collection);
        trace!(%url, offset = page.offset, "listing");
        let response = self
            .authorized(self.client.get(&url))
            .query(&[("pageSize", page.page_size), ("offset", page.offset)])
            .send()
            .await?;

        if !response.status().is_success() {
            // Nothing to clean up, by contract with the service. A genuine
            // outage also lands here once the connection itself succeeds.
            debug!(%url, status = %response.status(), "non-success list treated as empty");
            return Ok(None);
        }
        let body = response.json::<B>().await?;
        Ok(Some((body, page.offset)))
    }

    async fn get<B: DeserializeOwned>(&self, url: String) -> CatalogResult<B> {
        let response = self.authorized(self.client.get(&url)).send().await?;
        Self::checked(response).await?.json::<B>().await.map_err(Into::into)
    }

    async fn mutate(&self, builder: RequestBuilder) -> CatalogResult<()> {
        let response = builder.send().await?;
        Self::checked(response).await.map(|_| ())
    }

    async fn checked(response: Response) -> CatalogResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            Err(CatalogError::api(status.as_u16(), message))
        }
    }

    fn page<T>(items: Vec<T>, total: u32, offset: u32) -> ListOutcome<T> {
        let fetched = offset + items.len() as u32;
        ListOutcome::Listed(Page {
            items,
            has_next: fetched < total,
        })
    }
}

impl CatalogClient for HttpCatalogClient {
    async fn list_deployment_packages(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<DeploymentPackage>> {
        match self
            .list::<PackageListBody>(project, "deployment_packages", page)
            .await?
        {
            Some((body, offset)) => Ok(Self::page(
                body.deployment_packages,
                body.total_elements,
                offset,
            )),
            None => Ok(ListOutcome::Unavailable),
        }
    }

    async fn get_deployment_package(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<DeploymentPackage> {
        let url = self.url(project, &format!("deployment_packages/{name}/versions/{version}"));
        let body: PackageGetBody = self.get(url).await?;
        Ok(body.deployment_package)
    }

    async fn update_deployment_package(
        &self,
        project: &ProjectId,
        package: &DeploymentPackage,
    ) -> CatalogResult<()> {
        let url = self.url(
            project,
            &format!(
                "deployment_packages/{}/versions/{}",
                package.name, package.version
            ),
        );
        debug!(%url, "updating deployment package");
        self.mutate(self.authorized(self.client.put(&url)).json(package))
            .await
    }

    async fn delete_deployment_package(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<()> {
        let url = self.url(project, &format!("deployment_packages/{name}/versions/{version}"));
        debug!(%url, "deleting deployment package");
        self.mutate(self.authorized(self.client.delete(&url))).await
    }

    async fn list_applications(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Application>> {
        match self
            .list::<ApplicationListBody>(project, "applications", page)
            .await?
        {
            Some((body, offset)) => Ok(Self::page(body.applications, body.total_elements, offset)),
            None => Ok(ListOutcome::Unavailable),
        }
    }

    async fn get_application(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<Application> {
        let url = self.url(project, &format!("applications/{name}/versions/{version}"));
        let body: ApplicationGetBody = self.get(url).await?;
        Ok(body.application)
    }

    async fn update_application(
        &self,
        project: &ProjectId,
        application: &Application,
    ) -> CatalogResult<()> {
        let url = self.url(
            project,
            &format!(
                "applications/{}/versions/{}",
                application.name, application.version
            ),
        );
        debug!(%url, "updating application");
        self.mutate(self.authorized(self.client.put(&url)).json(application))
            .await
    }

    async fn delete_application(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<()> {
        let url = self.url(project, &format!("applications/{name}/versions/{version}"));
        debug!(%url, "deleting application");
        self.mutate(self.authorized(self.client.delete(&url))).await
    }

    async fn list_artifacts(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Artifact>> {
        match self
            .list::<ArtifactListBody>(project, "artifacts", page)
            .await?
        {
            Some((body, offset)) => Ok(Self::page(body.artifacts, body.total_elements, offset)),
            None => Ok(ListOutcome::Unavailable),
        }
    }

    async fn delete_artifact(&self, project: &ProjectId, name: &str) -> CatalogResult<()> {
        let url = self.url(project, &format!("artifacts/{name}"));
        debug!(%url, "deleting artifact");
        self.mutate(self.authorized(self.client.delete(&url))).await
    }

    async fn list_registries(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Registry>> {
        match self
            .list::<RegistryListBody>(project, "registries", page)
            .await?
        {
            Some((body, offset)) => Ok(Self::page(body.registries, body.total_elements, offset)),
            None => Ok(ListOutcome::Unavailable),
        }
    }

    async fn delete_registry(&self, project: &ProjectId, name: &str) -> CatalogResult<()> {
        let url = self.url(project, &format!("registries/{name}"));
        debug!(%url, "deleting registry");
        self.mutate(self.authorized(self.client.delete(&url))).await
    }
}
