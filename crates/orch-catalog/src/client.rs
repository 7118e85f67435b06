//! Catalog client abstraction and paginated listing.
//!
//! [`CatalogClient`] is the seam between the wipe engine / command handlers
//! and the remote service. Implementations are constructor-injected wherever
//! they are consumed; nothing in this crate reaches for ambient state to
//! find a client.

use std::collections::VecDeque;
use std::future::Future;

use crate::error::CatalogResult;
use crate::model::{Application, Artifact, DeploymentPackage, ProjectId, Registry};

/// Maximum number of items requested per list call.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Cursor for one list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of items to skip.
    pub offset: u32,
    /// Maximum number of items to return, capped at [`MAX_PAGE_SIZE`].
    pub page_size: u32,
}

impl PageRequest {
    /// The first page with the maximum page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            offset: 0,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Whether the backend reports more items past this page.
    pub has_next: bool,
}

impl<T> Page<T> {
    /// A final page holding the given items.
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
        }
    }

    /// An empty final page.
    #[must_use]
    pub fn empty() -> Self {
        Self::last(Vec::new())
    }
}

/// Outcome of a list call.
///
/// The catalog service answers list calls for collections that do not exist
/// (yet) with a non-success status rather than an empty page. Callers treat
/// that as "nothing to do", not as a failure, so the distinction is carried
/// in the type instead of being folded into an error. Transport failures
/// still surface as [`crate::CatalogError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome<T> {
    /// The backend answered with a page of items.
    Listed(Page<T>),
    /// The backend answered non-success; the collection is treated as empty.
    Unavailable,
}

/// Typed access to the catalog service, scoped by project.
///
/// Four resource families, each with list (paginated) and delete, plus get
/// and update where the wipe preparation pass needs them.
#[allow(async_fn_in_trait)]
pub trait CatalogClient {
    /// Lists one page of deployment packages.
    async fn list_deployment_packages(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<DeploymentPackage>>;

    /// Fetches a deployment package by name and version.
    async fn get_deployment_package(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<DeploymentPackage>;

    /// Replaces a deployment package's stored representation.
    async fn update_deployment_package(
        &self,
        project: &ProjectId,
        package: &DeploymentPackage,
    ) -> CatalogResult<()>;

    /// Deletes a deployment package by name and version.
    async fn delete_deployment_package(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<()>;

    /// Lists one page of applications.
    async fn list_applications(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Application>>;

    /// Fetches an application by name and version.
    async fn get_application(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<Application>;

    /// Replaces an application's stored representation.
    async fn update_application(
        &self,
        project: &ProjectId,
        application: &Application,
    ) -> CatalogResult<()>;

    /// Deletes an application by name and version.
    async fn delete_application(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<()>;

    /// Lists one page of artifacts.
    async fn list_artifacts(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Artifact>>;

    /// Deletes an artifact by name.
    async fn delete_artifact(&self, project: &ProjectId, name: &str) -> CatalogResult<()>;

    /// Lists one page of registries.
    async fn list_registries(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Registry>>;

    /// Deletes a registry by name.
    async fn delete_registry(&self, project: &ProjectId, name: &str) -> CatalogResult<()>;
}

impl<T: CatalogClient> CatalogClient for &T {
    async fn list_deployment_packages(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<DeploymentPackage>> {
        (**self).list_deployment_packages(project, page).await
    }

    async fn get_deployment_package(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<DeploymentPackage> {
        (**self).get_deployment_package(project, name, version).await
    }

    async fn update_deployment_package(
        &self,
        project: &ProjectId,
        package: &DeploymentPackage,
    ) -> CatalogResult<()> {
        (**self).update_deployment_package(project, package).await
    }

    async fn delete_deployment_package(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<()> {
        (**self).delete_deployment_package(project, name, version).await
    }

    async fn list_applications(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Application>> {
        (**self).list_applications(project, page).await
    }

    async fn get_application(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<Application> {
        (**self).get_application(project, name, version).await
    }

    async fn update_application(
        &self,
        project: &ProjectId,
        application: &Application,
    ) -> CatalogResult<()> {
        (**self).update_application(project, application).await
    }

    async fn delete_application(
        &self,
        project: &ProjectId,
        name: &str,
        version: &str,
    ) -> CatalogResult<()> {
        (**self).delete_application(project, name, version).await
    }

    async fn list_artifacts(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Artifact>> {
        (**self).list_artifacts(project, page).await
    }

    async fn delete_artifact(&self, project: &ProjectId, name: &str) -> CatalogResult<()> {
        (**self).delete_artifact(project, name).await
    }

    async fn list_registries(
        &self,
        project: &ProjectId,
        page: PageRequest,
    ) -> CatalogResult<ListOutcome<Registry>> {
        (**self).list_registries(project, page).await
    }

    async fn delete_registry(&self, project: &ProjectId, name: &str) -> CatalogResult<()> {
        (**self).delete_registry(project, name).await
    }
}

/// Lazy paginated sequence over one list operation.
///
/// Wraps a fetch function, buffers the current page and yields items one at
/// a time, advancing the offset internally until the backend signals no more
/// pages. Restartable only by constructing a new pager from offset zero.
///
/// An [`ListOutcome::Unavailable`] answer ends the sequence without error;
/// a transport failure surfaces from [`Pager::next`] and ends it.
pub struct Pager<T, F> {
    fetch: F,
    buffer: VecDeque<T>,
    offset: u32,
    page_size: u32,
    exhausted: bool,
}

impl<T, F, Fut> Pager<T, F>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = CatalogResult<ListOutcome<T>>>,
{
    /// Creates a pager over the given fetch function, starting at offset
    /// zero with the maximum page size.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            buffer: VecDeque::new(),
            offset: 0,
            page_size: MAX_PAGE_SIZE,
            exhausted: false,
        }
    }

    /// Creates a pager with an explicit page size, capped at
    /// [`MAX_PAGE_SIZE`].
    pub fn with_page_size(fetch: F, page_size: u32) -> Self {
        let mut pager = Self::new(fetch);
        pager.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        pager
    }

    /// Yields the next item, fetching the next page when the buffer runs
    /// dry.
    ///
    /// # Errors
    ///
    /// Returns the fetch function's error; the sequence is exhausted
    /// afterwards.
    pub async fn next(&mut self) -> CatalogResult<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.exhausted {
                return Ok(None);
            }

            let request = PageRequest {
                offset: self.offset,
                page_size: self.page_size,
            };
            match (self.fetch)(request).await {
                Ok(ListOutcome::Listed(page)) => {
                    let fetched = page.items.len() as u32;
                    self.offset += fetched;
                    // An empty page ends the sequence even if the backend
                    // claims more; otherwise the offset would never advance.
                    if fetched == 0 || !page.has_next {
                        self.exhausted = true;
                    }
                    self.buffer.extend(page.items);
                }
                Ok(ListOutcome::Unavailable) => {
                    self.exhausted = true;
                }
                Err(err) => {
                    self.exhausted = true;
                    return Err(err);
                }
            }
        }
    }

    /// Drains the remaining items into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error; items yielded before it are dropped.
    pub async fn collect(mut self) -> CatalogResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::CatalogError;

    /// Scripted pages plus a log of the offsets requested.
    struct Script {
        pages: RefCell<VecDeque<CatalogResult<ListOutcome<u32>>>>,
        offsets: RefCell<Vec<u32>>,
    }

    impl Script {
        fn new(pages: Vec<CatalogResult<ListOutcome<u32>>>) -> Self {
            Self {
                pages: RefCell::new(pages.into()),
                offsets: RefCell::new(Vec::new()),
            }
        }

        async fn fetch(&self, page: PageRequest) -> CatalogResult<ListOutcome<u32>> {
            self.offsets.borrow_mut().push(page.offset);
            self.pages
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(ListOutcome::Listed(Page::empty())))
        }
    }

    fn listed(items: Vec<u32>, has_next: bool) -> CatalogResult<ListOutcome<u32>> {
        Ok(ListOutcome::Listed(Page { items, has_next }))
    }

    #[tokio::test]
    async fn exhausts_all_pages_with_increasing_offsets() {
        // Three full pages then a final short one: four list calls total.
        let script = Script::new(vec![
            listed(vec![0, 1], true),
            listed(vec![2, 3], true),
            listed(vec![4, 5], true),
            listed(vec![6], false),
        ]);

        let pager = Pager::with_page_size(|p| script.fetch(p), 2);
        let items = pager.collect().await.unwrap();

        assert_eq!(items, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(*script.offsets.borrow(), vec![0, 2, 4, 6]);
    }

    #[tokio::test]
    async fn single_page_needs_one_call() {
        let script = Script::new(vec![listed(vec![1, 2, 3], false)]);
        let pager = Pager::new(|p| script.fetch(p));
        let items = pager.collect().await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(script.offsets.borrow().len(), 1);
    }

    #[tokio::test]
    async fn unavailable_ends_sequence_silently() {
        let script = Script::new(vec![Ok(ListOutcome::Unavailable)]);
        let mut pager = Pager::new(|p| script.fetch(p));

        assert!(pager.next().await.unwrap().is_none());
        // Exhausted: no further fetches.
        assert!(pager.next().await.unwrap().is_none());
        assert_eq!(script.offsets.borrow().len(), 1);
    }

    #[tokio::test]
    async fn empty_page_claiming_more_still_terminates() {
        let script = Script::new(vec![listed(Vec::new(), true)]);
        let mut pager = Pager::new(|p| script.fetch(p));

        assert!(pager.next().await.unwrap().is_none());
        assert_eq!(script.offsets.borrow().len(), 1);
    }

    #[tokio::test]
    async fn transport_error_surfaces_and_exhausts() {
        let script = Script::new(vec![
            listed(vec![1], true),
            Err(CatalogError::Transport("refused".into())),
        ]);
        let mut pager = Pager::new(|p| script.fetch(p));

        assert_eq!(pager.next().await.unwrap(), Some(1));
        assert!(pager.next().await.is_err());
        assert!(pager.next().await.unwrap().is_none());
    }

    #[test_case::test_case(0, 1; "zero clamps up to one")]
    #[test_case::test_case(50, 50; "in range is kept")]
    #[test_case::test_case(10_000, MAX_PAGE_SIZE; "over the cap clamps down")]
    fn page_size_is_clamped(requested: u32, expected: u32) {
        let pager = Pager::<u32, _>::with_page_size(
            |_p| async { Ok(ListOutcome::Listed(Page::empty())) },
            requested,
        );
        assert_eq!(pager.page_size, expected);
    }
}
