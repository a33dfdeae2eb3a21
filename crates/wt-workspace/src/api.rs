//! Remote workspace seam

use crate::error::WorkspaceError;
use crate::records::{RawDatabase, RawPage, SearchResponse};
use async_trait::async_trait;

/// Calls the tracker makes against the document workspace
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// Pages ordered by last edit, newest first; `start_cursor` continues a previous call
    async fn search_pages(
        &self,
        start_cursor: Option<String>,
    ) -> Result<SearchResponse, WorkspaceError>;

    /// Database record by id
    async fn retrieve_database(&self, database_id: &str) -> Result<RawDatabase, WorkspaceError>;

    /// Page record by id
    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, WorkspaceError>;
}

#[async_trait]
impl<A: WorkspaceApi + ?Sized> WorkspaceApi for std::sync::Arc<A> {
    async fn search_pages(
        &self,
        start_cursor: Option<String>,
    ) -> Result<SearchResponse, WorkspaceError> {
        (**self).search_pages(start_cursor).await
    }

    async fn retrieve_database(&self, database_id: &str) -> Result<RawDatabase, WorkspaceError> {
        (**self).retrieve_database(database_id).await
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, WorkspaceError> {
        (**self).retrieve_page(page_id).await
    }
}
