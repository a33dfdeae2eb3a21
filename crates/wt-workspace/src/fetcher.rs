//! Week-windowed page retrieval and enrichment
//!
//! The remote search has no creation-time filter, so correctness of a
//! report rests on the local predicate `start <= created_time <= end`.
//! Search failures propagate; parent lookups fail per page and never abort
//! the batch.

use crate::api::WorkspaceApi;
use crate::error::{LookupError, WorkspaceError};
use crate::page::{PageRecord, ParentInfo};
use crate::records::{ParentRef, RawPage};
use crate::report::WeekReport;
use chrono::{DateTime, Local, TimeZone, Utc};
use moka::future::Cache;
use std::time::Duration;
use wt_calendar::WeekWindow;

const PARENT_CACHE_CAPACITY: u64 = 1_000;
const PARENT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Searches the workspace and turns raw pages into [`PageRecord`]s
pub struct RecordFetcher<A> {
    api: A,
    parents: Cache<ParentRef, ParentInfo>,
    max_search_pages: usize,
}

impl<A: WorkspaceApi> RecordFetcher<A> {
    /// Create fetcher reading only the first page of search results
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            parents: Cache::builder()
                .max_capacity(PARENT_CACHE_CAPACITY)
                .time_to_live(PARENT_CACHE_TTL)
                .build(),
            max_search_pages: 1,
        }
    }

    /// Follow search cursors for up to `pages` result pages
    #[must_use]
    pub fn with_max_search_pages(mut self, pages: usize) -> Self {
        self.max_search_pages = pages.max(1);
        self
    }

    /// Pages created inside `window`, in the provider's order
    ///
    /// # Errors
    /// Any search failure; nothing is returned for a partially read result set.
    pub async fn search<Tz: TimeZone>(
        &self,
        window: &WeekWindow<Tz>,
    ) -> Result<Vec<RawPage>, WorkspaceError> {
        let mut cursor = None;
        let mut matched = Vec::new();

        for _ in 0..self.max_search_pages {
            let response = self.api.search_pages(cursor.take()).await?;
            let seen = response.results.len();
            matched.extend(
                response
                    .results
                    .into_iter()
                    .filter(|page| window.contains(&page.created_time)),
            );
            tracing::debug!(
                "Search page held {} result(s), {} in window so far",
                seen,
                matched.len()
            );

            match (response.has_more, response.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        Ok(matched)
    }

    /// Resolve the page's parent database or page
    ///
    /// `Ok(None)` means the page has no resolvable parent. Successful lookups
    /// are memoized per container; failures are not.
    ///
    /// # Errors
    /// `LookupError` when the container could not be retrieved.
    pub async fn resolve_parent(&self, page: &RawPage) -> Result<Option<ParentInfo>, LookupError> {
        let Some(parent) = page.parent_ref() else {
            return Ok(None);
        };
        if let Some(known) = self.parents.get(&parent).await {
            return Ok(Some(known));
        }

        let info = match &parent {
            ParentRef::Database(id) => {
                let database = self
                    .api
                    .retrieve_database(id)
                    .await
                    .map_err(|source| LookupError::new(parent.clone(), source))?;
                ParentInfo::database(id.as_str(), database.title_text())
            }
            ParentRef::Page(id) => {
                let parent_page = self
                    .api
                    .retrieve_page(id)
                    .await
                    .map_err(|source| LookupError::new(parent.clone(), source))?;
                ParentInfo::page(id.as_str(), parent_page.title())
            }
        };

        self.parents.insert(parent, info.clone()).await;
        Ok(Some(info))
    }

    /// Enrich one page; a failed parent lookup leaves `parent_info` empty
    pub async fn format_page_info(&self, page: &RawPage) -> PageRecord {
        let parent_info = match self.resolve_parent(page).await {
            Ok(parent) => parent,
            Err(err) => {
                tracing::debug!("Page {}: {}", page.id, err);
                None
            }
        };

        PageRecord {
            id: page.id.clone(),
            title: page.title(),
            url: page.url.clone(),
            created_time: page.created_time,
            link_property: page.link_property(),
            parent_info,
        }
    }

    /// Report for the week `weeks_ago` weeks before the one containing `now`
    ///
    /// Pages are enriched one after another.
    ///
    /// # Errors
    /// Search failures only.
    pub async fn collect_week<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        weeks_ago: u32,
    ) -> Result<WeekReport, WorkspaceError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let window = WeekWindow::at(now, weeks_ago);
        let pages = self.search(&window).await?;
        tracing::info!(
            "{}: {} page(s) created {}",
            window.label(),
            pages.len(),
            window.date_range()
        );

        let mut records = Vec::with_capacity(pages.len());
        for page in &pages {
            records.push(self.format_page_info(page).await);
        }

        Ok(WeekReport {
            week: weeks_ago,
            week_label: window.label(),
            date_range: window.date_range(),
            start: window.start_utc(),
            end: window.end_utc(),
            pages: records,
            generated_at: Utc::now(),
        })
    }

    /// Report relative to the current local time
    ///
    /// # Errors
    /// Search failures only.
    pub async fn collect_week_now(&self, weeks_ago: u32) -> Result<WeekReport, WorkspaceError> {
        self.collect_week(&Local::now(), weeks_ago).await
    }
}
