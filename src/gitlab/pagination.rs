//! Page-walking over cursor/page-number paginated list endpoints
//!
//! `collect_pages` is the materializing form: pages are fetched one after the
//! other and concatenated in order. The streaming form lives in
//! [`crate::gitlab::stream`] and reuses [`walk_pages`].

use std::future::Future;

use log::{debug, trace};
use reqwest::header::HeaderMap;

use crate::config::api;
use crate::error::Result;

/// Request-side pagination state, mutated as pages are walked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Page to fetch next (0 is treated as 1)
    pub page: u32,
    pub per_page: u32,
    /// Server-side search term (distinct from local regex filters)
    pub search: Option<String>,
    /// Extra endpoint-specific query parameters
    pub params: Vec<(&'static str, String)>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: api::DEFAULT_PAGE_SIZE,
            search: None,
            params: Vec::new(),
        }
    }
}

impl ListOptions {
    /// Options with a server-side search term
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Add an endpoint-specific query parameter
    pub fn with_param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Render as a URL query string (without leading `?`)
    pub fn query_string(&self) -> String {
        let mut pairs = vec![
            format!("page={}", self.page.max(1)),
            format!("per_page={}", self.per_page),
        ];
        if let Some(search) = &self.search {
            pairs.push(format!("search={}", urlencoding::encode(search)));
        }
        for (key, value) in &self.params {
            pairs.push(format!("{}={}", key, urlencoding::encode(value)));
        }
        pairs.join("&")
    }
}

/// Response-side pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u32,
    /// `None` when the server does not report a total (very large collections)
    pub total_pages: Option<u32>,
    pub next_page: Option<u32>,
}

impl PageMeta {
    /// Metadata for a response that is known to be the only page
    pub fn single(page: u32) -> Self {
        Self {
            current_page: page,
            total_pages: Some(page),
            next_page: None,
        }
    }

    /// Read pagination headers, falling back to the requested page number
    pub fn from_headers(headers: &HeaderMap, requested_page: u32) -> Self {
        let number = |name: &str| -> Option<u32> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse().ok())
        };

        Self {
            current_page: number(api::HEADER_PAGE).unwrap_or(requested_page.max(1)),
            total_pages: number(api::HEADER_TOTAL_PAGES),
            next_page: number(api::HEADER_NEXT_PAGE),
        }
    }

    /// Whether another page should be requested after this one
    pub fn has_more(&self) -> bool {
        match self.total_pages {
            Some(total) => self.current_page < total,
            None => self.next_page.is_some(),
        }
    }

    /// Page number to request next; only meaningful while `has_more()`
    pub fn next(&self) -> u32 {
        self.next_page.unwrap_or(self.current_page + 1)
    }
}

/// One fetched page of items
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }
}

/// Walk every page, handing each page's items to `sink` in order
///
/// `sink` returns `false` to stop early (consumer gone). A fetch error stops
/// the walk immediately; no page is retried.
pub async fn walk_pages<T, F, Fut, S, SFut>(
    mut opts: ListOptions,
    mut fetch: F,
    mut sink: S,
) -> Result<()>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
    S: FnMut(Vec<T>) -> SFut,
    SFut: Future<Output = bool>,
{
    if opts.page == 0 {
        opts.page = 1;
    }

    loop {
        trace!("Fetching page {}", opts.page);
        let page = fetch(opts.clone()).await?;
        let meta = page.meta;

        debug!(
            "Page {}/{} returned {} items",
            meta.current_page,
            meta.total_pages
                .map(|t| t.to_string())
                .unwrap_or_else(|| "?".to_string()),
            page.items.len()
        );

        if !sink(page.items).await {
            debug!("Page consumer stopped at page {}", meta.current_page);
            return Ok(());
        }

        if !meta.has_more() {
            return Ok(());
        }
        opts.page = meta.next();
    }
}

/// Fetch all pages and return their items concatenated in page order
///
/// Nothing is returned on error: items from pages fetched before the failing
/// one are discarded.
pub async fn collect_pages<T, F, Fut>(opts: ListOptions, fetch: F) -> Result<Vec<T>>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all = Vec::new();
    walk_pages(opts, fetch, |items| {
        all.extend(items);
        async { true }
    })
    .await?;
    Ok(all)
}
