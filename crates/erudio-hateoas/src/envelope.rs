//! Paged envelopes with navigation links.

use crate::link::{rel, Link, LinkBuilder};
use crate::representation::Representation;
use erudio_core::{total_pages, ErudioError, ErudioResult, Page, PageRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page metadata exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

impl PageMetadata {
    /// Computes metadata; `size` must be non-zero.
    pub fn new(size: usize, number: usize, total_elements: u64) -> ErudioResult<Self> {
        if size == 0 {
            return Err(ErudioError::InvalidPageSize(size));
        }
        Ok(Self {
            size: size as u64,
            total_elements,
            total_pages: total_pages(total_elements, size),
            number: number as u64,
        })
    }

    /// Index of the last page; `0` when there are no elements.
    #[must_use]
    pub const fn last_page(&self) -> u64 {
        self.total_pages.saturating_sub(1)
    }

    /// Returns true when a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.last_page()
    }
}

/// A page of representations plus collection links and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "PagedModel")]
pub struct PagedModel<R> {
    #[serde(default)]
    pub content: Vec<R>,
    #[serde(default)]
    pub links: Vec<Link>,
    pub page: PageMetadata,
}

impl<R> PagedModel<R> {
    /// Finds a collection link by relation.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }
}

/// Wraps pages of representations found under one collection URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedModelBuilder {
    base: String,
}

impl PagedModelBuilder {
    /// `base` is the absolute collection URI, e.g. `http://localhost:8888/api/person/v1`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Attaches item `self` links and collection links `first`, `prev`,
    /// `self`, `next`, `last` (in that order).
    ///
    /// `prev` is present only past page 0; `next` is absent on the last
    /// page and beyond. A request beyond the last page yields the
    /// repository's (empty) content with consistent metadata.
    pub fn build<R: Representation>(&self, page: Page<R>, request: &PageRequest) -> ErudioResult<PagedModel<R>> {
        let metadata = PageMetadata::new(request.size, request.page, page.total_elements)?;

        let mut content = page.content;
        for item in &mut content {
            self.link_item(item)?;
        }

        let links = self.collection_links(&metadata, request);
        debug!(
            base = %self.base,
            number = metadata.number,
            total_pages = metadata.total_pages,
            "Built paged model"
        );

        Ok(PagedModel {
            content,
            links,
            page: metadata,
        })
    }

    /// Sets the canonical `self` link on one representation.
    pub fn link_item<R: Representation>(&self, item: &mut R) -> ErudioResult<()> {
        let id = item.id().ok_or_else(|| {
            ErudioError::internal(format!(
                "{} {} representation has no identifier to link",
                R::COLLECTION_REL,
                R::VERSION
            ))
        })?;
        item.set_self_link(LinkBuilder::item(&self.base, id));
        Ok(())
    }

    fn collection_links(&self, metadata: &PageMetadata, request: &PageRequest) -> Vec<Link> {
        let last = metadata.last_page();
        let mut links = Vec::with_capacity(5);

        links.push(Link::new(rel::FIRST, self.navigation_href(0, request)));
        if metadata.number > 0 {
            let prev = (metadata.number - 1).min(last);
            links.push(Link::new(rel::PREV, self.navigation_href(prev, request)));
        }
        links.push(Link::self_link(LinkBuilder::with_query(
            &self.base,
            &[
                ("page", metadata.number.to_string()),
                ("size", metadata.size.to_string()),
                ("direction", request.direction().to_string()),
            ],
        )));
        if metadata.has_next() {
            links.push(Link::new(rel::NEXT, self.navigation_href(metadata.number + 1, request)));
        }
        links.push(Link::new(rel::LAST, self.navigation_href(last, request)));

        links
    }

    fn navigation_href(&self, page: u64, request: &PageRequest) -> String {
        LinkBuilder::with_query(
            &self.base,
            &[
                ("direction", request.direction().to_string()),
                ("page", page.to_string()),
                ("size", request.size.to_string()),
                ("sort", request.sort.to_query_value()),
            ],
        )
    }
}
