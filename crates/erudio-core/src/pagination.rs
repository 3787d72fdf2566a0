//! Pagination types for list operations.

use crate::{ErudioError, ErudioResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Returns the lowercase query-string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ErudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ErudioError::validation(format!(
                "direction must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Ordering of a page request: one property and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Property name as exposed by the representation (e.g. `firstName`).
    pub property: String,
    /// Sort direction.
    pub direction: Direction,
}

impl Sort {
    /// Creates a sort order on the given property.
    #[must_use]
    pub fn by(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Renders the `property,direction` form used in query strings.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.property, self.direction)
    }
}

impl FromStr for Sort {
    type Err = ErudioError;

    /// Parses `property` or `property,direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        if property.is_empty() {
            return Err(ErudioError::validation("sort property must not be empty"));
        }
        let direction = match parts.next() {
            Some(d) => d.parse()?,
            None => Direction::Asc,
        };
        Ok(Self::by(property, direction))
    }
}

/// A request for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// Requested ordering.
    pub sort: Sort,
}

impl PageRequest {
    /// Creates a page request, rejecting a zero page size.
    pub fn new(page: usize, size: usize, sort: Sort) -> ErudioResult<Self> {
        if size == 0 {
            return Err(ErudioError::InvalidPageSize(size));
        }
        Ok(Self { page, size, sort })
    }

    /// Caps the page size at `max`.
    #[must_use]
    pub fn clamped(mut self, max: usize) -> Self {
        self.size = self.size.min(max.max(1));
        self
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Returns `(limit, offset)` as SQL binds when the window starts inside
    /// `total_elements`; `None` means the page lies past the end.
    #[must_use]
    pub fn sql_window(&self, total_elements: u64) -> Option<(i64, i64)> {
        let offset = self.offset();
        if offset as u64 >= total_elements {
            return None;
        }
        Some((i64::try_from(self.limit()).ok()?, i64::try_from(offset).ok()?))
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.sort.direction
    }
}

/// Computes `ceil(total_elements / size)`; zero when `size` is zero.
#[must_use]
pub const fn total_pages(total_elements: u64, size: usize) -> u64 {
    if size == 0 {
        return 0;
    }
    total_elements.div_ceil(size as u64)
}

/// A page of results as returned by a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// The page number (0-indexed).
    pub number: usize,
    /// The requested page size.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, number: usize, size: usize, total_elements: u64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    /// Creates a page with no content positioned at the request, e.g. one
    /// that lies past the last page of `total_elements`.
    #[must_use]
    pub fn empty(request: &PageRequest, total_elements: u64) -> Self {
        Self::new(Vec::new(), request.page, request.size, total_elements)
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        total_pages(self.total_elements, self.size)
    }

}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
