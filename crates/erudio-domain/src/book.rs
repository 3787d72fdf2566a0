//! Book entity.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Book {
    /// Database identifier; `None` until persisted.
    pub id: Option<i64>,

    #[validate(length(max = 180))]
    pub author: String,

    pub launch_date: NaiveDateTime,

    pub price: f64,

    #[validate(length(max = 250))]
    pub title: String,
}

impl Book {
    /// Creates a not-yet-persisted book.
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        launch_date: NaiveDateTime,
        price: f64,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            author: author.into(),
            launch_date,
            price,
            title: title.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
