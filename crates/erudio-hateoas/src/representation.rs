//! The contract a serializable view must meet to carry links.

use crate::link::{rel, Link};

/// A versioned, serialization-facing view of an entity.
pub trait Representation {
    /// Version tag, e.g. `v1`.
    const VERSION: &'static str;

    /// Key under `_embedded` when a page of these is rendered as HAL.
    const COLLECTION_REL: &'static str;

    /// Identifier of the underlying entity, if it has one.
    fn id(&self) -> Option<i64>;

    fn links(&self) -> &[Link];

    fn links_mut(&mut self) -> &mut Vec<Link>;

    /// Replaces any existing `self` link so exactly one remains, first.
    fn set_self_link(&mut self, href: String) {
        let links = self.links_mut();
        links.retain(|link| link.rel != rel::SELF);
        links.insert(0, Link::self_link(href));
    }

    /// Returns the current `self` link, if any.
    fn self_link(&self) -> Option<&Link> {
        self.links().iter().find(|link| link.is_self())
    }
}
