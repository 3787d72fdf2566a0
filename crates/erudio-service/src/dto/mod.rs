//! Data Transfer Objects for the API surface.

mod auth_dto;
mod book_dto;
mod person_dto;

pub use auth_dto::*;
pub use book_dto::*;
pub use person_dto::*;

use erudio_hateoas::{Link, Representation};

macro_rules! representation {
    ($repr:ty, $version:literal, $collection:literal) => {
        impl Representation for $repr {
            const VERSION: &'static str = $version;
            const COLLECTION_REL: &'static str = $collection;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn links(&self) -> &[Link] {
                &self.links
            }

            fn links_mut(&mut self) -> &mut Vec<Link> {
                &mut self.links
            }
        }
    };
}

representation!(PersonVO, "v1", "personVOList");
representation!(PersonVOV2, "v2", "personVOV2List");
representation!(BookVO, "v1", "bookVOList");
