//! Entity-representation mappers.
//!
//! Each (entity, representation) pair gets one table declared with
//! [`mapping_table!`]. The table names every field the representation
//! version carries besides `id` and `links`, and how absence is treated:
//!
//! - `required`: the entity field is `T`, the representation field is
//!   `Option<T>`; absence is a [`MappingError::MissingField`].
//! - `optional`: both sides are `Option<T>`; `None` maps to `None`.
//! - `keep`: the entity field is `T`; absence leaves the current value
//!   (the entity default for a new one).
//!
//! The expansion is an ordinary struct literal plus field assignments, so
//! a field missing on either side or a type mismatch fails to compile.

use erudio_core::{MappingError, Page};
use erudio_hateoas::Representation;

/// Conversion between an entity and one representation version.
pub trait Mapping<R: Representation>: Default + Clone {
    /// Entity name used in mapping errors.
    const ENTITY: &'static str;

    /// Rust names of the fields copied by this table, `id` first. Wire
    /// names are their camelCase forms.
    const FIELDS: &'static [&'static str];

    /// Builds the representation, without links.
    fn to_representation(&self) -> R;

    /// Copies the declared fields of `representation` onto `self`.
    ///
    /// Either every field is copied or, on error, nothing is. The
    /// identifier is never touched.
    fn apply(&mut self, representation: &R) -> Result<(), MappingError>;

    /// Sets the identifier.
    fn assign_id(&mut self, id: Option<i64>);

    /// Builds a new entity from `representation`, carrying its identifier if any.
    fn to_entity(representation: &R) -> Result<Self, MappingError> {
        let mut entity = Self::default();
        entity.apply(representation)?;
        entity.assign_id(representation.id());
        Ok(entity)
    }

    /// As [`Mapping::to_entity`], but the identifier must be present.
    fn to_existing_entity(representation: &R) -> Result<Self, MappingError> {
        if representation.id().is_none() {
            return Err(MappingError::MissingIdentifier {
                entity: Self::ENTITY,
                version: R::VERSION,
            });
        }
        Self::to_entity(representation)
    }
}

/// Maps a page of entities to representations, keeping page metadata.
pub fn to_representations<E, R>(page: Page<E>) -> Page<R>
where
    E: Mapping<R>,
    R: Representation,
{
    page.map(|entity| entity.to_representation())
}

macro_rules! mapping_table {
    (@out required, $value:expr) => { Some($value.clone()) };
    (@out keep, $value:expr) => { Some($value.clone()) };
    (@out optional, $value:expr) => { $value.clone() };

    (@in required, $target:expr, $source:expr, $name:literal, $repr:ident, $field:ident) => {
        $target = $source.clone().ok_or_else(|| erudio_core::MappingError::MissingField {
            entity: $name,
            version: <$repr as erudio_hateoas::Representation>::VERSION,
            field: stringify!($field),
        })?
    };
    (@in keep, $target:expr, $source:expr, $name:literal, $repr:ident, $field:ident) => {
        if let Some(value) = &$source {
            $target = value.clone();
        }
    };
    (@in optional, $target:expr, $source:expr, $name:literal, $repr:ident, $field:ident) => {
        $target = $source.clone()
    };

    ($entity:ty as $name:literal => $repr:ident { $($kind:ident $field:ident),+ $(,)? }) => {
        impl $crate::mappers::Mapping<$repr> for $entity {
            const ENTITY: &'static str = $name;
            const FIELDS: &'static [&'static str] = &["id", $(stringify!($field)),+];

            fn to_representation(&self) -> $repr {
                $repr {
                    id: self.id,
                    $($field: mapping_table!(@out $kind, self.$field),)+
                    links: Vec::new(),
                }
            }

            fn apply(&mut self, representation: &$repr) -> Result<(), erudio_core::MappingError> {
                let mut next = self.clone();
                $(mapping_table!(@in $kind, next.$field, representation.$field, $name, $repr, $field);)+
                *self = next;
                Ok(())
            }

            fn assign_id(&mut self, id: Option<i64>) {
                self.id = id;
            }
        }
    };
}

mod book_mapper;
mod person_mapper;
