//! Active field set composition.
//!
//! A template has base fields that are always present, and a discriminator
//! (application type, network, previous carrier) whose current value adds
//! more. Each discriminator is an enum implementing [`Variant`]; every
//! variant owns its complete additional field list. [`active_fields`] is the
//! only place the two are combined, so switching the discriminator replaces
//! the whole set in one step and nothing from the previous variant survives.

use serde::Serialize;
use std::collections::HashSet;

use super::FieldPosition;

/// One value of a template's discriminator.
pub trait Variant {
    /// Fields this variant adds to the base set.
    fn fields(&self) -> Vec<FieldPosition>;
}

/// Templates without a discriminator.
impl Variant for () {
    fn fields(&self) -> Vec<FieldPosition> {
        Vec::new()
    }
}

/// Ordered field list with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActiveFields(Vec<FieldPosition>);

impl ActiveFields {
    /// Build a set, keeping the first field for each id.
    ///
    /// Duplicates are a schema authoring mistake; they're logged and dropped
    /// rather than rendered twice.
    pub fn new(fields: impl IntoIterator<Item = FieldPosition>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for field in fields {
            if seen.insert(field.id.clone()) {
                out.push(field);
            } else {
                tracing::warn!(id = %field.id, "duplicate field id in active set, ignoring");
            }
        }
        Self(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPosition> {
        self.0.iter()
    }

    /// Fields placed on `page` (1-based), in set order.
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &FieldPosition> {
        self.0.iter().filter(move |f| f.page == page)
    }

    pub fn get(&self, id: &str) -> Option<&FieldPosition> {
        self.0.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FieldPosition>> for ActiveFields {
    fn from(fields: Vec<FieldPosition>) -> Self {
        Self::new(fields)
    }
}

/// Base fields followed by the variant's own fields.
pub fn active_fields<V: Variant + ?Sized>(variant: &V, base: &[FieldPosition]) -> ActiveFields {
    ActiveFields::new(base.iter().cloned().chain(variant.fields()))
}
