//! # Field Schema
//!
//! Static per-template placement data and the values resolved against it.
//!
//! | Type | Role |
//! |------|------|
//! | [`FieldPosition`] | One field's box on one page |
//! | [`ActiveFields`] | The ordered, unique field set currently in effect |
//! | [`FieldValues`] | Display strings keyed by field id |
//! | [`Resolved`] | Fields and values produced together from one form state |
//! | [`PageImages`] | Ordered page image references of a template |

mod compose;
mod field;
mod values;

pub use compose::{ActiveFields, Variant, active_fields};
pub use field::*;
pub use values::FieldValues;

use serde::Serialize;

/// Ordered page image references. Index 0 is page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageImages(Vec<String>);

impl PageImages {
    pub fn new<S: Into<String>>(refs: impl IntoIterator<Item = S>) -> Self {
        Self(refs.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(page_number, reference)` pairs, page numbers starting at 1.
    pub fn pages(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, r)| (i as u32 + 1, r.as_str()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Active fields and their values, derived in the same pass.
///
/// Values without a matching active field are dropped on construction, so a
/// discriminator switch can never leave a previous variant's value behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    pub fields: ActiveFields,
    pub values: FieldValues,
}

impl Resolved {
    pub fn new(fields: ActiveFields, mut values: FieldValues) -> Self {
        values.retain(|id| fields.contains(id));
        Self { fields, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_drops_inactive_values() {
        let fields = ActiveFields::new(vec![FieldPosition::new("name", 1, 0.0, 0.0)]);
        let values = FieldValues::new()
            .with("name", "홍길동")
            .with("wishNumber1", "1234");
        let resolved = Resolved::new(fields, values);
        assert_eq!(resolved.values.len(), 1);
        assert!(!resolved.values.contains("wishNumber1"));
    }

    #[test]
    fn test_page_numbers_are_one_based() {
        let images = PageImages::new(["a.jpg", "b.jpg"]);
        let pages: Vec<(u32, &str)> = images.pages().collect();
        assert_eq!(pages, vec![(1, "a.jpg"), (2, "b.jpg")]);
    }
}
