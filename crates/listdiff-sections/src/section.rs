use serde::{Deserialize, Serialize};

use listdiff_types::Diffable;

/// A section model together with its items.
///
/// A section is identified and compared by its model only; item changes are
/// diffed separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<S, T> {
    pub model: S,
    pub items: Vec<T>,
}

impl<S, T> Section<S, T> {
    pub fn new(model: S, items: Vec<T>) -> Self {
        Self { model, items }
    }
}

impl<S: Diffable, T> Diffable for Section<S, T> {
    type Identifier = S::Identifier;

    fn identity(&self) -> S::Identifier {
        self.model.identity()
    }

    fn equals(&self, other: &Self) -> bool {
        self.model.equals(&other.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_items() {
        let a = Section::new("inbox", vec![1u32, 2]);
        let b = Section::new("inbox", vec![3u32]);
        assert_eq!(a.identity(), b.identity());
        assert!(a.equals(&b));
    }
}
