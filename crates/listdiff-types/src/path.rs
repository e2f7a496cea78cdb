use std::fmt;

use serde::{Deserialize, Serialize};

/// A two-dimensional (section, item) address.
///
/// Ordering is section-major, so sorting a list of paths groups them by
/// section and orders items within each section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    /// The section index.
    pub section: usize,
    /// The item index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Create an index path.
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexPath({}, {})", self.section, self.item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self { section, item }
    }
}
