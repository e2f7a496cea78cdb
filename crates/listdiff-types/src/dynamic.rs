//! Heterogeneous collections.
//!
//! [`Diffable`] is resolved statically and is not object safe. Hosts that
//! really need mixed item types in one collection box them as
//! `Box<dyn DynDiffable<K>>`, which implements [`Diffable`] through the
//! blanket impls in this module.

use std::any::Any;
use std::hash::Hash;

use crate::diffable::Diffable;

/// Object-safe form of [`Diffable`] with a fixed identifier type `K`.
///
/// Implemented automatically for every `'static` [`Diffable`] whose identifier
/// is `K`. Two items of different concrete types are never equal.
pub trait DynDiffable<K>: Any {
    /// The item's identity.
    fn dyn_identity(&self) -> K;

    /// Value equality against an item of possibly another concrete type.
    fn dyn_equals(&self, other: &dyn DynDiffable<K>) -> bool;

    /// Upcast used for downcasting in [`dyn_equals`](DynDiffable::dyn_equals).
    fn as_any(&self) -> &dyn Any;
}

impl<T> DynDiffable<T::Identifier> for T
where
    T: Diffable + Any,
{
    fn dyn_identity(&self) -> T::Identifier {
        self.identity()
    }

    fn dyn_equals(&self, other: &dyn DynDiffable<T::Identifier>) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.equals(other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K> Diffable for dyn DynDiffable<K>
where
    K: Eq + Hash + Clone + 'static,
{
    type Identifier = K;

    fn identity(&self) -> K {
        self.dyn_identity()
    }

    fn equals(&self, other: &Self) -> bool {
        self.dyn_equals(other)
    }

    fn same_instance(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Header {
        key: String,
        text: String,
    }

    impl Diffable for Header {
        type Identifier = String;

        fn identity(&self) -> String {
            self.key.clone()
        }

        fn equals(&self, other: &Self) -> bool {
            self.text == other.text
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Footer {
        key: String,
    }

    impl Diffable for Footer {
        type Identifier = String;

        fn identity(&self) -> String {
            self.key.clone()
        }

        fn equals(&self, _other: &Self) -> bool {
            true
        }
    }

    fn header(key: &str, text: &str) -> Box<dyn DynDiffable<String>> {
        Box::new(Header {
            key: key.into(),
            text: text.into(),
        })
    }

    #[test]
    fn boxed_items_expose_identity() {
        let items: Vec<Box<dyn DynDiffable<String>>> = vec![
            header("h", "title"),
            Box::new(Footer { key: "f".into() }),
        ];
        let ids: Vec<String> = items.iter().map(|i| i.identity()).collect();
        assert_eq!(ids, vec!["h".to_string(), "f".to_string()]);
    }

    #[test]
    fn equality_requires_same_concrete_type() {
        let a = header("x", "one");
        let b = header("x", "one");
        let c: Box<dyn DynDiffable<String>> = Box::new(Footer { key: "x".into() });

        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(!c.equals(&a));
    }

    #[test]
    fn instance_equality_compares_allocations() {
        let a = header("x", "one");
        let b = header("x", "one");
        assert!(a.same_instance(&a));
        assert!(!a.same_instance(&b));
    }
}
