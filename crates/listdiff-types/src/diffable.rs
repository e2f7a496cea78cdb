use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// The capability every diffable item must provide.
///
/// - [`identity`](Diffable::identity) recognises "the same logical item" in the
///   old and new collections. It must be stable for the duration of one diff
///   call and must not be shared by two items of the same collection.
/// - [`equals`](Diffable::equals) compares content. Two items with the same
///   identity that are not equal produce an update rather than a plain match.
///
/// Duplicate identities inside one collection are a caller error. The engine
/// never panics on them, but how the duplicates are paired is unspecified.
pub trait Diffable {
    /// The key type used to match items across collections.
    type Identifier: Eq + Hash + Clone;

    /// The stable identity of this item.
    fn identity(&self) -> Self::Identifier;

    /// Value equality against another item with the same identity.
    fn equals(&self, other: &Self) -> bool;

    /// Whether `self` and `other` are the same instance.
    ///
    /// Backs [`EqualityPolicy::Instance`](crate::EqualityPolicy::Instance).
    /// Defaults to address equality; shared-ownership wrappers compare their
    /// allocations instead.
    fn same_instance(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T: Diffable + ?Sized> Diffable for &T {
    type Identifier = T::Identifier;

    fn identity(&self) -> Self::Identifier {
        (**self).identity()
    }

    fn equals(&self, other: &Self) -> bool {
        (**self).equals(*other)
    }

    fn same_instance(&self, other: &Self) -> bool {
        (**self).same_instance(*other)
    }
}

impl<T: Diffable + ?Sized> Diffable for Box<T> {
    type Identifier = T::Identifier;

    fn identity(&self) -> Self::Identifier {
        (**self).identity()
    }

    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }

    fn same_instance(&self, other: &Self) -> bool {
        (**self).same_instance(&**other)
    }
}

impl<T: Diffable + ?Sized> Diffable for Rc<T> {
    type Identifier = T::Identifier;

    fn identity(&self) -> Self::Identifier {
        (**self).identity()
    }

    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }

    fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: Diffable + ?Sized> Diffable for Arc<T> {
    type Identifier = T::Identifier;

    fn identity(&self) -> Self::Identifier {
        (**self).identity()
    }

    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }

    fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl Diffable for str {
    type Identifier = String;

    fn identity(&self) -> String {
        self.to_owned()
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// Value types are their own identity: equal identities always compare equal,
/// so they can be inserted, deleted or moved but never updated.
macro_rules! self_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Diffable for $ty {
                type Identifier = $ty;

                fn identity(&self) -> $ty {
                    self.clone()
                }

                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

self_identified!(String, char, bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: u32,
        title: &'static str,
    }

    impl Diffable for Row {
        type Identifier = u32;

        fn identity(&self) -> u32 {
            self.id
        }

        fn equals(&self, other: &Self) -> bool {
            self.title == other.title
        }
    }

    #[test]
    fn value_types_are_self_identified() {
        assert_eq!("abc".identity(), "abc".to_string());
        assert_eq!(7u32.identity(), 7);
        assert!(String::from("x").equals(&String::from("x")));
    }

    #[test]
    fn references_delegate_to_target() {
        let a = Row { id: 1, title: "a" };
        let b = Row { id: 1, title: "b" };
        let (ra, rb) = (&a, &b);
        assert_eq!(ra.identity(), 1);
        assert!(!ra.equals(&rb));
        assert!(ra.same_instance(&&a));
        assert!(!ra.same_instance(&rb));
    }

    #[test]
    fn rc_instance_uses_allocation() {
        let shared = Rc::new(Row { id: 3, title: "c" });
        let alias = Rc::clone(&shared);
        let copy = Rc::new(Row { id: 3, title: "c" });

        assert!(shared.same_instance(&alias));
        assert!(!shared.same_instance(&copy));
        assert!(shared.equals(&copy));
    }

    #[test]
    fn arc_instance_uses_allocation() {
        let shared = Arc::new(Row { id: 4, title: "d" });
        let alias = Arc::clone(&shared);
        let copy = Arc::new(Row { id: 4, title: "d" });

        assert!(shared.same_instance(&alias));
        assert!(!shared.same_instance(&copy));
    }

    #[test]
    fn boxed_items_delegate() {
        let a: Box<Row> = Box::new(Row { id: 9, title: "z" });
        let b: Box<Row> = Box::new(Row { id: 9, title: "z" });
        assert_eq!(a.identity(), b.identity());
        assert!(a.equals(&b));
        assert!(!a.same_instance(&b));
    }
}
