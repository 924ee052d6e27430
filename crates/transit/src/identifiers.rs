//! Type-safe handles for catalogue entities.
//!
//! Stops and buses live in append-only arenas owned by the catalogue. A handle
//! is the entity's dense index in its arena, so it stays valid for the
//! catalogue's whole lifetime and never owns the entity it points at.

use std::fmt;

macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.index()
            }
        }
    };
}

impl_handle!(StopId);
impl_handle!(BusId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_equality() {
        let id1 = StopId::new(3);
        let id2 = StopId::new(3);
        let id3 = id1;

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert_ne!(id1, StopId::new(4));
    }

    #[test]
    fn test_handle_ordering_follows_index() {
        let mut ids = vec![BusId::new(2), BusId::new(0), BusId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![BusId::new(0), BusId::new(1), BusId::new(2)]);
    }

    #[test]
    fn test_handle_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(StopId::new(7), 42);

        assert_eq!(map.get(&StopId::new(7)), Some(&42));
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(format!("{}", BusId::new(5)), "BusId#5");
        assert_eq!(usize::from(StopId::new(9)), 9);
    }
}
