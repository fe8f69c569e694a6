//! Collections shared by the Sparta crates.
//!
//! - `HashMap`/`HashSet` use AHash
//! - [`SparseSet`] is the generational arena backing the widget tree

pub mod sparse_set;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use sparse_set::{IndexSlot, SparseSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_as_map_keys() {
        let mut set = SparseSet::new();
        let a = set.push("a");
        let b = set.push("b");

        let mut names = HashMap::new();
        names.insert(a, "first");
        names.insert(b, "second");
        assert_eq!(names.get(&a), Some(&"first"));

        set.remove(a);
        let c = set.push("c");
        assert_eq!(c.index(), a.index());
        assert_eq!(names.get(&c), None);

        let live: HashSet<_> = [b, c].into_iter().collect();
        assert!(!live.contains(&a));
    }
}
