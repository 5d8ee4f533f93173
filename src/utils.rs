use fnv::FnvHasher;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Construct a hash set with the specified capacity. FNV is much faster than the default
/// hasher on short keys such as grid coordinates and edge keys.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}

/// Construct a hash map with the specified capacity, see `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::<K, V, _>::with_capacity_and_hasher(capacity, fnv)
}

/// Upper bound on the number of shared edges in a `width` by `height` grid.
#[inline]
pub fn interior_edges_count(width: usize, height: usize) -> usize {
    (width.saturating_sub(1) * height) + (height.saturating_sub(1) * width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_edges() {
        assert_eq!(interior_edges_count(1, 1), 0);
        assert_eq!(interior_edges_count(2, 1), 1);
        assert_eq!(interior_edges_count(3, 3), 12);
        assert_eq!(interior_edges_count(0, 4), 0);
    }
}
