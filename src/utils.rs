use fnv::FnvHasher;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;
pub type FnvHashSet<T> = HashSet<T, FnvBuildHasher>;
pub type FnvHashMap<K, V> = HashMap<K, V, FnvBuildHasher>;

/// Hash set keyed with fnv, which beats the default SipHash on small keys like `(i32, i32)` pixel
/// positions or cell indices. Not resistant to collision attacks, which does not matter here.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

/// Hash map counterpart of `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
