//! The hash-map used for caches keyed by small integers.

/// Hashmap using [`hashbrown::HashMap`] with its default hasher.
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
