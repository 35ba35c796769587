use core::hash::Hash;
use std::hash::Hasher;

#[cfg(feature = "std-hash")]
pub mod default {
    pub use std::collections::hash_map::DefaultHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::new()
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod default {
    pub use ahash::AHasher as DefaultHasher;

    /// Fixed-key hasher: group keys feed saved-state keys, so they must not
    /// change between runs of the same build.
    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::default()
    }
}

#[inline]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = default::new();
    value.hash(&mut hasher);
    hasher.finish()
}
