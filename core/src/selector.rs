//! Memoized selectors
//!
//! A selector is a pure derivation over a snapshot. Expensive derivations
//! (sorting a few thousand records, say) are wrapped in a [`Memoized`] cell
//! that remembers the last arguments and result, and recomputes only when
//! the arguments change.
//!
//! Because snapshots share unchanged slices by reference, the natural cache
//! key is the *identity* of the inputs, which [`ArcKey`] provides.
//!
//! # Example
//!
//! ```
//! use slicestore_core::{ArcKey, Memoized};
//! use std::sync::Arc;
//!
//! let names = Arc::new(vec!["Cid".to_string(), "Amy".to_string()]);
//! let sorted: Memoized<ArcKey<Vec<String>>, Vec<String>> = Memoized::new();
//!
//! let sort = |key: &ArcKey<Vec<String>>| {
//!     let mut names = key.get().clone();
//!     names.sort();
//!     names
//! };
//!
//! let first = sorted.get_or_compute(ArcKey::new(&names), sort);
//! let second = sorted.get_or_compute(ArcKey::new(&names), sort);
//! assert_eq!(*first, vec!["Amy".to_string(), "Cid".to_string()]);
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// An `Arc` compared by address rather than by value
///
/// Two keys are equal only if they point at the same allocation, which makes
/// equality checks O(1) regardless of the size of the pointee.
pub struct ArcKey<T>(Arc<T>);

impl<T> ArcKey<T> {
    /// Create a key that shares the given `Arc`
    #[must_use]
    pub fn new(value: &Arc<T>) -> Self {
        Self(Arc::clone(value))
    }

    /// Borrow the value behind the key
    #[must_use]
    pub fn get(&self) -> &T {
        &self.0
    }
}

impl<T> Clone for ArcKey<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for ArcKey<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for ArcKey<T> {}

impl<T> fmt::Debug for ArcKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArcKey").field(&Arc::as_ptr(&self.0)).finish()
    }
}

/// A last-arguments cache for a derived value
///
/// Holds at most one `(key, value)` pair. Safe to share between threads;
/// the computation runs while the cache lock is held, so concurrent callers
/// with the same key compute once.
pub struct Memoized<K, V> {
    last: Mutex<Option<(K, Arc<V>)>>,
}

impl<K, V> Memoized<K, V>
where
    K: PartialEq,
{
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Return the cached value for `key`, computing it with `compute` on a miss
    ///
    /// A miss replaces the previously cached pair.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        let mut last = self.last.lock();

        if let Some((cached_key, value)) = last.as_ref() {
            if *cached_key == key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(compute(&key));
        *last = Some((key, Arc::clone(&value)));
        value
    }

    /// Whether a value is currently cached
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.last.lock().is_some()
    }
}

impl<K: PartialEq, V> Default for Memoized<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Memoized<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cached", &self.last.lock().is_some())
            .finish()
    }
}
