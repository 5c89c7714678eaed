//! Lookup-only views over the dense containers.
//!
//! A view borrows its container, so the container cannot be mutated while
//! the view is alive. Views are `Copy`; the empty view borrows nothing and
//! behaves like a container with no entries.

use core::fmt::Debug;
use core::iter::Zip;
use core::ops::Index;
use core::slice;

use crate::comparer::DefaultComparer;
use crate::comparer::KeyComparer;
use crate::error::Error;
use crate::error::Result;
use crate::hash_map::DenseHashMap;
use crate::hash_set::DenseHashSet;

/// A read-only view of a [`DenseHashMap`].
///
/// # Examples
///
/// ```rust
/// use dense_hash::DenseHashMap;
/// use dense_hash::ReadOnlyMap;
///
/// fn total(view: ReadOnlyMap<'_, &str, u32>) -> u32 {
///     view.values().iter().sum()
/// }
///
/// let mut map: DenseHashMap<&str, u32> = DenseHashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(total(map.as_read_only()), 3);
/// assert_eq!(total(ReadOnlyMap::empty()), 0);
/// ```
pub struct ReadOnlyMap<'a, K, V, C = DefaultComparer> {
    map: Option<&'a DenseHashMap<K, V, C>>,
}

impl<K, V, C> Clone for ReadOnlyMap<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for ReadOnlyMap<'_, K, V, C> {}

impl<K, V, C> Default for ReadOnlyMap<'_, K, V, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Debug, V: Debug, C> Debug for ReadOnlyMap<'_, K, V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> ReadOnlyMap<'a, K, V, C> {
    pub(crate) fn new(map: &'a DenseHashMap<K, V, C>) -> Self {
        Self { map: Some(map) }
    }

    /// A view with no entries.
    pub const fn empty() -> Self {
        Self { map: None }
    }

    /// Returns the number of entries visible through the view.
    pub fn len(&self) -> usize {
        self.map.map_or(0, DenseHashMap::len)
    }

    /// Returns `true` if the view has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The keys in dense order.
    pub fn keys(&self) -> &'a [K] {
        match self.map {
            Some(map) => map.keys(),
            None => &[],
        }
    }

    /// The values in dense order.
    pub fn values(&self) -> &'a [V] {
        match self.map {
            Some(map) => map.values(),
            None => &[],
        }
    }

    /// Returns the entry stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_at(&self, index: usize) -> Result<(&'a K, &'a V)> {
        self.try_get_at(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the entry stored at `index`, or `None` past the end.
    pub fn try_get_at(&self, index: usize) -> Option<(&'a K, &'a V)> {
        self.map.and_then(|map| map.try_get_at(index))
    }

    /// Returns an iterator over `(&K, &V)` pairs in dense order.
    pub fn iter(&self) -> Zip<slice::Iter<'a, K>, slice::Iter<'a, V>> {
        self.keys().iter().zip(self.values())
    }
}

impl<'a, K, V, C> ReadOnlyMap<'a, K, V, C>
where
    C: KeyComparer<K>,
{
    /// Returns the value for `key`.
    pub fn get(&self, key: &K) -> Option<&'a V> {
        self.map.and_then(|map| map.get(key))
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn value(&self, key: &K) -> Result<&'a V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the view contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.try_get_index(key).is_some()
    }

    /// Returns the dense index of `key`, or `None` if absent.
    pub fn try_get_index(&self, key: &K) -> Option<usize> {
        self.map.and_then(|map| map.try_get_index(key))
    }

    /// Returns the dense index of `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn get_index(&self, key: &K) -> Result<usize> {
        self.try_get_index(key).ok_or(Error::KeyNotFound)
    }
}

impl<'a, K, V, C> Index<&K> for ReadOnlyMap<'a, K, V, C>
where
    C: KeyComparer<K>,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<'a, K, V, C> IntoIterator for ReadOnlyMap<'a, K, V, C> {
    type IntoIter = Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> From<&'a DenseHashMap<K, V, C>> for ReadOnlyMap<'a, K, V, C> {
    fn from(map: &'a DenseHashMap<K, V, C>) -> Self {
        Self::new(map)
    }
}

/// A read-only view of a [`DenseHashSet`].
pub struct ReadOnlySet<'a, T, C = DefaultComparer> {
    set: Option<&'a DenseHashSet<T, C>>,
}

impl<T, C> Clone for ReadOnlySet<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for ReadOnlySet<'_, T, C> {}

impl<T, C> Default for ReadOnlySet<'_, T, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Debug, C> Debug for ReadOnlySet<'_, T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> ReadOnlySet<'a, T, C> {
    pub(crate) fn new(set: &'a DenseHashSet<T, C>) -> Self {
        Self { set: Some(set) }
    }

    /// A view with no items.
    pub const fn empty() -> Self {
        Self { set: None }
    }

    /// Returns the number of items visible through the view.
    pub fn len(&self) -> usize {
        self.set.map_or(0, DenseHashSet::len)
    }

    /// Returns `true` if the view has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The items in dense order.
    pub fn as_slice(&self) -> &'a [T] {
        match self.set {
            Some(set) => set.as_slice(),
            None => &[],
        }
    }

    /// Returns the item stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_at(&self, index: usize) -> Result<&'a T> {
        self.try_get_at(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the item stored at `index`, or `None` past the end.
    pub fn try_get_at(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// Returns an iterator over the items in dense order.
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, C> ReadOnlySet<'a, T, C>
where
    C: KeyComparer<T>,
{
    /// Returns `true` if the view contains an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.try_get_index(item).is_some()
    }

    /// Returns the stored item equal to `item`.
    pub fn get(&self, item: &T) -> Option<&'a T> {
        self.set.and_then(|set| set.get(item))
    }

    /// Returns the dense index of `item`, or `None` if absent.
    pub fn try_get_index(&self, item: &T) -> Option<usize> {
        self.set.and_then(|set| set.try_get_index(item))
    }

    /// Returns the dense index of `item`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `item` is absent.
    pub fn get_index(&self, item: &T) -> Result<usize> {
        self.try_get_index(item).ok_or(Error::KeyNotFound)
    }
}

impl<T, C> Index<usize> for ReadOnlySet<'_, T, C> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T, C> IntoIterator for ReadOnlySet<'a, T, C> {
    type IntoIter = slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, C> From<&'a DenseHashSet<T, C>> for ReadOnlySet<'a, T, C> {
    fn from(set: &'a DenseHashSet<T, C>) -> Self {
        Self::new(set)
    }
}
