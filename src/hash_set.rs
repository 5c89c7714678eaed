use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::ops::Index;
use core::ops::RangeBounds;
use core::slice;

use crate::comparer::DefaultComparer;
use crate::comparer::KeyComparer;
use crate::error::Error;
use crate::error::Result;
use crate::error::checked_range;
use crate::hash_table;
use crate::hash_table::DEFAULT_CAPACITY;
use crate::hash_table::DenseHashTable;
use crate::hash_table::Entry as TableEntry;
use crate::read_only::ReadOnlySet;

/// A hash set whose items live in one dense, contiguous array.
///
/// `DenseHashSet<T, C>` shares its engine with
/// [`DenseHashMap`](crate::DenseHashMap): items are chained per bucket,
/// addressable by a dense index in `[0, len)`, and removal moves the last
/// item into the freed index. The whole item array is available through
/// [`as_slice`](Self::as_slice).
///
/// # Examples
///
/// ```rust
/// use dense_hash::DenseHashSet;
///
/// let mut set: DenseHashSet<u32> = DenseHashSet::new();
/// assert!(set.insert(3));
/// assert!(set.insert(5));
/// assert!(!set.insert(3));
///
/// assert_eq!(set.as_slice(), &[3, 5]);
/// set.remove(&3);
/// assert_eq!(set.as_slice(), &[5]);
/// ```
pub struct DenseHashSet<T, C = DefaultComparer> {
    table: DenseHashTable<T, ()>,
    comparer: C,
}

impl<T, C> Clone for DenseHashSet<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            comparer: self.comparer.clone(),
        }
    }
}

impl<T, C> PartialEq for DenseHashSet<T, C>
where
    C: KeyComparer<T>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, C> Eq for DenseHashSet<T, C> where C: KeyComparer<T> {}

impl<T, C> Debug for DenseHashSet<T, C>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> DenseHashSet<T, C> {
    /// Creates an empty set using `comparer` for hashing and equality.
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_capacity_and_comparer(DEFAULT_CAPACITY, comparer)
    }

    /// Creates an empty set able to hold `capacity` items before growing.
    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Self {
        Self {
            table: DenseHashTable::with_capacity(capacity),
            comparer,
        }
    }

    /// Returns the comparer the set was built with.
    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Returns the number of items in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no items.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of items the set can hold before growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashSet;
    ///
    /// let set: DenseHashSet<i32> = DenseHashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// The live items in dense order.
    pub fn as_slice(&self) -> &[T] {
        self.table.keys()
    }

    /// Returns the items stored in `range` of the dense order.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOutOfBounds`] if the range does not fit in `[0, len)`.
    pub fn range(&self, range: impl RangeBounds<usize>) -> Result<&[T]> {
        let range = checked_range(range, self.len())?;
        Ok(&self.as_slice()[range])
    }

    /// Returns the item stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_at(&self, index: usize) -> Result<&T> {
        self.try_get_at(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the item stored at `index`, or `None` past the end.
    pub fn try_get_at(&self, index: usize) -> Option<&T> {
        self.table.key_at(index)
    }

    /// Removes and returns the item at `index`, moving the last item into its
    /// place.
    pub fn swap_remove_index(&mut self, index: usize) -> Option<T> {
        self.table.swap_remove_index(index).map(|(item, ())| item)
    }

    /// Returns an iterator over the items in dense order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Removes every item, yielding them in dense order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashSet;
    ///
    /// let mut set: DenseHashSet<char> = "abc".chars().collect();
    /// let drained: String = set.drain().collect();
    /// assert_eq!(drained, "abc");
    /// assert!(set.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Keeps only the items for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.table.retain(|item, _| keep(item));
    }

    /// Removes all items, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Resets the buckets and length only; see
    /// [`DenseHashTable::shallow_clear`].
    pub fn shallow_clear(&mut self) {
        self.table.shallow_clear();
    }

    /// Reserves capacity for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Shrinks the dense storage to the current length.
    pub fn trim(&mut self) {
        self.table.trim();
    }

    /// Returns a lookup-only view borrowing this set.
    pub fn as_read_only(&self) -> ReadOnlySet<'_, T, C> {
        ReadOnlySet::new(self)
    }
}

impl<T, S> DenseHashSet<T, DefaultComparer<S>>
where
    S: BuildHasher,
{
    /// Creates an empty set hashing items with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::hash_map::RandomState;
    ///
    /// use dense_hash::DenseHashSet;
    ///
    /// let set: DenseHashSet<i32, _> = DenseHashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_comparer(DefaultComparer::new(hash_builder))
    }

    /// Creates an empty set with the given capacity and hash builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_capacity_and_comparer(capacity, DefaultComparer::new(hash_builder))
    }
}

impl<T, C> DenseHashSet<T, C>
where
    C: Default,
{
    /// Creates an empty set with the default comparer and a capacity of one.
    pub fn new() -> Self {
        Self::with_comparer(C::default())
    }

    /// Creates an empty set with the default comparer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, C::default())
    }
}

impl<T, C> Default for DenseHashSet<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> DenseHashSet<T, C>
where
    C: KeyComparer<T>,
{
    #[inline]
    fn find(&self, item: &T) -> Option<usize> {
        let hash = self.comparer.hash_key(item);
        self.table.find(hash, |k| self.comparer.key_eq(k, item))
    }

    /// Adds `item` if absent. Returns `true` if it was added.
    ///
    /// An equal item already in the set is kept and `item` is dropped.
    pub fn insert(&mut self, item: T) -> bool {
        let hash = self.comparer.hash_key(&item);
        let comparer = &self.comparer;
        match self.table.entry(hash, |k| comparer.key_eq(k, &item)) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert(item, ());
                true
            }
        }
    }

    /// Adds `item`, returning its dense index.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if an equal item is already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashSet;
    /// use dense_hash::Error;
    ///
    /// let mut set: DenseHashSet<&str> = DenseHashSet::new();
    /// assert_eq!(set.add("x"), Ok(0));
    /// assert_eq!(set.add("y"), Ok(1));
    /// assert_eq!(set.add("x"), Err(Error::DuplicateKey));
    /// ```
    pub fn add(&mut self, item: T) -> Result<usize> {
        let hash = self.comparer.hash_key(&item);
        let comparer = &self.comparer;
        match self.table.entry(hash, |k| comparer.key_eq(k, &item)) {
            TableEntry::Occupied(_) => Err(Error::DuplicateKey),
            TableEntry::Vacant(entry) => Ok(entry.insert_full(item, ()).0),
        }
    }

    /// Returns `true` if the set contains an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Returns the stored item equal to `item`.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.find(item).and_then(|index| self.table.key_at(index))
    }

    /// Removes the item equal to `item`. Returns `true` if one was present.
    pub fn remove(&mut self, item: &T) -> bool {
        self.take(item).is_some()
    }

    /// Removes and returns the stored item equal to `item`.
    pub fn take(&mut self, item: &T) -> Option<T> {
        let hash = self.comparer.hash_key(item);
        let comparer = &self.comparer;
        self.table
            .remove(hash, |k| comparer.key_eq(k, item))
            .map(|(stored, ())| stored)
    }

    /// Returns the dense index of `item`, or `None` if absent.
    pub fn try_get_index(&self, item: &T) -> Option<usize> {
        self.find(item)
    }

    /// Returns the dense index of `item`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `item` is absent.
    pub fn get_index(&self, item: &T) -> Result<usize> {
        self.find(item).ok_or(Error::KeyNotFound)
    }

    /// Adds every item from `items`, returning how many were new.
    ///
    /// With `allow_duplicate` items already present are skipped; without it
    /// the first duplicate stops the ingestion.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] on the first already-present item when
    /// `allow_duplicate` is `false`. Items ingested before it stay in the
    /// set.
    pub fn add_range(
        &mut self,
        items: impl IntoIterator<Item = T>,
        allow_duplicate: bool,
    ) -> Result<usize> {
        let items = items.into_iter();
        self.reserve(items.size_hint().0);

        let mut added = 0;
        for item in items {
            if allow_duplicate {
                if self.insert(item) {
                    added += 1;
                }
            } else {
                self.add(item)?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Copies the set into a new one that uses `comparer`.
    ///
    /// Items that the new comparer considers equal collapse into the first
    /// one in dense order.
    pub fn clone_with_comparer<C2>(&self, comparer: C2) -> DenseHashSet<T, C2>
    where
        T: Clone,
        C2: KeyComparer<T>,
    {
        let mut set = DenseHashSet::with_capacity_and_comparer(self.capacity(), comparer);
        for item in self.iter() {
            set.insert(item.clone());
        }
        set
    }
}

impl<T, C> Index<usize> for DenseHashSet<T, C> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

/// An iterator over the items of a `DenseHashSet` in dense order.
pub type Iter<'a, T> = slice::Iter<'a, T>;

/// A draining iterator over the items of a `DenseHashSet`.
///
/// This struct is created by [`DenseHashSet::drain`].
pub struct Drain<'a, T> {
    inner: hash_table::Drain<'a, T, ()>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(item, ())| item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

/// An owning iterator over the items of a `DenseHashSet`.
pub struct IntoIter<T> {
    inner: hash_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(item, ())| item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, C> IntoIterator for DenseHashSet<T, C> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a DenseHashSet<T, C> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> FromIterator<T> for DenseHashSet<T, C>
where
    C: KeyComparer<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C> Extend<T> for DenseHashSet<T, C>
where
    C: KeyComparer<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T, C> Extend<&'a T> for DenseHashSet<T, C>
where
    T: Copy + 'a,
    C: KeyComparer<T>,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, C> From<DenseHashSet<T, C>> for Vec<T> {
    fn from(set: DenseHashSet<T, C>) -> Self {
        set.into_iter().collect()
    }
}
