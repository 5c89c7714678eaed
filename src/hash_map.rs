use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::ops::Index;
use core::ops::RangeBounds;

use crate::comparer::DefaultComparer;
use crate::comparer::KeyComparer;
use crate::error::Error;
use crate::error::Result;
use crate::error::checked_range;
use crate::hash_table::DEFAULT_CAPACITY;
use crate::hash_table::DenseHashTable;
use crate::hash_table::Entry as TableEntry;
use crate::read_only::ReadOnlyMap;

/// A hash map whose keys and values live in dense, contiguous arrays.
///
/// `DenseHashMap<K, V, C>` hashes and compares keys exclusively through the
/// comparer `C` (see [`KeyComparer`]); the default comparer uses the key's
/// `Hash` and `Eq` impls with [`DefaultHashBuilder`].
///
/// Values can be read as a plain slice through [`values`](Self::values), and
/// every entry has a dense index in `[0, len)` usable with
/// [`get_at`](Self::get_at). Removing an entry moves the last entry into the
/// freed index.
///
/// [`DefaultHashBuilder`]: crate::comparer::DefaultHashBuilder
///
/// # Examples
///
/// ```rust
/// use dense_hash::DenseHashMap;
///
/// let mut scores: DenseHashMap<&str, u32> = DenseHashMap::new();
/// scores.insert("alice", 10);
/// scores.insert("bob", 7);
///
/// let total: u32 = scores.values().iter().sum();
/// assert_eq!(total, 17);
///
/// let index = scores.try_get_index(&"bob").unwrap();
/// assert_eq!(scores.get_at(index), Ok((&"bob", &7)));
/// ```
pub struct DenseHashMap<K, V, C = DefaultComparer> {
    table: DenseHashTable<K, V>,
    comparer: C,
}

impl<K, V, C> Clone for DenseHashMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            comparer: self.comparer.clone(),
        }
    }
}

impl<K, V, C> Debug for DenseHashMap<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.table.iter()).finish()
    }
}

impl<K, V, C> DenseHashMap<K, V, C> {
    /// Creates an empty map using `comparer` for hashing and equality.
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_capacity_and_comparer(DEFAULT_CAPACITY, comparer)
    }

    /// Creates an empty map able to hold `capacity` entries before growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    /// use dense_hash::comparer::DefaultComparer;
    ///
    /// let map: DenseHashMap<u64, String> =
    ///     DenseHashMap::with_capacity_and_comparer(100, DefaultComparer::default());
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Self {
        Self {
            table: DenseHashTable::with_capacity(capacity),
            comparer,
        }
    }

    /// Returns the comparer the map was built with.
    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of entries the map can hold before growing.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// The live keys in dense order.
    ///
    /// Only the `[0, len)` prefix of the backing storage is exposed. The
    /// slice borrows the map, so it cannot outlive the next mutation.
    pub fn keys(&self) -> &[K] {
        self.table.keys()
    }

    /// The live values in dense order, as one contiguous slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut map: DenseHashMap<char, f32> = DenseHashMap::new();
    /// map.insert('x', 1.5);
    /// map.insert('y', 2.5);
    /// assert_eq!(map.values(), &[1.5, 2.5]);
    /// ```
    pub fn values(&self) -> &[V] {
        self.table.values()
    }

    /// The live values in dense order, mutably.
    pub fn values_mut(&mut self) -> &mut [V] {
        self.table.values_mut()
    }

    /// Returns the key and value stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_at(&self, index: usize) -> Result<(&K, &V)> {
        self.table.get_at(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the key and value stored at `index`, or `None` past the end.
    pub fn try_get_at(&self, index: usize) -> Option<(&K, &V)> {
        self.table.get_at(index)
    }

    /// Returns a mutable reference to the value stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn value_at_mut(&mut self, index: usize) -> Result<&mut V> {
        let len = self.len();
        self.table
            .value_at_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns the values stored in `range` of the dense order.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOutOfBounds`] if the range does not fit in `[0, len)`.
    pub fn values_range(&self, range: impl RangeBounds<usize>) -> Result<&[V]> {
        let range = checked_range(range, self.len())?;
        Ok(&self.table.values()[range])
    }

    /// Removes and returns the entry at `index`, moving the last entry into
    /// its place.
    pub fn swap_remove_index(&mut self, index: usize) -> Option<(K, V)> {
        self.table.swap_remove_index(index)
    }

    /// Returns an iterator over `(&K, &V)` pairs in dense order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Returns an iterator over `(&K, &mut V)` pairs in dense order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    /// Removes every entry, yielding them in dense order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut map: DenseHashMap<i32, &str> = DenseHashMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let pairs: Vec<_> = map.drain().collect();
    /// assert!(map.is_empty());
    /// assert_eq!(pairs, vec![(1, "a"), (2, "b")]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.table.drain()
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(keep);
    }

    /// Removes all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Resets the buckets and length only; see
    /// [`DenseHashTable::shallow_clear`].
    pub fn shallow_clear(&mut self) {
        self.table.shallow_clear();
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Shrinks the dense storage to the current length.
    pub fn trim(&mut self) {
        self.table.trim();
    }

    /// Returns a lookup-only view borrowing this map.
    pub fn as_read_only(&self) -> ReadOnlyMap<'_, K, V, C> {
        ReadOnlyMap::new(self)
    }
}

impl<K, V, S> DenseHashMap<K, V, DefaultComparer<S>>
where
    S: BuildHasher,
{
    /// Creates an empty map hashing keys with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::hash_map::RandomState;
    ///
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut map = DenseHashMap::with_hasher(RandomState::new());
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_comparer(DefaultComparer::new(hash_builder))
    }

    /// Creates an empty map with the given capacity and hash builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_capacity_and_comparer(capacity, DefaultComparer::new(hash_builder))
    }
}

impl<K, V, C> DenseHashMap<K, V, C>
where
    C: Default,
{
    /// Creates an empty map with the default comparer and a capacity of one.
    pub fn new() -> Self {
        Self::with_comparer(C::default())
    }

    /// Creates an empty map with the default comparer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, C::default())
    }
}

impl<K, V, C> Default for DenseHashMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> DenseHashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    #[inline]
    fn find(&self, key: &K) -> Option<usize> {
        let hash = self.comparer.hash_key(key);
        self.table.find(hash, |k| self.comparer.key_eq(k, key))
    }

    /// Inserts or overwrites the value for `key`, returning the previous
    /// value.
    ///
    /// The stored key is kept when the entry already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut map: DenseHashMap<i32, &str> = DenseHashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_full(key, value).1
    }

    /// Like [`insert`](Self::insert), also returning the entry's dense index.
    pub fn insert_full(&mut self, key: K, value: V) -> (usize, Option<V>) {
        let hash = self.comparer.hash_key(&key);
        let comparer = &self.comparer;
        match self.table.entry(hash, |k| comparer.key_eq(k, &key)) {
            TableEntry::Occupied(mut entry) => {
                let old = entry.insert(value);
                (entry.index(), Some(old))
            }
            TableEntry::Vacant(entry) => (entry.insert_full(key, value).0, None),
        }
    }

    /// Inserts a new entry, refusing to overwrite an existing key.
    ///
    /// Returns the dense index of the new entry.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `key` is already present; the map is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    /// use dense_hash::Error;
    ///
    /// let mut map: DenseHashMap<&str, i32> = DenseHashMap::new();
    /// assert_eq!(map.add("one", 1), Ok(0));
    /// assert_eq!(map.add("one", 2), Err(Error::DuplicateKey));
    /// assert_eq!(map[&"one"], 1);
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<usize> {
        let hash = self.comparer.hash_key(&key);
        let comparer = &self.comparer;
        match self.table.entry(hash, |k| comparer.key_eq(k, &key)) {
            TableEntry::Occupied(_) => Err(Error::DuplicateKey),
            TableEntry::Vacant(entry) => Ok(entry.insert_full(key, value).0),
        }
    }

    /// Returns a reference to the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|index| &self.table.values()[index])
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find(key)?;
        self.table.value_at_mut(index)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).and_then(|index| self.table.get_at(index))
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn value(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable handle into the value storage for `key`.
    ///
    /// Writes through the handle are visible to later reads without any
    /// further call; the borrow ends before the map can be mutated again.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut map: DenseHashMap<u8, Vec<u8>> = DenseHashMap::new();
    /// map.insert(1, vec![]);
    /// map.value_mut(&1).unwrap().push(42);
    /// assert_eq!(map[&1], vec![42]);
    /// assert!(map.value_mut(&2).is_err());
    /// ```
    pub fn value_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the dense index of `key`, or `None` if absent.
    ///
    /// The index stays valid until the next removal.
    pub fn try_get_index(&self, key: &K) -> Option<usize> {
        self.find(key)
    }

    /// Returns the dense index of `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn get_index(&self, key: &K) -> Result<usize> {
        self.find(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut counts: DenseHashMap<&str, usize> = DenseHashMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns the value for `key`, inserting the result of `factory` first
    /// if absent. `factory` is not called when the key exists.
    pub fn get_or_insert_with(&mut self, key: K, factory: impl FnOnce() -> V) -> &mut V {
        self.entry(key).or_insert_with(factory)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.comparer.hash_key(key);
        let comparer = &self.comparer;
        self.table.remove(hash, |k| comparer.key_eq(k, key))
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DenseHashMap;
    ///
    /// let mut map: DenseHashMap<i32, String> = DenseHashMap::new();
    /// map.entry(1).or_insert("a".to_string());
    /// map.entry(1)
    ///     .and_modify(|v| v.push('!'))
    ///     .or_insert_with(String::new);
    /// assert_eq!(map.get(&1).map(String::as_str), Some("a!"));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.comparer.hash_key(&key);
        let comparer = &self.comparer;
        match self.table.entry(hash, |k| comparer.key_eq(k, &key)) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Inserts every pair from `pairs`, returning how many new keys were
    /// added.
    ///
    /// With `allow_overwrite` an existing key gets its value replaced;
    /// without it the first duplicate stops the ingestion.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] on the first already-present key when
    /// `allow_overwrite` is `false`. Pairs ingested before it stay in the
    /// map.
    pub fn add_range(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
        allow_overwrite: bool,
    ) -> Result<usize> {
        let pairs = pairs.into_iter();
        self.reserve(pairs.size_hint().0);

        let mut added = 0;
        for (key, value) in pairs {
            if allow_overwrite {
                if self.insert(key, value).is_none() {
                    added += 1;
                }
            } else {
                self.add(key, value)?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Looks up every key in `keys`, in order.
    ///
    /// With `allow_missing` absent keys are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] on the first absent key when `allow_missing`
    /// is `false`.
    pub fn get_range<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k K>,
        allow_missing: bool,
    ) -> Result<Vec<&V>>
    where
        K: 'k,
    {
        let mut values = Vec::new();
        for key in keys {
            match self.get(key) {
                Some(value) => values.push(value),
                None if allow_missing => {}
                None => return Err(Error::KeyNotFound),
            }
        }
        Ok(values)
    }

    /// Copies the map into a new one that uses `comparer`.
    ///
    /// Entries are re-inserted under the new contract in dense order, so keys
    /// that the new comparer considers equal collapse into one entry holding
    /// the later value.
    pub fn clone_with_comparer<C2>(&self, comparer: C2) -> DenseHashMap<K, V, C2>
    where
        K: Clone,
        V: Clone,
        C2: KeyComparer<K>,
    {
        let mut map = DenseHashMap::with_capacity_and_comparer(self.capacity(), comparer);
        for (key, value) in self.iter() {
            map.insert(key.clone(), value.clone());
        }
        map
    }
}

impl<K, V, C> DenseHashMap<K, V, C>
where
    V: PartialEq,
{
    /// Returns `true` if any entry holds `value`. Linear in `len`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.values().contains(value)
    }
}

impl<K, V, C> PartialEq for DenseHashMap<K, V, C>
where
    V: PartialEq,
    C: KeyComparer<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, C> Index<&K> for DenseHashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is absent; use [`DenseHashMap::value`] to get an
    /// error instead.
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for DenseHashMap<K, V, C>
where
    C: KeyComparer<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for DenseHashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C> IntoIterator for DenseHashMap<K, V, C> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a DenseHashMap<K, V, C> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut DenseHashMap<K, V, C> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over the entries of a `DenseHashMap` in dense order.
pub type Iter<'a, K, V> = crate::hash_table::Iter<'a, K, V>;

/// A mutable iterator over the entries of a `DenseHashMap`.
pub type IterMut<'a, K, V> = crate::hash_table::IterMut<'a, K, V>;

/// A draining iterator over the entries of a `DenseHashMap`.
pub type Drain<'a, K, V> = crate::hash_table::Drain<'a, K, V>;

/// An owning iterator over the entries of a `DenseHashMap`.
pub type IntoIter<K, V> = crate::hash_table::IntoIter<K, V>;

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`DenseHashMap`].
///
/// [`entry`]: DenseHashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, K, V>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        self.entry.insert(self.key, value)
    }

    /// Inserts the value, returning its dense index alongside the reference.
    pub fn insert_full(self, value: V) -> (usize, &'a mut V) {
        self.entry.insert_full(self.key, value)
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, K, V>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// The dense index of the entry.
    pub fn index(&self) -> usize {
        self.entry.index()
    }

    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        self.entry.key()
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.entry.get()
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.entry.get_mut()
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        self.entry.into_mut()
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        self.entry.insert(value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}
