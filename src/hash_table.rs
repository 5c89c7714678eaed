//! The dense bucket-chained engine behind [`DenseHashMap`] and
//! [`DenseHashSet`].
//!
//! [`DenseHashTable`] stores keys and values in parallel `Vec`s with no gaps
//! and threads same-bucket entries into chains through a third array of
//! links. It does not hash or compare keys itself; every lookup takes a
//! precomputed `u64` hash and an equality closure, so the adapters decide
//! what "same key" means.
//!
//! [`DenseHashMap`]: crate::DenseHashMap
//! [`DenseHashSet`]: crate::DenseHashSet

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::Zip;
use core::slice;

/// Chain terminator.
const NONE: usize = usize::MAX;

/// Smallest bucket array the table ever allocates.
const MIN_BUCKETS: usize = 3;

/// Capacity used by the `Default` constructors.
pub(crate) const DEFAULT_CAPACITY: usize = 1;

#[inline(always)]
fn reduce(hash: u64, bucket_count: usize) -> usize {
    let len = bucket_count as u64;
    if hash >= len {
        (hash % len) as usize
    } else {
        hash as usize
    }
}

/// Bucket slots store `index + 1` so that a zeroed array means "all empty".
#[inline(always)]
fn slot_to_index(slot: usize) -> usize {
    slot.wrapping_sub(1)
}

#[inline(always)]
fn index_to_slot(index: usize) -> usize {
    index.wrapping_add(1)
}

fn is_prime(candidate: usize) -> bool {
    if candidate < 2 {
        return false;
    }
    if candidate % 2 == 0 {
        return candidate == 2;
    }

    let mut divisor = 3;
    while divisor <= candidate / divisor {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest prime `>= min`, never smaller than [`MIN_BUCKETS`].
pub(crate) fn next_prime(min: usize) -> usize {
    let mut candidate = min.max(MIN_BUCKETS) | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Per-entry chain metadata, kept in lockstep with the key and value arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Link {
    hash: u64,
    /// Older member of the same chain, or `NONE`.
    previous: usize,
    /// Newer member of the same chain, or `NONE` for the chain head.
    next: usize,
}

/// Bucket and chain statistics for a [`DenseHashTable`].
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Dense storage capacity
    pub capacity: usize,
    /// Length of the bucket array
    pub buckets: usize,
    /// Number of buckets heading a non-empty chain
    pub occupied_buckets: usize,
    /// Chain links created since the last rehash
    pub collisions: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// populated / buckets
    pub load_factor: f64,
    /// populated / occupied_buckets
    pub average_chain: f64,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Dense Hash Table Statistics ===");
        println!("Population: {}/{}", self.populated, self.capacity);
        println!(
            "Buckets: {}/{} occupied ({:.2}% load factor)",
            self.occupied_buckets,
            self.buckets,
            self.load_factor * 100.0
        );
        println!(
            "Chains: longest {}, average {:.2}, {} collisions since last rehash",
            self.longest_chain, self.average_chain, self.collisions
        );
    }
}

/// Histogram of chain lengths; bin `n` counts the buckets whose chain holds
/// exactly `n` entries.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHistogram {
    bins: Vec<usize>,
}

#[cfg(feature = "stats")]
impl ChainHistogram {
    /// The raw bins, indexed by chain length.
    pub fn as_slice(&self) -> &[usize] {
        &self.bins
    }

    /// Prints the histogram as a horizontal bar chart.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            match units % 8 {
                0 => {}
                1 => bar.push('▏'),
                2 => bar.push('▎'),
                3 => bar.push('▍'),
                4 => bar.push('▌'),
                5 => bar.push('▋'),
                6 => bar.push('▊'),
                _ => bar.push('▉'),
            }
            bar
        };

        println!("chain histogram:");
        for (len, &count) in self.bins.iter().enumerate() {
            println!("{:>3} | {} ({})", len, make_bar(count), count);
        }
    }
}

/// A bucket-chained hash table whose entries live in dense, gap-free arrays.
///
/// `DenseHashTable<K, V>` stores keys and values in two parallel `Vec`s that
/// are always packed into `[0, len)`. A separate bucket array maps reduced
/// hashes to the most recently inserted entry of each chain, and every entry
/// records the previous and next member of its chain.
///
/// Like the map and set built on it, the table is hasher-agnostic: every
/// operation takes the key's hash and an equality predicate.
///
/// - Removal moves the last entry into the freed slot, so indices returned
///   by [`find`](Self::find) stay valid only until the next removal.
/// - Chains are rebuilt from scratch once the number of collisions since the
///   last rebuild exceeds the bucket count.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use dense_hash::hash_table::DenseHashTable;
/// # use dense_hash::hash_table::Entry;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_str(s: &str) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     s.hash(&mut hasher);
/// #     hasher.finish()
/// # }
/// #
/// let mut table = DenseHashTable::with_capacity(4);
/// let hash = hash_str("alice");
///
/// match table.entry(hash, |k: &String| k == "alice") {
///     Entry::Vacant(entry) => {
///         entry.insert("alice".to_string(), 31u32);
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
///
/// let index = table.find(hash, |k| k == "alice").unwrap();
/// assert_eq!(table.values()[index], 31);
/// ```
pub struct DenseHashTable<K, V> {
    buckets: Vec<usize>,
    links: Vec<Link>,
    keys: Vec<K>,
    values: Vec<V>,

    capacity: usize,
    collisions: usize,
}

impl<K, V> Debug for DenseHashTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let chains = self
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot != 0)
            .map(|(bucket, &slot)| (bucket, self.chain(slot_to_index(slot)).collect::<Vec<_>>()))
            .collect::<Vec<_>>();

        f.debug_struct("DenseHashTable")
            .field("populated", &self.len())
            .field("capacity", &self.capacity)
            .field("buckets", &self.buckets.len())
            .field("collisions", &self.collisions)
            .field("chains", &chains)
            .finish()
    }
}

impl<K, V> Clone for DenseHashTable<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut links = Vec::with_capacity(self.capacity);
        let mut keys = Vec::with_capacity(self.capacity);
        let mut values = Vec::with_capacity(self.capacity);
        links.extend_from_slice(&self.links);
        keys.extend_from_slice(&self.keys);
        values.extend_from_slice(&self.values);

        Self {
            buckets: self.buckets.clone(),
            links,
            keys,
            values,
            capacity: self.capacity,
            collisions: self.collisions,
        }
    }
}

impl<K, V> Default for DenseHashTable<K, V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<K, V> DenseHashTable<K, V> {
    /// Creates a new table able to hold `capacity` entries before growing.
    ///
    /// The bucket array is sized to the smallest prime not below `capacity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::DenseHashTable;
    /// #
    /// let table: DenseHashTable<u64, String> = DenseHashTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: vec![0; next_prime(capacity)],
            links: Vec::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            capacity,
            collisions: 0,
        }
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of entries the dense arrays can hold before they
    /// grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the length of the bucket array.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Finds the dense index of the entry matching `hash` and `eq`.
    ///
    /// `eq` is only consulted for entries whose cached hash equals `hash`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::DenseHashTable;
    /// #
    /// let mut table = DenseHashTable::with_capacity(4);
    /// let (index, _) = table.insert(7, 7u32, "seven", |&k| k == 7);
    /// assert_eq!(table.find(7, |&k| k == 7), Some(index));
    /// assert_eq!(table.find(8, |&k| k == 8), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<usize> {
        let mut index = slot_to_index(self.buckets[reduce(hash, self.buckets.len())]);
        while index != NONE {
            let link = &self.links[index];
            if link.hash == hash && eq(&self.keys[index]) {
                return Some(index);
            }
            index = link.previous;
        }
        None
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    #[inline]
    pub fn find_value(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<&V> {
        self.find(hash, eq).map(|index| &self.values[index])
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    #[inline]
    pub fn find_value_mut(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<&mut V> {
        self.find(hash, eq).map(|index| &mut self.values[index])
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::DenseHashTable;
    /// # use dense_hash::hash_table::Entry;
    /// #
    /// let mut table = DenseHashTable::with_capacity(4);
    /// for word in ["a", "b", "a"] {
    ///     let hash = word.as_bytes()[0] as u64;
    ///     match table.entry(hash, |k: &&str| *k == word) {
    ///         Entry::Vacant(entry) => {
    ///             entry.insert(word, 1u32);
    ///         }
    ///         Entry::Occupied(mut entry) => *entry.get_mut() += 1,
    ///     }
    /// }
    /// assert_eq!(table.find_value(b'a' as u64, |k| *k == "a"), Some(&2));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Entry<'_, K, V> {
        match self.find(hash, eq) {
            Some(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Inserts or overwrites the value for a key.
    ///
    /// Returns the dense index of the entry and the previous value if the key
    /// was already present. An existing key is kept; only the value is
    /// replaced.
    pub fn insert(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        eq: impl Fn(&K) -> bool,
    ) -> (usize, Option<V>) {
        match self.entry(hash, eq) {
            Entry::Occupied(mut entry) => {
                let old = entry.insert(value);
                (entry.index(), Some(old))
            }
            Entry::Vacant(entry) => (entry.insert_full(key, value).0, None),
        }
    }

    /// Removes the entry matching `hash` and `eq`, returning its key and
    /// value.
    ///
    /// The last entry is moved into the freed slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::DenseHashTable;
    /// #
    /// let mut table = DenseHashTable::with_capacity(4);
    /// table.insert(1, 1u32, 'a', |&k| k == 1);
    /// table.insert(2, 2u32, 'b', |&k| k == 2);
    ///
    /// assert_eq!(table.remove(1, |&k| k == 1), Some((1, 'a')));
    /// assert_eq!(table.keys(), &[2]);
    /// assert_eq!(table.remove(1, |&k| k == 1), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<(K, V)> {
        let index = self.find(hash, eq)?;
        Some(self.remove_at(index))
    }

    /// Removes the entry at `index`, moving the last entry into its place.
    ///
    /// Returns `None` if `index >= len`.
    pub fn swap_remove_index(&mut self, index: usize) -> Option<(K, V)> {
        if index >= self.len() {
            return None;
        }
        Some(self.remove_at(index))
    }

    /// Returns the key at `index`.
    #[inline]
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// Returns the value at `index`.
    #[inline]
    pub fn value_at(&self, index: usize) -> Option<&V> {
        self.values.get(index)
    }

    /// Returns a mutable reference to the value at `index`.
    #[inline]
    pub fn value_at_mut(&mut self, index: usize) -> Option<&mut V> {
        self.values.get_mut(index)
    }

    /// Returns the key and value at `index`.
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(index)?, &self.values[index]))
    }

    /// The live keys, in dense order.
    ///
    /// The slice covers exactly `[0, len)`; it is invalidated by the next
    /// structural mutation.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The live values, in dense order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// The live values, mutably. Writing through the slice never affects the
    /// table structure.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// Returns an iterator over `(&K, &V)` pairs in dense order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.keys.iter().zip(self.values.iter()),
        }
    }

    /// Returns an iterator over `(&K, &mut V)` pairs in dense order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.keys.iter().zip(self.values.iter_mut()),
        }
    }

    /// Removes every entry, yielding them in dense order.
    ///
    /// The table is empty as soon as this returns, whether or not the
    /// iterator is consumed.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.buckets.fill(0);
        self.links.clear();
        self.collisions = 0;
        Drain {
            inner: self.keys.drain(..).zip(self.values.drain(..)),
        }
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// Dense order of the surviving entries is not preserved.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &mut V) -> bool) {
        let mut index = 0;
        while index < self.keys.len() {
            if keep(&self.keys[index], &mut self.values[index]) {
                index += 1;
            } else {
                self.remove_at(index);
            }
        }
    }

    /// Removes all entries and resets the collision counter, keeping the
    /// allocated capacity.
    pub fn clear(&mut self) {
        self.buckets.fill(0);
        self.links.clear();
        self.keys.clear();
        self.values.clear();
        self.collisions = 0;
    }

    /// Empties the bucket array and resets the length only.
    ///
    /// The collision counter is left untouched, so the next rehash happens on
    /// the same schedule as before. For `Copy` keys and values this is a
    /// plain bucket wipe.
    pub fn shallow_clear(&mut self) {
        self.buckets.fill(0);
        self.links.clear();
        self.keys.clear();
        self.values.clear();
    }

    /// Ensures the dense arrays can hold `additional` more entries.
    ///
    /// Only ever enlarges; the bucket array is left alone.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len().saturating_add(additional);
        if required > self.capacity {
            self.set_capacity(required);
        }
    }

    /// Shrinks the dense arrays to the current length.
    ///
    /// The bucket array is never shrunk.
    pub fn trim(&mut self) {
        log::debug!(
            "trimming dense storage from {} to {} entries",
            self.capacity,
            self.len()
        );
        self.links.shrink_to_fit();
        self.keys.shrink_to_fit();
        self.values.shrink_to_fit();
        self.capacity = self.len();
    }

    fn set_capacity(&mut self, capacity: usize) {
        let additional = capacity - self.len();
        self.links.reserve_exact(additional);
        self.keys.reserve_exact(additional);
        self.values.reserve_exact(additional);
        self.capacity = capacity;
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        let capacity = self.capacity.saturating_mul(2).max(1);
        log::trace!(
            "growing dense storage from {} to {} entries",
            self.capacity,
            capacity
        );
        self.set_capacity(capacity);
    }

    /// Appends a new entry and threads it into its chain. The caller must
    /// have checked that the key is absent.
    fn push(&mut self, hash: u64, key: K, value: V) -> usize {
        if self.len() == self.capacity {
            self.grow();
        }

        let index = self.len();
        let bucket = reduce(hash, self.buckets.len());
        let head = slot_to_index(self.buckets[bucket]);
        if head != NONE {
            self.links[head].next = index;
            self.collisions += 1;
        }

        self.links.push(Link {
            hash,
            previous: head,
            next: NONE,
        });
        self.keys.push(key);
        self.values.push(value);
        self.buckets[bucket] = index_to_slot(index);

        if self.collisions > self.buckets.len() {
            self.rehash();
        }

        index
    }

    /// Rebuilds the bucket array and every chain in dense order.
    #[cold]
    #[inline(never)]
    fn rehash(&mut self) {
        let bucket_count = next_prime(self.collisions.saturating_mul(2));
        log::trace!(
            "rehashing {} entries: {} collisions over {} buckets, growing to {} buckets",
            self.len(),
            self.collisions,
            self.buckets.len(),
            bucket_count
        );

        let mut buckets = vec![0; bucket_count];
        let mut collisions = 0;
        for index in 0..self.links.len() {
            let bucket = reduce(self.links[index].hash, bucket_count);
            let head = slot_to_index(buckets[bucket]);
            if head != NONE {
                self.links[head].next = index;
                collisions += 1;
            }

            let link = &mut self.links[index];
            link.previous = head;
            link.next = NONE;
            buckets[bucket] = index_to_slot(index);
        }

        self.buckets = buckets;
        self.collisions = collisions;
    }

    fn remove_at(&mut self, index: usize) -> (K, V) {
        self.unlink(index);

        let last = self.len() - 1;
        if index != last {
            self.relocate(last, index);
        }

        self.links.swap_remove(index);
        let key = self.keys.swap_remove(index);
        let value = self.values.swap_remove(index);
        (key, value)
    }

    /// Detaches `index` from its chain.
    fn unlink(&mut self, index: usize) {
        let Link {
            hash,
            previous,
            next,
        } = self.links[index];
        let bucket = reduce(hash, self.buckets.len());

        if self.buckets[bucket] == index_to_slot(index) {
            assert!(
                next == NONE,
                "dense hash table corrupted: chain head {index} links to newer entry {next}"
            );
            self.buckets[bucket] = index_to_slot(previous);
            if previous != NONE {
                self.links[previous].next = NONE;
            }
        } else {
            assert!(
                next != NONE,
                "dense hash table corrupted: entry {index} is not reachable from bucket {bucket}"
            );
            self.links[next].previous = previous;
            if previous != NONE {
                self.links[previous].next = next;
            }
        }
    }

    /// Redirects every reference to the entry at `from` so it points at `to`.
    /// The entry itself is moved by the caller.
    fn relocate(&mut self, from: usize, to: usize) {
        let Link {
            hash,
            previous,
            next,
        } = self.links[from];
        let bucket = reduce(hash, self.buckets.len());

        if self.buckets[bucket] == index_to_slot(from) {
            self.buckets[bucket] = index_to_slot(to);
        }
        if previous != NONE {
            self.links[previous].next = to;
        }
        if next != NONE {
            self.links[next].previous = to;
        }
    }

    /// Walks a chain from `head` towards older entries.
    fn chain(&self, head: usize) -> impl Iterator<Item = usize> + '_ {
        core::iter::successors((head != NONE).then_some(head), move |&index| {
            let previous = self.links[index].previous;
            (previous != NONE).then_some(previous)
        })
    }

    /// Returns the number of chain links created since the last rehash.
    #[cfg(any(test, feature = "stats"))]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Computes the distribution of chain lengths over all buckets.
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> ChainHistogram {
        let mut bins = vec![0usize; 1];
        for &slot in &self.buckets {
            let len = self.chain(slot_to_index(slot)).count();
            if len >= bins.len() {
                bins.resize(len + 1, 0);
            }
            bins[len] += 1;
        }
        ChainHistogram { bins }
    }

    /// Returns bucket and chain statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> DebugStats {
        let mut occupied_buckets = 0;
        let mut longest_chain = 0;
        for &slot in &self.buckets {
            if slot != 0 {
                occupied_buckets += 1;
                longest_chain = longest_chain.max(self.chain(slot_to_index(slot)).count());
            }
        }

        DebugStats {
            populated: self.len(),
            capacity: self.capacity,
            buckets: self.buckets.len(),
            occupied_buckets,
            collisions: self.collisions,
            longest_chain,
            load_factor: self.len() as f64 / self.buckets.len() as f64,
            average_chain: if occupied_buckets == 0 {
                0.0
            } else {
                self.len() as f64 / occupied_buckets as f64
            },
        }
    }

    /// Checks every structural invariant, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let len = self.len();
        assert_eq!(self.links.len(), len);
        assert_eq!(self.values.len(), len);
        assert!(len <= self.capacity, "{len} > {}", self.capacity);
        assert!(is_prime(self.buckets.len()));

        let mut seen = vec![false; len];
        for (bucket, &slot) in self.buckets.iter().enumerate() {
            let mut expected_next = NONE;
            let mut index = slot_to_index(slot);
            while index != NONE {
                assert!(index < len, "bucket {bucket} points past the dense prefix");
                assert!(!seen[index], "entry {index} reachable twice");
                seen[index] = true;

                let link = self.links[index];
                assert_eq!(reduce(link.hash, self.buckets.len()), bucket);
                assert_eq!(link.next, expected_next, "bad next link on {index}");
                expected_next = index;
                index = link.previous;
            }
        }
        assert!(seen.iter().all(|&s| s), "unreachable entries: {self:?}");
    }

    #[cfg(test)]
    pub(crate) fn hash_at(&self, index: usize) -> u64 {
        self.links[index].hash
    }
}

impl<K, V> IntoIterator for DenseHashTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.keys.into_iter().zip(self.values),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a DenseHashTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`DenseHashTable`].
///
/// [`entry`]: DenseHashTable::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry - no key matched
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry - a key matched
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Returns the entry's value, inserting `key` and `default` if vacant.
    pub fn or_insert(self, key: K, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(key, default),
        }
    }

    /// Returns the entry's value, inserting the pair built by `default` if
    /// vacant.
    pub fn or_insert_with(self, default: impl FnOnce() -> (K, V)) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let (key, value) = default();
                entry.insert(key, value)
            }
        }
    }
}

/// A view into a vacant entry in a [`DenseHashTable`].
pub struct VacantEntry<'a, K, V> {
    table: &'a mut DenseHashTable<K, V>,
    hash: u64,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Appends the pair to the dense arrays and returns a mutable reference
    /// to the value.
    pub fn insert(self, key: K, value: V) -> &'a mut V {
        self.insert_full(key, value).1
    }

    /// Like [`insert`](Self::insert), also returning the new dense index.
    pub fn insert_full(self, key: K, value: V) -> (usize, &'a mut V) {
        let table = self.table;
        let index = table.push(self.hash, key, value);
        (index, &mut table.values[index])
    }

    /// The hash this entry was looked up with.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// A view into an occupied entry in a [`DenseHashTable`].
pub struct OccupiedEntry<'a, K, V> {
    table: &'a mut DenseHashTable<K, V>,
    index: usize,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// The dense index of the entry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stored key.
    pub fn key(&self) -> &K {
        &self.table.keys[self.index]
    }

    /// Gets a reference to the value.
    pub fn get(&self) -> &V {
        &self.table.values[self.index]
    }

    /// Gets a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.values[self.index]
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { table, index } = self;
        &mut table.values[index]
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, moving the last entry into its slot.
    pub fn remove(self) -> (K, V) {
        self.table.remove_at(self.index)
    }
}

/// An iterator over the entries of a [`DenseHashTable`] in dense order.
///
/// This struct is created by [`DenseHashTable::iter`].
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    inner: Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// A mutable iterator over the entries of a [`DenseHashTable`].
pub struct IterMut<'a, K, V> {
    inner: Zip<slice::Iter<'a, K>, slice::IterMut<'a, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// A draining iterator over the entries of a [`DenseHashTable`].
///
/// This struct is created by [`DenseHashTable::drain`].
pub struct Drain<'a, K, V> {
    inner: Zip<alloc::vec::Drain<'a, K>, alloc::vec::Drain<'a, V>>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

/// An owning iterator over the entries of a [`DenseHashTable`].
pub struct IntoIter<K, V> {
    inner: Zip<alloc::vec::IntoIter<K>, alloc::vec::IntoIter<V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use core::hash::Hasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    fn hash_key(state: &HashState, key: u64) -> u64 {
        let mut h = state.build_hasher();
        h.write_u64(key);
        h.finish()
    }

    fn insert_new(table: &mut DenseHashTable<u64, i64>, hash: u64, key: u64, value: i64) -> usize {
        match table.entry(hash, |&k| k == key) {
            Entry::Vacant(v) => v.insert_full(key, value).0,
            Entry::Occupied(_) => panic!("unexpected occupied for {key}: {table:#?}"),
        }
    }

    #[test]
    fn primes() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(4), 5);
        assert_eq!(next_prime(14), 17);
        assert_eq!(next_prime(97), 97);
        assert_eq!(next_prime(98), 101);
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(!is_prime(25));
        assert!(is_prime(7919));
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(0);
        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            let index = insert_new(&mut table, hash, k, k as i64 * 2);
            assert_eq!(index, k as usize, "appends land at the end");
            assert_eq!(table.find_value(hash, |&v| v == k), Some(&(k as i64 * 2)));
        }
        assert_eq!(table.len(), 32);
        table.validate();

        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            assert_eq!(table.find(hash, |&v| v == k), Some(k as usize));
        }

        let miss_hash = hash_key(&state, 999);
        assert!(table.find(miss_hash, |&v| v == 999).is_none());
    }

    #[test]
    fn duplicate_entry_is_occupied() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(0);
        let hash = hash_key(&state, 42);
        insert_new(&mut table, hash, 42, 7);

        match table.entry(hash, |&k| k == 42) {
            Entry::Occupied(mut occ) => {
                assert_eq!(occ.index(), 0);
                assert_eq!(occ.insert(11), 7);
            }
            Entry::Vacant(_) => panic!("should be occupied: {table:#?}"),
        }
        assert_eq!(table.find_value(hash, |&k| k == 42), Some(&11));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut table = DenseHashTable::with_capacity(4);
        assert_eq!(table.insert(5, 5u64, 1i64, |&k| k == 5), (0, None));
        assert_eq!(table.insert(6, 6u64, 2i64, |&k| k == 6), (1, None));
        assert_eq!(table.insert(5, 5u64, 3i64, |&k| k == 5), (0, Some(1)));
        assert_eq!(table.values(), &[3, 2]);
        table.validate();
    }

    #[test]
    fn insert_is_idempotent() {
        let mut once = DenseHashTable::with_capacity(4);
        let mut twice = DenseHashTable::with_capacity(4);
        once.insert(9, 9u64, 90i64, |&k| k == 9);
        twice.insert(9, 9u64, 90i64, |&k| k == 9);
        twice.insert(9, 9u64, 90i64, |&k| k == 9);

        assert_eq!(once.keys(), twice.keys());
        assert_eq!(once.values(), twice.values());
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn remove_swaps_last_into_hole() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(0);
        for k in 0..8u64 {
            insert_new(&mut table, hash_key(&state, k), k, k as i64);
        }

        let removed = table.remove(hash_key(&state, 2), |&k| k == 2);
        assert_eq!(removed, Some((2, 2)));
        assert_eq!(table.len(), 7);
        assert_eq!(table.key_at(2), Some(&7), "former last entry fills the hole");
        assert_eq!(table.find(hash_key(&state, 7), |&k| k == 7), Some(2));
        table.validate();

        let removed = table.remove(hash_key(&state, 7), |&k| k == 7);
        assert_eq!(removed, Some((7, 7)));
        assert_eq!(table.key_at(2), Some(&6));
        table.validate();

        assert!(table.remove(hash_key(&state, 1000), |&k| k == 1000).is_none());
    }

    #[test]
    fn remove_last_entry() {
        let mut table = DenseHashTable::with_capacity(2);
        table.insert(1, 1u64, 10i64, |&k| k == 1);
        table.insert(2, 2u64, 20i64, |&k| k == 2);

        assert_eq!(table.swap_remove_index(1), Some((2, 20)));
        assert_eq!(table.keys(), &[1]);
        assert_eq!(table.swap_remove_index(1), None);
        table.validate();
    }

    #[test]
    fn explicit_collision_chain() {
        let mut table = DenseHashTable::with_capacity(16);
        let hash = 0;
        for k in 0..3u64 {
            insert_new(&mut table, hash, k, k as i64 * 100);
        }
        table.validate();

        // A, B, C share one bucket; dropping the middle link splices A to C.
        assert_eq!(table.remove(hash, |&k| k == 1), Some((1, 100)));
        assert_eq!(table.len(), 2);
        table.validate();
        assert_eq!(table.find_value(hash, |&k| k == 0), Some(&0));
        assert_eq!(table.find_value(hash, |&k| k == 2), Some(&200));
        assert!(table.find(hash, |&k| k == 1).is_none());
    }

    #[test]
    fn remove_chain_head_and_tail() {
        let mut table = DenseHashTable::with_capacity(16);
        for k in 0..5u64 {
            insert_new(&mut table, 3, k, k as i64);
        }

        // Head of the chain is the newest entry.
        assert_eq!(table.remove(3, |&k| k == 4), Some((4, 4)));
        table.validate();
        // Tail of the chain is the oldest entry, and not the dense last.
        assert_eq!(table.remove(3, |&k| k == 0), Some((0, 0)));
        table.validate();

        for k in 1..4u64 {
            assert_eq!(table.find_value(3, |&v| v == k), Some(&(k as i64)));
        }
    }

    #[test]
    fn collisions_trigger_rehash() {
        let mut table = DenseHashTable::with_capacity(1);
        assert_eq!(table.bucket_count(), 3);

        // Multiples of three all reduce to bucket zero.
        for k in 0..10u64 {
            insert_new(&mut table, k * 3, k, k as i64);
            table.validate();
        }

        assert!(table.bucket_count() > 3, "{table:#?}");
        assert!(table.capacity() >= 10);
        assert!(table.collisions() <= table.bucket_count());
        for k in 0..10u64 {
            assert_eq!(table.find_value(k * 3, |&v| v == k), Some(&(k as i64)));
        }
    }

    #[test]
    fn growth_from_capacity_one() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(1);
        let initial_capacity = table.capacity();
        for k in 0..10u64 {
            insert_new(&mut table, hash_key(&state, k), k, k as i64);
        }

        assert!(table.capacity() > initial_capacity);
        assert_eq!(table.len(), 10);
        for k in 0..10u64 {
            assert!(table.find(hash_key(&state, k), |&v| v == k).is_some());
        }
        table.validate();
    }

    #[test]
    fn clear_and_shallow_clear() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(0);
        for k in 0..20u64 {
            insert_new(&mut table, hash_key(&state, k), k, 1);
        }
        let capacity = table.capacity();

        table.shallow_clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        for k in 0..20u64 {
            assert!(table.find(hash_key(&state, k), |&v| v == k).is_none());
        }
        table.validate();

        for k in 0..20u64 {
            insert_new(&mut table, hash_key(&state, k), k, 2);
        }
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.collisions(), 0);
        for k in 0..20u64 {
            assert!(table.find(hash_key(&state, k), |&v| v == k).is_none());
        }
        table.validate();
    }

    #[test]
    fn reserve_and_trim() {
        let mut table: DenseHashTable<u64, i64> = DenseHashTable::with_capacity(2);
        table.reserve(50);
        assert!(table.capacity() >= 50);

        let buckets = table.bucket_count();
        table.insert(1, 1, 1, |&k| k == 1);
        table.trim();
        assert_eq!(table.capacity(), 1);
        assert_eq!(table.bucket_count(), buckets, "trim leaves buckets alone");

        table.reserve(0);
        assert_eq!(table.capacity(), 1);
        table.insert(2, 2, 2, |&k| k == 2);
        assert_eq!(table.capacity(), 2);
        table.validate();
    }

    #[test]
    fn iter_and_drain() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(0);
        for k in 10..20u64 {
            insert_new(&mut table, hash_key(&state, k), k, k as i64);
        }

        let pairs: Vec<_> = table.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[0], (10, 10));
        assert_eq!(table.iter().len(), 10);

        for (_, v) in table.iter_mut() {
            *v += 1;
        }
        assert!(table.values().iter().zip(table.keys()).all(|(v, k)| *v == *k as i64 + 1));

        let drained: Vec<_> = table.drain().collect();
        assert_eq!(drained.len(), 10);
        assert!(table.is_empty());
        table.validate();

        insert_new(&mut table, hash_key(&state, 1), 1, 1);
        let owned: Vec<_> = table.into_iter().collect();
        assert_eq!(owned, vec![(1, 1)]);
    }

    #[test]
    fn dropped_drain_empties_table() {
        let mut table = DenseHashTable::with_capacity(0);
        for k in 0..5u64 {
            insert_new(&mut table, k, k, 0);
        }
        {
            let mut drain = table.drain();
            drain.next();
        }
        assert!(table.is_empty());
        assert!(table.find(3, |&k| k == 3).is_none());
        table.validate();
    }

    #[test]
    fn retain_keeps_matching() {
        let state = HashState::default();
        let mut table = DenseHashTable::with_capacity(0);
        for k in 0..100u64 {
            insert_new(&mut table, hash_key(&state, k), k, k as i64);
        }

        table.retain(|k, v| {
            *v *= 2;
            k % 3 == 0
        });
        assert_eq!(table.len(), 34);
        table.validate();
        for k in 0..100u64 {
            let found = table.find_value(hash_key(&state, k), |&v| v == k);
            if k % 3 == 0 {
                assert_eq!(found, Some(&(k as i64 * 2)));
            } else {
                assert_eq!(found, None);
            }
        }
    }

    #[test]
    fn string_keys() {
        fn hash_str(s: &str) -> u64 {
            let mut hasher = SipHasher::new();
            hasher.write(s.as_bytes());
            hasher.finish()
        }

        let mut table: DenseHashTable<String, usize> = DenseHashTable::default();
        for i in 0..50 {
            let key = format!("key_{i}");
            table.insert(hash_str(&key), key.clone(), i, |k| *k == key);
        }
        for i in (0..50).step_by(2) {
            let key = format!("key_{i}");
            assert_eq!(
                table.remove(hash_str(&key), |k| *k == key),
                Some((key.clone(), i))
            );
        }
        table.validate();
        for i in (1..50).step_by(2) {
            let key = format!("key_{i}");
            assert_eq!(table.find_value(hash_str(&key), |k| *k == key), Some(&i));
        }
        assert_eq!(table.len(), 25);
        assert!(table.find(hash_str("key_0"), |k| k == "key_0").is_none());
    }

    #[test]
    fn clone_is_independent() {
        let mut original = DenseHashTable::with_capacity(8);
        for k in 0..6u64 {
            insert_new(&mut original, k % 2, k, k as i64);
        }
        let mut copy = original.clone();
        assert_eq!(copy.capacity(), original.capacity());
        copy.validate();

        copy.remove(0, |&k| k == 0);
        *copy.value_at_mut(0).unwrap() = 99;
        assert_eq!(original.len(), 6);
        assert_eq!(original.find_value(0, |&k| k == 0), Some(&0));
        assert_ne!(original.value_at(0), Some(&99));
        original.validate();
    }

    #[test]
    #[should_panic(expected = "dense hash table corrupted")]
    fn corrupted_head_is_fatal() {
        let mut table = DenseHashTable::with_capacity(4);
        table.insert(0, 0u64, (), |&k| k == 0);
        table.insert(0, 1u64, (), |&k| k == 1);
        let head = table.find(0, |&k| k == 1).unwrap();
        table.links[head].next = 0;
        table.remove(0, |&k| k == 1);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn randomized_against_model() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut table: DenseHashTable<u64, u64> = DenseHashTable::with_capacity(1);
        let mut model = BTreeMap::new();

        // A narrow hash range keeps chains long and rehashes frequent.
        let hash_of = |k: u64| k.wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 58;

        for step in 0..20_000u64 {
            let key = rng.random_range(0..512u64);
            match rng.random_range(0..10) {
                0..=5 => {
                    let (_, old) = table.insert(hash_of(key), key, step, |&k| k == key);
                    assert_eq!(old, model.insert(key, step));
                }
                6..=8 => {
                    let removed = table.remove(hash_of(key), |&k| k == key).map(|(_, v)| v);
                    assert_eq!(removed, model.remove(&key));
                }
                _ => {
                    assert_eq!(
                        table.find_value(hash_of(key), |&k| k == key),
                        model.get(&key)
                    );
                }
            }

            if step % 997 == 0 {
                table.validate();
            }
        }

        table.validate();
        assert_eq!(table.len(), model.len());
        for (k, v) in &model {
            assert_eq!(table.find_value(hash_of(*k), |&x| x == *k), Some(v));
        }
        for (index, key) in table.keys().iter().enumerate() {
            assert_eq!(table.hash_at(index), hash_of(*key));
        }
    }

    #[test]
    #[cfg(feature = "stats")]
    fn stats_reflect_chains() {
        let mut table = DenseHashTable::with_capacity(16);
        for k in 0..4u64 {
            insert_new(&mut table, 0, k, 0);
        }
        insert_new(&mut table, 1, 100, 0);

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 5);
        assert_eq!(stats.occupied_buckets, 2);
        assert_eq!(stats.longest_chain, 4);
        assert_eq!(stats.collisions, 3);

        let histogram = table.chain_histogram();
        assert_eq!(histogram.as_slice()[1], 1);
        assert_eq!(histogram.as_slice()[4], 1);
        assert_eq!(histogram.as_slice()[0], table.bucket_count() - 2);
    }
}
