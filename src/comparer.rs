use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hash builder used when no comparer is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hash builder used when no comparer is supplied.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// The hash builder used when no comparer is supplied.
        #[allow(deprecated)]
        pub type DefaultHashBuilder = core::hash::BuildHasherDefault<core::hash::SipHasher>;
    }
}

/// The equality contract a dense container uses for bucket placement and
/// chain comparison.
///
/// Implementations must be consistent: whenever `key_eq(a, b)` holds,
/// `hash_key(a) == hash_key(b)` must hold as well. The containers never
/// consult `Hash` or `Eq` on the key type directly, only this contract.
///
/// # Examples
///
/// ```rust
/// use dense_hash::DenseHashSet;
/// use dense_hash::KeyComparer;
///
/// struct CaseInsensitive;
///
/// impl KeyComparer<String> for CaseInsensitive {
///     fn hash_key(&self, key: &String) -> u64 {
///         key.bytes()
///             .fold(0xcbf29ce484222325, |h, b| {
///                 (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100000001b3)
///             })
///     }
///
///     fn key_eq(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
///
/// let mut set = DenseHashSet::with_comparer(CaseInsensitive);
/// assert!(set.insert("Hello".to_string()));
/// assert!(!set.insert("HELLO".to_string()));
/// assert!(set.contains(&"hello".to_string()));
/// ```
pub trait KeyComparer<K: ?Sized> {
    /// Hashes `key`.
    fn hash_key(&self, key: &K) -> u64;

    /// Returns `true` if `a` and `b` denote the same key.
    fn key_eq(&self, a: &K, b: &K) -> bool;
}

/// Natural equality: `K: Hash + Eq` hashed through a [`BuildHasher`].
#[derive(Clone, Default)]
pub struct DefaultComparer<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl<S> DefaultComparer<S> {
    /// Wraps a hash builder.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the wrapped hash builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<S> Debug for DefaultComparer<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DefaultComparer").finish_non_exhaustive()
    }
}

impl<K, S> KeyComparer<K> for DefaultComparer<S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }

    #[inline]
    fn key_eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// A comparer assembled from a hash function and an equality function.
///
/// Handy for one-off contracts, e.g. a test comparer that forces every key
/// into the same bucket.
///
/// ```rust
/// use dense_hash::DenseHashMap;
/// use dense_hash::comparer::FnComparer;
///
/// let colliding = FnComparer::new(|_: &u32| 7_u64, |a: &u32, b: &u32| a == b);
/// let mut map: DenseHashMap<u32, &str, _> = DenseHashMap::with_comparer(colliding);
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.get(&2), Some(&"two"));
/// ```
#[derive(Clone, Copy)]
pub struct FnComparer<H, E> {
    hash: H,
    eq: E,
}

impl<H, E> FnComparer<H, E> {
    /// Builds a comparer from its two halves.
    pub fn new(hash: H, eq: E) -> Self {
        Self { hash, eq }
    }
}

impl<H, E> Debug for FnComparer<H, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnComparer").finish_non_exhaustive()
    }
}

impl<K, H, E> KeyComparer<K> for FnComparer<H, E>
where
    K: ?Sized,
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn key_eq(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }
}
