#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

/// The key comparison contract and its stock implementations.
pub mod comparer;

/// Error and result types for the strict and positional operations.
pub mod error;

/// A map with dense key and value arrays.
///
/// This module provides [`DenseHashMap`], which wraps the
/// [`DenseHashTable`] engine with a [`KeyComparer`] and exposes a standard
/// key-value interface plus index-based access.
pub mod hash_map;

/// A set with a dense item array.
///
/// This module provides [`DenseHashSet`], the keys-only counterpart of
/// [`DenseHashMap`].
pub mod hash_set;

pub mod hash_table;

pub mod read_only;

pub use comparer::DefaultComparer;
pub use comparer::DefaultHashBuilder;
pub use comparer::KeyComparer;
pub use error::Error;
pub use error::Result;
pub use hash_map::DenseHashMap;
pub use hash_map::Entry;
pub use hash_set::DenseHashSet;
pub use hash_table::DenseHashTable;
pub use read_only::ReadOnlyMap;
pub use read_only::ReadOnlySet;
