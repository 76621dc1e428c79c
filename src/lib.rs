#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A hash map built on the triangular-probing HashTable.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

pub mod hash_table;

/// A hash set built on the triangular-probing HashTable.
///
/// This module provides a `HashSet` that wraps the `HashTable` with a
/// zero-sized value type, so set storage pays for a single data array.
pub mod hash_set;

/// Hashers mirroring the classic direct (identity) and DJBX33A string
/// hashes, usable as deterministic `BuildHasher` states.
pub mod hashers;

pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::CursorMut;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The default hasher state for [`HashMap`] and [`HashSet`].
        ///
        /// Fixed-seed foldhash: fast, high quality, and deterministic from
        /// run to run. No seed randomization is applied; callers handling
        /// adversarial keys should bring their own state.
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    } else {
        /// The default hasher state for [`HashMap`] and [`HashSet`].
        ///
        /// Without the `foldhash` feature this falls back to the bundled
        /// DJBX33A hasher, which is deterministic but weak; see
        /// [`hashers::DjbHasher`] for the caveats.
        pub type DefaultHashBuilder = core::hash::BuildHasherDefault<hashers::DjbHasher>;
    }
}
