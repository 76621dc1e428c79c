use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::CursorMut;
use crate::hash_table::HashTable;

/// A hash map backed by the triangular-probing [`HashTable`].
///
/// `HashMap<K, V, S>` stores key/value pairs where keys implement
/// `Hash + Eq`, hashing them through a stored build state `S`. The default
/// state is fixed-seed and therefore deterministic from run to run; bring
/// your own `BuildHasher` for keys you do not control.
///
/// Two insertion flavors expose the underlying table's key policy:
/// [`insert`](HashMap::insert) keeps the already-stored key when one
/// compares equal, while [`replace`](HashMap::replace) adopts the new key.
/// Both return whether the key was new, and both drop displaced data only
/// after the map's bookkeeping is complete.
///
/// # Examples
///
/// ```rust
/// use tri_hash::HashMap;
///
/// let mut map: HashMap<String, u32> = HashMap::new();
/// map.insert("alpha".to_string(), 1);
/// map.insert("beta".to_string(), 2);
///
/// assert_eq!(map.get(&"beta".to_string()), Some(&2));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<K, V>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hash builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siphasher::sip::SipHasher;
    /// use tri_hash::HashMap;
    ///
    /// #[derive(Default)]
    /// struct SipState;
    ///
    /// impl core::hash::BuildHasher for SipState {
    ///     type Hasher = SipHasher;
    ///
    ///     fn build_hasher(&self) -> Self::Hasher {
    ///         SipHasher::new()
    ///     }
    /// }
    ///
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(SipState);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates an empty map pre-sized for `capacity` entries, with the given
    /// hash builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates an empty map reusing this map's hash builder.
    pub fn new_like(&self) -> Self
    where
        S: Clone,
    {
        Self::with_hasher(self.hash_builder.clone())
    }

    /// Returns a reference to the map's hash builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of entries the map can hold before resizing.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes every entry, dropping all keys and values, and returns the
    /// storage to its minimum size. The map stays usable.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Ensures `additional` further entries fit without a resize.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Shrinks the storage to fit the current entries.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    fn hash_key(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Inserts a key/value pair, returning `true` if the key was not
    /// already present.
    ///
    /// If the key was present, the stored key is kept, the incoming key is
    /// dropped, and only the value is updated. See
    /// [`replace`](Self::replace) for the other key policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// assert!(map.insert("a", 1));
    /// assert!(!map.insert("a", 2));
    /// assert_eq!(map.get(&"a"), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let hash = self.hash_key(&key);
        self.table.insert(hash, |a, b| a == b, key, value)
    }

    /// Inserts a key/value pair, adopting the incoming key even when an
    /// equal one is already stored (the stored key is dropped). Returns
    /// `true` if the key was not already present.
    pub fn replace(&mut self, key: K, value: V) -> bool {
        let hash = self.hash_key(&key);
        self.table.replace(hash, |a, b| a == b, key, value)
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashMap;
    ///
    /// let mut map: HashMap<u32, u32> = HashMap::new();
    /// map.insert(1, 10);
    /// assert_eq!(map.get(&1), Some(&10));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_key(key);
        self.table
            .lookup(hash, |stored| stored == key)
            .map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    ///
    /// The returned key is the one the map owns, which can differ from the
    /// query in identity (though never in equality).
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = self.hash_key(key);
        self.table.lookup(hash, |stored| stored == key)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_key(key);
        self.table
            .lookup_mut(hash, |stored| stored == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_key(key);
        self.table.contains(hash, |stored| stored == key)
    }

    /// Removes the entry for `key`, dropping its key and value. Returns
    /// `true` if an entry was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// map.insert("a", 1);
    /// assert!(map.remove(&"a"));
    /// assert!(!map.remove(&"a"));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let hash = self.hash_key(key);
        self.table.remove(hash, |stored| stored == key)
    }

    /// Removes the entry for `key` and returns it to the caller instead of
    /// dropping it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashMap;
    ///
    /// let mut map: HashMap<String, u32> = HashMap::new();
    /// map.insert("k".to_string(), 7);
    ///
    /// assert_eq!(map.steal(&"k".to_string()), Some(("k".to_string(), 7)));
    /// assert!(map.is_empty());
    /// ```
    pub fn steal(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_key(key);
        self.table.steal(hash, |stored| stored == key)
    }

    /// Keeps only the entries for which `keep` returns `true`, dropping the
    /// rest. Returns the number of entries removed.
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) -> usize {
        self.table.retain(keep)
    }

    /// An iterator that removes and yields the entries matching `pred`,
    /// transferring ownership to the caller. Dropping the iterator finishes
    /// the sweep.
    pub fn extract_if<F>(&mut self, pred: F) -> ExtractIf<'_, K, V, F>
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        ExtractIf {
            inner: self.table.extract_if(pred),
        }
    }

    /// Returns the first entry, in slot order, for which `pred` returns
    /// `true`.
    pub fn find(&self, pred: impl FnMut(&K, &V) -> bool) -> Option<(&K, &V)> {
        self.table.find(pred)
    }

    /// An iterator over the entries in slot order.
    ///
    /// Slot order is an implementation artifact; do not depend on it.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// An iterator over the keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.table.keys(),
        }
    }

    /// An iterator over the values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.table.values(),
        }
    }

    /// A draining iterator that empties the map, yielding owned pairs.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// A mutating cursor over the entries, supporting removal, stealing,
    /// and value replacement at the current position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashMap;
    ///
    /// let mut map: HashMap<u32, u32> = HashMap::new();
    /// for k in 0..10 {
    ///     map.insert(k, k);
    /// }
    ///
    /// let mut cursor = map.cursor();
    /// while let Some((&k, _)) = cursor.next() {
    ///     if k % 2 == 0 {
    ///         cursor.remove();
    ///     }
    /// }
    /// assert_eq!(map.len(), 5);
    /// ```
    pub fn cursor(&mut self) -> CursorMut<'_, K, V> {
        self.table.cursor()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map using the default hash builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashMap;
    ///
    /// let map: HashMap<i32, i32> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map pre-sized for `capacity` entries, using the
    /// default hash builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// An iterator over the entries of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: crate::hash_table::Keys<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: crate::hash_table::Values<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A draining iterator over the entries of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, K, V>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator that removes and yields matching entries from a `HashMap`.
pub struct ExtractIf<'a, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    inner: crate::hash_table::ExtractIf<'a, K, V, F>,
}

impl<K, V, F> Iterator for ExtractIf<'_, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An owning iterator over the entries of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
