use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use alloc::boxed::Box;

use crate::DefaultHashBuilder;
use crate::hash_table::HashTable;

/// A hash set backed by the triangular-probing [`HashTable`].
///
/// `HashSet<T, S>` instantiates the table with a zero-sized value type, so a
/// set pays for the hash array and a single data array, mirroring the
/// key/value aliasing a dedicated set layout would use.
///
/// [`insert`](HashSet::insert) follows replace semantics for the stored
/// element: inserting a value equal to one already present drops the *old*
/// element and stores the new one. Use [`replace`](HashSet::replace) to get
/// the displaced element back instead.
///
/// # Examples
///
/// ```rust
/// use tri_hash::HashSet;
///
/// let mut set: HashSet<String> = HashSet::new();
/// assert!(set.insert("a".to_string()));
/// assert!(!set.insert("a".to_string()));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T, ()>,
    hash_builder: S,
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty set with the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates an empty set pre-sized for `capacity` elements, with the
    /// given hash builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates an empty set reusing this set's hash builder.
    pub fn new_like(&self) -> Self
    where
        S: Clone,
    {
        Self::with_hasher(self.hash_builder.clone())
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of elements the set can hold before resizing.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes every element and returns the storage to its minimum size.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Ensures `additional` further elements fit without a resize.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Shrinks the storage to fit the current elements.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    fn hash_value(&self, value: &T) -> u64 {
        self.hash_builder.hash_one(value)
    }

    /// Inserts an element, returning `true` if it was not already present.
    ///
    /// When an equal element is already stored, the stored element is
    /// dropped and the incoming one takes its place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashSet;
    ///
    /// let mut set: HashSet<u32> = HashSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_value(&value);
        self.table.replace(hash, |a, b| a == b, value, ())
    }

    /// Inserts an element and returns the displaced equal element, if any.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_value(&value);
        let old = self
            .table
            .steal(hash, |stored| stored == &value)
            .map(|(v, ())| v);
        self.table.insert(hash, |a, b| a == b, value, ());
        old
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_value(value);
        self.table.contains(hash, |stored| stored == value)
    }

    /// Returns a reference to the stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_value(value);
        self.table
            .lookup(hash, |stored| stored == value)
            .map(|(v, _)| v)
    }

    /// Removes the element equal to `value`, dropping it. Returns `true` if
    /// an element was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_value(value);
        self.table.remove(hash, |stored| stored == value)
    }

    /// Removes the element equal to `value` and returns it to the caller
    /// instead of dropping it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashSet;
    ///
    /// let mut set: HashSet<String> = HashSet::new();
    /// set.insert("a".to_string());
    /// assert_eq!(set.take(&"a".to_string()), Some("a".to_string()));
    /// assert!(set.is_empty());
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_value(value);
        self.table
            .steal(hash, |stored| stored == value)
            .map(|(v, ())| v)
    }

    /// Keeps only the elements for which `keep` returns `true`, dropping
    /// the rest. Returns the number of elements removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        self.table.retain(|v, _| keep(v))
    }

    /// An iterator that removes and yields the elements matching `pred`,
    /// transferring ownership to the caller. Dropping the iterator finishes
    /// the sweep.
    pub fn extract_if<'a, F>(&'a mut self, mut pred: F) -> ExtractIf<'a, T>
    where
        F: FnMut(&T) -> bool + 'a,
    {
        let adapter: Box<dyn FnMut(&T, &mut ()) -> bool + 'a> =
            Box::new(move |v: &T, _: &mut ()| pred(v));
        ExtractIf {
            inner: self.table.extract_if(adapter),
        }
    }

    /// An iterator over the elements in slot order.
    ///
    /// Slot order is an implementation artifact; do not depend on it.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.keys(),
        }
    }

    /// A draining iterator that empties the set, yielding owned elements.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns `true` if the two sets share no elements.
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        self.iter().all(|v| !other.contains(v))
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// An iterator over the elements of `self` and `other`, without
    /// duplicates.
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            self_set: self,
        }
    }

    /// An iterator over the elements present in both sets.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        Intersection {
            iter: self.iter(),
            other,
        }
    }

    /// An iterator over the elements of `self` that are not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// An iterator over the elements present in exactly one of the sets.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set using the default hash builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tri_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty set pre-sized for `capacity` elements, using the
    /// default hash builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the elements of a `HashSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A draining iterator over the elements of a `HashSet`.
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T, ()>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, ())| v)
    }
}

/// An owning iterator over the elements of a `HashSet`.
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, ())| v)
    }
}

/// An iterator that removes and yields matching elements from a `HashSet`.
pub struct ExtractIf<'a, T> {
    #[allow(clippy::type_complexity)]
    inner: crate::hash_table::ExtractIf<'a, T, (), Box<dyn FnMut(&T, &mut ()) -> bool + 'a>>,
}

impl<T> Iterator for ExtractIf<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, ())| v)
    }
}

impl<T, S> IntoIterator for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    self_set: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.self_set.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use core::hash::Hash;
    use core::hash::Hasher;

    use super::*;

    /// A set element whose equality and hash cover only `text`; `tag`
    /// distinguishes instances and `drops` counts teardowns.
    struct Item {
        text: String,
        tag: u8,
        drops: Rc<Cell<usize>>,
    }

    impl Item {
        fn new(text: &str, tag: u8, drops: &Rc<Cell<usize>>) -> Self {
            Self {
                text: text.to_string(),
                tag,
                drops: Rc::clone(drops),
            }
        }
    }

    impl Hash for Item {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.text.hash(state);
        }
    }

    impl PartialEq for Item {
        fn eq(&self, other: &Self) -> bool {
            self.text == other.text
        }
    }

    impl Eq for Item {}

    impl Drop for Item {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn insert_is_idempotent_on_size() {
        let mut set: HashSet<u32> = HashSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&1));
    }

    #[test]
    fn insert_adopts_the_new_element() {
        let drops = Rc::new(Cell::new(0));
        let mut set: HashSet<Item> = HashSet::new();
        assert!(set.insert(Item::new("a", 1, &drops)));
        // Equal element: the stored one is dropped, the new one stays.
        assert!(!set.insert(Item::new("a", 2, &drops)));
        assert_eq!(drops.get(), 1);
        let scratch = Rc::new(Cell::new(0));
        let stored = set.get(&Item::new("a", 0, &scratch)).unwrap();
        assert_eq!(stored.tag, 2);
    }

    #[test]
    fn replace_returns_the_displaced_element() {
        let drops = Rc::new(Cell::new(0));
        let mut set: HashSet<Item> = HashSet::new();
        set.insert(Item::new("a", 1, &drops));
        let old = set.replace(Item::new("a", 2, &drops));
        assert_eq!(old.map(|v| v.tag), Some(1));
        assert_eq!(set.len(), 1);
        assert!(set.replace(Item::new("b", 3, &drops)).is_none());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn take_transfers_ownership_without_drops() {
        let drops = Rc::new(Cell::new(0));
        let scratch = Rc::new(Cell::new(0));
        let mut set: HashSet<Item> = HashSet::new();
        set.insert(Item::new("a", 1, &drops));

        let taken = set.take(&Item::new("a", 0, &scratch));
        assert!(taken.is_some());
        assert!(set.is_empty());
        assert_eq!(drops.get(), 0, "the taken element was not dropped");
        drop(taken);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn remove_and_contains() {
        let mut set: HashSet<u32> = HashSet::new();
        for v in 0..100 {
            set.insert(v);
        }
        for v in (0..100).step_by(2) {
            assert!(set.remove(&v));
        }
        assert_eq!(set.len(), 50);
        for v in 0..100 {
            assert_eq!(set.contains(&v), v % 2 == 1);
        }
        assert!(!set.remove(&2));
    }

    #[test]
    fn iteration_covers_the_whole_set() {
        let mut set: HashSet<u32> = HashSet::new();
        for v in 0..500 {
            set.insert(v);
        }
        let mut seen: Vec<u32> = set.iter().copied().collect();
        seen.sort_unstable();
        let expected: Vec<u32> = (0..500).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn union_intersection_difference() {
        let a: HashSet<u32> = (0..10).collect();
        let b: HashSet<u32> = (5..15).collect();

        let mut union: Vec<u32> = a.union(&b).copied().collect();
        union.sort_unstable();
        assert_eq!(union, (0..15).collect::<Vec<_>>());

        let mut intersection: Vec<u32> = a.intersection(&b).copied().collect();
        intersection.sort_unstable();
        assert_eq!(intersection, (5..10).collect::<Vec<_>>());

        let mut difference: Vec<u32> = a.difference(&b).copied().collect();
        difference.sort_unstable();
        assert_eq!(difference, (0..5).collect::<Vec<_>>());

        let mut symmetric: Vec<u32> = a.symmetric_difference(&b).copied().collect();
        symmetric.sort_unstable();
        assert_eq!(symmetric, (0..5).chain(10..15).collect::<Vec<_>>());
    }

    #[test]
    fn subset_superset_disjoint() {
        let small: HashSet<u32> = (0..5).collect();
        let big: HashSet<u32> = (0..10).collect();
        let other: HashSet<u32> = (20..25).collect();

        assert!(small.is_subset(&big));
        assert!(big.is_superset(&small));
        assert!(!big.is_subset(&small));
        assert!(small.is_disjoint(&other));
        assert!(!small.is_disjoint(&big));
    }

    #[test]
    fn retain_reports_removed_count() {
        let mut set: HashSet<u32> = (0..100).collect();
        let removed = set.retain(|&v| v % 3 == 0);
        let expected_kept = (0..100).filter(|v| v % 3 == 0).count();
        assert_eq!(removed, 100 - expected_kept);
        assert_eq!(set.len(), expected_kept);
    }

    #[test]
    fn extract_if_matching_elements() {
        let mut set: HashSet<u32> = (0..100).collect();
        let mut extracted: Vec<u32> = set.extract_if(|&v| v % 2 == 0).collect();
        extracted.sort_unstable();
        assert_eq!(extracted, (0..100).step_by(2).collect::<Vec<_>>());
        assert_eq!(set.len(), 50);
    }

    #[test]
    fn extract_if_finishes_its_sweep_on_drop() {
        let mut set: HashSet<u32> = (0..100).collect();
        {
            let mut it = set.extract_if(|&v| v % 2 == 0);
            let _ = it.next();
        }
        assert_eq!(set.len(), 50, "remaining matches were removed on drop");
        for v in 0..100 {
            assert_eq!(set.contains(&v), v % 2 == 1);
        }
    }

    #[test]
    fn drain_empties_the_set() {
        let mut set: HashSet<u32> = (0..50).collect();
        let mut drained: Vec<u32> = set.drain().collect();
        drained.sort_unstable();
        assert_eq!(drained, (0..50).collect::<Vec<_>>());
        assert!(set.is_empty());
    }

    #[test]
    fn into_iter_yields_owned_elements() {
        let set: HashSet<String> = (0..10).map(|v| v.to_string()).collect();
        let mut values: Vec<String> = set.into_iter().collect();
        values.sort_unstable();
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], "0");
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: HashSet<u32> = (0..50).collect();
        let b: HashSet<u32> = (0..50).rev().collect();
        assert_eq!(a, b);
        let c: HashSet<u32> = (0..51).collect();
        assert_ne!(a, c);
    }

    #[test]
    fn clear_drops_all_elements() {
        let drops = Rc::new(Cell::new(0));
        let mut set: HashSet<Item> = HashSet::new();
        for i in 0..20 {
            set.insert(Item::new(&i.to_string(), 0, &drops));
        }
        set.clear();
        assert_eq!(drops.get(), 20);
        assert!(set.is_empty());
    }

    #[test]
    fn new_like_copies_the_hasher_and_starts_empty() {
        let mut set: HashSet<u32> = HashSet::new();
        set.insert(1);
        let fresh = set.new_like();
        assert!(fresh.is_empty());
    }
}
