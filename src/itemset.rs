use std::{
    borrow::Borrow,
    fmt::{self, Debug, Display, Formatter},
};

use itertools::Itertools;

/// An unordered set of distinct items.
///
/// Items are kept sorted and deduplicated, so two itemsets built from the
/// same items in any order compare and hash equal. This is what lets an
/// itemset act as a map key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset<T = String> {
    items: Vec<T>,
}

impl<T: Ord> Itemset<T> {
    pub fn singleton(item: T) -> Self {
        Itemset { items: vec![item] }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items
            .binary_search_by(|probe| Borrow::<Q>::borrow(probe).cmp(item))
            .is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn is_subset(&self, other: &Itemset<T>) -> bool {
        self.items.iter().all(|item| other.contains(item))
    }
}

impl<T: Ord + Clone> Itemset<T> {
    /// All subsets of exactly `size` items.
    pub fn subsets(&self, size: usize) -> impl Iterator<Item = Itemset<T>> + '_ {
        // combinations of a sorted slice come out sorted
        self.items
            .iter()
            .cloned()
            .combinations(size)
            .map(|items| Itemset { items })
    }
}

impl<T: Ord> FromIterator<T> for Itemset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items: Vec<T> = iter.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Itemset { items }
    }
}

impl<T: Ord> From<Vec<T>> for Itemset<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T> IntoIterator for Itemset<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Itemset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Debug> Debug for Itemset<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T: Display> Display for Itemset<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.items.iter().join(", "))
    }
}

/// Builds an [`Itemset`] from a list of values convertible into the item type.
#[macro_export]
macro_rules! itemset {
    ($($x:expr),* $(,)?) => {
        {
            let items: ::std::vec::Vec<_> = ::std::vec![$($x.into()),*];
            $crate::Itemset::from(items)
        }
    };
}
