//! Basket
//!
//! A single transaction, held as the set of singleton itemsets of its items.

use std::{collections::HashSet, hash::Hash};

use crate::{collection::BasketCollection, itemset::Itemset, types::BasketId};

/// One transaction.
///
/// The identifier is `None` until the basket is admitted into a
/// [`BasketCollection`], and cleared again when it is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket<T = String>
where
    T: Ord + Hash,
{
    items: HashSet<Itemset<T>>,
    identifier: Option<BasketId>,
    name: Option<String>,
}

impl<T> Basket<T>
where
    T: Ord + Hash + Clone,
{
    /// Create an unnamed basket. Duplicate items collapse.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Basket {
            items: items.into_iter().map(Itemset::singleton).collect(),
            identifier: None,
            name: None,
        }
    }

    /// Create a basket carrying a label.
    pub fn named(items: impl IntoIterator<Item = T>, name: impl Into<String>) -> Self {
        Basket {
            name: Some(name.into()),
            ..Basket::new(items)
        }
    }

    /// Singleton itemsets, one per distinct item.
    pub fn items(&self) -> &HashSet<Itemset<T>> {
        &self.items
    }

    pub fn identifier(&self) -> Option<BasketId> {
        self.identifier
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(&Itemset::singleton(item.clone()))
    }

    /// Combine two baskets into a fresh collection; `self` gets the lower identifier.
    pub fn merge(self, other: Basket<T>) -> BasketCollection<T> {
        BasketCollection::from_baskets([self, other])
    }

    pub(crate) fn admit(&mut self, identifier: BasketId) {
        self.identifier = Some(identifier);
    }

    pub(crate) fn detach(&mut self) {
        self.identifier = None;
    }
}

impl<T> FromIterator<T> for Basket<T>
where
    T: Ord + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Basket::new(iter)
    }
}
