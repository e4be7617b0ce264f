//! Basket collection
//!
//! Owns the baskets, keeps the inverted index from item to basket
//! identifiers and memoises the frequent itemsets of each level.
//!
//! All mutation goes through `&mut self`; there is no internal locking.
//! Wrap the collection in a `Mutex` to share it between threads.

use std::{
    collections::{BTreeMap, HashSet},
    hash::Hash,
};

use log::debug;

use crate::{
    basket::Basket,
    config::Thresholds,
    error::{AprioriError, Result},
    itemset::Itemset,
    types::{BasketId, BasketIds, FrequentItemsets, ItemIndex, ItemsetLength, LevelItemsets},
};

#[derive(Debug, Clone)]
pub struct BasketCollection<T = String>
where
    T: Ord + Hash,
{
    pub(crate) baskets: BTreeMap<BasketId, Basket<T>>,
    pub(crate) item_index: ItemIndex<T>,
    pub(crate) frequent_itemsets: FrequentItemsets<T>,
    pub(crate) thresholds: Thresholds,
    no_itemsets: LevelItemsets<T>,
}

impl<T> Default for BasketCollection<T>
where
    T: Ord + Hash + Clone,
{
    fn default() -> Self {
        BasketCollection::new()
    }
}

impl<T> BasketCollection<T>
where
    T: Ord + Hash + Clone,
{
    pub fn new() -> Self {
        BasketCollection {
            baskets: BTreeMap::new(),
            item_index: ItemIndex::new(),
            frequent_itemsets: FrequentItemsets::new(),
            thresholds: Thresholds::default(),
            no_itemsets: LevelItemsets::new(),
        }
    }

    /// Admit every basket in order, assigning identifiers 1, 2, ...
    pub fn from_baskets(baskets: impl IntoIterator<Item = Basket<T>>) -> Self {
        let mut collection = BasketCollection::new();
        collection.extend(baskets);
        collection
    }

    /// Set both thresholds. Nothing changes if either value is out of range.
    pub fn configure(&mut self, minimum_support: f64, minimum_confidence: f64) -> Result<()> {
        self.thresholds = Thresholds::new(minimum_support, Some(minimum_confidence))?;
        self.frequent_itemsets.clear();
        Ok(())
    }

    pub fn set_minimum_support(&mut self, minimum_support: f64) -> Result<()> {
        self.thresholds.set_minimum_support(minimum_support)?;
        self.frequent_itemsets.clear();
        Ok(())
    }

    pub fn minimum_support(&self) -> Option<f64> {
        self.thresholds.minimum_support()
    }

    pub fn minimum_confidence(&self) -> Option<f64> {
        self.thresholds.minimum_confidence()
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Identifier the next admitted basket will receive.
    pub fn next_identifier(&self) -> BasketId {
        self.baskets
            .keys()
            .next_back()
            .map_or(1, |&last| last + 1)
    }

    /// Admit a basket: assign it the next identifier and index its items.
    pub fn add_basket(&mut self, mut basket: Basket<T>) -> BasketId {
        let identifier = self.next_identifier();
        basket.admit(identifier);

        for item in basket.items() {
            self.item_index
                .entry(item.clone())
                .or_default()
                .insert(identifier);
        }
        debug!("Added basket {} with {} items", identifier, basket.len());

        self.baskets.insert(identifier, basket);
        self.frequent_itemsets.clear();
        identifier
    }

    /// Remove a basket and purge it from the index, handing it back detached.
    pub fn remove_basket(&mut self, identifier: BasketId) -> Result<Basket<T>> {
        let mut basket = self
            .baskets
            .remove(&identifier)
            .ok_or(AprioriError::NotFound(identifier))?;

        for item in basket.items() {
            if let Some(ids) = self.item_index.get_mut(item) {
                ids.remove(&identifier);
                if ids.is_empty() {
                    self.item_index.remove(item);
                }
            }
        }
        debug!("Removed basket {}", identifier);

        basket.detach();
        self.frequent_itemsets.clear();
        Ok(basket)
    }

    /// Consume `self` and `other`, re-admitting every basket of `other` with
    /// fresh identifiers after those already present.
    pub fn merge(mut self, other: impl IntoIterator<Item = Basket<T>>) -> Self {
        self.extend(other);
        self
    }

    /// Identifiers of the baskets containing every one of `items`.
    ///
    /// An item that no basket contains yields an empty result.
    pub fn lookup_baskets_by_items<'a, I>(&self, items: I) -> Result<BasketIds>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut postings: Vec<&BasketIds> = Vec::new();
        for item in items {
            match self.item_index.get(&Itemset::singleton(item.clone())) {
                Some(ids) => postings.push(ids),
                None => return Ok(BasketIds::new()),
            }
        }
        if postings.is_empty() {
            return Err(AprioriError::InvalidArgument(
                "cannot look up baskets for an empty item list".to_string(),
            ));
        }

        // intersect starting from the shortest posting list
        postings.sort_by_key(|ids| ids.len());
        let (shortest, rest) = postings.split_at(1);
        let intersection = shortest
            .iter()
            .flat_map(|ids| ids.iter())
            .filter(|id| rest.iter().all(|ids| ids.contains(*id)))
            .copied()
            .collect();

        Ok(intersection)
    }

    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    pub fn get(&self, identifier: BasketId) -> Option<&Basket<T>> {
        self.baskets.get(&identifier)
    }

    pub fn baskets(&self) -> impl Iterator<Item = (BasketId, &Basket<T>)> {
        self.baskets.iter().map(|(&id, basket)| (id, basket))
    }

    pub fn item_index(&self) -> &ItemIndex<T> {
        &self.item_index
    }

    /// Every level mined so far.
    pub fn frequent_itemsets(&self) -> &FrequentItemsets<T> {
        &self.frequent_itemsets
    }

    /// A mined level, or the empty set for any level above the first empty one.
    pub fn frequent_itemsets_at(&self, level: ItemsetLength) -> Option<&LevelItemsets<T>> {
        if let Some(itemsets) = self.frequent_itemsets.get(&level) {
            return Some(itemsets);
        }
        let exhausted = self
            .frequent_itemsets
            .iter()
            .any(|(&mined, itemsets)| mined < level && itemsets.is_empty());
        exhausted.then_some(&self.no_itemsets)
    }

    /// Distinct items currently indexed.
    pub fn items(&self) -> HashSet<&T> {
        self.item_index.keys().flat_map(|itemset| itemset.iter()).collect()
    }
}

impl<T> Extend<Basket<T>> for BasketCollection<T>
where
    T: Ord + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = Basket<T>>>(&mut self, iter: I) {
        for basket in iter {
            self.add_basket(basket);
        }
    }
}

impl<T> FromIterator<Basket<T>> for BasketCollection<T>
where
    T: Ord + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = Basket<T>>>(iter: I) -> Self {
        BasketCollection::from_baskets(iter)
    }
}

/// Yields the baskets in identifier order, detached from the collection.
impl<T> IntoIterator for BasketCollection<T>
where
    T: Ord + Hash + Clone,
{
    type Item = Basket<T>;
    type IntoIter = std::iter::Map<
        std::collections::btree_map::IntoValues<BasketId, Basket<T>>,
        fn(Basket<T>) -> Basket<T>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn detached<T: Ord + Hash + Clone>(mut basket: Basket<T>) -> Basket<T> {
            basket.detach();
            basket
        }
        self.baskets
            .into_values()
            .map(detached as fn(Basket<T>) -> Basket<T>)
    }
}

#[cfg(test)]
mod tests {
    use maplit::{hashmap, hashset};
    use testresult::TestResult;

    use super::*;

    fn collection() -> BasketCollection<&'static str> {
        BasketCollection::from_baskets(vec![
            Basket::new(vec!["milk", "sugar", "bread"]),
            Basket::new(vec!["milk", "corn"]),
            Basket::new(vec!["milk", "sugar", "corn"]),
        ])
    }

    #[test]
    fn identifiers_start_at_one() {
        let collection = collection();

        assert_eq!(collection.len(), 3);
        assert_eq!(
            collection.baskets().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(collection.get(2).and_then(Basket::identifier), Some(2));
        assert_eq!(collection.next_identifier(), 4);
    }

    #[test]
    fn index_tracks_membership() {
        let collection = collection();

        assert_eq!(
            collection.item_index(),
            &hashmap! {
                Itemset::singleton("milk") => hashset! {1, 2, 3},
                Itemset::singleton("sugar") => hashset! {1, 3},
                Itemset::singleton("bread") => hashset! {1},
                Itemset::singleton("corn") => hashset! {2, 3},
            }
        );
    }

    #[test]
    fn remove_purges_index() -> TestResult {
        let mut collection = collection();

        let removed = collection.remove_basket(1)?;

        assert_eq!(removed.identifier(), None);
        assert_eq!(collection.len(), 2);
        assert!(collection
            .item_index()
            .values()
            .all(|ids| !ids.contains(&1)));
        assert!(!collection
            .item_index()
            .contains_key(&Itemset::singleton("bread")));
        Ok(())
    }

    #[test]
    fn remove_unknown_basket_fails() {
        let mut collection = collection();

        assert!(matches!(
            collection.remove_basket(42),
            Err(AprioriError::NotFound(42))
        ));
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn remove_twice_fails() -> TestResult {
        let mut collection = collection();

        collection.remove_basket(2)?;

        assert!(matches!(
            collection.remove_basket(2),
            Err(AprioriError::NotFound(2))
        ));
        Ok(())
    }

    #[test]
    fn add_then_remove_restores_state() -> TestResult {
        let mut collection = collection();
        let index_before = collection.item_index().clone();
        let ids_before: Vec<_> = collection.baskets().map(|(id, _)| id).collect();

        let id = collection.add_basket(Basket::new(vec!["beef", "milk"]));
        collection.remove_basket(id)?;

        assert_eq!(collection.item_index(), &index_before);
        assert_eq!(
            collection.baskets().map(|(id, _)| id).collect::<Vec<_>>(),
            ids_before
        );
        Ok(())
    }

    #[test]
    fn identifiers_follow_the_maximum() -> TestResult {
        let mut collection = collection();

        collection.remove_basket(2)?;
        assert_eq!(collection.add_basket(Basket::new(vec!["egg"])), 4);

        collection.remove_basket(4)?;
        collection.remove_basket(3)?;
        collection.remove_basket(1)?;
        assert!(collection.is_empty());
        assert_eq!(collection.add_basket(Basket::new(vec!["egg"])), 1);
        Ok(())
    }

    #[test]
    fn lookup_intersects_postings() -> TestResult {
        let collection = collection();

        assert_eq!(
            collection.lookup_baskets_by_items(&["milk", "sugar"])?,
            hashset! {1, 3}
        );
        assert_eq!(
            collection.lookup_baskets_by_items(&["sugar", "corn"])?,
            hashset! {3}
        );
        assert_eq!(collection.lookup_baskets_by_items(&["milk"])?, hashset! {1, 2, 3});
        Ok(())
    }

    #[test]
    fn lookup_unindexed_item_is_empty() -> TestResult {
        let collection = collection();

        assert!(collection
            .lookup_baskets_by_items(&["milk", "caviar"])?
            .is_empty());
        Ok(())
    }

    #[test]
    fn lookup_empty_query_fails() {
        let collection = collection();
        let items: [&str; 0] = [];

        assert!(matches!(
            collection.lookup_baskets_by_items(&items),
            Err(AprioriError::InvalidArgument(_))
        ));
    }

    #[test]
    fn merge_collections_renumbers() {
        let left = collection();
        let right = BasketCollection::from_baskets(vec![
            Basket::named(vec!["egg"], "right-1"),
            Basket::named(vec!["beef", "egg"], "right-2"),
        ]);

        let merged = left.merge(right);

        assert_eq!(merged.len(), 5);
        assert_eq!(merged.get(4).and_then(Basket::name), Some("right-1"));
        assert_eq!(merged.get(5).and_then(Basket::identifier), Some(5));
        assert_eq!(
            merged.item_index()[&Itemset::singleton("egg")],
            hashset! {4, 5}
        );
    }

    #[test]
    fn merge_single_basket() {
        let merged = collection().merge(Some(Basket::new(vec!["fish"])));

        assert_eq!(merged.len(), 4);
        assert_eq!(
            merged.lookup_baskets_by_items(&["fish"]).ok(),
            Some(hashset! {4})
        );
    }

    #[test]
    fn into_iter_detaches() {
        let baskets: Vec<_> = collection().into_iter().collect();

        assert_eq!(baskets.len(), 3);
        assert!(baskets.iter().all(|basket| basket.identifier().is_none()));
    }

    #[test]
    fn configure_validates() {
        let mut collection = collection();

        assert!(collection.configure(0.0, 0.5).is_err());
        assert_eq!(collection.minimum_support(), None);

        assert!(collection.configure(0.4, 0.7).is_ok());
        assert_eq!(collection.minimum_support(), Some(0.4));
        assert_eq!(collection.minimum_confidence(), Some(0.7));
    }

    #[test]
    fn remove_clears_mined_levels() -> TestResult {
        let mut collection = collection();
        collection.set_minimum_support(0.5)?;
        collection.build_frequent_itemsets(2)?;
        assert!(!collection.frequent_itemsets().is_empty());

        collection.remove_basket(1)?;

        assert!(collection.frequent_itemsets().is_empty());
        // bread is gone, sugar is in 1 of 2 baskets
        assert_eq!(
            collection.build_frequent_itemsets(1)?,
            &hashset! {
                Itemset::singleton("milk"),
                Itemset::singleton("sugar"),
                Itemset::singleton("corn"),
            }
        );
        Ok(())
    }

    #[test]
    fn configure_clears_mined_levels() -> TestResult {
        let mut collection = collection();
        collection.set_minimum_support(0.5)?;
        collection.build_frequent_itemsets(2)?;

        collection.configure(1.0, 0.5)?;
        assert!(collection.frequent_itemsets().is_empty());
        assert_eq!(
            collection.build_frequent_itemsets(1)?,
            &hashset! { Itemset::singleton("milk") }
        );

        collection.set_minimum_support(0.3)?;
        assert!(collection.frequent_itemsets().is_empty());
        Ok(())
    }

    #[test]
    fn failed_configure_keeps_mined_levels() -> TestResult {
        let mut collection = collection();
        collection.set_minimum_support(0.5)?;
        collection.build_frequent_itemsets(1)?;

        assert!(collection.configure(2.0, 0.5).is_err());
        assert_eq!(collection.frequent_itemsets().len(), 1);
        Ok(())
    }

    #[test]
    fn distinct_items() {
        let collection = collection();

        assert_eq!(
            collection.items(),
            hashset! {&"milk", &"sugar", &"bread", &"corn"}
        );
    }
}
