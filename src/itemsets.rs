//! Level-wise frequent itemset mining.

use std::hash::Hash;

use log::{debug, info, trace};

use crate::{
    collection::BasketCollection,
    combi::{build_join_set, has_infrequent_subset, k_candidate_itemsets},
    error::{AprioriError, Result},
    itemset::Itemset,
    types::{ItemsetLength, LevelItemsets},
};

impl<T> BasketCollection<T>
where
    T: Ord + Hash + Clone,
{
    /// Fraction of baskets containing every item of `itemset`.
    pub fn support(&self, itemset: &Itemset<T>) -> Result<f64> {
        let n = self.require_baskets()?;
        let count = self.lookup_baskets_by_items(itemset)?.len();
        Ok(count as f64 / n)
    }

    /// Frequent itemsets of size `level`.
    ///
    /// Missing lower levels are mined first, in increasing order. A level
    /// already mined is returned as is. Mining stops at the first empty
    /// level; every level above it is empty too.
    pub fn build_frequent_itemsets(&mut self, level: ItemsetLength) -> Result<&LevelItemsets<T>> {
        if level == 0 {
            return Err(AprioriError::InvalidArgument(
                "level must be at least 1".to_string(),
            ));
        }
        let min_support = self.thresholds.require_support()?;
        let n = self.require_baskets()?;

        for size in 1..=level {
            if self.frequent_itemsets.contains_key(&size) {
                continue;
            }
            let frequent = if size == 1 {
                self.frequent_1_itemsets(min_support, n)
            } else if self
                .frequent_itemsets
                .get(&(size - 1))
                .map_or(false, |previous| previous.is_empty())
            {
                // every level above an empty one is empty as well
                debug!("Level {} is empty, stopping at level {}", size - 1, size);
                break;
            } else {
                self.frequent_k_itemsets(size, min_support, n)?
            };
            info!("Level {}: {} frequent itemsets", size, frequent.len());
            self.frequent_itemsets.insert(size, frequent);
        }

        self.frequent_itemsets_at(level).ok_or_else(|| {
            AprioriError::InvalidArgument(format!("level {} was not built", level))
        })
    }

    fn require_baskets(&self) -> Result<f64> {
        if self.baskets.is_empty() {
            return Err(AprioriError::Configuration(
                "cannot compute support over zero baskets".to_string(),
            ));
        }
        Ok(self.baskets.len() as f64)
    }

    /// 1-itemsets are the keys of the item index.
    fn frequent_1_itemsets(&self, min_support: f64, n: f64) -> LevelItemsets<T> {
        debug!("Counting {} candidates of length 1", self.item_index.len());
        self.item_index
            .iter()
            .filter(|(_, ids)| ids.len() as f64 / n >= min_support)
            .map(|(itemset, _)| itemset.clone())
            .collect()
    }

    /// k-itemsets from the (k-1)-level, which must already be mined.
    fn frequent_k_itemsets(
        &self,
        size: ItemsetLength,
        min_support: f64,
        n: f64,
    ) -> Result<LevelItemsets<T>> {
        let previous = self.frequent_itemsets.get(&(size - 1)).ok_or_else(|| {
            AprioriError::InvalidArgument(format!("level {} was not built", size - 1))
        })?;

        let join_set = build_join_set(previous);
        debug!(
            "Joining {} items from {} itemsets of length {}",
            join_set.len(),
            previous.len(),
            size - 1
        );

        let mut frequent = LevelItemsets::new();
        if join_set.len() < size {
            return Ok(frequent);
        }
        let mut num_candidates = 0;
        for candidate in k_candidate_itemsets(&join_set, size) {
            num_candidates += 1;

            if has_infrequent_subset(&candidate, previous) {
                trace!("Pruning a candidate of length {}: infrequent subset", size);
                continue;
            }
            let count = self.lookup_baskets_by_items(&candidate)?.len();
            if count as f64 / n >= min_support {
                frequent.insert(candidate);
            } else {
                trace!("Pruning a candidate of length {}: support count {}", size, count);
            }
        }
        debug!("Checked {} candidates of length {}", num_candidates, size);

        Ok(frequent)
    }
}
