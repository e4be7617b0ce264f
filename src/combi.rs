use std::{collections::HashSet, hash::Hash};

use itertools::Itertools;

use crate::itemset::Itemset;

/// Every item appearing in any of the given itemsets, sorted.
pub fn build_join_set<'a, T, I>(itemsets: I) -> Vec<T>
where
    T: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a Itemset<T>>,
{
    itemsets
        .into_iter()
        .flat_map(|itemset| itemset.iter().cloned())
        .sorted()
        .dedup()
        .collect()
}

/// All `size`-item combinations of the join set.
pub fn k_candidate_itemsets<T>(join_set: &[T], size: usize) -> impl Iterator<Item = Itemset<T>> + '_
where
    T: Ord + Clone,
{
    join_set
        .iter()
        .cloned()
        .combinations(size)
        .map(Itemset::from)
}

/// Apriori property: a candidate with any (k-1)-subset outside the previous
/// frequent level cannot be frequent.
pub fn has_infrequent_subset<T>(candidate: &Itemset<T>, previous_level: &HashSet<Itemset<T>>) -> bool
where
    T: Ord + Hash + Clone,
{
    if candidate.len() < 2 {
        return false;
    }
    candidate
        .subsets(candidate.len() - 1)
        .any(|subset| !previous_level.contains(&subset))
}
