use std::collections::{HashMap, HashSet};

use crate::itemset::Itemset;

pub type BasketId = usize;
pub type ItemsetLength = usize;

pub type BasketIds = HashSet<BasketId>;

/// Singleton itemset -> identifiers of the baskets containing that item.
pub type ItemIndex<T> = HashMap<Itemset<T>, BasketIds>;

pub type LevelItemsets<T> = HashSet<Itemset<T>>;
pub type FrequentItemsets<T> = HashMap<ItemsetLength, LevelItemsets<T>>;
