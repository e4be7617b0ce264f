//! Apriori frequent itemset mining over a collection of baskets.
//!
//! ```
//! use apriori_baskets::{itemset, Basket, Itemset};
//!
//! let mut baskets = Basket::new(["milk", "sugar"].map(String::from))
//!     .merge(Basket::new(["milk", "corn"].map(String::from)));
//! baskets.set_minimum_support(0.5)?;
//!
//! let pairs = baskets.build_frequent_itemsets(2)?;
//! let milk_and_sugar: Itemset = itemset!["milk", "sugar"];
//! assert!(pairs.contains(&milk_and_sugar));
//! # Ok::<(), apriori_baskets::AprioriError>(())
//! ```

pub mod basket;
pub mod collection;
pub mod combi;
pub mod config;
pub mod error;
pub mod io;
pub mod itemset;
pub mod itemsets;
pub mod types;

pub use basket::Basket;
pub use collection::BasketCollection;
pub use config::Thresholds;
pub use error::{AprioriError, Result};
pub use itemset::Itemset;
pub use types::{BasketId, FrequentItemsets, ItemIndex, ItemsetLength, LevelItemsets};
