//! Cart sorting
//!
//! Reorders cart lines by one product attribute using a caller-selected
//! algorithm and direction.
//!
//! ## Selectors
//!
//! | Selector | Values |
//! |----------|--------|
//! | [`SortKey`] | `price`, `weight` (numeric), `category` (lexicographic) |
//! | [`SortOrder`] | `ascending`, `descending` |
//! | [`SortAlgorithm`] | `exchange`, `insertion`, `partition`, `merge` |
//!
//! Selectors are closed enums. Unknown names are rejected when parsing with
//! [`SortError`]; once a selector is typed, sorting cannot fail.
//!
//! ## Algorithms
//!
//! | Algorithm | Complexity | Stable |
//! |-----------|------------|--------|
//! | exchange | O(n²) | yes |
//! | insertion | O(n²), O(n) when already ordered | yes |
//! | partition | O(n log n) average, O(n²) worst (middle pivot) | no |
//! | merge | O(n log n) | yes |

pub mod algorithms;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::cart::CartLineItem;
use super::product::Product;

#[derive(Debug, Error, PartialEq)]
pub enum SortError {
    #[error("Unknown sort key: '{0}' (expected price, weight or category)")]
    UnknownKey(String),

    #[error("Unknown sort algorithm: '{0}' (expected exchange, insertion, partition or merge)")]
    UnknownAlgorithm(String),

    #[error("Unknown sort order: '{0}' (expected ascending or descending)")]
    UnknownOrder(String),
}

/// Product attribute used as the comparison basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    Price,
    Weight,
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Price, SortKey::Weight, SortKey::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Weight => "weight",
            SortKey::Category => "category",
        }
    }

    /// Compares two products by this attribute, ascending
    ///
    /// Numeric values that cannot be ordered (NaN) compare equal, so no
    /// element is ever dropped or duplicated by the algorithms.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Price => compare_numbers(a.price, b.price),
            SortKey::Weight => compare_numbers(a.weight, b.weight),
            SortKey::Category => a.category.cmp(&b.category),
        }
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "weight" => Ok(SortKey::Weight),
            "category" => Ok(SortKey::Category),
            _ => Err(SortError::UnknownKey(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Maps a "descending" flag onto an order
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    /// Orients an ascending comparison result in this direction
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(SortError::UnknownOrder(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.as_str().to_string()
    }
}

/// Reordering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortAlgorithm {
    /// Bubble sort
    Exchange,
    Insertion,
    /// Three-way quicksort with a middle-index pivot
    Partition,
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 4] = [
        SortAlgorithm::Exchange,
        SortAlgorithm::Insertion,
        SortAlgorithm::Partition,
        SortAlgorithm::Merge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Exchange => "exchange",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Partition => "partition",
            SortAlgorithm::Merge => "merge",
        }
    }

    /// Returns true if equal keys keep their input order
    pub fn is_stable(&self) -> bool {
        !matches!(self, SortAlgorithm::Partition)
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exchange" | "bubble" => Ok(SortAlgorithm::Exchange),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "partition" | "quick" => Ok(SortAlgorithm::Partition),
            "merge" => Ok(SortAlgorithm::Merge),
            _ => Err(SortError::UnknownAlgorithm(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for SortAlgorithm {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortAlgorithm> for String {
    fn from(algorithm: SortAlgorithm) -> Self {
        algorithm.as_str().to_string()
    }
}

/// Sorts any sequence with the chosen algorithm and a direction-aware comparator
pub fn sort_by<T, F>(mut items: Vec<T>, algorithm: SortAlgorithm, cmp: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    match algorithm {
        SortAlgorithm::Exchange => {
            algorithms::exchange(&mut items, &cmp);
            items
        }
        SortAlgorithm::Insertion => {
            algorithms::insertion(&mut items, &cmp);
            items
        }
        SortAlgorithm::Partition => algorithms::partition(items, &cmp),
        SortAlgorithm::Merge => algorithms::merge(items, &cmp),
    }
}

/// Builds the comparator used to order cart lines
pub fn line_comparator(
    key: SortKey,
    order: SortOrder,
) -> impl Fn(&CartLineItem, &CartLineItem) -> Ordering {
    move |a: &CartLineItem, b: &CartLineItem| {
        order.apply(key.compare(&a.product.borrow(), &b.product.borrow()))
    }
}

/// Reorders cart lines by a product attribute
///
/// The result holds exactly the input handles with their quantities.
pub fn sort(
    items: Vec<CartLineItem>,
    key: SortKey,
    order: SortOrder,
    algorithm: SortAlgorithm,
) -> Vec<CartLineItem> {
    sort_by(items, algorithm, line_comparator(key, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use proptest::prelude::*;
    use std::rc::Rc;

    fn line(name: &str, category: &str, price: f64, weight: f64) -> CartLineItem {
        CartLineItem::new(Product::new(name, category, price, weight).into_shared(), 1)
    }

    fn prices(items: &[CartLineItem]) -> Vec<f64> {
        items.iter().map(|l| l.product.borrow().price).collect()
    }

    fn weights(items: &[CartLineItem]) -> Vec<f64> {
        items.iter().map(|l| l.product.borrow().weight).collect()
    }

    fn names(items: &[CartLineItem]) -> Vec<String> {
        items.iter().map(CartLineItem::name).collect()
    }

    #[test]
    fn parse_selectors() {
        assert_eq!("Price".parse::<SortKey>(), Ok(SortKey::Price));
        assert_eq!("bubble".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Exchange));
        assert_eq!("quick".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Partition));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Descending));
    }

    #[test]
    fn unknown_selectors_are_rejected() {
        assert_eq!(
            "colour".parse::<SortKey>(),
            Err(SortError::UnknownKey("colour".into()))
        );
        assert_eq!(
            "heap".parse::<SortAlgorithm>(),
            Err(SortError::UnknownAlgorithm("heap".into()))
        );
        assert_eq!(
            "sideways".parse::<SortOrder>(),
            Err(SortError::UnknownOrder("sideways".into()))
        );
    }

    #[test]
    fn selectors_round_trip_through_strings() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
        }
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<SortAlgorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn only_partition_is_unstable() {
        let unstable: Vec<_> = SortAlgorithm::ALL.iter().filter(|a| !a.is_stable()).collect();
        assert_eq!(unstable, vec![&SortAlgorithm::Partition]);
    }

    #[test]
    fn prices_ascending_with_every_algorithm() {
        for algorithm in SortAlgorithm::ALL {
            let items = vec![
                line("Laptop", "Electronics", 999.99, 1500.0),
                line("Phone", "Electronics", 699.99, 200.0),
                line("Headphones", "Electronics", 199.99, 300.0),
            ];

            let sorted = sort(items, SortKey::Price, SortOrder::Ascending, algorithm);

            assert_eq!(prices(&sorted), vec![199.99, 699.99, 999.99], "{}", algorithm);
        }
    }

    #[test]
    fn weights_descending_with_merge() {
        let items = vec![
            line("A", "X", 1.0, 1500.0),
            line("B", "X", 1.0, 200.0),
            line("C", "X", 1.0, 300.0),
            line("D", "X", 1.0, 500.0),
        ];

        let sorted = sort(items, SortKey::Weight, SortOrder::Descending, SortAlgorithm::Merge);

        assert_eq!(weights(&sorted), vec![1500.0, 500.0, 300.0, 200.0]);
    }

    #[test]
    fn categories_keep_equal_items_in_order() {
        for algorithm in [
            SortAlgorithm::Exchange,
            SortAlgorithm::Insertion,
            SortAlgorithm::Merge,
        ] {
            let items = vec![
                line("Laptop", "Электроника", 999.99, 1500.0),
                line("Novel", "Книги", 19.99, 500.0),
                line("Mouse", "Электроника", 49.99, 100.0),
            ];

            let sorted = sort(items, SortKey::Category, SortOrder::Ascending, algorithm);

            assert_eq!(names(&sorted), vec!["Novel", "Laptop", "Mouse"], "{}", algorithm);
        }
    }

    #[test]
    fn partition_groups_equal_prices() {
        let items = vec![
            line("A", "X", 5.0, 1.0),
            line("B", "X", 1.0, 1.0),
            line("C", "X", 5.0, 1.0),
            line("D", "X", 9.0, 1.0),
        ];

        let sorted = sort(items, SortKey::Price, SortOrder::Ascending, SortAlgorithm::Partition);

        assert_eq!(prices(&sorted), vec![1.0, 5.0, 5.0, 9.0]);
        let mut middle = names(&sorted[1..3]);
        middle.sort();
        assert_eq!(middle, vec!["A", "C"]);
    }

    #[test]
    fn sort_returns_the_same_handles() {
        let items = vec![line("A", "X", 3.0, 1.0), line("B", "X", 1.0, 1.0)];
        let originals: Vec<_> = items.iter().map(|l| Rc::clone(&l.product)).collect();

        let sorted = sort(items, SortKey::Price, SortOrder::Ascending, SortAlgorithm::Merge);

        assert!(Rc::ptr_eq(&sorted[0].product, &originals[1]));
        assert!(Rc::ptr_eq(&sorted[1].product, &originals[0]));
    }

    #[test]
    fn nan_price_is_kept() {
        let items = vec![
            line("A", "X", 3.0, 1.0),
            line("B", "X", f64::NAN, 1.0),
            line("C", "X", 1.0, 1.0),
        ];

        for algorithm in SortAlgorithm::ALL {
            let sorted = sort(items.clone(), SortKey::Price, SortOrder::Ascending, algorithm);
            assert_eq!(sorted.len(), 3, "{}", algorithm);
        }
    }

    #[test]
    fn empty_and_singleton() {
        for algorithm in SortAlgorithm::ALL {
            for key in SortKey::ALL {
                assert!(sort(Vec::new(), key, SortOrder::Descending, algorithm).is_empty());

                let single = vec![line("Only", "X", 1.0, 1.0)];
                let sorted = sort(single, key, SortOrder::Ascending, algorithm);
                assert_eq!(names(&sorted), vec!["Only"]);
            }
        }
    }

    // Items are (key, input position); the position identifies each element.
    fn sorted_positions(
        keys: &[u8],
        algorithm: SortAlgorithm,
        order: SortOrder,
    ) -> Vec<(u8, usize)> {
        let items: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
        sort_by(items, algorithm, |a, b| order.apply(a.0.cmp(&b.0)))
    }

    fn any_algorithm() -> impl Strategy<Value = SortAlgorithm> {
        prop::sample::select(SortAlgorithm::ALL.to_vec())
    }

    fn any_order() -> impl Strategy<Value = SortOrder> {
        prop::bool::ANY.prop_map(SortOrder::from_descending)
    }

    proptest! {
        #[test]
        fn output_is_a_permutation(
            keys in prop::collection::vec(0u8..8, 0..40),
            algorithm in any_algorithm(),
            order in any_order(),
        ) {
            let sorted = sorted_positions(&keys, algorithm, order);

            let mut positions: Vec<_> = sorted.iter().map(|(_, pos)| *pos).collect();
            positions.sort_unstable();
            prop_assert_eq!(positions, (0..keys.len()).collect::<Vec<_>>());
        }

        #[test]
        fn output_is_ordered(
            keys in prop::collection::vec(0u8..8, 0..40),
            algorithm in any_algorithm(),
            order in any_order(),
        ) {
            let sorted = sorted_positions(&keys, algorithm, order);

            for pair in sorted.windows(2) {
                prop_assert_ne!(order.apply(pair[0].0.cmp(&pair[1].0)), Ordering::Greater);
            }
        }

        #[test]
        fn stable_algorithms_keep_tie_order(
            keys in prop::collection::vec(0u8..4, 0..40),
            algorithm in prop::sample::select(vec![
                SortAlgorithm::Exchange,
                SortAlgorithm::Insertion,
                SortAlgorithm::Merge,
            ]),
            order in any_order(),
        ) {
            let sorted = sorted_positions(&keys, algorithm, order);

            for pair in sorted.windows(2) {
                if pair[0].0 == pair[1].0 {
                    prop_assert!(pair[0].1 < pair[1].1);
                }
            }
        }

        #[test]
        fn descending_reverses_ascending_for_distinct_keys(
            keys in prop::collection::hash_set(any::<u8>(), 0..40),
            algorithm in any_algorithm(),
        ) {
            let keys: Vec<u8> = keys.into_iter().collect();

            let ascending = sorted_positions(&keys, algorithm, SortOrder::Ascending);
            let mut descending = sorted_positions(&keys, algorithm, SortOrder::Descending);
            descending.reverse();

            prop_assert_eq!(ascending, descending);
        }
    }
}
