//! The four reordering strategies
//!
//! Each function takes a direction-aware comparator: `cmp(a, b) == Greater`
//! means `a` must come after `b` in the requested order. None of them applies
//! a secondary key; equal elements are handled as described per function.

use std::cmp::Ordering;

/// Exchange (bubble) sort, in place
///
/// Runs `n` passes of adjacent compare/swap, each one element shorter than
/// the last. Swaps only on a strict violation, so equal elements keep their
/// relative order. Always O(n²) comparisons.
pub fn exchange<T, F>(items: &mut [T], cmp: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n {
        for j in 0..n - pass - 1 {
            if cmp(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
            }
        }
    }
}

/// Insertion sort, in place
///
/// Grows a sorted prefix and moves each new element left while it is strictly
/// out of order with its predecessor. Stable; O(n) on already ordered input.
pub fn insertion<T, F>(items: &mut [T], cmp: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j], &items[j - 1]) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Partition sort (three-way quicksort)
///
/// The pivot is always the element at index `len / 2`. Elements are split
/// into before/equal/after buckets in their current order, the outer buckets
/// are sorted recursively, and the three are concatenated. Average
/// O(n log n), quadratic when the middle element is repeatedly an extreme.
/// Equal elements are grouped together but stability is not promised.
pub fn partition<T, F>(items: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let pivot = &items[items.len() / 2];
    let sides: Vec<Ordering> = items.iter().map(|item| cmp(item, pivot)).collect();

    let mut before = Vec::new();
    let mut equal = Vec::new();
    let mut after = Vec::new();
    for (item, side) in items.into_iter().zip(sides) {
        match side {
            Ordering::Less => before.push(item),
            Ordering::Equal => equal.push(item),
            Ordering::Greater => after.push(item),
        }
    }

    let mut sorted = partition(before, cmp);
    sorted.append(&mut equal);
    sorted.append(&mut partition(after, cmp));
    sorted
}

/// Merge sort
///
/// Splits at `len / 2` down to runs of one element, then merges pairs of
/// runs. On ties the left run wins, which makes the sort stable. O(n log n)
/// time, O(n) extra space.
pub fn merge<T, F>(mut items: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge(items, cmp);
    let right = merge(right, cmp);
    merge_runs(left, right, cmp)
}

fn merge_runs<T, F>(left: Vec<T>, right: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r) != Ordering::Greater,
            _ => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }

    merged.extend(left);
    merged.extend(right);
    merged
}
