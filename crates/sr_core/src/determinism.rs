//! Determinism utilities: stable ordering without mutating shared data.
//!
//! This module is **I/O-free**. It provides:
//! - Stable sorts over borrowed views (the caller's sequence is never reordered)
//! - A total order for float weights (`NaN` never panics a comparison)
//! - First-seen de-duplication for identifier sequences

extern crate alloc;

use core::cmp::Ordering;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Borrow every element of `items` and sort the borrows with a **stable**
/// sort. Equal elements keep their input order; `items` itself is untouched.
#[inline]
pub fn sorted_refs_by<T, F>(items: &[T], mut cmp: F) -> Vec<&T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort_by(|a, b| cmp(a, b));
    refs
}

/// Descending comparison for float weights. Uses `total_cmp`, so the order is
/// total even for `NaN` inputs.
#[inline]
pub fn cmp_weight_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Descending comparison for counts.
#[inline]
pub fn cmp_count_desc(a: usize, b: usize) -> Ordering {
    b.cmp(&a)
}

/* -------------------------------------------------------------------------- */
/*                             First-seen ordering                            */
/* -------------------------------------------------------------------------- */

/// Drop repeated values, keeping the first occurrence of each, in input order.
pub fn first_seen<T, I>(items: I) -> Vec<T>
where
    T: Ord + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for it in items {
        if seen.insert(it.clone()) {
            out.push(it);
        }
    }
    out
}

/* ---------------------------------- Tests --------------------------------- */
