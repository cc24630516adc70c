//! Set operations over plain sequences.
//!
//! Missing values are ignored and every output value appears once.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use labelkit_foundation::Missing;

use crate::options::DuplicateMethod;

/// Values present in every sequence.
///
/// Output follows the first sequence, by first occurrence (or by last
/// occurrence with [`DuplicateMethod::Last`]).
pub fn intersect<T>(sequences: &[&[T]], duplicate_method: DuplicateMethod) -> Vec<T>
where
    T: Clone + Eq + Hash + Missing,
{
    let Some((first, rest)) = sequences.split_first() else {
        return Vec::new();
    };

    // Number of sequences holding each candidate, and the last one counted.
    let mut counts: HashMap<&T, (usize, usize)> = HashMap::new();
    for value in first.iter().filter(|v| !v.is_missing()) {
        counts.entry(value).or_insert((1, 0));
    }
    for (i, sequence) in rest.iter().enumerate() {
        let round = i + 1;
        for value in sequence.iter() {
            if let Some((count, last)) = counts.get_mut(value) {
                if *last < round {
                    *count += 1;
                    *last = round;
                }
            }
        }
    }

    let mut emitted: HashSet<&T> = HashSet::new();
    let mut out = Vec::new();
    let scan: Vec<&T> = if duplicate_method.keeps_first() {
        first.iter().collect()
    } else {
        first.iter().rev().collect()
    };
    for value in scan {
        let in_all = counts
            .get(value)
            .is_some_and(|&(count, _)| count == sequences.len());
        if in_all && emitted.insert(value) {
            out.push(value.clone());
        }
    }
    if !duplicate_method.keeps_first() {
        out.reverse();
    }
    out
}

/// Values present in any sequence, in order of first appearance.
pub fn union<T>(sequences: &[&[T]]) -> Vec<T>
where
    T: Clone + Eq + Hash + Missing,
{
    let mut seen: HashSet<&T> = HashSet::new();
    sequences
        .iter()
        .flat_map(|sequence| sequence.iter())
        .filter(|value| !value.is_missing() && seen.insert(*value))
        .cloned()
        .collect()
}
