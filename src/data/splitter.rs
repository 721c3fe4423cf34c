// ============================================================
// Layer 4 — Seeded Holdout Splitters
// ============================================================
// Two ways to cut a collection into (kept, holdout):
//
//   split_holdout            — plain random split
//   split_holdout_stratified — random split that keeps the
//                              share of each label roughly the
//                              same on both sides
//
// Sizing rule (both splitters):
//   holdout = ceil(holdout_fraction * n)
//   kept    = n - holdout
//
// The ceiling matters: with 2919 normal records and a holdout
// fraction of 0.05 the holdout side gets 146 rows, not 145.
//
// Every call builds its own RNG from `seed`, so one split never
// shifts the random stream of another. Same input + same seed
// always gives the same output.
//
// Stratified allocation:
//   For each label c with count n_c the kept side should get
//   n_c * kept / n rows. Those targets are floored and the rows
//   still missing are handed out to the labels with the largest
//   fractional remainders (ties broken at random). Everything
//   that is not kept goes to the holdout side, so no row is ever
//   lost or duplicated.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::BTreeMap;

/// Number of rows that go to the holdout side for a given fraction.
///
/// Fails unless the fraction lies strictly between 0 and 1 and both
/// sides end up non-empty.
pub fn holdout_size(n: usize, holdout_fraction: f64) -> Result<usize> {
    if !(holdout_fraction > 0.0 && holdout_fraction < 1.0) {
        bail!(
            "holdout fraction must be strictly between 0 and 1, got {}",
            holdout_fraction
        );
    }

    let holdout = (holdout_fraction * n as f64).ceil() as usize;
    let kept    = n.saturating_sub(holdout);

    if holdout == 0 || kept == 0 {
        bail!(
            "splitting {} rows with holdout fraction {} leaves an empty side \
             ({} kept, {} holdout)",
            n,
            holdout_fraction,
            kept,
            holdout
        );
    }

    Ok(holdout)
}

/// Randomly shuffle `items` and split them into (kept, holdout).
///
/// # Arguments
/// * `items`            - All rows (consumed by this function)
/// * `holdout_fraction` - Share of rows for the holdout side, e.g. 0.05
/// * `seed`             - RNG seed
pub fn split_holdout<T>(
    mut items:        Vec<T>,
    holdout_fraction: f64,
    seed:             u64,
) -> Result<(Vec<T>, Vec<T>)> {
    let total   = items.len();
    let holdout = holdout_size(total, holdout_fraction)?;

    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    // After this: items = [0..kept], rest = [kept..total]
    let rest = items.split_off(total - holdout);

    tracing::debug!(
        "Holdout split: {} kept, {} holdout (fraction {:.4})",
        items.len(),
        rest.len(),
        holdout_fraction,
    );

    Ok((items, rest))
}

/// Randomly split `items` into (kept, holdout), preserving the relative
/// frequency of each label (as returned by `label_of`) on both sides.
pub fn split_holdout_stratified<T, F>(
    items:            Vec<T>,
    holdout_fraction: f64,
    seed:             u64,
    label_of:         F,
) -> Result<(Vec<T>, Vec<T>)>
where
    F: Fn(&T) -> i64,
{
    let total   = items.len();
    let holdout = holdout_size(total, holdout_fraction)?;
    let kept    = total - holdout;

    let mut rng = StdRng::seed_from_u64(seed);

    // Group rows by label. BTreeMap keeps labels sorted so the
    // allocation below is independent of input order.
    let mut groups: BTreeMap<i64, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(label_of(&item)).or_default().push(item);
    }

    let counts: Vec<usize> = groups.values().map(Vec::len).collect();
    let allocation = allocate_by_largest_remainder(&counts, kept, &mut rng);

    let mut kept_rows    = Vec::with_capacity(kept);
    let mut holdout_rows = Vec::with_capacity(holdout);

    for ((label, mut rows), take) in groups.into_iter().zip(allocation) {
        rows.shuffle(&mut rng);
        let rest = rows.split_off(take);

        tracing::debug!(
            "Stratum {}: {} kept, {} holdout",
            label,
            rows.len(),
            rest.len()
        );

        kept_rows.extend(rows);
        holdout_rows.extend(rest);
    }

    // Interleave the strata so neither side is grouped by label
    kept_rows.shuffle(&mut rng);
    holdout_rows.shuffle(&mut rng);

    Ok((kept_rows, holdout_rows))
}

/// Split `draws` across classes in proportion to `counts`.
///
/// Each class gets the floor of its proportional share; the leftover
/// draws go to the classes with the largest fractional remainders.
/// A class never gets more than its count.
fn allocate_by_largest_remainder(counts: &[usize], draws: usize, rng: &mut StdRng) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * draws as f64 / total as f64)
        .collect();

    let mut alloc: Vec<usize> = exact
        .iter()
        .zip(counts)
        .map(|(&e, &c)| (e.floor() as usize).min(c))
        .collect();

    let mut need = draws.saturating_sub(alloc.iter().sum());

    // Random order first, then a stable sort by remainder: equal
    // remainders keep their random relative order.
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.shuffle(rng);
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });

    for idx in order.into_iter().cycle().take(counts.len() * 2) {
        if need == 0 {
            break;
        }
        if alloc[idx] < counts[idx] {
            alloc[idx] += 1;
            need -= 1;
        }
    }

    alloc
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holdout_uses_ceiling() {
        // 0.05 * 2919 = 145.95 → 146
        assert_eq!(holdout_size(2919, 1.0 - 0.95).unwrap(), 146);
        assert_eq!(holdout_size(10, 0.5).unwrap(), 5);
    }

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize>  = (0..100).collect();
        let (kept, holdout)    = split_holdout(items, 0.2, 88).unwrap();
        assert_eq!(kept.len(),    80);
        assert_eq!(holdout.len(), 20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (kept, holdout)   = split_holdout(items, 0.3, 88).unwrap();

        let mut all: Vec<usize> = kept.into_iter().chain(holdout).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_holdout((0..40).collect::<Vec<u32>>(), 0.25, 88).unwrap();
        let b = split_holdout((0..40).collect::<Vec<u32>>(), 0.25, 88).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_fraction_outside_unit_interval() {
        assert!(split_holdout((0..10).collect::<Vec<u8>>(), 0.0, 88).is_err());
        assert!(split_holdout((0..10).collect::<Vec<u8>>(), 1.0, 88).is_err());
        assert!(split_holdout((0..10).collect::<Vec<u8>>(), 1.7, 88).is_err());
        assert!(split_holdout((0..10).collect::<Vec<u8>>(), f64::NAN, 88).is_err());
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let items: Vec<usize> = Vec::new();
        assert!(split_holdout(items, 0.5, 88).is_err());
    }

    #[test]
    fn test_empty_kept_side_is_rejected() {
        // ceil(0.95 * 3) = 3 → nothing left to keep
        assert!(split_holdout(vec![1, 2, 3], 0.95, 88).is_err());
    }

    #[test]
    fn test_stratified_preserves_label_shares() {
        // 60 of label 2, 30 of label 3, 10 of label 4
        let items: Vec<i64> = std::iter::repeat(2).take(60)
            .chain(std::iter::repeat(3).take(30))
            .chain(std::iter::repeat(4).take(10))
            .collect();

        let (kept, holdout) = split_holdout_stratified(items, 0.5, 88, |x| *x).unwrap();
        assert_eq!(kept.len(),    50);
        assert_eq!(holdout.len(), 50);

        let count = |v: &[i64], l: i64| v.iter().filter(|&&x| x == l).count();
        assert_eq!(count(&kept, 2), 30);
        assert_eq!(count(&kept, 3), 15);
        assert_eq!(count(&kept, 4), 5);
        assert_eq!(count(&holdout, 4), 5);
    }

    #[test]
    fn test_stratified_small_kept_side() {
        // Fewer kept rows than labels: some labels get nothing, none is lost
        let items: Vec<i64> = (0..40).map(|i| 2 + (i % 4)).collect();
        let (kept, holdout) = split_holdout_stratified(items, 0.95, 88, |x| *x).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.len() + holdout.len(), 40);
    }

    #[test]
    fn test_allocation_sums_to_draws() {
        let mut rng = StdRng::seed_from_u64(88);
        let counts  = [1767, 96, 194, 24];
        let alloc   = allocate_by_largest_remainder(&counts, 145, &mut rng);
        assert_eq!(alloc.iter().sum::<usize>(), 145);
        for (a, c) in alloc.iter().zip(counts) {
            assert!(*a <= c);
        }
    }
}
