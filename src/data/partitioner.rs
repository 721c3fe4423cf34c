// ============================================================
// Layer 4 — Partitioner
// ============================================================
// Turns the full list of records into the four output
// partitions.
//
//   records
//      ├── normal  (label == 1)
//      │     ├── train_n                  ← perc_tr_n of normal
//      │     └── rest
//      │           ├── val_n              ← perc_val_n of rest
//      │           └── test_n
//      └── anomaly (label != 1)
//            ├── val_a                    ← stratified on label
//            └── test_a
//
//   train = train_n
//   val   = val_n ++ val_a
//   val_p = val_n
//   test  = test_n ++ test_a
//
// How many anomalies go into validation?
//   perc_val_an is measured against the TRAINING set, not the
//   validation set:
//
//     n_anomaly_val / (|train_n| + n_anomaly_val) = perc_val_an
//     ⇒ n_anomaly_val = |train_n| * perc_val_an / (1 - perc_val_an)
//
//   Example: 95 training rows and perc_val_an = 0.05 gives
//   95 * 0.05 / 0.95 = 5 anomalous validation rows.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::splitter::{split_holdout, split_holdout_stratified};
use crate::domain::partition::{Partition, PartitionKind};
use crate::domain::record::Record;

/// The three caller-supplied percentages, each in (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatios {
    /// Share of normal records used for training
    pub perc_tr_n:   f64,
    /// Share of the remaining normal records used for validation
    pub perc_val_n:  f64,
    /// Anomalous validation share, relative to the training set size
    pub perc_val_an: f64,
}

impl SplitRatios {
    /// Reject any percentage outside the open interval (0, 1).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("perc_tr_n",   self.perc_tr_n),
            ("perc_val_n",  self.perc_val_n),
            ("perc_val_an", self.perc_val_an),
        ] {
            if !(value > 0.0 && value < 1.0) {
                bail!("{name} must be strictly between 0 and 1, got {value}");
            }
        }
        Ok(())
    }

    /// Number of anomalous rows validation should receive for a
    /// training set of `train_len` rows.
    pub fn anomaly_val_target(&self, train_len: usize) -> f64 {
        train_len as f64 * self.perc_val_an / (1.0 - self.perc_val_an)
    }
}

/// Sizes of every intermediate group, recorded in the run manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub normal:             usize,
    pub anomaly:            usize,
    pub train_n:            usize,
    pub val_n:              usize,
    pub test_n:             usize,
    pub val_a:              usize,
    pub test_a:             usize,
    /// Unrounded target for val_a
    pub anomaly_val_target: f64,
    /// Share of the anomaly group routed to validation
    pub anomaly_val_frac:   f64,
}

/// The four finished partitions plus bookkeeping.
#[derive(Debug, Clone)]
pub struct PartitionSet {
    pub train: Partition,
    pub val:   Partition,
    pub val_p: Partition,
    pub test:  Partition,
    pub stats: PartitionStats,
}

impl PartitionSet {
    pub fn get(&self, kind: PartitionKind) -> &Partition {
        match kind {
            PartitionKind::Train => &self.train,
            PartitionKind::Val   => &self.val,
            PartitionKind::ValP  => &self.val_p,
            PartitionKind::Test  => &self.test,
        }
    }

    /// Partitions in write order (train, val, val_p, test)
    pub fn iter(&self) -> impl Iterator<Item = &Partition> {
        PartitionKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

/// Splits records into train / val / val_p / test.
pub struct Partitioner {
    ratios: SplitRatios,
    seed:   u64,
}

impl Partitioner {
    pub fn new(ratios: SplitRatios, seed: u64) -> Self {
        Self { ratios, seed }
    }

    pub fn partition(&self, records: Vec<Record>) -> Result<PartitionSet> {
        self.ratios.validate()?;
        let r = &self.ratios;

        let signal_len = records.first().map(Record::len).unwrap_or(0);

        // ── Step 1: normal vs anomalous ───────────────────────────────────────
        let (normal, anomaly): (Vec<Record>, Vec<Record>) =
            records.into_iter().partition(Record::is_normal);
        tracing::info!("{} normal, {} anomalous records", normal.len(), anomaly.len());

        let n_normal  = normal.len();
        let n_anomaly = anomaly.len();

        // ── Step 2: normal → train / val / test ───────────────────────────────
        let (train_n, rest)   = split_holdout(normal, 1.0 - r.perc_tr_n, self.seed)?;
        let (val_n, test_n)   = split_holdout(rest, 1.0 - r.perc_val_n, self.seed)?;

        // ── Step 3: how many anomalies validation should get ──────────────────
        let target = r.anomaly_val_target(train_n.len());
        let frac   = target / n_anomaly as f64;
        tracing::debug!(
            "Anomaly target for validation: {:.3} rows ({:.4} of {})",
            target,
            frac,
            n_anomaly
        );

        if !(frac.is_finite() && frac > 0.0 && frac < 1.0) {
            bail!(
                "cannot route {:.3} of {} anomalous records to validation \
                 (fraction {}); lower perc_val_an or perc_tr_n",
                target,
                n_anomaly,
                frac
            );
        }

        // ── Step 4: anomaly → val / test, stratified on label ─────────────────
        let (val_a, test_a) =
            split_holdout_stratified(anomaly, 1.0 - frac, self.seed, |rec| rec.label)?;

        let stats = PartitionStats {
            normal:             n_normal,
            anomaly:            n_anomaly,
            train_n:            train_n.len(),
            val_n:              val_n.len(),
            test_n:             test_n.len(),
            val_a:              val_a.len(),
            test_a:             test_a.len(),
            anomaly_val_target: target,
            anomaly_val_frac:   frac,
        };

        // ── Step 5: assemble ──────────────────────────────────────────────────
        let val_p: Vec<Record> = val_n.clone();
        let val:   Vec<Record> = val_n.into_iter().chain(val_a).collect();
        let test:  Vec<Record> = test_n.into_iter().chain(test_a).collect();

        let set = PartitionSet {
            train: Partition::new(PartitionKind::Train, signal_len, train_n),
            val:   Partition::new(PartitionKind::Val,   signal_len, val),
            val_p: Partition::new(PartitionKind::ValP,  signal_len, val_p),
            test:  Partition::new(PartitionKind::Test,  signal_len, test),
            stats,
        };

        for p in set.iter() {
            tracing::info!(
                "Partition {:<5}: {:>5} rows ({} anomalous)",
                p.kind,
                p.len(),
                p.anomaly_count()
            );
        }

        Ok(set)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic table shaped like ECG5000: 2919 normal rows and
    /// 2081 anomalous rows spread over classes 2..=5.
    fn ecg_like() -> Vec<Record> {
        let mut records = Vec::new();
        let classes = [(1, 2919), (2, 1767), (3, 96), (4, 194), (5, 24)];
        let mut id = 0.0;
        for (label, count) in classes {
            for _ in 0..count {
                // Unique signal per row so rows can be told apart
                records.push(Record::new(label, vec![id, -id, 0.5]));
                id += 1.0;
            }
        }
        records
    }

    fn ratios(tr: f64, val: f64, an: f64) -> SplitRatios {
        SplitRatios { perc_tr_n: tr, perc_val_n: val, perc_val_an: an }
    }

    #[test]
    fn test_reference_scenario_sizes() {
        let set = Partitioner::new(ratios(0.95, 0.5, 0.05), 88)
            .partition(ecg_like())
            .unwrap();

        assert_eq!(set.stats.normal,  2919);
        assert_eq!(set.stats.anomaly, 2081);
        // 2919 - ceil(0.05 * 2919) = 2773
        assert_eq!(set.train.len(), 2773);
        assert_eq!(set.train.anomaly_count(), 0);

        // 2773 * 0.05 / 0.95 ≈ 145.9
        assert!((set.stats.anomaly_val_target - 145.947).abs() < 0.01);
        assert_eq!(set.stats.val_a, 145);
        assert_eq!(set.val.anomaly_count(), 145);
    }

    #[test]
    fn test_no_record_lost_or_duplicated() {
        let set = Partitioner::new(ratios(0.8, 0.3, 0.1), 88)
            .partition(ecg_like())
            .unwrap();
        let s = &set.stats;

        assert_eq!(set.train.len() + s.val_n + s.test_n, s.normal);
        assert_eq!(s.val_a + s.test_a, s.anomaly);
        assert_eq!(set.train.len() + set.val.len() + set.test.len(), 5000);

        let mut ids: Vec<i64> = set
            .train.records.iter()
            .chain(&set.val.records)
            .chain(&set.test.records)
            .map(|r| r.signal[0] as i64)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..5000).collect::<Vec<_>>());
    }

    #[test]
    fn test_val_p_is_normal_prefix_of_val() {
        let set = Partitioner::new(ratios(0.9, 0.5, 0.05), 88)
            .partition(ecg_like())
            .unwrap();

        assert!(set.val_p.len() < set.val.len());
        assert_eq!(set.val_p.anomaly_count(), 0);
        assert_eq!(&set.val.records[..set.val_p.len()], &set.val_p.records[..]);
        for rec in &set.val_p.records {
            assert!(set.val.records.contains(rec));
        }
    }

    #[test]
    fn test_anomaly_split_is_stratified() {
        let set = Partitioner::new(ratios(0.5, 0.5, 0.3), 88)
            .partition(ecg_like())
            .unwrap();

        let val_anomalies: Vec<&Record> =
            set.val.records.iter().filter(|r| !r.is_normal()).collect();
        let share = |label: i64| {
            val_anomalies.iter().filter(|r| r.label == label).count() as f64
                / val_anomalies.len() as f64
        };

        // Class 2 makes up 1767 / 2081 ≈ 0.849 of the anomalies
        assert!((share(2) - 1767.0 / 2081.0).abs() < 0.01);
        assert!((share(5) - 24.0 / 2081.0).abs() < 0.01);
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = Partitioner::new(ratios(0.95, 0.5, 0.05), 88).partition(ecg_like()).unwrap();
        let b = Partitioner::new(ratios(0.95, 0.5, 0.05), 88).partition(ecg_like()).unwrap();
        assert_eq!(a.train.records, b.train.records);
        assert_eq!(a.val.records,   b.val.records);
        assert_eq!(a.test.records,  b.test.records);
    }

    #[test]
    fn test_tiny_anomaly_share_injects_few_rows() {
        let set = Partitioner::new(ratios(0.95, 0.5, 0.001), 88)
            .partition(ecg_like())
            .unwrap();
        assert!(set.val.anomaly_count() <= 3);
    }

    #[test]
    fn test_anomaly_share_near_one_fails() {
        let err = Partitioner::new(ratios(0.95, 0.5, 0.9), 88)
            .partition(ecg_like())
            .unwrap_err();
        assert!(err.to_string().contains("anomalous records"));
    }

    #[test]
    fn test_rejects_out_of_range_percentages() {
        assert!(Partitioner::new(ratios(1.0, 0.5, 0.05), 88).partition(ecg_like()).is_err());
        assert!(Partitioner::new(ratios(0.9, 0.0, 0.05), 88).partition(ecg_like()).is_err());
        assert!(Partitioner::new(ratios(0.9, 0.5, -0.1), 88).partition(ecg_like()).is_err());
    }

    #[test]
    fn test_iter_follows_write_order() {
        let set = Partitioner::new(ratios(0.95, 0.5, 0.05), 88)
            .partition(ecg_like())
            .unwrap();

        let kinds: Vec<PartitionKind> = set.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, PartitionKind::ALL.to_vec());
        assert_eq!(set.get(PartitionKind::ValP).len(), set.stats.val_n);
    }

    #[test]
    fn test_no_anomalies_fails() {
        let records: Vec<Record> = (0..20).map(|i| Record::new(1, vec![i as f64])).collect();
        assert!(Partitioner::new(ratios(0.5, 0.5, 0.05), 88).partition(records).is_err());
    }
}
