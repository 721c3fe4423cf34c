// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// The four positional arguments, in order:
//
//   download     0 or 1 — fetch and unzip the archive first
//   perc_tr_n    share of normal records used for training
//   perc_val_n   share of the remaining normal records used
//                for validation (the rest go to test)
//   perc_val_an  anomalous share of validation, measured against
//                the TRAINING set size
//
// Example:
//   ecg5000-prep 1 0.95 0.5 0.05
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::Args;

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::partitioner::SplitRatios;

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Download data 1, otherwise 0
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    pub download: u8,

    /// Percentage of normal instances for training
    pub perc_tr_n: f64,

    /// Percentage of normal instances for validation
    pub perc_val_n: f64,

    /// Percentage of anomalous instances for validation w.r.t. normal
    /// instances in the training set (e.g. with 95 normal training
    /// instances, 0.05 selects 5 anomalous instances)
    pub perc_val_an: f64,
}

/// Convert CLI args into the application-layer PrepareConfig.
/// Everything not on the command line keeps its default.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            download: a.download == 1,
            ratios:   SplitRatios {
                perc_tr_n:   a.perc_tr_n,
                perc_val_n:  a.perc_val_n,
                perc_val_an: a.perc_val_an,
            },
            ..PrepareConfig::default()
        }
    }
}
