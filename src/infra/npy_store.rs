// ============================================================
// Layer 6 — NumPy Partition Store
// ============================================================
// Writes each partition as two bare .npy arrays:
//
//   numpy/
//     X_train.npy   y_train.npy
//     X_val.npy     y_val.npy
//     X_val_p.npy   y_val_p.npy
//     X_test.npy    y_test.npy
//     partition.json             ← run manifest (sizes + config)
//
// X is a 2-D f64 matrix [records × signal length], y is a 1-D
// f64 vector [records]. Both are little-endian, C order, with
// the standard NumPy header and nothing else; numpy.load()
// reads them directly. Existing files are overwritten.
//
// Reference: ndarray-npy crate documentation
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use ndarray_npy::WriteNpyExt;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::partition::Partition;
use crate::domain::traits::PartitionSink;

/// File name of the run manifest written next to the arrays.
pub const MANIFEST_FILE: &str = "partition.json";

/// Stores partitions as .npy files under one directory.
pub struct NpyStore {
    dir: PathBuf,
}

impl NpyStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the feature matrix for a partition name
    pub fn features_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("X_{name}.npy"))
    }

    /// Path of the label vector for a partition name
    pub fn labels_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("y_{name}.npy"))
    }

    /// Save a pretty-printed JSON manifest describing the run.
    pub fn save_manifest<M: Serialize>(&self, manifest: &M) -> Result<()> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write manifest to '{}'", path.display()))?;

        tracing::debug!("Saved manifest to '{}'", path.display());
        Ok(())
    }
}

impl PartitionSink for NpyStore {
    fn save_partition(&self, partition: &Partition) -> Result<()> {
        let name = partition.kind.name();

        let features = Array2::from_shape_vec(
            (partition.len(), partition.signal_len),
            partition.feature_values(),
        )
        .with_context(|| format!("Partition '{name}' has rows of the wrong width"))?;
        let labels = Array1::from_vec(partition.label_values());

        let x_path = self.features_path(name);
        let y_path = self.labels_path(name);
        write_array(&features, &x_path)?;
        write_array(&labels, &y_path)?;

        tracing::info!(
            "Saved {}: {} [{} × {}], {}",
            name,
            x_path.display(),
            features.nrows(),
            features.ncols(),
            y_path.display()
        );
        Ok(())
    }
}

/// Create `path` if it is missing, announcing it as "Create <label> folder".
/// Returns true when the folder was created by this call.
pub fn ensure_folder(path: &Path, label: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    tracing::info!("Create {label} folder");
    Ok(true)
}

fn write_array<A: WriteNpyExt>(array: &A, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    let mut writer = BufWriter::new(file);
    array
        .write_npy(&mut writer)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    writer.flush()?;
    Ok(())
}
