// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs the whole data preparation pipeline in order:
//
//   Step 1: Download the archive        (Layer 6 - infra)   ┐ only when
//   Step 2: Unzip + remove leftovers    (Layer 6 - infra)   ┘ download = 1
//   Step 3: Load TRAIN + TEST tables    (Layer 4 - data)
//   Step 4: Partition the records       (Layer 4 - data)
//   Step 5: Save the .npy arrays        (Layer 6 - infra)
//   Step 6: Save the run manifest       (Layer 6 - infra)
//
// All paths hang off `data_dir` (default "data"):
//
//   data/ECG5000.zip                         ← transient
//   data/ECG5000/ECG5000_{TRAIN,TEST}.txt
//   data/ECG5000/numpy/{X,y}_{train,val,val_p,test}.npy
//   data/ECG5000/numpy/partition.json
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    loader::UcrTableLoader,
    partitioner::{PartitionSet, PartitionStats, Partitioner, SplitRatios},
};
use crate::domain::traits::{PartitionSink, RecordSource};
use crate::infra::{
    extractor::Extractor,
    fetcher::{Fetcher, DEFAULT_CHUNK_SIZE},
    npy_store::{ensure_folder, NpyStore},
};

/// Public location of the ECG5000 archive.
pub const DATASET_URL: &str = "http://www.timeseriesclassification.com/Downloads/ECG5000.zip";

/// Seed shared by every random split.
pub const DEFAULT_SEED: u64 = 88;

const DATASET_NAME: &str = "ECG5000";

// ─── Preparation Configuration ───────────────────────────────────────────────
// Everything a run needs. Serialisable so it can be written into
// the manifest next to the arrays it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Fetch and unpack the archive before loading
    pub download:   bool,
    pub ratios:     SplitRatios,
    /// Root folder for the archive, tables and arrays
    pub data_dir:   PathBuf,
    pub url:        String,
    pub seed:       u64,
    /// Download buffer size in bytes
    pub chunk_size: usize,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            download:   false,
            ratios:     SplitRatios {
                perc_tr_n:   0.95,
                perc_val_n:  0.5,
                perc_val_an: 0.05,
            },
            data_dir:   PathBuf::from("data"),
            url:        DATASET_URL.to_string(),
            seed:       DEFAULT_SEED,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl PrepareConfig {
    /// data/ECG5000.zip
    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(format!("{DATASET_NAME}.zip"))
    }

    /// data/ECG5000
    pub fn dataset_dir(&self) -> PathBuf {
        self.data_dir.join(DATASET_NAME)
    }

    /// data/ECG5000/numpy
    pub fn numpy_dir(&self) -> PathBuf {
        self.dataset_dir().join("numpy")
    }

    /// `path` relative to `data_dir`, as shown in folder-creation logs
    /// ("ECG5000", "ECG5000/numpy").
    pub fn folder_label(&self, path: &Path) -> String {
        path.strip_prefix(&self.data_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// The TRAIN and TEST tables, in concatenation order.
    pub fn table_paths(&self) -> [PathBuf; 2] {
        let dir = self.dataset_dir();
        [
            dir.join(format!("{DATASET_NAME}_TRAIN.txt")),
            dir.join(format!("{DATASET_NAME}_TEST.txt")),
        ]
    }
}

/// Written to numpy/partition.json after the arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub config:     PrepareConfig,
    pub signal_len: usize,
    pub stats:      PartitionStats,
    pub train:      usize,
    pub val:        usize,
    pub val_p:      usize,
    pub test:       usize,
}

impl RunManifest {
    fn new(config: &PrepareConfig, set: &PartitionSet) -> Self {
        Self {
            config:     config.clone(),
            signal_len: set.train.signal_len,
            stats:      set.stats.clone(),
            train:      set.train.len(),
            val:        set.val.len(),
            val_p:      set.val_p.len(),
            test:       set.test.len(),
        }
    }
}

// ─── PrepareUseCase ──────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Execute the pipeline end to end and return the manifest it wrote.
    pub fn execute(&self) -> Result<RunManifest> {
        let cfg = &self.config;

        // Fail on bad percentages before touching the network
        cfg.ratios.validate()?;

        // ── Steps 1–2: download and unpack ────────────────────────────────────
        if cfg.download {
            self.fetch_dataset()?;
        }

        // ── Step 3: load both tables ──────────────────────────────────────────
        let loader  = UcrTableLoader::new(cfg.table_paths());
        let records = loader.load_all()?;

        // ── Step 4: partition ─────────────────────────────────────────────────
        let partitioner = Partitioner::new(cfg.ratios, cfg.seed);
        let set         = partitioner.partition(records)?;

        // ── Steps 5–6: persist ────────────────────────────────────────────────
        let numpy_dir = cfg.numpy_dir();
        ensure_folder(&numpy_dir, &cfg.folder_label(&numpy_dir))?;
        let store = NpyStore::new(numpy_dir)?;
        save_all(&store, &set)?;

        let manifest = RunManifest::new(cfg, &set);
        store.save_manifest(&manifest)?;

        tracing::info!("Saved data in '{}'", store.dir().display());
        Ok(manifest)
    }

    fn fetch_dataset(&self) -> Result<()> {
        let cfg         = &self.config;
        let dataset_dir = cfg.dataset_dir();

        ensure_folder(&dataset_dir, &cfg.folder_label(&dataset_dir))?;

        let archive = cfg.archive_path();
        Fetcher::new(&cfg.url, cfg.chunk_size).download(&archive)?;
        Extractor::new(archive, dataset_dir).run()
    }
}

/// Write every partition through the given sink.
pub fn save_all<S: PartitionSink>(sink: &S, set: &PartitionSet) -> Result<()> {
    for partition in set.iter() {
        sink.save_partition(partition)?;
    }
    Ok(())
}
