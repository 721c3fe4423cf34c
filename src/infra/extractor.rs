// ============================================================
// Layer 6 — Archive Extractor
// ============================================================
// Unpacks the downloaded zip into the dataset directory, then
// removes the archive and the format variants we never read.
//
// The ECG5000 archive ships the same data several times:
//   ECG5000_TRAIN.txt / ECG5000_TEST.txt   ← kept, read by the loader
//   ECG5000_TRAIN.arff / ECG5000_TEST.arff ← Weka format
//   ECG5000_TRAIN.ts / ECG5000_TEST.ts     ← sktime format
//   ECG5000.txt                            ← description
//
// Files are removed by fixed name without checking first. If the
// upstream archive layout changes, removal fails and so does the
// run.
//
// Reference: zip crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

/// Extracted files that are not needed downstream.
pub const DISCARDED_FILES: [&str; 5] = [
    "ECG5000_TRAIN.arff",
    "ECG5000_TRAIN.ts",
    "ECG5000_TEST.ts",
    "ECG5000_TEST.arff",
    "ECG5000.txt",
];

/// Extracts one archive and cleans up after it.
pub struct Extractor {
    archive: PathBuf,
    out_dir: PathBuf,
    discard: Vec<String>,
}

impl Extractor {
    pub fn new(archive: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            out_dir: out_dir.into(),
            discard: DISCARDED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Extract every member, delete the archive, delete the discard list.
    pub fn run(&self) -> Result<()> {
        self.extract_all()?;
        self.remove_leftovers()
    }

    fn extract_all(&self) -> Result<()> {
        let file = File::open(&self.archive)
            .with_context(|| format!("Cannot open archive '{}'", self.archive.display()))?;

        let mut zip = zip::ZipArchive::new(file)
            .with_context(|| format!("'{}' is not a zip archive", self.archive.display()))?;

        tracing::info!(
            "Extracting {} files into '{}'",
            zip.len(),
            self.out_dir.display()
        );

        zip.extract(&self.out_dir)
            .with_context(|| format!("Cannot extract into '{}'", self.out_dir.display()))?;

        tracing::info!("Extraction done");
        Ok(())
    }

    fn remove_leftovers(&self) -> Result<()> {
        remove(&self.archive)?;
        for name in &self.discard {
            remove(&self.out_dir.join(name))?;
        }
        Ok(())
    }
}

fn remove(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Cannot remove '{}'", path.display()))?;
    tracing::debug!("Removed '{}'", path.display());
    Ok(())
}
