// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the network or the file formats:
//
//   fetcher.rs   — Streams the dataset archive over HTTP to disk
//                  in fixed-size chunks (blocking reqwest).
//
//   extractor.rs — Unzips the archive into the dataset folder,
//                  then removes the archive and the format
//                  variants the loader never reads.
//
//   npy_store.rs — Writes each partition as X_/y_ .npy arrays
//                  plus a JSON manifest of the run.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// HTTP download of the dataset archive
pub mod fetcher;

/// Zip extraction and cleanup
pub mod extractor;

/// .npy array output and run manifest
pub mod npy_store;
