// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and hands a PrepareConfig
// to the application layer. Nothing here touches the data.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod args;

use anyhow::Result;
use clap::Parser;
use args::PrepareArgs;

use crate::application::prepare_use_case::PrepareUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "ecg5000-prep",
    version,
    allow_negative_numbers = true,
    about = "Download ECG5000 and split it into train / val / val_p / test .npy arrays."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: PrepareArgs,
}

impl Cli {
    /// Build the config from the arguments and run the pipeline.
    pub fn run(self) -> Result<()> {
        tracing::info!(
            "Preparing ECG5000 (download={}, perc_tr_n={}, perc_val_n={}, perc_val_an={})",
            self.args.download,
            self.args.perc_tr_n,
            self.args.perc_val_n,
            self.args.perc_val_an,
        );

        let use_case = PrepareUseCase::new(self.args.into());
        let manifest = use_case.execute()?;

        println!(
            "Saved data in numpy: train={} val={} val_p={} test={}",
            manifest.train, manifest.val, manifest.val_p, manifest.test
        );
        println!("Data preparation done!");
        Ok(())
    }
}
