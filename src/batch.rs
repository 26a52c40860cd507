use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::{
    converter::{ImageConverter, WEBP_EXTENSION},
    progress::BatchObserver,
    settings::BatchPlan,
    summary::{BatchSummary, BatchTally},
    utils::file_display_name,
};

/// Runs one batch over a plan snapshot.
///
/// Files are processed sequentially, in selection order, each attempted
/// exactly once. A failure on one file is counted and logged, never
/// propagated: the defining contract is that no single file can abort
/// the batch.
pub struct BatchRunner {
    plan: BatchPlan,
}

impl BatchRunner {
    pub fn new(plan: BatchPlan) -> Self {
        Self { plan }
    }

    /// Convert every file in the plan. Emits one `file_started` and one
    /// `progress` per file and exactly one `finished` with the
    /// aggregate summary, which is also returned.
    pub fn run(&self, observer: &dyn BatchObserver) -> BatchSummary {
        let start = Instant::now();
        let converter = ImageConverter::new(self.plan.settings);
        let total = self.plan.len();
        let mut tally = BatchTally::new();

        for (index, input_path) in self.plan.files.iter().enumerate() {
            observer.file_started(index, total, &file_display_name(input_path));

            match self.process_file(&converter, input_path) {
                Ok((input_bytes, output_bytes)) => {
                    tally.record_success(input_bytes, output_bytes);

                    if !self.plan.keep_original {
                        // The conversion already succeeded; a stale
                        // original does not change the tally.
                        if let Err(e) = std::fs::remove_file(input_path) {
                            log::warn!("Failed to delete {}: {}", input_path.display(), e);
                        }
                    }
                }
                Err(e) => {
                    tally.record_failure();
                    log::error!("Failed to convert {}: {:#}", input_path.display(), e);
                }
            }

            observer.progress((index + 1) as f32 / total as f32 * 100.0);
        }

        let summary = tally.into_summary(total, start.elapsed());
        observer.finished(&summary);
        summary
    }

    /// Convert a single file, returning its source and output sizes.
    fn process_file(&self, converter: &ImageConverter, input_path: &Path) -> Result<(u64, u64)> {
        let output_path = self.output_path_for(input_path);

        converter.convert(input_path, &output_path)?;

        let input_bytes = std::fs::metadata(input_path).map(|m| m.len()).unwrap_or(0);
        let output_bytes = std::fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);
        Ok((input_bytes, output_bytes))
    }

    /// `<output dir>/<input base name>.webp`. Colliding output names are
    /// not detected; the later file in iteration order wins.
    fn output_path_for(&self, input_path: &Path) -> PathBuf {
        let dir = self.plan.output.resolve(input_path);
        let name = input_path.file_name().unwrap_or_default();
        dir.join(name).with_extension(WEBP_EXTENSION)
    }
}
