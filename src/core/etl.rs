use crate::core::{ConversionSummary, Pipeline};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<ConversionSummary> {
        tracing::info!("Starting conversion");

        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} weight records", records.len());

        let result = self.pipeline.transform(records)?;
        let rows = result.rows.len();
        tracing::info!("Transformed {} rows", rows);

        let output_path = self.pipeline.load(result)?;
        tracing::info!("Converted file saved to {}", output_path.display());

        Ok(ConversionSummary { output_path, rows })
    }

    /// Extracts and transforms without touching the destination.
    pub fn dry_run(&self) -> Result<ConversionSummary> {
        tracing::info!("Dry run: nothing will be written");

        let records = self.pipeline.extract()?;
        let result = self.pipeline.transform(records)?;
        let rows = result.rows.len();
        tracing::info!(
            "Would write {} rows to {}",
            rows,
            self.pipeline.destination().display()
        );

        Ok(ConversionSummary {
            output_path: self.pipeline.destination().to_path_buf(),
            rows,
        })
    }
}
