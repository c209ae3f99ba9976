use serde::Serialize;
use std::path::PathBuf;

/// One validated sample from the `weights` array.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightRecord {
    /// Epoch milliseconds, never negative.
    pub timestamp_ms: i64,
    /// Kept as the JSON number so it renders exactly as it was written.
    pub weight: serde_json::Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Weight")]
    pub weight: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<CsvRow>,
    pub csv_output: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub rows: usize,
}
