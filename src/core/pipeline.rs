use crate::core::date::epoch_millis_to_date;
use crate::core::{ConfigProvider, CsvRow, Pipeline, Storage, TransformResult, WeightRecord};
use crate::utils::error::{ConvertError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const WEIGHTS_FIELD: &str = "weights";
pub const CSV_HEADER: [&str; 2] = ["Date", "Weight"];

pub struct WeightsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> WeightsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for WeightsPipeline<S, C> {
    fn extract(&self) -> Result<Vec<WeightRecord>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading weights document from {}", input_path.display());

        let raw = self.storage.read_file(input_path)?;
        let document: Value =
            serde_json::from_slice(&raw).map_err(|source| ConvertError::Parse {
                path: input_path.to_path_buf(),
                source,
            })?;

        parse_document(&document)
    }

    fn transform(&self, records: Vec<WeightRecord>) -> Result<TransformResult> {
        let zone = self.config.timezone();
        tracing::debug!("Converting {} timestamps using {} time", records.len(), zone);

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let date = epoch_millis_to_date(record.timestamp_ms, zone).ok_or_else(|| {
                ConvertError::malformed(
                    index,
                    format!("`date` {} is after year 9999", record.timestamp_ms),
                )
            })?;
            rows.push(CsvRow {
                date,
                weight: record.weight.to_string(),
            });
        }

        let csv_output = render_csv(&rows)?;
        Ok(TransformResult { rows, csv_output })
    }

    fn load(&self, result: TransformResult) -> Result<PathBuf> {
        let output_path = self.config.output_path();
        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.rows.len(),
            result.csv_output.len(),
            output_path.display()
        );

        self.storage.write_file(output_path, &result.csv_output)?;
        Ok(output_path.to_path_buf())
    }

    fn destination(&self) -> &Path {
        self.config.output_path()
    }
}

/// Pulls the `weights` array out of a parsed document, validating each record.
pub fn parse_document(document: &Value) -> Result<Vec<WeightRecord>> {
    let weights = match document.get(WEIGHTS_FIELD) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ConvertError::missing_field(
                WEIGHTS_FIELD,
                format!("expected an array, found {}", json_type(other)),
            ))
        }
        None => {
            return Err(ConvertError::missing_field(
                WEIGHTS_FIELD,
                format!("not present in the top-level {}", json_type(document)),
            ))
        }
    };

    weights
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

fn parse_record(index: usize, item: &Value) -> Result<WeightRecord> {
    let fields = item.as_object().ok_or_else(|| {
        ConvertError::malformed(index, format!("expected an object, found {}", json_type(item)))
    })?;

    let date = fields
        .get("date")
        .ok_or_else(|| ConvertError::malformed(index, "missing `date`"))?;
    let weight = fields
        .get("weight")
        .ok_or_else(|| ConvertError::malformed(index, "missing `weight`"))?;

    let timestamp_ms = parse_timestamp(date).ok_or_else(|| {
        ConvertError::malformed(
            index,
            format!("`date` must be a non-negative epoch-millisecond integer, found {}", date),
        )
    })?;

    let weight = match weight {
        Value::Number(number) => number.clone(),
        other => {
            return Err(ConvertError::malformed(
                index,
                format!("`weight` must be a number, found {}", json_type(other)),
            ))
        }
    };

    Ok(WeightRecord {
        timestamp_ms,
        weight,
    })
}

fn parse_timestamp(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(millis) = number.as_i64() {
        return (millis >= 0).then_some(millis);
    }
    // Beyond i64::MAX.
    if number.is_u64() {
        return None;
    }

    let millis = number.as_f64()?;
    let integral = millis.is_finite() && millis >= 0.0 && millis.fract() == 0.0;
    (integral && millis < i64::MAX as f64).then(|| millis as i64)
}

fn render_csv(rows: &[CsvRow]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ConvertError::Csv(csv::Error::from(e.into_error())))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
