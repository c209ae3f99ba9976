pub mod convert;
pub mod date;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{ConversionSummary, CsvRow, TransformResult, WeightRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
