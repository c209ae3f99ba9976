use crate::core::date::TimeZoneMode;
use crate::domain::model::{TransformResult, WeightRecord};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Replaces the file at `path` with `data` in one step, or leaves it untouched.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn timezone(&self) -> TimeZoneMode;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<WeightRecord>>;
    fn transform(&self, records: Vec<WeightRecord>) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<PathBuf>;
    fn destination(&self) -> &Path;
}
