use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let value = path.to_string_lossy();

    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if value.contains('\0') {
        return Err(ConvertError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Rejects an output that names the same file as the input, however the two
/// paths are spelled.
pub fn validate_distinct_paths(input: &Path, output: &Path) -> Result<()> {
    if input == output || comparable_path(input) == comparable_path(output) {
        return Err(ConvertError::InvalidConfigValue {
            field: "output_path".to_string(),
            value: output.display().to_string(),
            reason: "Output path must differ from the input path".to_string(),
        });
    }
    Ok(())
}

/// Resolves `path` to the file it would name. An existing path is
/// canonicalized. Otherwise `..` is resolved lexically, since a missing parent
/// is created as written, and the remaining existing parent is canonicalized.
fn comparable_path(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }

    let normalized = normalize_lexically(path);
    match (normalized.parent(), normalized.file_name()) {
        (Some(parent), Some(name)) => match fs::canonicalize(parent) {
            Ok(real_parent) => real_parent.join(name),
            Err(_) => normalized.clone(),
        },
        _ => normalized.clone(),
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Rejects output paths that name an existing directory.
pub fn validate_output_target(field_name: &str, path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(ConvertError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Path is a directory, expected a file".to_string(),
        });
    }
    Ok(())
}
