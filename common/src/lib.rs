use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub mod cpu_features;
pub mod file_format;
pub mod log_setup;

pub use file_format::{FileExtensionError, FileFormat, FileFormatResult};

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported file format")]
    FileFormat(#[from] FileExtensionError),
    #[error("Failed to access file")]
    Io(#[from] std::io::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> SerdeFormatResult<String> {
    let serialized = match format {
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };

    Ok(normalize_line_endings(&serialized))
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: FileFormat,
) -> SerdeFormatResult<T> {
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        FileFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

/// Reads a value from a YAML or JSON file, picking the format from the extension.
pub fn load_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> SerdeFormatResult<T> {
    let format = FileFormat::from_path(path.as_ref())?;
    let serialized = std::fs::read_to_string(path)?;

    deserialize(&serialized, format)
}

/// Writes a value to a YAML or JSON file, picking the format from the extension.
pub fn save_file<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> SerdeFormatResult<()> {
    let format = FileFormat::from_path(path.as_ref())?;
    let serialized = serialize(value, format)?;
    std::fs::write(path, serialized)?;

    Ok(())
}

fn normalize_line_endings(s: &str) -> String {
    let mut normalized = s.replace("\r\n", "\n");
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}
