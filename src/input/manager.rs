//! Input manager for loading requirement and candidate tables

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::table::{CellValue, LoadedTable, RawRow, RowDiagnostic};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, LoadedTable>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self { cache: HashMap::new() }
    }

    pub async fn load_table(&mut self, path: &Path) -> Result<LoadedTable> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached) = self.cache.get(&path_str) {
            info!("Using cached table for: {}", path.display());
            return Ok(cached.clone());
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let table = match file_type {
            FileType::Csv | FileType::Tsv => {
                info!("Reading delimited table: {}", path.display());
                let content = fs::read_to_string(path).await?;
                // Delimiter presence is guaranteed by the match arm
                parse_delimited(&content, file_type.delimiter().unwrap_or(b','))?
            }
            FileType::Json => {
                info!("Reading JSON table: {}", path.display());
                let content = fs::read_to_string(path).await?;
                parse_json(&content)?
            }
            FileType::Spreadsheet => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "{}: export the sheet to CSV or JSON first",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        debug!(
            "Loaded {} rows ({} unreadable) from {}",
            table.rows.len(),
            table.skipped.len(),
            path.display()
        );

        self.cache.insert(path_str, table.clone());

        Ok(table)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| MatcherError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Parse a delimited table with a header row. Records that cannot be read are
/// reported as skipped rows rather than failing the whole table.
pub fn parse_delimited(content: &str, delimiter: u8) -> Result<LoadedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut table = LoadedTable::default();

    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable row {}: {}", index + 1, e);
                table.skipped.push(RowDiagnostic {
                    position: index + 1,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if record.len() > headers.len() {
            let reason = format!("row has {} fields but the header has {}", record.len(), headers.len());
            warn!("Skipping row {}: {}", index + 1, reason);
            table.skipped.push(RowDiagnostic {
                position: index + 1,
                reason,
            });
            continue;
        }

        let mut row = RawRow::new(index);
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header, CellValue::from_field(field));
        }
        table.rows.push(row);
    }

    Ok(table)
}

/// Parse a JSON array of objects. Elements that are not objects are skipped.
pub fn parse_json(content: &str) -> Result<LoadedTable> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let items = value
        .as_array()
        .ok_or_else(|| MatcherError::InvalidInput("JSON table must be an array of row objects".to_string()))?;

    let mut table = LoadedTable::default();

    for (index, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(object) => {
                let mut row = RawRow::new(index);
                for (column, value) in object {
                    row.insert(column, CellValue::from_json(value));
                }
                table.rows.push(row);
            }
            None => {
                let reason = format!("expected an object, found {}", json_kind(item));
                warn!("Skipping row {}: {}", index + 1, reason);
                table.skipped.push(RowDiagnostic {
                    position: index + 1,
                    reason,
                });
            }
        }
    }

    Ok(table)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
