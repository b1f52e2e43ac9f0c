//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Csv,
    Tsv,
    Json,
    Spreadsheet,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "csv" => FileType::Csv,
            "tsv" | "tab" => FileType::Tsv,
            "json" => FileType::Json,
            "xlsx" | "xls" | "ods" => FileType::Spreadsheet,
            _ => FileType::Unknown,
        }
    }

    pub fn delimiter(&self) -> Option<u8> {
        match self {
            FileType::Csv => Some(b','),
            FileType::Tsv => Some(b'\t'),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("CSV"), FileType::Csv);
        assert_eq!(FileType::from_extension("json"), FileType::Json);
        assert_eq!(FileType::from_extension("xlsx"), FileType::Spreadsheet);
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
        assert_eq!(FileType::Tsv.delimiter(), Some(b'\t'));
        assert_eq!(FileType::Json.delimiter(), None);
    }
}
