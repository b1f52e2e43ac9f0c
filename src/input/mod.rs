//! Input processing module
//! Handles file detection, table parsing, and input management

pub mod file_detector;
pub mod manager;
pub mod table;

pub use manager::InputManager;
pub use table::{CellValue, LoadedTable, RawRow, RowDiagnostic};
