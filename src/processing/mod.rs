//! Record normalization and eligibility matching

pub mod aliases;
pub mod eligibility;
pub mod list_parser;
pub mod matcher;
pub mod normalizer;
pub mod records;
