//! Candidate matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod resume;
pub mod sample_data;
pub mod session;

pub use config::Config;
pub use error::{MatcherError, NormalizationError, Result};
pub use processing::eligibility::{EligibilityEvaluator, EvaluationMode};
pub use processing::matcher::Matcher;
pub use processing::records::{CandidateProfile, CompanyRequirement, EligibilityResult, MatchRecord, SelectedCandidate};
pub use session::MatchingSession;
