//! Canonical records produced by normalization and consumed by the matcher

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_ROLE: &str = "General Role";
pub const DEFAULT_SKILL: &str = "General Skills";
pub const DEFAULT_DEGREE: &str = "Any Degree";
pub const DEFAULT_COUNTRY: &str = "India";
pub const DEFAULT_QUALIFICATION: &str = "Bachelor Degree";
pub const DEFAULT_FIELD_OF_STUDY: &str = "General Studies";
pub const DEFAULT_RESUME_REFERENCE: &str = "https://drive.google.com/sample_resume";
pub const DEFAULT_REQUIREMENT_COUNT: u32 = 1;

/// A company's job opening with its eligibility criteria and capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRequirement {
    pub company_name: String,
    pub role: String,
    pub required_skills: Vec<String>,
    pub eligible_degrees: Vec<String>,
    pub country: String,
    /// Always at least 1
    pub requirement_count: u32,
}

impl CompanyRequirement {
    pub fn new(
        company_name: impl Into<String>,
        role: impl Into<String>,
        required_skills: Vec<String>,
        eligible_degrees: Vec<String>,
        country: impl Into<String>,
        requirement_count: u32,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            role: role.into(),
            required_skills,
            eligible_degrees,
            country: country.into(),
            requirement_count: requirement_count.max(DEFAULT_REQUIREMENT_COUNT),
        }
    }
}

/// A normalized job seeker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub country: String,
    pub degree: String,
    pub skills: Vec<String>,
    pub resume_reference: String,
}

impl CandidateProfile {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        degree: impl Into<String>,
        skills: Vec<String>,
        resume_reference: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            degree: degree.into(),
            skills,
            resume_reference: resume_reference.into(),
        }
    }
}

/// Outcome of checking one requirement against one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub country_match: bool,
    pub degree_match: bool,
    /// In [0, 100], rounded to two decimals
    pub skill_match_percentage: f64,
    /// Required skills (as written in the requirement) found in the resume
    pub matched_skills: BTreeSet<String>,
    /// False when the resume was never consulted for this pair
    pub resume_checked: bool,
    pub is_eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCandidate {
    pub name: String,
    pub country: String,
    pub degree: String,
    pub skill_match_percentage: f64,
    pub matched_skills: BTreeSet<String>,
}

/// Final output unit, one per requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub requirement: CompanyRequirement,
    /// Size of the whole eligible pool, not just the selection
    pub eligible_count: usize,
    /// Ranked by match percentage, at most `requirement_count` long
    pub selected: Vec<SelectedCandidate>,
    pub top_match_percentage: f64,
}

impl MatchRecord {
    pub fn selected_names(&self) -> Vec<&str> {
        self.selected.iter().map(|c| c.name.as_str()).collect()
    }
}
