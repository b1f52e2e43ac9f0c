//! Three-factor eligibility check for a requirement and a candidate
//!
//! A candidate is eligible for an opening only when the countries agree, the
//! candidate's degree mentions one of the accepted degrees, and the resume
//! covers at least the configured share of the required skills.

use crate::processing::records::{CandidateProfile, CompanyRequirement, EligibilityResult};
use crate::resume::{ContentResult, ResumeContentProvider};
use aho_corasick::{AhoCorasick, MatchKind};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};

pub const DEFAULT_SKILL_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// Always consult the resume, even for pairs already ruled out
    Full,
    /// Skip the resume fetch once country or degree has failed
    #[default]
    ShortCircuit,
}

#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator {
    skill_threshold: f64,
    mode: EvaluationMode,
}

impl Default for EligibilityEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_SKILL_THRESHOLD)
    }
}

impl EligibilityEvaluator {
    pub fn new(skill_threshold: f64) -> Self {
        Self {
            skill_threshold: skill_threshold.clamp(0.0, 100.0),
            mode: EvaluationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn skill_threshold(&self) -> f64 {
        self.skill_threshold
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Precompute the per-requirement parts of the check so that scanning many
    /// candidates does not rebuild them.
    pub fn prepare<'a>(&self, requirement: &'a CompanyRequirement) -> PreparedRequirement<'a> {
        PreparedRequirement {
            requirement,
            degrees: requirement
                .eligible_degrees
                .iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            skills: SkillScanner::new(&requirement.required_skills),
            skill_threshold: self.skill_threshold,
            mode: self.mode,
        }
    }

    pub fn evaluate(
        &self,
        requirement: &CompanyRequirement,
        candidate: &CandidateProfile,
        provider: &dyn ResumeContentProvider,
    ) -> EligibilityResult {
        self.prepare(requirement).evaluate(candidate, provider)
    }
}

pub struct PreparedRequirement<'a> {
    requirement: &'a CompanyRequirement,
    degrees: Vec<String>,
    skills: SkillScanner,
    skill_threshold: f64,
    mode: EvaluationMode,
}

impl<'a> PreparedRequirement<'a> {
    pub fn evaluate(&self, candidate: &CandidateProfile, provider: &dyn ResumeContentProvider) -> EligibilityResult {
        let country_match = country_matches(Some(&self.requirement.country), Some(&candidate.country));
        let degree_match = self.degree_matches(&candidate.degree);

        if self.mode == EvaluationMode::ShortCircuit && !(country_match && degree_match) {
            return EligibilityResult {
                country_match,
                degree_match,
                skill_match_percentage: 0.0,
                matched_skills: BTreeSet::new(),
                resume_checked: false,
                is_eligible: false,
            };
        }

        let (raw_percentage, matched_skills) = match provider.fetch(&candidate.resume_reference) {
            ContentResult::Available(content) => self.skills.score(&content),
            ContentResult::Unavailable(reason) => {
                debug!("Resume for {} unavailable: {}", candidate.name, reason);
                (0.0, BTreeSet::new())
            }
        };
        // Threshold applies to the exact ratio; rounding is for reporting only
        let skill_match = raw_percentage >= self.skill_threshold && self.skills.total() > 0;
        let skill_match_percentage = round_percentage(raw_percentage);

        EligibilityResult {
            country_match,
            degree_match,
            skill_match_percentage,
            matched_skills,
            resume_checked: true,
            is_eligible: country_match && degree_match && skill_match,
        }
    }

    fn degree_matches(&self, candidate_degree: &str) -> bool {
        let degree = candidate_degree.trim().to_lowercase();
        !degree.is_empty() && self.degrees.iter().any(|accepted| degree.contains(accepted.as_str()))
    }
}

/// Trimmed, case-insensitive equality. A missing or blank side never matches.
pub fn country_matches(left: Option<&str>, right: Option<&str>) -> bool {
    match (left.map(str::trim), right.map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

/// True when any accepted degree occurs, case-insensitively, inside the
/// candidate's degree text.
pub fn degree_matches(eligible_degrees: &[String], candidate_degree: Option<&str>) -> bool {
    let Some(degree) = candidate_degree.map(|d| d.trim().to_lowercase()) else {
        return false;
    };
    !degree.is_empty()
        && eligible_degrees
            .iter()
            .map(|d| d.trim().to_lowercase())
            .any(|d| !d.is_empty() && degree.contains(&d))
}

/// Percentage of `required_skills` found in `content`, rounded to two decimals.
pub fn skill_match_percentage(required_skills: &[String], content: &str) -> (f64, BTreeSet<String>) {
    let (percentage, matched) = SkillScanner::new(required_skills).score(content);
    (round_percentage(percentage), matched)
}

/// Multi-pattern substring search over lowercased resume text.
struct SkillScanner {
    /// Original (trimmed) skill token for every non-blank requirement entry
    tokens: Vec<String>,
    /// Index into `patterns` for every entry of `tokens`
    token_patterns: Vec<usize>,
    patterns: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl SkillScanner {
    fn new(required_skills: &[String]) -> Self {
        let mut tokens = Vec::new();
        let mut token_patterns = Vec::new();
        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_ids: HashMap<String, usize> = HashMap::new();

        for skill in required_skills {
            let token = skill.trim();
            if token.is_empty() {
                continue;
            }
            let lowered = token.to_lowercase();
            let id = *pattern_ids.entry(lowered.clone()).or_insert_with(|| {
                patterns.push(lowered);
                patterns.len() - 1
            });
            tokens.push(token.to_string());
            token_patterns.push(id);
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            match AhoCorasick::builder().match_kind(MatchKind::Standard).build(&patterns) {
                Ok(automaton) => Some(automaton),
                Err(e) => {
                    warn!("Falling back to plain substring search for skills: {}", e);
                    None
                }
            }
        };

        Self {
            tokens,
            token_patterns,
            patterns,
            automaton,
        }
    }

    fn total(&self) -> usize {
        self.tokens.len()
    }

    /// Unrounded coverage percentage and the matched tokens
    fn score(&self, content: &str) -> (f64, BTreeSet<String>) {
        if self.tokens.is_empty() {
            return (0.0, BTreeSet::new());
        }

        let haystack = content.to_lowercase();
        let found = self.found_patterns(&haystack);

        let mut matched_count = 0usize;
        let mut matched_skills = BTreeSet::new();
        for (token, pattern) in self.tokens.iter().zip(&self.token_patterns) {
            if found[*pattern] {
                matched_count += 1;
                matched_skills.insert(token.clone());
            }
        }

        let percentage = matched_count as f64 / self.tokens.len() as f64 * 100.0;
        (percentage.clamp(0.0, 100.0), matched_skills)
    }

    fn found_patterns(&self, haystack: &str) -> Vec<bool> {
        let mut found = vec![false; self.patterns.len()];
        match &self.automaton {
            Some(automaton) => {
                for mat in automaton.find_overlapping_iter(haystack) {
                    found[mat.pattern().as_usize()] = true;
                }
            }
            None => {
                for (slot, pattern) in found.iter_mut().zip(&self.patterns) {
                    *slot = haystack.contains(pattern.as_str());
                }
            }
        }
        found
    }
}

fn round_percentage(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 100.0)
}
