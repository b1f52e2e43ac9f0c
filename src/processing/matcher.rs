//! Matching of every requirement against every candidate

use crate::config::MatchingConfig;
use crate::processing::eligibility::{EligibilityEvaluator, EvaluationMode};
use crate::processing::records::{CandidateProfile, CompanyRequirement, MatchRecord, SelectedCandidate};
use crate::resume::ResumeContentProvider;
use log::{debug, info};
use rayon::prelude::*;

/// Drives the requirement × candidate cross product and keeps, per
/// requirement, the best eligible candidates up to its capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    evaluator: EligibilityEvaluator,
    parallel: bool,
}

impl Matcher {
    pub fn new(evaluator: EligibilityEvaluator) -> Self {
        Self {
            evaluator,
            parallel: false,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        let mode = if config.short_circuit {
            EvaluationMode::ShortCircuit
        } else {
            EvaluationMode::Full
        };
        Self::new(EligibilityEvaluator::new(config.skill_threshold).with_mode(mode)).with_parallel(config.parallel)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    /// One record per requirement, in requirement order.
    pub fn match_all(
        &self,
        requirements: &[CompanyRequirement],
        candidates: &[CandidateProfile],
        provider: &dyn ResumeContentProvider,
    ) -> Vec<MatchRecord> {
        self.match_with_progress(requirements, candidates, provider, &|| {})
    }

    /// Like [`Matcher::match_all`], calling `on_requirement_done` after each
    /// requirement finishes (possibly from a worker thread).
    pub fn match_with_progress(
        &self,
        requirements: &[CompanyRequirement],
        candidates: &[CandidateProfile],
        provider: &dyn ResumeContentProvider,
        on_requirement_done: &(dyn Fn() + Sync),
    ) -> Vec<MatchRecord> {
        if requirements.is_empty() {
            return Vec::new();
        }

        info!(
            "Matching {} requirements against {} candidates{}",
            requirements.len(),
            candidates.len(),
            if self.parallel { " in parallel" } else { "" }
        );

        let run = |requirement: &CompanyRequirement| {
            let record = self.match_requirement(requirement, candidates, provider);
            on_requirement_done();
            record
        };

        // Indexed parallel collect keeps requirement order
        if self.parallel {
            requirements.par_iter().map(run).collect()
        } else {
            requirements.iter().map(run).collect()
        }
    }

    pub fn match_requirement(
        &self,
        requirement: &CompanyRequirement,
        candidates: &[CandidateProfile],
        provider: &dyn ResumeContentProvider,
    ) -> MatchRecord {
        let prepared = self.evaluator.prepare(requirement);

        let mut eligible: Vec<SelectedCandidate> = candidates
            .iter()
            .filter_map(|candidate| {
                let result = prepared.evaluate(candidate, provider);
                result.is_eligible.then(|| SelectedCandidate {
                    name: candidate.name.clone(),
                    country: candidate.country.clone(),
                    degree: candidate.degree.clone(),
                    skill_match_percentage: result.skill_match_percentage,
                    matched_skills: result.matched_skills,
                })
            })
            .collect();

        // Stable sort: equal percentages keep candidate order
        eligible.sort_by(|a, b| b.skill_match_percentage.total_cmp(&a.skill_match_percentage));

        let eligible_count = eligible.len();
        eligible.truncate(requirement.requirement_count as usize);

        let top_match_percentage = eligible
            .iter()
            .map(|c| c.skill_match_percentage)
            .fold(0.0, f64::max);

        debug!(
            "{} / {}: {} eligible, {} selected",
            requirement.company_name,
            requirement.role,
            eligible_count,
            eligible.len()
        );

        MatchRecord {
            requirement: requirement.clone(),
            eligible_count,
            selected: eligible,
            top_match_percentage,
        }
    }
}
