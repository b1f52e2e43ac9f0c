//! Holds the two normalized datasets between loading and matching

use crate::input::table::{LoadedTable, RowDiagnostic};
use crate::processing::matcher::Matcher;
use crate::processing::normalizer::{normalize_candidates, normalize_requirements, NormalizationOutcome};
use crate::processing::records::{CandidateProfile, CompanyRequirement, MatchRecord};
use crate::resume::ResumeContentProvider;
use log::{info, warn};

/// Processed and skipped row counts for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetSummary {
    pub processed: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct MatchingSession {
    requirements: Option<NormalizationOutcome<CompanyRequirement>>,
    candidates: Option<NormalizationOutcome<CandidateProfile>>,
}

impl MatchingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and keep a requirements table. Rows the loader could not
    /// read are carried over as skipped.
    pub fn load_requirements(&mut self, table: &LoadedTable) -> DatasetSummary {
        let mut outcome = normalize_requirements(&table.rows);
        merge_load_diagnostics(&mut outcome.skipped, &table.skipped);
        let summary = summarize("requirement", &outcome);
        self.requirements = Some(outcome);
        summary
    }

    pub fn load_candidates(&mut self, table: &LoadedTable) -> DatasetSummary {
        let mut outcome = normalize_candidates(&table.rows);
        merge_load_diagnostics(&mut outcome.skipped, &table.skipped);
        let summary = summarize("candidate", &outcome);
        self.candidates = Some(outcome);
        summary
    }

    pub fn set_requirements(&mut self, requirements: Vec<CompanyRequirement>) {
        self.requirements = Some(NormalizationOutcome {
            records: requirements,
            skipped: Vec::new(),
        });
    }

    pub fn set_candidates(&mut self, candidates: Vec<CandidateProfile>) {
        self.candidates = Some(NormalizationOutcome {
            records: candidates,
            skipped: Vec::new(),
        });
    }

    pub fn requirements(&self) -> &[CompanyRequirement] {
        self.requirements.as_ref().map(|o| o.records.as_slice()).unwrap_or(&[])
    }

    pub fn candidates(&self) -> &[CandidateProfile] {
        self.candidates.as_ref().map(|o| o.records.as_slice()).unwrap_or(&[])
    }

    pub fn skipped_requirements(&self) -> &[RowDiagnostic] {
        self.requirements.as_ref().map(|o| o.skipped.as_slice()).unwrap_or(&[])
    }

    pub fn skipped_candidates(&self) -> &[RowDiagnostic] {
        self.candidates.as_ref().map(|o| o.skipped.as_slice()).unwrap_or(&[])
    }

    /// Both datasets have been loaded (either may still be empty).
    pub fn is_ready(&self) -> bool {
        self.requirements.is_some() && self.candidates.is_some()
    }

    /// Runs the matcher when both datasets are present; a missing dataset
    /// yields no records rather than an error.
    pub fn run(&self, matcher: &Matcher, provider: &dyn ResumeContentProvider) -> Vec<MatchRecord> {
        if !self.is_ready() {
            warn!("Both requirement and candidate data are needed before matching");
            return Vec::new();
        }
        matcher.match_all(self.requirements(), self.candidates(), provider)
    }

    pub fn run_with_progress(
        &self,
        matcher: &Matcher,
        provider: &dyn ResumeContentProvider,
        on_requirement_done: &(dyn Fn() + Sync),
    ) -> Vec<MatchRecord> {
        if !self.is_ready() {
            warn!("Both requirement and candidate data are needed before matching");
            return Vec::new();
        }
        matcher.match_with_progress(self.requirements(), self.candidates(), provider, on_requirement_done)
    }
}

fn merge_load_diagnostics(skipped: &mut Vec<RowDiagnostic>, from_loader: &[RowDiagnostic]) {
    skipped.extend(from_loader.iter().cloned());
    skipped.sort_by_key(|d| d.position);
}

fn summarize<T>(kind: &str, outcome: &NormalizationOutcome<T>) -> DatasetSummary {
    info!(
        "Loaded {} {} records ({} rows skipped)",
        outcome.processed(),
        kind,
        outcome.skipped_count()
    );
    DatasetSummary {
        processed: outcome.processed(),
        skipped: outcome.skipped_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::table::RawRow;
    use crate::resume::PlaceholderProvider;

    #[test]
    fn test_missing_dataset_yields_empty_result() {
        let mut session = MatchingSession::new();
        session.set_requirements(vec![CompanyRequirement::new(
            "Acme",
            "Dev",
            vec!["Rust".into()],
            vec!["CS".into()],
            "USA",
            1,
        )]);

        assert!(!session.is_ready());
        assert!(session.run(&Matcher::default(), &PlaceholderProvider).is_empty());

        session.set_candidates(Vec::new());
        assert!(session.is_ready());
        assert_eq!(session.run(&Matcher::default(), &PlaceholderProvider).len(), 1);
    }

    #[test]
    fn test_load_counts_include_loader_skips() {
        let table = LoadedTable {
            rows: vec![RawRow::new(0).with("Name", "A"), RawRow::new(2).with("Name", "C")],
            skipped: vec![RowDiagnostic {
                position: 2,
                reason: "unreadable".to_string(),
            }],
        };

        let mut session = MatchingSession::new();
        let summary = session.load_candidates(&table);

        assert_eq!(summary, DatasetSummary { processed: 2, skipped: 1 });
        assert_eq!(session.candidates()[1].name, "C");
        assert_eq!(session.skipped_candidates()[0].position, 2);
    }
}
