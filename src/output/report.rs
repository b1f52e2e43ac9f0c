//! Report structures built from match records

use crate::processing::records::MatchRecord;
use crate::session::DatasetSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,
    pub summary: SummaryStatistics,
    pub table: Vec<MatchTableRow>,
    /// Full records, for detailed output
    pub records: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub skill_threshold: f64,
    pub requirements_loaded: usize,
    pub requirements_skipped: usize,
    pub candidates_loaded: usize,
    pub candidates_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_companies: usize,
    /// Sum of eligible candidates over all requirements
    pub total_candidates: usize,
    pub total_selected: usize,
    pub requirements_without_candidates: usize,
    pub avg_candidates_per_company: f64,
    pub avg_top_match_percentage: f64,
}

/// Flat table row; serialized field names are the export column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTableRow {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Required Skills")]
    pub required_skills: String,
    #[serde(rename = "Eligible Degrees")]
    pub eligible_degrees: String,
    #[serde(rename = "Eligible Students selected")]
    pub eligible_students_selected: String,
    #[serde(rename = "Requirement Count")]
    pub requirement_count: u32,
    #[serde(rename = "Candidates Count")]
    pub candidates_count: usize,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Top Candidate Match %")]
    pub top_candidate_match_percentage: f64,
}

pub const TABLE_HEADERS: [&str; 9] = [
    "Company Name",
    "Role",
    "Required Skills",
    "Eligible Degrees",
    "Eligible Students selected",
    "Requirement Count",
    "Candidates Count",
    "Country",
    "Top Candidate Match %",
];

impl From<&MatchRecord> for MatchTableRow {
    fn from(record: &MatchRecord) -> Self {
        let requirement = &record.requirement;
        Self {
            company_name: requirement.company_name.clone(),
            role: requirement.role.clone(),
            required_skills: requirement.required_skills.join(", "),
            eligible_degrees: requirement.eligible_degrees.join(", "),
            eligible_students_selected: record.selected_names().join(", "),
            requirement_count: requirement.requirement_count,
            candidates_count: record.eligible_count,
            country: requirement.country.clone(),
            top_candidate_match_percentage: record.top_match_percentage,
        }
    }
}

impl MatchTableRow {
    /// Cell values in [`TABLE_HEADERS`] order
    pub fn cells(&self) -> [String; 9] {
        [
            self.company_name.clone(),
            self.role.clone(),
            self.required_skills.clone(),
            self.eligible_degrees.clone(),
            self.eligible_students_selected.clone(),
            self.requirement_count.to_string(),
            self.candidates_count.to_string(),
            self.country.clone(),
            format_percentage(self.top_candidate_match_percentage),
        ]
    }
}

impl SummaryStatistics {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let total_companies = records.len();
        let total_candidates = records.iter().map(|r| r.eligible_count).sum();
        let total_selected = records.iter().map(|r| r.selected.len()).sum();
        let requirements_without_candidates = records.iter().filter(|r| r.eligible_count == 0).count();

        let (avg_candidates_per_company, avg_top_match_percentage) = if total_companies == 0 {
            (0.0, 0.0)
        } else {
            let n = total_companies as f64;
            let top_sum: f64 = records.iter().map(|r| r.top_match_percentage).sum();
            (total_candidates as f64 / n, top_sum / n)
        };

        Self {
            total_companies,
            total_candidates,
            total_selected,
            requirements_without_candidates,
            avg_candidates_per_company,
            avg_top_match_percentage,
        }
    }
}

impl MatchReport {
    pub fn new(
        records: Vec<MatchRecord>,
        requirements: DatasetSummary,
        candidates: DatasetSummary,
        skill_threshold: f64,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                skill_threshold,
                requirements_loaded: requirements.processed,
                requirements_skipped: requirements.skipped,
                candidates_loaded: candidates.processed,
                candidates_skipped: candidates.skipped,
            },
            summary: SummaryStatistics::from_records(&records),
            table: records.iter().map(MatchTableRow::from).collect(),
            records,
        }
    }
}

/// Percentages print without trailing zeros: 100, 66.67, 62.5
pub fn format_percentage(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::records::{CompanyRequirement, SelectedCandidate};
    use std::collections::BTreeSet;

    fn record(name: &str, eligible: usize, selected: &[(&str, f64)]) -> MatchRecord {
        MatchRecord {
            requirement: CompanyRequirement::new(
                name,
                "Analyst",
                vec!["SQL".into(), "Excel".into()],
                vec!["Finance".into(), "Economics".into()],
                "Singapore",
                2,
            ),
            eligible_count: eligible,
            selected: selected
                .iter()
                .map(|(n, pct)| SelectedCandidate {
                    name: n.to_string(),
                    country: "Singapore".into(),
                    degree: "BCom Finance".into(),
                    skill_match_percentage: *pct,
                    matched_skills: BTreeSet::new(),
                })
                .collect(),
            top_match_percentage: selected.first().map(|s| s.1).unwrap_or(0.0),
        }
    }

    #[test]
    fn test_table_row_from_record() {
        let row = MatchTableRow::from(&record("FinTech Global", 3, &[("Ana", 100.0), ("Raj", 66.67)]));

        assert_eq!(row.required_skills, "SQL, Excel");
        assert_eq!(row.eligible_degrees, "Finance, Economics");
        assert_eq!(row.eligible_students_selected, "Ana, Raj");
        assert_eq!(row.candidates_count, 3);
        assert_eq!(row.cells()[8], "100");
    }

    #[test]
    fn test_serialized_keys_match_export_headers() {
        let row = MatchTableRow::from(&record("FinTech Global", 1, &[("Ana", 100.0)]));
        let value = serde_json::to_value(&row).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        for header in TABLE_HEADERS {
            assert!(keys.contains(&header), "missing key {}", header);
        }
        assert_eq!(TABLE_HEADERS[4], "Eligible Students selected");
        assert_eq!(value["Eligible Students selected"], "Ana");
    }

    #[test]
    fn test_summary_statistics() {
        let records = vec![
            record("A", 3, &[("x", 80.0), ("y", 70.0)]),
            record("B", 0, &[]),
            record("C", 1, &[("z", 60.0)]),
        ];
        let stats = SummaryStatistics::from_records(&records);

        assert_eq!(stats.total_companies, 3);
        assert_eq!(stats.total_candidates, 4);
        assert_eq!(stats.total_selected, 3);
        assert_eq!(stats.requirements_without_candidates, 1);
        assert!((stats.avg_candidates_per_company - 4.0 / 3.0).abs() < 1e-9);
        assert!((stats.avg_top_match_percentage - 140.0 / 3.0).abs() < 1e-9);

        let empty = SummaryStatistics::from_records(&[]);
        assert_eq!(empty.avg_candidates_per_company, 0.0);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(100.0), "100");
        assert_eq!(format_percentage(66.666), "66.67");
        assert_eq!(format_percentage(62.5), "62.5");
        assert_eq!(format_percentage(0.0), "0");
    }
}
