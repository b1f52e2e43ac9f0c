//! Normalization of raw table rows into canonical records

use crate::error::NormalizationError;
use crate::input::table::{CellValue, RawRow, RowDiagnostic};
use crate::processing::aliases::{self, candidate, requirement, FieldAliases};
use crate::processing::list_parser::parse_list;
use crate::processing::records::*;
use log::{debug, warn};
use serde::Serialize;

/// Which canonical record a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Requirement,
    Candidate,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Requirement => write!(f, "requirement"),
            RecordKind::Candidate => write!(f, "candidate"),
        }
    }
}

/// Result of normalizing a whole table: the records that made it and a
/// diagnostic for every row that was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizationOutcome<T> {
    pub records: Vec<T>,
    pub skipped: Vec<RowDiagnostic>,
}

impl<T> Default for NormalizationOutcome<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> NormalizationOutcome<T> {
    pub fn processed(&self) -> usize {
        self.records.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

pub fn normalize_requirement(row: &RawRow) -> Result<CompanyRequirement, NormalizationError> {
    let company_name = text_or(row, &requirement::COMPANY_NAME, || format!("Company_{}", row.position()))?;
    let role = text_or(row, &requirement::ROLE, || DEFAULT_ROLE.to_string())?;
    let required_skills = list_or(row, &requirement::REQUIRED_SKILLS, DEFAULT_SKILL)?;
    let eligible_degrees = list_or(row, &requirement::ELIGIBLE_DEGREES, DEFAULT_DEGREE)?;
    let country = text_or(row, &requirement::COUNTRY, || DEFAULT_COUNTRY.to_string())?;
    let requirement_count = count_or_default(aliases::lookup(row, &requirement::REQUIREMENT_COUNT)?);

    Ok(CompanyRequirement::new(
        company_name,
        role,
        required_skills,
        eligible_degrees,
        country,
        requirement_count,
    ))
}

pub fn normalize_candidate(row: &RawRow) -> Result<CandidateProfile, NormalizationError> {
    let name = text_or(row, &candidate::NAME, || format!("Student_{}", row.position()))?;
    let country = text_or(row, &candidate::COUNTRY, || DEFAULT_COUNTRY.to_string())?;

    let degree = match text(row, &candidate::DEGREE)? {
        Some(degree) => degree,
        None => {
            let qualification = text_or(row, &candidate::QUALIFICATION, || DEFAULT_QUALIFICATION.to_string())?;
            let field_of_study = text_or(row, &candidate::FIELD_OF_STUDY, || DEFAULT_FIELD_OF_STUDY.to_string())?;
            format!("{} in {}", qualification, field_of_study)
        }
    };

    let skills = list_or(row, &candidate::SKILLS, DEFAULT_SKILL)?;
    let resume_reference = text_or(row, &candidate::RESUME_REFERENCE, || DEFAULT_RESUME_REFERENCE.to_string())?;

    Ok(CandidateProfile::new(name, country, degree, skills, resume_reference))
}

pub fn normalize_requirements(rows: &[RawRow]) -> NormalizationOutcome<CompanyRequirement> {
    normalize_batch(rows, RecordKind::Requirement, normalize_requirement)
}

pub fn normalize_candidates(rows: &[RawRow]) -> NormalizationOutcome<CandidateProfile> {
    normalize_batch(rows, RecordKind::Candidate, normalize_candidate)
}

fn normalize_batch<T>(
    rows: &[RawRow],
    kind: RecordKind,
    normalize: impl Fn(&RawRow) -> Result<T, NormalizationError>,
) -> NormalizationOutcome<T> {
    let mut outcome = NormalizationOutcome::default();

    for row in rows {
        match normalize(row) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                warn!("Skipping {} row {}: {}", kind, row.position(), e);
                outcome.skipped.push(RowDiagnostic {
                    position: row.position(),
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        "Normalized {} {} rows, skipped {}",
        outcome.processed(),
        kind,
        outcome.skipped_count()
    );
    outcome
}

fn text(row: &RawRow, field: &FieldAliases) -> Result<Option<String>, NormalizationError> {
    Ok(aliases::lookup(row, field)?.and_then(CellValue::as_text))
}

fn text_or(
    row: &RawRow,
    field: &FieldAliases,
    default: impl FnOnce() -> String,
) -> Result<String, NormalizationError> {
    Ok(text(row, field)?.unwrap_or_else(default))
}

/// A field whose tokens are all blank counts as absent.
fn list_or(row: &RawRow, field: &FieldAliases, default: &str) -> Result<Vec<String>, NormalizationError> {
    let tokens = parse_list(text(row, field)?.as_deref());
    if tokens.is_empty() {
        Ok(vec![default.to_string()])
    } else {
        Ok(tokens)
    }
}

/// Only numeric cells are coerced; fractions truncate toward zero and
/// anything below one falls back to the default capacity.
fn count_or_default(value: Option<&CellValue>) -> u32 {
    match value {
        Some(CellValue::Number(n)) if n.is_finite() && *n >= 1.0 => {
            if *n >= u32::MAX as f64 {
                u32::MAX
            } else {
                n.trunc() as u32
            }
        }
        _ => DEFAULT_REQUIREMENT_COUNT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_requirement_row() -> RawRow {
        RawRow::new(0)
            .with("Company Name", " TechCorp Inc ")
            .with("Role", "Software Engineer")
            .with("Required Skills", "Python, JavaScript ,SQL")
            .with("Eligible Degrees", "Computer Science; Information Technology")
            .with("Country", " USA")
            .with("Requirement Count", 3.0)
    }

    #[test]
    fn test_fully_populated_requirement_round_trip() {
        let req = normalize_requirement(&full_requirement_row()).unwrap();

        assert_eq!(req.company_name, "TechCorp Inc");
        assert_eq!(req.role, "Software Engineer");
        assert_eq!(req.required_skills, vec!["Python", "JavaScript", "SQL"]);
        assert_eq!(req.eligible_degrees, vec!["Computer Science", "Information Technology"]);
        assert_eq!(req.country, "USA");
        assert_eq!(req.requirement_count, 3);
    }

    #[test]
    fn test_requirement_defaults() {
        let row = RawRow::new(4).with("Company Name", "").with("Requirement Count", "many");
        let req = normalize_requirement(&row).unwrap();

        assert_eq!(req.company_name, "Company_5");
        assert_eq!(req.role, DEFAULT_ROLE);
        assert_eq!(req.required_skills, vec![DEFAULT_SKILL]);
        assert_eq!(req.eligible_degrees, vec![DEFAULT_DEGREE]);
        assert_eq!(req.country, DEFAULT_COUNTRY);
        assert_eq!(req.requirement_count, 1);
    }

    #[test]
    fn test_blank_company_name_uses_position() {
        for index in [0usize, 1, 9, 41] {
            let row = RawRow::new(index).with("Company Name", CellValue::Number(f64::NAN));
            let req = normalize_requirement(&row).unwrap();
            assert!(req.company_name.contains(&(index + 1).to_string()));
        }
    }

    #[test]
    fn test_requirement_count_coercion() {
        assert_eq!(count_or_default(Some(&CellValue::Number(2.9))), 2);
        assert_eq!(count_or_default(Some(&CellValue::Number(0.0))), 1);
        assert_eq!(count_or_default(Some(&CellValue::Number(-4.0))), 1);
        assert_eq!(count_or_default(Some(&CellValue::from("3"))), 1);
        assert_eq!(count_or_default(Some(&CellValue::Bool(true))), 1);
        assert_eq!(count_or_default(None), 1);
    }

    #[test]
    fn test_survey_headers() {
        let row = RawRow::new(0)
            .with("Name of the Company", "DataFlow Solutions")
            .with("Company/Organization country", "Canada")
            .with("No of Total Openings", 2.0)
            .with(
                "Could you please mention the education qualification of candidates you are looking for",
                "B.Tech | M.Tech",
            );
        let req = normalize_requirement(&row).unwrap();

        assert_eq!(req.company_name, "DataFlow Solutions");
        assert_eq!(req.country, "Canada");
        assert_eq!(req.requirement_count, 2);
        assert_eq!(req.eligible_degrees, vec!["B.Tech", "M.Tech"]);
    }

    #[test]
    fn test_candidate_degree_synthesis() {
        let row = RawRow::new(0)
            .with("Full Name", "Asha Rao")
            .with(" Country", "India")
            .with("Highest academic qualification", "Master Degree")
            .with("Field of Study", "Data Science")
            .with("Please mention your technical skills", "Python|R")
            .with("Please upload your recent resume", "https://drive.google.com/file/d/abc123/view");
        let cand = normalize_candidate(&row).unwrap();

        assert_eq!(cand.name, "Asha Rao");
        assert_eq!(cand.country, "India");
        assert_eq!(cand.degree, "Master Degree in Data Science");
        assert_eq!(cand.skills, vec!["Python", "R"]);
        assert_eq!(cand.resume_reference, "https://drive.google.com/file/d/abc123/view");
    }

    #[test]
    fn test_candidate_defaults() {
        let cand = normalize_candidate(&RawRow::new(2)).unwrap();

        assert_eq!(cand.name, "Student_3");
        assert_eq!(cand.country, DEFAULT_COUNTRY);
        assert_eq!(cand.degree, "Bachelor Degree in General Studies");
        assert_eq!(cand.skills, vec![DEFAULT_SKILL]);
        assert_eq!(cand.resume_reference, DEFAULT_RESUME_REFERENCE);
    }

    #[test]
    fn test_candidate_prefers_unpadded_country() {
        let row = RawRow::new(0).with("Country", "USA").with(" Country", "UK");
        assert_eq!(normalize_candidate(&row).unwrap().country, "USA");

        let row = RawRow::new(0).with("Country", "").with(" Country", "UK");
        assert_eq!(normalize_candidate(&row).unwrap().country, "UK");
    }

    #[test]
    fn test_batch_skips_malformed_rows() {
        let mut bad = RawRow::new(1).with("Name", "Broken");
        bad.insert("Skills", CellValue::Nested("object".to_string()));
        let rows = vec![RawRow::new(0).with("Name", "Ok"), bad, RawRow::new(2).with("Name", "Also ok")];

        let outcome = normalize_candidates(&rows);

        assert_eq!(outcome.processed(), 2);
        assert_eq!(outcome.skipped_count(), 1);
        assert_eq!(outcome.skipped[0].position, 2);
        assert_eq!(outcome.records[1].name, "Also ok");
    }
}
