//! Integration tests for the candidate matcher

use candidate_matcher::config::{OutputFormat, ProviderKind, ResumeConfig};
use candidate_matcher::error::MatcherError;
use candidate_matcher::input::manager::InputManager;
use candidate_matcher::output::{save_report_to_file, suggest_filename, MatchReport, ReportGenerator};
use candidate_matcher::processing::eligibility::EligibilityEvaluator;
use candidate_matcher::processing::matcher::Matcher;
use candidate_matcher::resume::{provider_from_config, CachingProvider, DirectoryProvider, PlaceholderProvider};
use candidate_matcher::session::{DatasetSummary, MatchingSession};
use std::path::Path;

const REQUIREMENTS: &str = "tests/fixtures/company_requirements.csv";
const CANDIDATES: &str = "tests/fixtures/student_registrations.csv";
const RESUMES: &str = "tests/fixtures/resumes";

async fn load_session() -> MatchingSession {
    let mut manager = InputManager::new();
    let requirements = manager.load_table(Path::new(REQUIREMENTS)).await.unwrap();
    let candidates = manager.load_table(Path::new(CANDIDATES)).await.unwrap();

    let mut session = MatchingSession::new();
    session.load_requirements(&requirements);
    session.load_candidates(&candidates);
    session
}

#[tokio::test]
async fn test_survey_requirements_are_normalized() {
    let session = load_session().await;
    let requirements = session.requirements();

    assert_eq!(requirements.len(), 3);

    assert_eq!(requirements[0].company_name, "Acme Analytics");
    assert_eq!(requirements[0].role, "Data Analyst");
    assert_eq!(requirements[0].required_skills, vec!["Python", "SQL", "Tableau"]);
    assert_eq!(requirements[0].eligible_degrees, vec!["Computer Science", "Statistics"]);
    assert_eq!(requirements[0].requirement_count, 2);

    assert_eq!(requirements[1].required_skills, vec!["Rust", "Go"]);
    assert_eq!(requirements[1].requirement_count, 1);

    // Blank cells fall back to defaults
    assert_eq!(requirements[2].company_name, "Company_3");
    assert_eq!(requirements[2].role, "General Role");
    assert_eq!(requirements[2].country, "India");
    assert_eq!(requirements[2].requirement_count, 1);
}

#[tokio::test]
async fn test_survey_candidates_are_normalized() {
    let session = load_session().await;
    let candidates = session.candidates();

    assert_eq!(candidates.len(), 5);
    assert_eq!(candidates[0].name, "Asha Rao");
    assert_eq!(candidates[0].degree, "B.Tech in Computer Science");
    assert_eq!(candidates[1].country, "india");
    assert_eq!(candidates[1].skills, vec!["R", "Python"]);
    assert_eq!(
        candidates[0].resume_reference,
        "https://drive.google.com/file/d/asha01/view?usp=sharing"
    );
    assert!(session.skipped_candidates().is_empty());
}

#[tokio::test]
async fn test_full_pipeline_with_resume_directory() {
    let session = load_session().await;
    let provider = CachingProvider::new(DirectoryProvider::new(RESUMES));

    let records = session.run(&Matcher::default(), &provider);
    assert_eq!(records.len(), 3);

    let acme = &records[0];
    assert_eq!(acme.eligible_count, 2);
    assert_eq!(acme.selected_names(), vec!["Asha Rao", "Vikram Nair"]);
    assert_eq!(acme.selected[1].skill_match_percentage, 66.67);
    assert_eq!(acme.top_match_percentage, 100.0);

    let globex = &records[1];
    assert_eq!(globex.selected_names(), vec!["John Doe"]);

    let finance = &records[2];
    assert_eq!(finance.requirement.company_name, "Company_3");
    assert_eq!(finance.selected_names(), vec!["Meera Iyer"]);

    for record in &records {
        let cap = (record.requirement.requirement_count as usize).min(record.eligible_count);
        assert!(record.selected.len() <= cap);
    }
}

#[tokio::test]
async fn test_stricter_threshold_drops_partial_match() {
    let session = load_session().await;
    let provider = DirectoryProvider::new(RESUMES);
    let matcher = Matcher::new(EligibilityEvaluator::new(70.0));

    let records = session.run(&matcher, &provider);
    assert_eq!(records[0].selected_names(), vec!["Asha Rao"]);
    assert_eq!(records[0].eligible_count, 1);
}

#[tokio::test]
async fn test_placeholder_provider_finds_no_skills() {
    let session = load_session().await;

    let records = session.run(&Matcher::default(), &PlaceholderProvider);

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.eligible_count == 0 && r.top_match_percentage == 0.0));
}

#[tokio::test]
async fn test_parallel_run_matches_sequential() {
    let session = load_session().await;
    let provider = provider_from_config(&ResumeConfig {
        provider: ProviderKind::Directory,
        resume_dir: Some(RESUMES.into()),
        cache: true,
        fetch_timeout_secs: 10,
    })
    .unwrap();

    let sequential = session.run(&Matcher::default(), provider.as_ref());
    let parallel = session.run(&Matcher::default().with_parallel(true), provider.as_ref());
    assert_eq!(sequential, parallel);
}

#[tokio::test]
async fn test_json_candidates_with_bad_rows() {
    let mut manager = InputManager::new();
    let table = manager.load_table(Path::new("tests/fixtures/candidates.json")).await.unwrap();

    let mut session = MatchingSession::new();
    let summary = session.load_candidates(&table);

    assert_eq!(summary, DatasetSummary { processed: 2, skipped: 2 });
    assert_eq!(session.candidates()[0].degree, "MSc Data Science");
    assert_eq!(session.candidates()[1].name, "Student_4");
    assert_eq!(session.candidates()[1].country, "India");
    assert_eq!(session.candidates()[1].degree, "BE in Mechanical");

    let positions: Vec<usize> = session.skipped_candidates().iter().map(|d| d.position).collect();
    assert_eq!(positions, vec![2, 3]);
}

#[tokio::test]
async fn test_table_caching() {
    let mut manager = InputManager::new();
    let path = Path::new(REQUIREMENTS);

    let first = manager.load_table(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.load_table(path).await.unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.load_table(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_spreadsheet_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.xlsx");
    std::fs::write(&path, b"PK").unwrap();

    let mut manager = InputManager::new();
    let result = manager.load_table(&path).await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.load_table(Path::new("tests/fixtures/nonexistent.csv")).await;
    assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_csv_export_round_trip_through_file() {
    let session = load_session().await;
    let records = session.run(&Matcher::default(), &DirectoryProvider::new(RESUMES));
    let report = MatchReport::new(
        records,
        DatasetSummary { processed: 3, skipped: 0 },
        DatasetSummary { processed: 5, skipped: 0 },
        60.0,
        1,
    );

    let content = ReportGenerator::default()
        .generate_report(&report, &OutputFormat::Csv)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir
        .path()
        .join(suggest_filename(&OutputFormat::Csv, report.metadata.generated_at));
    save_report_to_file(&content, &path).unwrap();

    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("job_matching_results_"));
    assert!(file_name.ends_with(".csv"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[4], "Eligible Students selected");
    assert_eq!(&headers[8], "Top Candidate Match %");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "Acme Analytics");
    assert_eq!(&rows[0][2], "Python, SQL, Tableau");
    assert_eq!(&rows[0][4], "Asha Rao, Vikram Nair");
    assert_eq!(&rows[0][6], "2");
    assert_eq!(&rows[1][4], "John Doe");
}
