//! Demo requirement and candidate tables

use crate::error::{MatcherError, Result};
use chrono::{DateTime, Utc};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// (company, role, required skills, eligible degrees, country, openings)
const COMPANIES: [(&str, &str, &str, &str, &str, u32); 8] = [
    (
        "TechCorp Inc",
        "Software Engineer",
        "Python, JavaScript, SQL, Git",
        "Computer Science, Software Engineering, Information Technology",
        "USA",
        3,
    ),
    (
        "DataFlow Solutions",
        "Data Scientist",
        "Python, R, SQL, Machine Learning, Statistics",
        "Computer Science, Data Science, Statistics, Mathematics",
        "Canada",
        2,
    ),
    (
        "CloudTech Systems",
        "Cloud Architect",
        "AWS, Azure, Docker, Kubernetes, Python",
        "Computer Science, Information Technology, Cloud Computing",
        "UK",
        1,
    ),
    (
        "AI Innovations Ltd",
        "Machine Learning Engineer",
        "Python, TensorFlow, PyTorch, Deep Learning, Statistics",
        "Computer Science, Data Science, Artificial Intelligence",
        "Germany",
        2,
    ),
    (
        "WebDev Pro",
        "Frontend Developer",
        "JavaScript, React, HTML, CSS, Git",
        "Computer Science, Web Development, Information Technology",
        "USA",
        4,
    ),
    (
        "MobileFirst Apps",
        "Mobile App Developer",
        "React Native, JavaScript, Mobile Development, Git",
        "Computer Science, Mobile Development, Information Technology",
        "India",
        3,
    ),
    (
        "CyberSec Solutions",
        "Security Analyst",
        "Cybersecurity, Network Security, Python, Linux",
        "Computer Science, Cybersecurity, Information Technology",
        "Australia",
        2,
    ),
    (
        "FinTech Global",
        "Financial Analyst",
        "Excel, Financial Modeling, SQL, Python, Statistics",
        "Finance, Economics, Business Administration, Mathematics",
        "Singapore",
        1,
    ),
];

/// (name, country, degree, skills)
const CANDIDATES: [(&str, &str, &str, &str); 15] = [
    ("John Smith", "USA", "Bachelor of Computer Science", "Python, JavaScript, SQL, Git, React"),
    ("Sarah Johnson", "Canada", "Master of Data Science", "Python, R, SQL, Machine Learning, Statistics, TensorFlow"),
    ("Michael Chen", "USA", "Bachelor of Software Engineering", "Java, Python, SQL, Git, Spring Boot"),
    ("Emily Davis", "UK", "Master of Computer Science", "Python, JavaScript, SQL, Git, AWS"),
    ("David Wilson", "Germany", "Bachelor of Information Technology", "Python, JavaScript, SQL, Git, Azure"),
    ("Lisa Brown", "USA", "Master of Web Development", "JavaScript, React, HTML, CSS, Git, Node.js"),
    ("Robert Taylor", "Australia", "Bachelor of Cybersecurity", "Python, JavaScript, SQL, Git, Cybersecurity"),
    ("Jennifer Lee", "Singapore", "Master of Finance", "Excel, Financial Modeling, SQL, Python, Statistics"),
    ("Christopher Garcia", "USA", "Bachelor of Computer Science", "Python, JavaScript, SQL, Git, Docker"),
    ("Amanda Martinez", "Canada", "Master of Statistics", "Python, R, SQL, Statistics, Tableau"),
    ("James Rodriguez", "India", "Bachelor of Mobile Development", "React Native, JavaScript, Mobile Development, Git"),
    ("Michelle Anderson", "UK", "Master of Artificial Intelligence", "Python, TensorFlow, PyTorch, Deep Learning, Statistics"),
    ("Daniel Thompson", "Germany", "Bachelor of Cloud Computing", "AWS, Azure, Docker, Kubernetes, Python"),
    ("Jessica White", "USA", "Master of Business Administration", "Excel, Financial Modeling, SQL, Python, Business Analysis"),
    ("Matthew Harris", "Australia", "Bachelor of Financial Technology", "Python, JavaScript, SQL, Git, Financial Technology"),
];

/// Paths written by [`write_samples`]
#[derive(Debug, Clone)]
pub struct SampleFiles {
    pub requirements: PathBuf,
    pub candidates: PathBuf,
    pub resumes_dir: PathBuf,
}

fn resume_id(index: usize) -> String {
    format!("sample_resume_{}", index + 1)
}

pub fn requirements_csv() -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Company Name",
        "Role",
        "Required Skills",
        "Eligible Degrees",
        "Country",
        "Requirement Count",
    ])?;
    for (company, role, skills, degrees, country, openings) in COMPANIES {
        writer.write_record([company, role, skills, degrees, country, openings.to_string().as_str()])?;
    }
    finish(writer)
}

pub fn candidates_csv() -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Name", "Country", "Degree", "Skills", "Resume Link"])?;
    for (i, (name, country, degree, skills)) in CANDIDATES.iter().enumerate() {
        let link = format!("https://drive.google.com/file/d/{}/view", resume_id(i));
        writer.write_record([*name, *country, *degree, *skills, link.as_str()])?;
    }
    finish(writer)
}

/// Plain-text resume per sample candidate, keyed by document id
pub fn resume_documents() -> Vec<(String, String)> {
    CANDIDATES
        .iter()
        .enumerate()
        .map(|(i, (name, country, degree, skills))| {
            (
                resume_id(i),
                format!("{}\n{}, {}\n\nSkills: {}\n", name, degree, country, skills),
            )
        })
        .collect()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| MatcherError::Processing(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MatcherError::Processing(e.to_string()))
}

/// Writes `sample_companies_<ts>.csv`, `sample_candidates_<ts>.csv` and a
/// `resumes/` directory of `<id>.txt` files into `out_dir`.
pub fn write_samples(out_dir: &Path, timestamp: DateTime<Utc>) -> Result<SampleFiles> {
    let stamp = timestamp.format("%Y%m%d_%H%M%S");
    let files = SampleFiles {
        requirements: out_dir.join(format!("sample_companies_{}.csv", stamp)),
        candidates: out_dir.join(format!("sample_candidates_{}.csv", stamp)),
        resumes_dir: out_dir.join("resumes"),
    };

    fs::create_dir_all(&files.resumes_dir)?;
    fs::write(&files.requirements, requirements_csv()?)?;
    fs::write(&files.candidates, candidates_csv()?)?;
    for (id, text) in resume_documents() {
        fs::write(files.resumes_dir.join(format!("{}.txt", id)), text)?;
    }

    info!(
        "Wrote {} sample requirements and {} sample candidates to {}",
        COMPANIES.len(),
        CANDIDATES.len(),
        out_dir.display()
    );
    Ok(files)
}
