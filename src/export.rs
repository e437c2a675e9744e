use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::category::JobCategory;
use crate::models::JobPosting;

const CSV_HEADER: &[&str] = &[
    "title",
    "company",
    "location",
    "description",
    "url",
    "source",
    "posted_date",
    "sponsored",
    "experience_level",
    "canonical_title",
    "canonical_company",
    "canonical_url",
    "requires_us_citizenship",
    "requires_security_clearance",
    "is_sponsorship_friendly",
    "is_f1_student_friendly",
    "citizenship_score",
    "sponsorship_score",
    "remote_friendly",
    "classification_tags",
];

/// Timestamped default filename, e.g. `cybersecurity_jobs_20260825_143000.csv`.
pub fn default_filename(category: JobCategory, extension: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{}_jobs_{}.{}", category.slug(), timestamp, extension)
}

/// Write one flattened CSV row per posting.
pub fn save_to_csv(postings: &[JobPosting], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create csv file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    write_csv(postings, &mut writer)?;
    writer.flush()?;
    info!(count = postings.len(), path = %path.display(), "saved csv export");
    Ok(())
}

fn write_csv<W: Write>(postings: &[JobPosting], writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record(CSV_HEADER)?;
    for posting in postings {
        writer.write_record(csv_row(posting))?;
    }
    Ok(())
}

fn csv_row(posting: &JobPosting) -> Vec<String> {
    let canonical = posting.canonical.clone().unwrap_or_default();
    let classification = posting.classification.clone().unwrap_or_default();
    vec![
        posting.title.clone(),
        posting.company.clone(),
        posting.location.clone(),
        posting.description.clone(),
        posting.url.clone(),
        posting.source.clone(),
        posting.posted_date.clone(),
        posting.sponsored.to_string(),
        posting.experience_level.clone().unwrap_or_default(),
        canonical.canonical_title,
        canonical.canonical_company,
        canonical.canonical_url,
        classification.requires_us_citizenship.to_string(),
        classification.requires_security_clearance.to_string(),
        classification.is_sponsorship_friendly.to_string(),
        classification.is_f1_student_friendly.to_string(),
        classification.citizenship_score.to_string(),
        classification.sponsorship_score.to_string(),
        classification.remote_friendly.to_string(),
        posting.classification_tags.join("; "),
    ]
}

/// Write the enriched postings as a pretty-printed JSON array.
pub fn save_to_json(postings: &[JobPosting], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, postings)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;
    info!(count = postings.len(), path = %path.display(), "saved json export");
    Ok(())
}

/// Read a batch of raw postings from a scraper handoff file.
pub fn read_postings(path: &Path) -> Result<Vec<JobPosting>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open input file: {}", path.display()))?;
    let postings: Vec<JobPosting> = serde_json::from_reader(file)
        .with_context(|| format!("failed to parse postings from {}", path.display()))?;
    Ok(postings)
}

/// Resolve an export path inside `out_dir` using the default filename.
pub fn export_path(out_dir: &Path, category: JobCategory, extension: &str) -> PathBuf {
    out_dir.join(default_filename(category, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_posting;

    #[test]
    fn test_default_filename_shape() {
        let name = default_filename(JobCategory::Cybersecurity, "csv");
        assert!(name.starts_with("cybersecurity_jobs_"));
        assert!(name.ends_with(".csv"));

        let name = default_filename(JobCategory::SoftwareEngineering, "json");
        assert!(name.starts_with("software_engineering_jobs_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_csv_rows_match_header() {
        let mut posting = JobPosting::new(
            "Security Engineer",
            "Acme",
            "Remote",
            "https://example.com/job?jobId=42",
        );
        posting.description = "h1b sponsorship available".to_string();
        classify_posting(&mut posting);

        let mut writer = csv::Writer::from_writer(Vec::new());
        write_csv(std::slice::from_ref(&posting), &mut writer).unwrap();
        let bytes = writer.into_inner().unwrap();
        let output = String::from_utf8(bytes).unwrap();

        let mut lines = output.lines();
        let header = lines.next().unwrap();
        assert_eq!(header.split(',').count(), CSV_HEADER.len());
        let row = lines.next().unwrap();
        assert!(row.starts_with("Security Engineer,Acme,Remote"));
        assert!(row.contains("Sponsorship Friendly; F1 Student Friendly"));
    }

    #[test]
    fn test_csv_row_handles_unenriched_posting() {
        let posting = JobPosting::new("Engineer", "Acme", "NYC", "https://example.com");
        let row = csv_row(&posting);
        assert_eq!(row.len(), CSV_HEADER.len());
        assert_eq!(row[9], ""); // canonical_title empty until dedup runs
        assert_eq!(row[12], "false");
    }
}
