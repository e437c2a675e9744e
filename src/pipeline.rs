use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::category::JobCategory;
use crate::classify::{filter_citizenship_clearance, filter_f1_student_friendly};
use crate::dedup::{remove_duplicates, DEFAULT_SIMILARITY_THRESHOLD};
use crate::models::JobPosting;

/// Knobs for a single pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub exclude_citizenship_required: bool,
    pub f1_student: bool,
    pub similarity_threshold: f64,
    /// Extra search keywords that also count toward relevance.
    pub extra_keywords: String,
    pub skip_dedup: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            exclude_citizenship_required: false,
            f1_student: false,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            extra_keywords: String::new(),
            skip_dedup: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunStats {
    pub received: usize,
    pub relevant: usize,
    pub duplicates_removed: usize,
    pub excluded_citizenship: usize,
    pub excluded_f1: usize,
}

/// One pipeline invocation and its result. Owned by the caller; the next
/// run produces a fresh value rather than touching shared state.
#[derive(Debug, Clone, Serialize)]
pub struct JobRun {
    pub category: JobCategory,
    pub started_at: String,
    pub finished_at: String,
    pub stats: RunStats,
    pub postings: Vec<JobPosting>,
}

/// Run the full core pipeline over a batch of raw postings:
/// relevance filter → dedup (attaches canonical fields) → classification
/// with optional citizenship exclusion → optional F1 filter.
pub fn run(category: JobCategory, raw: Vec<JobPosting>, options: &RunOptions) -> JobRun {
    let started_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut stats = RunStats {
        received: raw.len(),
        ..RunStats::default()
    };

    let profile = category.profile();
    let relevant: Vec<JobPosting> = raw
        .into_iter()
        .filter(|p| profile.is_relevant_job(&p.title, &p.description, &options.extra_keywords))
        .collect();
    stats.relevant = relevant.len();
    info!(
        category = %category,
        received = stats.received,
        relevant = stats.relevant,
        "relevance filter applied"
    );

    let deduped = if options.skip_dedup {
        relevant
    } else {
        remove_duplicates(relevant, options.similarity_threshold)
    };
    stats.duplicates_removed = stats.relevant - deduped.len();

    let before_citizenship = deduped.len();
    let classified = filter_citizenship_clearance(deduped, options.exclude_citizenship_required);
    stats.excluded_citizenship = before_citizenship - classified.len();

    let before_f1 = classified.len();
    let postings = filter_f1_student_friendly(classified, options.f1_student);
    stats.excluded_f1 = before_f1 - postings.len();

    info!(unique = postings.len(), "pipeline run finished");

    JobRun {
        category,
        started_at,
        finished_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        stats,
        postings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, company: &str, description: &str) -> JobPosting {
        let mut p = JobPosting::new(title, company, "United States", "https://example.com/job");
        p.description = description.to_string();
        p
    }

    #[test]
    fn test_run_empty_batch() {
        let run = run(JobCategory::Cybersecurity, Vec::new(), &RunOptions::default());
        assert!(run.postings.is_empty());
        assert_eq!(run.stats.received, 0);
    }

    #[test]
    fn test_run_filters_dedups_and_classifies() {
        let raw = vec![
            posting("Security Engineer", "Acme Corp.", "Defend the perimeter"),
            posting("Security Engineer ", "ACME CORPORATION", "Same role, reposted"),
            posting("Barista", "Starbucks", "Make espresso drinks"),
            posting("SOC Analyst", "Beta LLC", "Remote, visa sponsorship available"),
        ];

        let run = run(JobCategory::Cybersecurity, raw, &RunOptions::default());

        assert_eq!(run.stats.received, 4);
        assert_eq!(run.stats.relevant, 3); // barista dropped
        assert_eq!(run.stats.duplicates_removed, 1);
        assert_eq!(run.postings.len(), 2);
        assert!(run.postings.iter().all(|p| p.classification.is_some()));
        assert!(run.postings.iter().all(|p| p.canonical.is_some()));
        // First-seen order preserved
        assert_eq!(run.postings[0].title, "Security Engineer");
        assert_eq!(run.postings[1].title, "SOC Analyst");
    }

    #[test]
    fn test_run_f1_filter() {
        let raw = vec![
            posting("Security Engineer", "Gov Co", "US citizens only, clearance required"),
            posting("SOC Analyst", "Beta", "Remote, h1b sponsorship welcome"),
        ];

        let options = RunOptions {
            f1_student: true,
            ..RunOptions::default()
        };
        let run = run(JobCategory::Cybersecurity, raw, &options);

        assert_eq!(run.postings.len(), 1);
        assert_eq!(run.postings[0].title, "SOC Analyst");
        assert_eq!(run.stats.excluded_f1, 1);
    }

    #[test]
    fn test_run_skip_dedup() {
        let raw = vec![
            posting("Security Engineer", "Acme", ""),
            posting("Security Engineer", "Acme", ""),
        ];

        let options = RunOptions {
            skip_dedup: true,
            ..RunOptions::default()
        };
        let run = run(JobCategory::Cybersecurity, raw, &options);
        assert_eq!(run.postings.len(), 2);
        assert_eq!(run.stats.duplicates_removed, 0);
    }
}
