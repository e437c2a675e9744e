use tracing::info;

use crate::models::{Classification, JobPosting};

// Citizenship/clearance signal phrases. Each phrase counts once toward the
// score when present anywhere in the lowercased text.
const CITIZENSHIP_SIGNALS: &[&str] = &[
    // Direct citizenship requirements
    "us citizen",
    "u.s. citizen",
    "united states citizen",
    "us citizenship",
    "u.s. citizenship",
    "united states citizenship",
    "must be a us citizen",
    "requires us citizenship",
    "us citizen only",
    "citizenship required",
    // Security clearance requirements
    "eligible for security clearance",
    "security clearance required",
    "security clearance",
    "government clearance",
    "public trust",
    "background check",
    "federal clearance",
    "defense clearance",
    "top secret",
    "secret clearance",
    "confidential clearance",
    "government contractor",
    "department of defense",
    "dod",
    "federal government",
    "national security",
    // Exclusion phrases
    "no sponsorship",
    "no visa sponsorship",
    "citizens only",
    "us citizens only",
    "must be us citizen",
];

// Sponsorship / OPT-CPT friendly signal phrases, disjoint from the above.
const SPONSORSHIP_SIGNALS: &[&str] = &[
    "sponsor",
    "sponsorship",
    "h1b",
    "h-1b",
    "visa sponsorship",
    "international",
    "global",
    "remote",
    "work from home",
    "f1",
    "opt",
    "cpt",
    "stem opt",
    "optional practical training",
    "diversity",
    "inclusive",
    "equal opportunity",
    "sponsor h1b",
    "h1b sponsorship",
    "visa support",
    "international candidates welcome",
    "global talent",
    "remote work",
    "work from anywhere",
];

// Narrow subset that flags a hard clearance requirement, checked
// independently of the citizenship score.
const CLEARANCE_SIGNALS: &[&str] = &[
    "security clearance",
    "government clearance",
    "top secret",
    "secret clearance",
];

// When one of these appears alongside a citizenship requirement, the posting
// is not sponsorship-friendly no matter what else matched.
const HARD_EXCLUSIONS: &[&str] = &["citizens only", "us citizens only", "no sponsorship"];

const REMOTE_SIGNALS: &[&str] = &["remote", "work from home", "telecommute", "distributed", "anywhere"];

const SENIOR_MARKERS: &[&str] = &["senior", "sr.", "lead", "principal", "staff"];
const ENTRY_MARKERS: &[&str] = &["junior", "jr.", "entry", "associate", "intern"];

/// Derive citizenship/clearance/sponsorship signals from free text.
/// Pure string containment; never fails, empty text yields all-false.
pub fn classify_citizenship_clearance(text: &str) -> Classification {
    let text_lower = text.to_lowercase();

    let citizenship_score = CITIZENSHIP_SIGNALS
        .iter()
        .filter(|signal| text_lower.contains(*signal))
        .count();
    let sponsorship_score = SPONSORSHIP_SIGNALS
        .iter()
        .filter(|signal| text_lower.contains(*signal))
        .count();

    let requires_us_citizenship = citizenship_score > 0;
    let mut is_sponsorship_friendly = sponsorship_score > 0;

    // Override order matters: an explicit exclusion phrase next to a
    // citizenship requirement wins over any positive sponsorship signal.
    if requires_us_citizenship
        && HARD_EXCLUSIONS.iter().any(|phrase| text_lower.contains(phrase))
    {
        is_sponsorship_friendly = false;
    }

    Classification {
        requires_us_citizenship,
        requires_security_clearance: CLEARANCE_SIGNALS
            .iter()
            .any(|signal| text_lower.contains(signal)),
        is_sponsorship_friendly,
        is_f1_student_friendly: is_sponsorship_friendly && !requires_us_citizenship,
        citizenship_score,
        sponsorship_score,
        remote_friendly: REMOTE_SIGNALS.iter().any(|signal| text_lower.contains(signal)),
    }
}

/// Classify a posting over its title + description, attach the result and
/// the derived tags, and fill in the experience level when the scraper did
/// not supply one.
pub fn classify_posting(posting: &mut JobPosting) {
    let full_text = format!("{} {}", posting.title, posting.description);
    let mut classification = classify_citizenship_clearance(&full_text);

    // Remote and seniority signals often live in the location field, so
    // those two read title + description + location. The citizenship and
    // sponsorship signals stay on title + description only.
    let context = format!("{} {}", full_text, posting.location);
    classification.remote_friendly = is_remote_friendly(&context);

    if posting.experience_level.is_none() {
        posting.experience_level = Some(infer_experience_level(&context).to_string());
    }

    posting.classification_tags = classification.tags();
    posting.classification = Some(classification);
}

fn is_remote_friendly(text: &str) -> bool {
    let text_lower = text.to_lowercase();
    REMOTE_SIGNALS.iter().any(|signal| text_lower.contains(signal))
}

fn infer_experience_level(text: &str) -> &'static str {
    let text_lower = text.to_lowercase();
    if SENIOR_MARKERS.iter().any(|marker| text_lower.contains(marker)) {
        "senior"
    } else if ENTRY_MARKERS.iter().any(|marker| text_lower.contains(marker)) {
        "entry"
    } else {
        "mid"
    }
}

/// Classify every posting, then drop the citizenship-required ones when the
/// flag is set. Without the flag all postings come back, classified.
pub fn filter_citizenship_clearance(
    mut postings: Vec<JobPosting>,
    exclude_citizenship_required: bool,
) -> Vec<JobPosting> {
    for posting in &mut postings {
        classify_posting(posting);
    }

    if !exclude_citizenship_required {
        return postings;
    }

    let before = postings.len();
    let filtered: Vec<JobPosting> = postings
        .into_iter()
        .filter(|posting| {
            posting
                .classification
                .as_ref()
                .is_some_and(|c| !c.requires_us_citizenship)
        })
        .collect();
    info!(
        removed = before - filtered.len(),
        "filtered out postings requiring citizenship"
    );
    filtered
}

/// Keep only postings already classified F1-friendly. Classification must
/// have run first; this does not re-derive it. Disabled ⇒ passthrough.
pub fn filter_f1_student_friendly(postings: Vec<JobPosting>, enabled: bool) -> Vec<JobPosting> {
    if !enabled {
        return postings;
    }

    let before = postings.len();
    let filtered: Vec<JobPosting> = postings
        .into_iter()
        .filter(|posting| {
            posting
                .classification
                .as_ref()
                .is_some_and(|c| c.is_f1_student_friendly)
        })
        .collect();
    info!(kept = filtered.len(), total = before, "applied F1 student filter");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobPosting;

    #[test]
    fn test_citizenship_override_beats_sponsorship_substring() {
        // "sponsorship" alone would score as a positive sponsorship signal,
        // but "no sponsorship" next to a citizenship phrase forces false
        let c = classify_citizenship_clearance("Must be a US Citizen, no sponsorship available");
        assert!(c.requires_us_citizenship);
        assert!(!c.is_sponsorship_friendly);
        assert!(!c.is_f1_student_friendly);
        assert!(c.citizenship_score > 0);
        // The base sponsorship score is nonzero, only the override flips it
        assert!(c.sponsorship_score > 0);
    }

    #[test]
    fn test_clearance_subset_checked_independently() {
        let c = classify_citizenship_clearance("Active Top Secret clearance needed");
        assert!(c.requires_security_clearance);
        assert!(c.requires_us_citizenship);

        // "dod" raises the citizenship score but is not in the clearance subset
        let c = classify_citizenship_clearance("DoD contractor experience a plus");
        assert!(c.requires_us_citizenship);
        assert!(!c.requires_security_clearance);
    }

    #[test]
    fn test_clearance_plus_remote_still_sponsorship_friendly() {
        // No hard-exclusion phrase present, so the "remote" signal keeps the
        // posting sponsorship-friendly even with a clearance requirement
        let c = classify_citizenship_clearance("Security clearance required. Fully remote team.");
        assert!(c.requires_us_citizenship);
        assert!(c.requires_security_clearance);
        assert!(c.is_sponsorship_friendly);
        // ...but F1 friendliness still needs the citizenship side clear
        assert!(!c.is_f1_student_friendly);
    }

    #[test]
    fn test_f1_friendly_posting() {
        let c = classify_citizenship_clearance("H1B sponsorship available, remote work welcome");
        assert!(!c.requires_us_citizenship);
        assert!(c.is_sponsorship_friendly);
        assert!(c.is_f1_student_friendly);
        assert!(c.remote_friendly);
    }

    #[test]
    fn test_empty_text_all_false() {
        let c = classify_citizenship_clearance("");
        assert!(!c.requires_us_citizenship);
        assert!(!c.requires_security_clearance);
        assert!(!c.is_sponsorship_friendly);
        assert!(!c.is_f1_student_friendly);
        assert_eq!(c.citizenship_score, 0);
        assert_eq!(c.sponsorship_score, 0);
    }

    #[test]
    fn test_scores_count_presence_per_phrase() {
        // "us citizen us citizen" matches each phrase once, not per occurrence
        let once = classify_citizenship_clearance("us citizen");
        let twice = classify_citizenship_clearance("us citizen and again us citizen");
        assert_eq!(once.citizenship_score, twice.citizenship_score);
    }

    #[test]
    fn test_tag_order_fixed() {
        let c = classify_citizenship_clearance(
            "US citizenship and security clearance required, but remote",
        );
        assert_eq!(
            c.tags(),
            vec![
                "US Citizenship Required".to_string(),
                "Security Clearance Required".to_string(),
                "Sponsorship Friendly".to_string(),
            ]
        );

        let c = classify_citizenship_clearance("h1b sponsorship, remote");
        assert_eq!(
            c.tags(),
            vec!["Sponsorship Friendly".to_string(), "F1 Student Friendly".to_string()]
        );
    }

    #[test]
    fn test_classify_posting_fills_experience_level() {
        let mut posting = JobPosting::new("Senior Security Engineer", "Acme", "Remote", "");
        classify_posting(&mut posting);
        assert_eq!(posting.experience_level.as_deref(), Some("senior"));

        let mut posting = JobPosting::new("Security Engineer", "Acme", "NYC", "");
        classify_posting(&mut posting);
        assert_eq!(posting.experience_level.as_deref(), Some("mid"));

        // A scraper-supplied level is left alone
        let mut posting = JobPosting::new("Senior Security Engineer", "Acme", "Remote", "");
        posting.experience_level = Some("entry".to_string());
        classify_posting(&mut posting);
        assert_eq!(posting.experience_level.as_deref(), Some("entry"));
    }

    #[test]
    fn test_classify_posting_reads_location_for_remote() {
        let mut posting = JobPosting::new("Security Engineer", "Acme", "Remote", "");
        classify_posting(&mut posting);
        let c = posting.classification.as_ref().unwrap();
        assert!(c.remote_friendly);
        // "remote" in the location does not leak into the sponsorship
        // signals, which only read title + description
        assert!(!c.is_sponsorship_friendly);

        let mut posting = JobPosting::new("Security Engineer", "Acme", "New York, NY", "");
        classify_posting(&mut posting);
        assert!(!posting.classification.as_ref().unwrap().remote_friendly);
    }

    #[test]
    fn test_classify_posting_reads_location_for_experience_level() {
        let mut posting = JobPosting::new("Security Engineer", "Acme", "Senior team, Austin TX", "");
        classify_posting(&mut posting);
        assert_eq!(posting.experience_level.as_deref(), Some("senior"));
    }

    #[test]
    fn test_filter_citizenship_classifies_all_even_without_flag() {
        let postings = vec![
            JobPosting::new("Engineer", "Acme", "NYC", ""),
            JobPosting::new("Analyst", "Beta", "DC", ""),
        ];
        let out = filter_citizenship_clearance(postings, false);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.classification.is_some()));
    }

    #[test]
    fn test_filter_citizenship_excludes_when_flagged() {
        let mut cleared = JobPosting::new("Analyst", "Gov Co", "DC", "");
        cleared.description = "US citizenship required".to_string();
        let open = JobPosting::new("Engineer", "Acme", "NYC", "");

        let out = filter_citizenship_clearance(vec![cleared, open], true);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Engineer");
    }

    #[test]
    fn test_filter_f1_student_friendly() {
        let mut friendly = JobPosting::new("Engineer", "Acme", "Remote", "");
        friendly.description = "visa sponsorship available".to_string();
        let mut neutral = JobPosting::new("Analyst", "Beta", "NYC", "");
        neutral.description = "on site role".to_string();
        let mut cleared = JobPosting::new("Analyst", "Gov Co", "DC", "");
        cleared.description = "US citizens only".to_string();

        let mut postings = vec![friendly, neutral, cleared];
        for posting in &mut postings {
            classify_posting(posting);
        }

        let all = filter_f1_student_friendly(postings.clone(), false);
        assert_eq!(all.len(), 3);

        let filtered = filter_f1_student_friendly(postings, true);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Engineer");
    }
}
