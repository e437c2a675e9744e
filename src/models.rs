use serde::{Deserialize, Serialize};

/// A raw job posting as handed over by an upstream scraper adapter.
///
/// Only `title`, `company`, `location` and `url` are required on input;
/// everything else defaults to empty. The pipeline enriches a posting in
/// place with canonical fields and a classification and never mutates it
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub source: String, // "indeed", "linkedin", "manual", etc.
    #[serde(default)]
    pub posted_date: String,
    #[serde(default)]
    pub sponsored: bool,
    #[serde(default)]
    pub experience_level: Option<String>, // "entry", "mid", "senior"

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<CanonicalFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classification_tags: Vec<String>,
}

impl JobPosting {
    /// Build a posting from the required raw fields, everything else empty.
    pub fn new(title: &str, company: &str, location: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            description: String::new(),
            url: url.to_string(),
            source: String::new(),
            posted_date: String::new(),
            sponsored: false,
            experience_level: None,
            canonical: None,
            classification: None,
            classification_tags: Vec::new(),
        }
    }
}

/// Normalized comparison keys derived from the raw fields.
/// Canonicalization is idempotent and infallible; malformed input degrades
/// to an empty string (or, for URLs, the original value).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalFields {
    pub canonical_title: String,
    pub canonical_company: String,
    pub canonical_url: String,
}

/// Citizenship/clearance/sponsorship signals derived from title+description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    pub requires_us_citizenship: bool,
    pub requires_security_clearance: bool,
    pub is_sponsorship_friendly: bool,
    pub is_f1_student_friendly: bool,
    pub citizenship_score: usize,
    pub sponsorship_score: usize,
    pub remote_friendly: bool,
}

impl Classification {
    /// Human-readable tags in fixed order, include-if-true.
    pub fn tags(&self) -> Vec<String> {
        let mut tags = Vec::new();
        if self.requires_us_citizenship {
            tags.push("US Citizenship Required".to_string());
        }
        if self.requires_security_clearance {
            tags.push("Security Clearance Required".to_string());
        }
        if self.is_sponsorship_friendly {
            tags.push("Sponsorship Friendly".to_string());
        }
        if self.is_f1_student_friendly {
            tags.push("F1 Student Friendly".to_string());
        }
        tags
    }
}
