use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

use crate::models::CanonicalFields;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

// Legal-entity suffixes stripped from company names. Whole words only,
// optional trailing period, longest variants first so the alternation
// prefers "limited liability company" over "limited" or "company".
static COMPANY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:gesellschaft mit beschränkter haftung|limited liability partnership|limited liability company|public limited company|aktiengesellschaft|incorporated|corporation|company|limited|gmbh|corp|llc|llp|plc|ltd|inc|ag|co)\b\.?",
    )
    .expect("valid regex")
});

/// Query-string keys that carry tracking state rather than job identity.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "fbclid",
    "msclkid",
    "ref",
    "source",
    "campaign",
    "clickid",
    "affiliate",
    "partner",
    "referrer",
];

/// Keys containing any of these substrings are always kept, even when the
/// full key sits on the tracking list.
const JOB_PARAM_HINTS: &[&str] = &["job", "id", "req", "position", "posting"];

/// Lowercase, replace punctuation with spaces, collapse whitespace, trim.
/// Idempotent; empty input yields an empty string.
pub fn canonicalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lowered = text.to_lowercase();
    let no_punct = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&no_punct, " ").trim().to_string()
}

/// Strip legal-entity suffixes from a company name, then normalize it.
pub fn canonicalize_company(company: &str) -> String {
    if company.is_empty() {
        return String::new();
    }
    let lowered = company.to_lowercase();
    let stripped = COMPANY_SUFFIX.replace_all(&lowered, "");
    canonicalize_text(&stripped)
}

/// Drop tracking query parameters from a URL while preserving anything that
/// looks like a job identifier. Fails open: any parse problem returns the
/// original string unchanged.
pub fn canonicalize_url(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(e) => {
            warn!(url = raw, error = %e, "failed to canonicalize url, keeping original");
            return raw.to_string();
        }
    };
    let Some(host) = parsed.host_str() else {
        warn!(url = raw, "url has no host, keeping original");
        return raw.to_string();
    };

    let mut canonical = match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, parsed.path()),
        None => format!("{}://{}{}", parsed.scheme(), host, parsed.path()),
    };

    if let Some(query) = parsed.query() {
        let mut seen: HashSet<String> = HashSet::new();
        let mut surviving: Vec<&str> = Vec::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let key = pair.split('=').next().unwrap_or(pair);
            let key_lower = key.to_lowercase();

            // First value per key wins.
            if !seen.insert(key_lower.clone()) {
                continue;
            }

            let job_related = JOB_PARAM_HINTS.iter().any(|hint| key_lower.contains(hint));
            if job_related || !TRACKING_PARAMS.contains(&key_lower.as_str()) {
                surviving.push(pair);
            }
        }

        if !surviving.is_empty() {
            canonical.push('?');
            canonical.push_str(&surviving.join("&"));
        }
    }

    canonical
}

/// Derive all three canonical fields for a posting's raw values.
pub fn canonical_fields(title: &str, company: &str, url: &str) -> CanonicalFields {
    CanonicalFields {
        canonical_title: canonicalize_text(title),
        canonical_company: canonicalize_company(company),
        canonical_url: canonicalize_url(url),
    }
}
