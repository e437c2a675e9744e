use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target job category. Each category carries its own keyword and title
/// tables; the matching logic below is category-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Cybersecurity,
    SoftwareEngineering,
}

impl JobCategory {
    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            JobCategory::Cybersecurity => &CYBERSECURITY,
            JobCategory::SoftwareEngineering => &SOFTWARE_ENGINEERING,
        }
    }

    /// Slug used in export filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            JobCategory::Cybersecurity => "cybersecurity",
            JobCategory::SoftwareEngineering => "software_engineering",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobCategory::Cybersecurity => write!(f, "cybersecurity"),
            JobCategory::SoftwareEngineering => write!(f, "software engineering"),
        }
    }
}

/// Keyword/title tables for one category. All entries lowercase; matching is
/// plain substring containment.
pub struct CategoryProfile {
    pub keywords: &'static [&'static str],
    pub job_titles: &'static [&'static str],
}

impl CategoryProfile {
    /// True when any category keyword or job-title phrase appears anywhere
    /// in the combined title + description + extra keywords.
    pub fn is_relevant_job(&self, title: &str, description: &str, extra_keywords: &str) -> bool {
        let text = format!("{title} {description} {extra_keywords}").to_lowercase();

        self.keywords.iter().any(|keyword| text.contains(keyword))
            || self.job_titles.iter().any(|job_title| text.contains(job_title))
    }
}

static CYBERSECURITY: CategoryProfile = CategoryProfile {
    keywords: &[
        "cybersecurity",
        "cyber security",
        "information security",
        "infosec",
        "security engineer",
        "security analyst",
        "penetration tester",
        "pen tester",
        "security consultant",
        "soc analyst",
        "incident response",
        "threat hunter",
        "vulnerability assessment",
        "risk assessment",
        "compliance",
        "audit",
        "firewall",
        "intrusion detection",
        "siem",
        "threat intelligence",
        "malware analysis",
        "forensics",
        "cryptography",
        "identity management",
        "access control",
        "security architecture",
        "security operations",
        "threat modeling",
        "security testing",
        "ethical hacking",
        "security clearance",
        "cissp",
        "cism",
        "cisa",
        "ceh",
        "gsec",
        // Junior-level variants
        "junior security",
        "entry level security",
        "associate security",
        "trainee security",
        "security trainee",
        "security intern",
        "cybersecurity intern",
        "security apprentice",
        "level 1 security",
        "l1 security",
        "security associate",
        "junior analyst",
        "entry level analyst",
        "associate analyst",
        "security coordinator",
        "security assistant",
    ],
    job_titles: &[
        "security engineer",
        "security analyst",
        "cybersecurity engineer",
        "information security analyst",
        "security consultant",
        "penetration tester",
        "security architect",
        "soc analyst",
        "soc engineer",
        "soc manager",
        "incident response analyst",
        "threat intelligence analyst",
        "malware analyst",
        "security operations analyst",
        "vulnerability analyst",
        "compliance analyst",
        "risk analyst",
        "security auditor",
        "forensics analyst",
        "threat hunter",
        "chief information security officer",
        "security administrator",
        "security specialist",
        "security coordinator",
        "security technician",
        "cybersecurity specialist",
        "junior security engineer",
        "junior security analyst",
        "junior soc analyst",
        "entry level security analyst",
        "associate security engineer",
    ],
};

static SOFTWARE_ENGINEERING: CategoryProfile = CategoryProfile {
    keywords: &[
        "software engineer",
        "software developer",
        "programmer",
        "developer",
        "full stack",
        "frontend",
        "backend",
        "web developer",
        "mobile developer",
        "python",
        "javascript",
        "java",
        "react",
        "angular",
        "vue",
        "node.js",
        "machine learning",
        "artificial intelligence",
        "data science",
        "data engineer",
        "devops",
        "cloud engineer",
        "aws",
        "azure",
        "kubernetes",
        "docker",
        "microservices",
        "api",
        "rest",
        "graphql",
        "database",
        "sql",
        "nosql",
        "agile",
        "scrum",
        "git",
        "ci/cd",
        "jenkins",
        "terraform",
        "ansible",
        "system design",
        "architecture",
        "scalability",
        "performance",
    ],
    job_titles: &[
        "software engineer",
        "software developer",
        "senior software engineer",
        "lead software engineer",
        "principal software engineer",
        "staff software engineer",
        "distinguished software engineer",
        "software architect",
        "tech lead",
        "full stack developer",
        "frontend developer",
        "backend developer",
        "web developer",
        "mobile developer",
        "ios developer",
        "android developer",
        "data engineer",
        "ml engineer",
        "devops engineer",
        "cloud engineer",
        "junior software engineer",
        "entry level software engineer",
    ],
};
