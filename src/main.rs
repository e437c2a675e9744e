mod canonical;
mod category;
mod classify;
mod dedup;
mod export;
mod models;
mod pipeline;

use anyhow::Result;
use category::JobCategory;
use clap::{Parser, Subcommand, ValueEnum};
use dedup::DEFAULT_SIMILARITY_THRESHOLD;
use pipeline::RunOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobsift")]
#[command(about = "Filter, deduplicate and classify scraped job postings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over a batch of raw postings
    Run {
        /// JSON file with an array of raw postings (scraper handoff)
        input: PathBuf,

        /// Job category whose keyword tables to use
        #[arg(short, long, value_enum, default_value = "cybersecurity")]
        category: JobCategory,

        /// Drop postings that require US citizenship
        #[arg(long)]
        exclude_citizenship_required: bool,

        /// Keep only F1 student friendly postings
        #[arg(long)]
        f1_student: bool,

        /// Fuzzy-match similarity threshold (0-100)
        #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f64,

        /// Skip duplicate removal
        #[arg(long)]
        no_dedup: bool,

        /// Extra keywords that also count toward relevance
        #[arg(short, long, default_value = "")]
        keywords: String,

        /// Export format
        #[arg(short, long, value_enum, default_value = "both")]
        output: OutputFormat,

        /// Directory for export files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Classify a piece of job text without running the pipeline
    Classify {
        /// Job title and/or description text
        text: String,
    },

    /// Check whether a posting is relevant to a category
    Check {
        /// Job title
        title: String,

        /// Job description
        #[arg(default_value = "")]
        description: String,

        /// Job category whose keyword tables to use
        #[arg(short, long, value_enum, default_value = "cybersecurity")]
        category: JobCategory,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    Both,
    None,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            category,
            exclude_citizenship_required,
            f1_student,
            threshold,
            no_dedup,
            keywords,
            output,
            out_dir,
        } => {
            let raw = export::read_postings(&input)?;

            let options = RunOptions {
                exclude_citizenship_required,
                f1_student,
                similarity_threshold: threshold,
                extra_keywords: keywords,
                skip_dedup: no_dedup,
            };
            let run = pipeline::run(category, raw, &options);

            print_summary(&run);

            if output == OutputFormat::Csv || output == OutputFormat::Both {
                let path = export::export_path(&out_dir, category, "csv");
                export::save_to_csv(&run.postings, &path)?;
                println!("CSV export:  {}", path.display());
            }
            if output == OutputFormat::Json || output == OutputFormat::Both {
                let path = export::export_path(&out_dir, category, "json");
                export::save_to_json(&run.postings, &path)?;
                println!("JSON export: {}", path.display());
            }
        }

        Commands::Classify { text } => {
            let classification = classify::classify_citizenship_clearance(&text);
            println!("Requires US citizenship:    {}", classification.requires_us_citizenship);
            println!("Requires security clearance: {}", classification.requires_security_clearance);
            println!("Sponsorship friendly:       {}", classification.is_sponsorship_friendly);
            println!("F1 student friendly:        {}", classification.is_f1_student_friendly);
            println!("Remote friendly:            {}", classification.remote_friendly);
            println!("Citizenship score:          {}", classification.citizenship_score);
            println!("Sponsorship score:          {}", classification.sponsorship_score);
            let tags = classification.tags();
            if !tags.is_empty() {
                println!("Tags: {}", tags.join(", "));
            }
        }

        Commands::Check {
            title,
            description,
            category,
        } => {
            let relevant = category.profile().is_relevant_job(&title, &description, "");
            if relevant {
                println!("'{}' is relevant to {}", title, category);
            } else {
                println!("'{}' is NOT relevant to {}", title, category);
            }
        }
    }

    Ok(())
}

fn print_summary(run: &pipeline::JobRun) {
    println!("Category: {}", run.category);
    println!(
        "Received {} posting(s): {} relevant, {} duplicate(s) removed",
        run.stats.received, run.stats.relevant, run.stats.duplicates_removed
    );
    if run.stats.excluded_citizenship > 0 {
        println!("Excluded {} requiring citizenship", run.stats.excluded_citizenship);
    }
    if run.stats.excluded_f1 > 0 {
        println!("Excluded {} not F1 friendly", run.stats.excluded_f1);
    }
    println!();

    if run.postings.is_empty() {
        println!("No postings left after filtering.");
        return;
    }

    println!(
        "{:<30} {:<20} {:<18} {:<10} {}",
        "TITLE", "COMPANY", "LOCATION", "LEVEL", "TAGS"
    );
    println!("{}", "-".repeat(110));
    for posting in &run.postings {
        println!(
            "{:<30} {:<20} {:<18} {:<10} {}",
            truncate(&posting.title, 28),
            truncate(&posting.company, 18),
            truncate(&posting.location, 16),
            posting.experience_level.as_deref().unwrap_or("-"),
            posting.classification_tags.join(", ")
        );
    }
    println!("\nTotal unique jobs: {}", run.postings.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
