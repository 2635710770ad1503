//! JSON-file glue around the fieldwalk core.
//!
//! The extraction collaborator dumps field records and page tokens to JSON;
//! this binary runs the analysis or crosswalk over those files and writes
//! JSON reports for the persistence side. Everything fallible (reading,
//! parsing, writing) lives here, not in the library.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use fieldwalk::classify::{council_audit_spec, CategorySpec, Taxonomy};
use fieldwalk::crosswalk::{match_fields, Crosswalk};
use fieldwalk::models::{ContextToken, FieldRecord, TemplateReport};
use fieldwalk::pipeline::analyze_template;

#[derive(Parser)]
#[command(name = "fieldwalk", about = "Form-field crosswalk and purpose analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve nearby text and infer purposes for one template's fields.
    Analyze {
        /// JSON array of extracted field records
        #[arg(long)]
        fields: PathBuf,
        /// JSON array of positioned page tokens
        #[arg(long)]
        tokens: PathBuf,
        /// Taxonomy JSON (array of categories); defaults to the built-in
        /// council-audit rule table
        #[arg(long)]
        taxonomy: Option<PathBuf>,
        /// Search-window margin in page coordinate units
        #[arg(long, default_value_t = 20.0)]
        margin: f64,
        /// Output path; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Match fields between two template revisions by position.
    Crosswalk {
        /// JSON array of source-template field records
        #[arg(long)]
        source: PathBuf,
        /// JSON array of target-template field records
        #[arg(long)]
        target: PathBuf,
        /// Acceptance threshold in page coordinate units (required; scale
        /// and revision drift vary per document family)
        #[arg(long)]
        threshold: f64,
        /// Output path; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct AnalyzeOutput {
    generated_at: DateTime<Utc>,
    margin: f64,
    #[serde(flatten)]
    report: TemplateReport,
}

#[derive(Serialize)]
struct CrosswalkOutput {
    generated_at: DateTime<Utc>,
    threshold: f64,
    #[serde(flatten)]
    crosswalk: Crosswalk,
    /// Flat source → target map for form-filling tooling.
    name_map: std::collections::BTreeMap<String, String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            fields,
            tokens,
            taxonomy,
            margin,
            output,
        } => run_analyze(&fields, &tokens, taxonomy.as_deref(), margin, output.as_deref()),
        Command::Crosswalk {
            source,
            target,
            threshold,
            output,
        } => run_crosswalk(&source, &target, threshold, output.as_deref()),
    }
}

fn run_analyze(
    fields_path: &Path,
    tokens_path: &Path,
    taxonomy_path: Option<&Path>,
    margin: f64,
    output: Option<&Path>,
) -> Result<()> {
    let fields: Vec<FieldRecord> = read_json(fields_path)?;
    let tokens: Vec<ContextToken> = read_json(tokens_path)?;

    let specs: Vec<CategorySpec> = match taxonomy_path {
        Some(path) => read_json(path)?,
        None => council_audit_spec(),
    };
    let taxonomy = Taxonomy::new(&specs)
        .with_context(|| format!("unusable taxonomy ({} categories)", specs.len()))?;

    info!(
        "analyzing {} fields against {} tokens (margin {})",
        fields.len(),
        tokens.len(),
        margin
    );

    let report = analyze_template(&fields, &tokens, &taxonomy, margin);
    info!(
        "analyzed {} fields, {} skipped for rect issues",
        report.field_count(),
        report.skipped.len()
    );

    write_output(
        &AnalyzeOutput {
            generated_at: Utc::now(),
            margin,
            report,
        },
        output,
    )
}

fn run_crosswalk(
    source_path: &Path,
    target_path: &Path,
    threshold: f64,
    output: Option<&Path>,
) -> Result<()> {
    let source: Vec<FieldRecord> = read_json(source_path)?;
    let target: Vec<FieldRecord> = read_json(target_path)?;

    info!(
        "matching {} source fields against {} target fields (threshold {})",
        source.len(),
        target.len(),
        threshold
    );

    let crosswalk = match_fields(&source, &target, threshold)?;
    info!(
        "{} pairs accepted, {} source / {} target fields unmatched",
        crosswalk.pairs.len(),
        crosswalk.unmatched_source.len(),
        crosswalk.unmatched_target.len()
    );

    let name_map = crosswalk.name_map();
    write_output(
        &CrosswalkOutput {
            generated_at: Utc::now(),
            threshold,
            crosswalk,
            name_map,
        },
        output,
    )
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_output<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, serialized)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        None => println!("{}", serialized),
    }
    Ok(())
}
