use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::extractor::TextExtractor;
use crate::llm::factory;
use crate::pipeline::{OutputPaths, Pipeline, PipelineReport};
use crate::skills::SkillClassifier;
use crate::writer;

/// Everything the `generate` subcommand accepts.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub pdf: String,
    pub json_output: Option<String>,
    pub html_output: Option<String>,
    pub config: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub offline: bool,
    pub dry_run: bool,
    pub save_record: Option<String>,
    pub open: bool,
}

/// Apply CLI overrides on top of the loaded config.
pub fn apply_overrides(config: &mut Config, opts: &GenerateOptions) {
    if let Some(ref model) = opts.model {
        info!("CLI override: model = {}", model);
        config.llm.model = model.clone();
    }
    if let Some(ref base_url) = opts.base_url {
        info!("CLI override: base_url = {}", base_url);
        config.llm.base_url = base_url.clone();
    }
    if let Some(timeout) = opts.timeout {
        info!("CLI override: timeout = {}s", timeout);
        config.llm.timeout_secs = timeout;
    }
    if let Some(ref path) = opts.json_output {
        config.output.json_path = path.clone();
    }
    if let Some(ref path) = opts.html_output {
        config.output.html_path = path.clone();
    }
}

/// Returns `Ok(None)` when the input PDF does not exist; nothing is written then.
pub async fn run(opts: GenerateOptions) -> Result<Option<PipelineReport>> {
    let pdf_path = Path::new(&opts.pdf);
    if !pdf_path.exists() {
        println!("Error: Resume PDF not found at {}", opts.pdf);
        return Ok(None);
    }

    let mut config = Config::load_with_path(opts.config.as_deref())?;
    apply_overrides(&mut config, &opts);

    let client = if opts.offline && !opts.dry_run {
        info!("Offline mode: skipping remote classification");
        None
    } else {
        factory::create_client(&config, opts.dry_run)?
    };
    if opts.dry_run {
        info!("Using mock LLM client");
    } else if client.is_some() {
        info!("Using model {} at {}", config.llm.model, config.llm.base_url);
    }

    let extractor = TextExtractor::default();
    info!("Extraction backends: {:?}", extractor.backend_names());

    let pipeline = Pipeline::new(extractor, SkillClassifier::new(client));
    let outputs = OutputPaths::new(&config.output.json_path, &config.output.html_path);
    let report = pipeline.run(pdf_path, &outputs).await?;

    if let Some(ref record_path) = opts.save_record {
        let record = SavedRecord {
            source: report.classification.source(),
            record: report.classification.record(),
        };
        writer::write_json(&record, Path::new(record_path))?;
        println!("Saved classified skill record to {}", record_path);
    }

    println!(
        "\nSkill tree generated successfully! ({} skills)",
        report.tree.skill_count()
    );
    println!(
        "Open {} in your browser to view the visualization",
        outputs.html.display()
    );

    if opts.open {
        open_in_browser(&outputs.html);
    }

    Ok(Some(report))
}

#[derive(serde::Serialize)]
struct SavedRecord<'a> {
    source: &'static str,
    #[serde(flatten)]
    record: &'a crate::skills::SkillRecord,
}

fn open_in_browser(path: &Path) {
    let target: PathBuf = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if let Err(e) = open::that(&target) {
        warn!("Could not open {} in a browser: {}", target.display(), e);
    }
}
