use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::extractor::TextExtractor;
use crate::skills::{Classification, SkillClassifier};
use crate::tree::{self, SkillTreeNode};
use crate::writer::ArtifactWriter;

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

impl OutputPaths {
    pub fn new(json: impl Into<PathBuf>, html: impl Into<PathBuf>) -> Self {
        Self {
            json: json.into(),
            html: html.into(),
        }
    }
}

#[derive(Debug)]
pub struct PipelineReport {
    pub text_chars: usize,
    pub classification: Classification,
    pub tree: SkillTreeNode,
}

/// Extract -> classify -> build -> write, strictly in that order.
pub struct Pipeline {
    extractor: TextExtractor,
    classifier: SkillClassifier,
    writer: ArtifactWriter,
}

impl Pipeline {
    pub fn new(extractor: TextExtractor, classifier: SkillClassifier) -> Self {
        Self {
            extractor,
            classifier,
            writer: ArtifactWriter::default(),
        }
    }

    pub fn with_writer(mut self, writer: ArtifactWriter) -> Self {
        self.writer = writer;
        self
    }

    pub async fn run(&self, pdf_path: &Path, outputs: &OutputPaths) -> Result<PipelineReport> {
        println!("Extracting text from {}...", pdf_path.display());
        let text = self.extractor.extract(pdf_path)?;
        let text_chars = text.chars().count();
        println!("Extracted {} characters from PDF", text_chars);

        if self.classifier.has_remote() {
            println!("Analyzing resume with remote model...");
        } else {
            println!("No API key found, using fallback extraction...");
        }
        let classification = self.classifier.classify(&text).await;
        if let Classification::Fallback { reason, .. } = &classification {
            if self.classifier.has_remote() {
                println!("Remote analysis failed ({}), used keyword fallback", reason);
            }
        }
        info!(
            "Classification source: {}, {} technical skills",
            classification.source(),
            classification.record().technical_skill_count()
        );

        println!("Building skill tree structure...");
        let tree = tree::build(classification.record());

        self.writer
            .write(&tree, &outputs.json, &outputs.html)
            .context("failed to write skill tree artifacts")?;
        println!("Saved skill tree JSON to {}", outputs.json.display());
        println!("Generated HTML visualization: {}", outputs.html.display());

        Ok(PipelineReport {
            text_chars,
            classification,
            tree,
        })
    }
}
