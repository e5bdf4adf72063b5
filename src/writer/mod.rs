//! Writes the skill tree as JSON and as a standalone HTML page.
//!
//! The page is a fixed asset (`template.html`, D3 collapsible tree) with a
//! single `SKILL_TREE_DATA` marker that receives the same JSON as the data
//! file.

use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::tree::SkillTreeNode;

pub const PLACEHOLDER: &str = "SKILL_TREE_DATA";

const DEFAULT_TEMPLATE: &str = include_str!("template.html");

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to serialize skill tree: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template must contain exactly one SKILL_TREE_DATA marker, found {0}")]
    Template(usize),
}

pub struct ArtifactWriter {
    template: Cow<'static, str>,
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self {
            template: Cow::Borrowed(DEFAULT_TEMPLATE),
        }
    }
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom page. It must contain the marker exactly once.
    pub fn with_template(template: String) -> Result<Self, WriteError> {
        let markers = template.matches(PLACEHOLDER).count();
        if markers != 1 {
            return Err(WriteError::Template(markers));
        }
        Ok(Self {
            template: Cow::Owned(template),
        })
    }

    /// Two-space indented JSON, non-ASCII kept as is.
    pub fn serialize_tree(tree: &SkillTreeNode) -> Result<String, WriteError> {
        Ok(serde_json::to_string_pretty(tree)?)
    }

    /// Substitute serialized tree JSON into the page.
    pub fn render_html(&self, tree_json: &str) -> String {
        self.template.replacen(PLACEHOLDER, &script_safe(tree_json), 1)
    }

    /// Write `json_path` then `html_path`. Parent directories must exist.
    pub fn write(
        &self,
        tree: &SkillTreeNode,
        json_path: &Path,
        html_path: &Path,
    ) -> Result<(), WriteError> {
        let json = Self::serialize_tree(tree)?;
        write_file(json_path, &json)?;
        debug!("Wrote {} bytes to {}", json.len(), json_path.display());

        let html = self.render_html(&json);
        write_file(html_path, &html)?;
        debug!("Wrote {} bytes to {}", html.len(), html_path.display());

        Ok(())
    }
}

/// Pretty-print any serializable value to `path`.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), WriteError> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, &json)
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    fs::write(path, contents).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `<` only occurs inside JSON strings, so `\u003c` keeps the literal valid
/// JSON and valid JavaScript while making `</script>` impossible.
fn script_safe(json: &str) -> Cow<'_, str> {
    if json.contains('<') {
        Cow::Owned(json.replace('<', "\\u003c"))
    } else {
        Cow::Borrowed(json)
    }
}
