use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one system instruction and one user message, return the reply text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Offline client for `--dry-run` and tests.
pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
        if prompt.contains("extract all skills") {
            // Fenced on purpose: real models do this often
            Ok(r#"```json
{
  "skills": {
    "technical": {
      "programming_languages": ["Rust", "Python", "TypeScript"],
      "frameworks": ["Axum", "React"],
      "tools": ["Docker", "Git"],
      "databases": ["PostgreSQL"],
      "cloud_platforms": ["AWS"]
    },
    "soft_skills": ["Mentoring", "Technical Writing"],
    "domains": ["Distributed Systems"],
    "certifications": ["AWS Certified Solutions Architect"]
  },
  "experience_levels": {
    "Rust": "expert",
    "Python": "advanced"
  },
  "skill_relationships": [
    {"parent": "Rust", "child": "Axum", "type": "specialization"}
  ]
}
```"#
            .to_string())
        } else {
            Ok("{}".to_string())
        }
    }
}
