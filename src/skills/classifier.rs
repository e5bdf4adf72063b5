use std::fmt;
use tracing::{debug, warn};

use super::keywords::keyword_classify;
use super::record::SkillRecord;
use crate::llm::client::LlmClient;
use crate::llm::prompts;
use crate::util::{extract_json_block, preview};

/// Why the keyword table was used instead of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key configured, or remote classification disabled
    NoCredential,
    /// Transport error, timeout, or non-success status
    RemoteFailed(String),
    /// The model answered but not with JSON matching the schema
    InvalidResponse(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoCredential => write!(f, "no API key configured"),
            FallbackReason::RemoteFailed(e) => write!(f, "remote call failed: {}", e),
            FallbackReason::InvalidResponse(e) => write!(f, "unparsable response: {}", e),
        }
    }
}

/// Outcome of classification. Callers that only need the record use
/// [`Classification::into_record`]; the variant says which path ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Remote(SkillRecord),
    Fallback {
        record: SkillRecord,
        reason: FallbackReason,
    },
}

impl Classification {
    pub fn record(&self) -> &SkillRecord {
        match self {
            Classification::Remote(record) => record,
            Classification::Fallback { record, .. } => record,
        }
    }

    pub fn into_record(self) -> SkillRecord {
        match self {
            Classification::Remote(record) => record,
            Classification::Fallback { record, .. } => record,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Classification::Remote(_))
    }

    pub fn source(&self) -> &'static str {
        match self {
            Classification::Remote(_) => "remote",
            Classification::Fallback { .. } => "keyword-fallback",
        }
    }
}

pub struct SkillClassifier {
    client: Option<Box<dyn LlmClient>>,
}

impl SkillClassifier {
    /// `None` means no credential: every call goes straight to the keyword table.
    pub fn new(client: Option<Box<dyn LlmClient>>) -> Self {
        Self { client }
    }

    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn has_remote(&self) -> bool {
        self.client.is_some()
    }

    /// Classify resume text. Never fails: every remote problem degrades to
    /// the keyword table, which runs at most once per call.
    pub async fn classify(&self, text: &str) -> Classification {
        let Some(client) = &self.client else {
            return Classification::Fallback {
                record: keyword_classify(text),
                reason: FallbackReason::NoCredential,
            };
        };

        let user_prompt = prompts::skill_extraction_prompt(text);
        let content = match client
            .complete(prompts::SYSTEM_INSTRUCTION, &user_prompt)
            .await
        {
            Ok(content) => content,
            Err(e) => {
                warn!("Error calling classification API: {:#}", e);
                return Classification::Fallback {
                    record: keyword_classify(text),
                    reason: FallbackReason::RemoteFailed(format!("{:#}", e)),
                };
            }
        };

        let json = extract_json_block(&content);
        match SkillRecord::from_json(&json) {
            Ok(record) => {
                debug!(
                    "Model returned {} technical skills in {} categories",
                    record.technical_skill_count(),
                    record.technical.len()
                );
                Classification::Remote(record)
            }
            Err(e) => {
                warn!("Error parsing JSON response: {}", e);
                warn!("Response content: {}", preview(&content, 500));
                Classification::Fallback {
                    record: keyword_classify(text),
                    reason: FallbackReason::InvalidResponse(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::MockLlmClient;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FixedClient(Result<String, String>);

    #[async_trait]
    impl LlmClient for FixedClient {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
            self.0.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    const RESUME: &str = "Senior engineer: Rust, Python, Docker, React";

    #[tokio::test]
    async fn test_no_client_uses_keywords() {
        let classifier = SkillClassifier::offline();
        let result = classifier.classify(RESUME).await;
        assert_eq!(
            result,
            Classification::Fallback {
                record: keyword_classify(RESUME),
                reason: FallbackReason::NoCredential,
            }
        );
        assert!(!result.is_remote());
    }

    #[tokio::test]
    async fn test_remote_success() {
        let classifier = SkillClassifier::new(Some(Box::new(MockLlmClient::new())));
        let result = classifier.classify(RESUME).await;
        assert!(result.is_remote());
        assert_eq!(result.source(), "remote");
        assert!(!result.record().soft_skills.is_empty());
    }

    #[tokio::test]
    async fn test_fenced_response_is_accepted() {
        let body = "```json\n{\"skills\": {\"domains\": [\"Fintech\"]}}\n```".to_string();
        let classifier = SkillClassifier::new(Some(Box::new(FixedClient(Ok(body)))));
        let record = classifier.classify(RESUME).await.into_record();
        assert_eq!(record.domains, vec!["Fintech"]);
    }

    #[tokio::test]
    async fn test_transport_error_falls_back() {
        let classifier =
            SkillClassifier::new(Some(Box::new(FixedClient(Err("connection reset".into())))));
        match classifier.classify(RESUME).await {
            Classification::Fallback { record, reason } => {
                assert_eq!(record, keyword_classify(RESUME));
                assert!(matches!(reason, FallbackReason::RemoteFailed(ref m) if m.contains("connection reset")));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let classifier = SkillClassifier::new(Some(Box::new(FixedClient(Ok(
            "I could not find any skills.".to_string(),
        )))));
        match classifier.classify(RESUME).await {
            Classification::Fallback { record, reason } => {
                assert_eq!(record, keyword_classify(RESUME));
                assert!(matches!(reason, FallbackReason::InvalidResponse(_)));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch_does_not_leak_partial_data() {
        // valid JSON, invalid level: nothing from the reply may survive
        let body = r#"{"skills": {"soft_skills": ["Negotiation"]}, "experience_levels": {"Rust": "wizard"}}"#;
        let classifier =
            SkillClassifier::new(Some(Box::new(FixedClient(Ok(body.to_string())))));
        let record = classifier.classify(RESUME).await.into_record();
        assert!(record.soft_skills.is_empty());
        assert_eq!(record, keyword_classify(RESUME));
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(FallbackReason::NoCredential.to_string(), "no API key configured");
        assert!(FallbackReason::RemoteFailed("HTTP 500".into())
            .to_string()
            .contains("HTTP 500"));
    }
}
