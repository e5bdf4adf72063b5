use anyhow::Result;

use super::client::{LlmClient, MockLlmClient};
use super::client_impl::ChatCompletionsClient;
use crate::config::Config;

/// Create the classification client, if there is anything to call.
///
/// `Ok(None)` means no credential: the caller should classify offline.
/// `dry_run` always yields the mock client, with or without a key.
pub fn create_client(config: &Config, dry_run: bool) -> Result<Option<Box<dyn LlmClient>>> {
    if dry_run {
        return Ok(Some(Box::new(MockLlmClient::new())));
    }

    let Some(api_key) = config.get_api_key() else {
        return Ok(None);
    };

    let client = ChatCompletionsClient::new(
        api_key,
        config.llm.model.clone(),
        config.llm.base_url.clone(),
        config.llm.temperature,
        config.llm.timeout_secs,
    )?;

    Ok(Some(Box::new(client)))
}
