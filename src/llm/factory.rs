use anyhow::{bail, Result};

use super::client::{Oracle, StubOracle};
use super::client_impl::{AnthropicClient, OpenAIClient};
use crate::config::Config;

/// Create an oracle client based on configuration.
///
/// This is the run's fail-closed gate: a missing API key or an unknown
/// provider is an error here, before any check has started.
pub fn create_client(config: &Config, dry_run: bool) -> Result<Box<dyn Oracle>> {
    if dry_run {
        return Ok(Box::new(StubOracle::new()));
    }

    let api_key = config.get_api_key()?;
    let max_tokens = config.llm.get_max_tokens();
    let timeout_secs = config.llm.timeout_secs;

    match config.llm.provider.as_str() {
        "anthropic" => Ok(Box::new(AnthropicClient::new(
            api_key,
            config.llm.model.clone(),
            max_tokens,
            timeout_secs,
        )?)),

        "openai" => Ok(Box::new(OpenAIClient::new(
            api_key,
            config.llm.model.clone(),
            max_tokens,
            timeout_secs,
        )?)),

        "openai-compatible" => {
            let base_url = config
                .llm
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());

            Ok(Box::new(OpenAIClient::with_base_url(
                api_key,
                config.llm.model.clone(),
                base_url,
                max_tokens,
                timeout_secs,
            )?))
        }

        unknown => bail!("Unknown LLM provider: {}", unknown),
    }
}
