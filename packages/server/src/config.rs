use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use review_rag::RagConfig;
use secrecy::SecretString;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub max_pages: usize,
    pub max_docs: usize,
    pub openai: OpenAISettings,
}

/// OpenAI credentials and model overrides.
#[derive(Debug)]
pub struct OpenAISettings {
    pub api_key: SecretString,
    pub chat_model: Option<String>,
    pub embedding_model: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port.trim().parse().context("PORT must be a valid number")?,
            None => 8080,
        };

        Ok(Self {
            port,
            max_pages: positive(&lookup, "REVIEWS_MAX_PAGES")?,
            max_docs: positive(&lookup, "VECTORSTORE_MAX_DOCS")?,
            openai: OpenAISettings::from_lookup(&lookup)?,
        })
    }

    /// Pipeline configuration with the model overrides applied.
    pub fn rag_config(&self) -> Result<RagConfig> {
        let rag = RagConfig::new(self.max_pages, self.max_docs)
            .context("Invalid pipeline configuration")?;
        Ok(self.openai.apply_models(rag))
    }
}

impl OpenAISettings {
    /// Load OpenAI settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("OPENAI_API_KEY must be set")?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            chat_model: optional(lookup, "OPENAI_CHAT_MODEL"),
            embedding_model: optional(lookup, "OPENAI_EMBEDDING_MODEL"),
            base_url: optional(lookup, "OPENAI_BASE_URL"),
        })
    }

    /// Override the chat and embedding models where set.
    pub fn apply_models(&self, mut rag: RagConfig) -> RagConfig {
        if let Some(model) = &self.chat_model {
            rag.completion.model = model.clone();
        }
        if let Some(model) = &self.embedding_model {
            rag.embedding_model = model.clone();
        }
        rag
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<usize> {
    let raw = lookup(key).with_context(|| format!("{key} must be set"))?;
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be a positive integer"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("OPENAI_API_KEY", "sk-test"),
        ("REVIEWS_MAX_PAGES", "5"),
        ("VECTORSTORE_MAX_DOCS", "20"),
    ];

    #[test]
    fn test_required_values_and_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.max_docs, 20);
        assert_eq!(config.openai.api_key.expose_secret(), "sk-test");
        assert!(config.openai.chat_model.is_none());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = Config::from_lookup(lookup(&REQUIRED[1..]));
        assert!(result.unwrap_err().to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_counts_must_be_positive_integers() {
        for bad in ["0", "-1", "five", ""] {
            let mut vars = REQUIRED.to_vec();
            vars[1] = ("REVIEWS_MAX_PAGES", bad);
            let result = Config::from_lookup(lookup(&vars));
            assert!(
                result.unwrap_err().to_string().contains("REVIEWS_MAX_PAGES"),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_model_overrides_reach_rag_config() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "3000"));
        vars.push(("OPENAI_CHAT_MODEL", "gpt-4o-mini"));
        vars.push(("OPENAI_EMBEDDING_MODEL", "text-embedding-3-small"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        let rag = config.rag_config().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(rag.completion.model, "gpt-4o-mini");
        assert_eq!(rag.embedding_model, "text-embedding-3-small");
        assert_eq!(rag.max_docs, 20);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert!(!format!("{config:?}").contains("sk-test"));
    }
}
