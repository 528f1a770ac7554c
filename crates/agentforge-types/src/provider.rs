//! LLM provider selection.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The five LLM vendors a menu can be generated with.
///
/// Wire names are lowercase: `openai`, `huggingface`, `github`, `litellm`,
/// `openrouter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    HuggingFace,
    Github,
    LiteLlm,
    OpenRouter,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::OpenAi,
        ProviderKind::HuggingFace,
        ProviderKind::Github,
        ProviderKind::LiteLlm,
        ProviderKind::OpenRouter,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::Github => "github",
            ProviderKind::LiteLlm => "litellm",
            ProviderKind::OpenRouter => "openrouter",
        }
    }

    /// Display name used in the UI provider picker.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::HuggingFace => "Hugging Face",
            ProviderKind::Github => "GitHub (Models)",
            ProviderKind::LiteLlm => "LiteLLM",
            ProviderKind::OpenRouter => "OpenRouter",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "invalid provider '{}': expected one of openai, huggingface, github, litellm, openrouter",
                    s.trim()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" litellm ".parse::<ProviderKind>().unwrap(), ProviderKind::LiteLlm);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = "anthropic".parse::<ProviderKind>().unwrap_err();
        assert!(err.contains("anthropic"));
        assert!("".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_serde_matches_display() {
        for kind in ProviderKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
