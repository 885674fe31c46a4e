use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Models with a known energy profile, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModel {
    #[serde(rename = "codex")]
    Codex,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "gpt-5-mini")]
    Gpt5Mini,
    #[serde(rename = "gpt-5")]
    Gpt5,
    #[serde(rename = "gpt-5-codex")]
    Gpt5Codex,
    #[serde(rename = "o3-mini")]
    O3Mini,
    #[serde(rename = "o4-mini")]
    O4Mini,
    #[serde(rename = "claude-sonnet-3.5")]
    ClaudeSonnet35,
    #[serde(rename = "claude-sonnet-3.7")]
    ClaudeSonnet37,
    #[serde(rename = "claude-sonnet-3.7-thinking")]
    ClaudeSonnet37Thinking,
    #[serde(rename = "claude-sonnet-4")]
    ClaudeSonnet4,
    #[serde(rename = "claude-sonnet-4.5")]
    ClaudeSonnet45,
    #[serde(rename = "gemini-2.0-flash")]
    Gemini2Flash,
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,
    #[serde(rename = "grok-code-fast-1")]
    GrokCodeFast1,
}

pub const DEFAULT_MODEL: AiModel = AiModel::Gpt4o;

impl AiModel {
    pub fn spec(self) -> &'static ModelSpec {
        // Variants are declared in the same order as MODEL_SPECS.
        &MODEL_SPECS[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.spec().id_str
    }
}

impl Default for AiModel {
    fn default() -> Self {
        DEFAULT_MODEL
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AiModel {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MODEL_SPECS
            .iter()
            .find(|spec| spec.id_str == value)
            .map(|spec| spec.id)
            .ok_or_else(|| ParseError::UnknownModel(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelProvider {
    OpenAI,
    Anthropic,
    Google,
    #[serde(rename = "xAI")]
    XAi,
}

impl ModelProvider {
    pub fn name(self) -> &'static str {
        match self {
            ModelProvider::OpenAI => "OpenAI",
            ModelProvider::Anthropic => "Anthropic",
            ModelProvider::Google => "Google",
            ModelProvider::XAi => "xAI",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelProvider {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PROVIDERS
            .into_iter()
            .find(|provider| provider.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::UnknownProvider(value.to_string()))
    }
}

/// Display order for provider groups.
pub const PROVIDERS: [ModelProvider; 4] = [
    ModelProvider::OpenAI,
    ModelProvider::Anthropic,
    ModelProvider::Google,
    ModelProvider::XAi,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub id: AiModel,
    #[serde(skip)]
    id_str: &'static str,
    pub provider: ModelProvider,
    pub name: &'static str,
    pub description: &'static str,
    /// kWh per 1000 tokens.
    pub energy_per_1k_tokens: f64,
    pub average_tokens_per_suggestion: u64,
    pub release_date: &'static str,
    pub features: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

impl ModelSpec {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(&feature)
    }
}

/// Entry for model pickers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOption {
    pub label: &'static str,
    pub model: AiModel,
    pub description: &'static str,
    pub provider: ModelProvider,
}

pub static MODEL_SPECS: [ModelSpec; 19] = [
    ModelSpec {
        id: AiModel::Codex,
        id_str: "codex",
        provider: ModelProvider::OpenAI,
        name: "Codex",
        description: "Original GitHub Copilot (GPT-3 based)",
        energy_per_1k_tokens: 0.0004,
        average_tokens_per_suggestion: 50,
        release_date: "2021-06",
        features: &["code-completion"],
        notes: Some("Legacy model, still used by some older Copilot versions"),
    },
    ModelSpec {
        id: AiModel::Gpt35Turbo,
        id_str: "gpt-3.5-turbo",
        provider: ModelProvider::OpenAI,
        name: "GPT-3.5 Turbo",
        description: "GitHub Copilot (GPT-3.5-turbo)",
        energy_per_1k_tokens: 0.0006,
        average_tokens_per_suggestion: 75,
        release_date: "2023-03",
        features: &["code-completion", "chat"],
        notes: Some("Common default for many Copilot users"),
    },
    ModelSpec {
        id: AiModel::Gpt4,
        id_str: "gpt-4",
        provider: ModelProvider::OpenAI,
        name: "GPT-4",
        description: "GitHub Copilot Chat (GPT-4)",
        energy_per_1k_tokens: 0.0015,
        average_tokens_per_suggestion: 150,
        release_date: "2023-03",
        features: &["code-completion", "chat", "reasoning"],
        notes: Some("Higher capability but higher energy cost"),
    },
    ModelSpec {
        id: AiModel::Gpt4Turbo,
        id_str: "gpt-4-turbo",
        provider: ModelProvider::OpenAI,
        name: "GPT-4 Turbo",
        description: "GitHub Copilot (GPT-4 Turbo)",
        energy_per_1k_tokens: 0.0012,
        average_tokens_per_suggestion: 150,
        release_date: "2023-11",
        features: &["code-completion", "chat", "reasoning", "vision"],
        notes: Some("More efficient than GPT-4"),
    },
    ModelSpec {
        id: AiModel::Gpt4o,
        id_str: "gpt-4o",
        provider: ModelProvider::OpenAI,
        name: "GPT-4o",
        description: "GitHub Copilot (GPT-4o - Omni)",
        energy_per_1k_tokens: 0.0010,
        average_tokens_per_suggestion: 120,
        release_date: "2024-05",
        features: &["code-completion", "chat", "multimodal"],
        notes: Some("Optimized for speed and efficiency"),
    },
    ModelSpec {
        id: AiModel::Gpt41,
        id_str: "gpt-4.1",
        provider: ModelProvider::OpenAI,
        name: "GPT-4.1",
        description: "GitHub Copilot (GPT-4.1)",
        energy_per_1k_tokens: 0.0011,
        average_tokens_per_suggestion: 130,
        release_date: "2024-10",
        features: &["code-completion", "chat", "reasoning", "vision"],
        notes: Some("Incremental improvement over GPT-4o"),
    },
    ModelSpec {
        id: AiModel::Gpt5Mini,
        id_str: "gpt-5-mini",
        provider: ModelProvider::OpenAI,
        name: "GPT-5 Mini",
        description: "Lightweight GPT-5 variant",
        energy_per_1k_tokens: 0.0008,
        average_tokens_per_suggestion: 100,
        release_date: "2025-01",
        features: &["code-completion", "chat", "fast-inference"],
        notes: Some("Balanced performance and efficiency"),
    },
    ModelSpec {
        id: AiModel::Gpt5,
        id_str: "gpt-5",
        provider: ModelProvider::OpenAI,
        name: "GPT-5",
        description: "Next-generation GPT model",
        energy_per_1k_tokens: 0.0018,
        average_tokens_per_suggestion: 200,
        release_date: "2025-03",
        features: &["code-completion", "chat", "advanced-reasoning", "multimodal"],
        notes: Some("Estimated - most capable but energy intensive"),
    },
    ModelSpec {
        id: AiModel::Gpt5Codex,
        id_str: "gpt-5-codex",
        provider: ModelProvider::OpenAI,
        name: "GPT-5 Codex",
        description: "Code-specialized GPT-5",
        energy_per_1k_tokens: 0.0014,
        average_tokens_per_suggestion: 180,
        release_date: "2025-04",
        features: &["code-completion", "code-analysis", "debugging"],
        notes: Some("Estimated - optimized for coding tasks"),
    },
    ModelSpec {
        id: AiModel::O3Mini,
        id_str: "o3-mini",
        provider: ModelProvider::OpenAI,
        name: "o3-mini",
        description: "Lightweight reasoning model",
        energy_per_1k_tokens: 0.0009,
        average_tokens_per_suggestion: 90,
        release_date: "2024-12",
        features: &["reasoning", "problem-solving", "code-completion"],
        notes: Some("Efficient reasoning for coding tasks"),
    },
    ModelSpec {
        id: AiModel::O4Mini,
        id_str: "o4-mini",
        provider: ModelProvider::OpenAI,
        name: "o4-mini",
        description: "Advanced compact reasoning model",
        energy_per_1k_tokens: 0.0010,
        average_tokens_per_suggestion: 100,
        release_date: "2025-02",
        features: &["advanced-reasoning", "code-completion", "debugging"],
        notes: Some("Enhanced reasoning capabilities"),
    },
    ModelSpec {
        id: AiModel::ClaudeSonnet35,
        id_str: "claude-sonnet-3.5",
        provider: ModelProvider::Anthropic,
        name: "Claude Sonnet 3.5",
        description: "Anthropic Claude 3.5 Sonnet",
        energy_per_1k_tokens: 0.0008,
        average_tokens_per_suggestion: 110,
        release_date: "2024-06",
        features: &["code-completion", "chat", "analysis"],
        notes: Some("Balanced performance and efficiency"),
    },
    ModelSpec {
        id: AiModel::ClaudeSonnet37,
        id_str: "claude-sonnet-3.7",
        provider: ModelProvider::Anthropic,
        name: "Claude Sonnet 3.7",
        description: "Anthropic Claude 3.7 Sonnet",
        energy_per_1k_tokens: 0.0009,
        average_tokens_per_suggestion: 120,
        release_date: "2024-09",
        features: &["code-completion", "chat", "advanced-analysis"],
        notes: Some("Improved coding capabilities"),
    },
    ModelSpec {
        id: AiModel::ClaudeSonnet37Thinking,
        id_str: "claude-sonnet-3.7-thinking",
        provider: ModelProvider::Anthropic,
        name: "Claude Sonnet 3.7 Thinking",
        description: "Claude 3.7 with extended thinking",
        energy_per_1k_tokens: 0.0013,
        average_tokens_per_suggestion: 180,
        release_date: "2024-10",
        features: &["deep-reasoning", "code-analysis", "problem-solving"],
        notes: Some("Extended reasoning for complex problems"),
    },
    ModelSpec {
        id: AiModel::ClaudeSonnet4,
        id_str: "claude-sonnet-4",
        provider: ModelProvider::Anthropic,
        name: "Claude Sonnet 4",
        description: "Anthropic Claude 4 Sonnet",
        energy_per_1k_tokens: 0.0010,
        average_tokens_per_suggestion: 130,
        release_date: "2024-12",
        features: &["code-completion", "chat", "multimodal", "reasoning"],
        notes: Some("Next-generation Claude model"),
    },
    ModelSpec {
        id: AiModel::ClaudeSonnet45,
        id_str: "claude-sonnet-4.5",
        provider: ModelProvider::Anthropic,
        name: "Claude Sonnet 4.5",
        description: "Anthropic Claude 4.5 Sonnet",
        energy_per_1k_tokens: 0.0011,
        average_tokens_per_suggestion: 140,
        release_date: "2025-01",
        features: &["advanced-coding", "reasoning", "analysis", "multimodal"],
        notes: Some("State-of-the-art coding assistant"),
    },
    ModelSpec {
        id: AiModel::Gemini2Flash,
        id_str: "gemini-2.0-flash",
        provider: ModelProvider::Google,
        name: "Gemini 2.0 Flash",
        description: "Google Gemini 2.0 Flash",
        energy_per_1k_tokens: 0.0007,
        average_tokens_per_suggestion: 95,
        release_date: "2024-12",
        features: &["code-completion", "fast-inference", "multimodal"],
        notes: Some("Optimized for speed"),
    },
    ModelSpec {
        id: AiModel::Gemini25Pro,
        id_str: "gemini-2.5-pro",
        provider: ModelProvider::Google,
        name: "Gemini 2.5 Pro",
        description: "Google Gemini 2.5 Pro",
        energy_per_1k_tokens: 0.0016,
        average_tokens_per_suggestion: 170,
        release_date: "2025-02",
        features: &["advanced-coding", "reasoning", "multimodal", "long-context"],
        notes: Some("Most capable Gemini model"),
    },
    ModelSpec {
        id: AiModel::GrokCodeFast1,
        id_str: "grok-code-fast-1",
        provider: ModelProvider::XAi,
        name: "Grok Code Fast 1",
        description: "xAI Grok Code Fast",
        energy_per_1k_tokens: 0.0009,
        average_tokens_per_suggestion: 105,
        release_date: "2024-11",
        features: &["code-completion", "fast-inference", "real-time"],
        notes: Some("Optimized for speed and real-time coding"),
    },
];

pub fn model_spec(model: AiModel) -> &'static ModelSpec {
    model.spec()
}

pub fn all_models() -> &'static [ModelSpec] {
    &MODEL_SPECS
}

pub fn models_by_provider(provider: ModelProvider) -> Vec<&'static ModelSpec> {
    MODEL_SPECS
        .iter()
        .filter(|spec| spec.provider == provider)
        .collect()
}

pub fn models_by_feature(feature: &str) -> Vec<&'static ModelSpec> {
    MODEL_SPECS
        .iter()
        .filter(|spec| spec.has_feature(feature))
        .collect()
}

pub fn available_models() -> Vec<ModelOption> {
    MODEL_SPECS
        .iter()
        .map(|spec| ModelOption {
            label: spec.name,
            model: spec.id,
            description: spec.description,
            provider: spec.provider,
        })
        .collect()
}

pub fn model_energy(model: AiModel) -> f64 {
    model.spec().energy_per_1k_tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_table_matches_variant_order() {
        for (index, spec) in MODEL_SPECS.iter().enumerate() {
            assert_eq!(spec.id as usize, index, "{} out of order", spec.id_str);
            assert_eq!(spec.id.spec().id_str, spec.id_str);
        }
    }

    #[test]
    fn id_strings_match_serde_names() {
        for spec in all_models() {
            let json = serde_json::to_string(&spec.id).expect("serialize");
            assert_eq!(json, format!("\"{}\"", spec.id_str));
            assert_eq!(spec.id_str.parse::<AiModel>().expect("parse"), spec.id);
        }
    }

    #[test]
    fn unknown_model_id_is_a_parse_error() {
        let err = "gpt-0".parse::<AiModel>().unwrap_err();
        assert_eq!(err, ParseError::UnknownModel("gpt-0".to_string()));
    }

    #[test]
    fn default_model_is_gpt_4o() {
        assert_eq!(AiModel::default(), AiModel::Gpt4o);
        assert_eq!(AiModel::default().id(), "gpt-4o");
        assert_eq!(model_energy(AiModel::default()), 0.0010);
    }

    #[test]
    fn provider_filter_preserves_registration_order() {
        let anthropic: Vec<_> = models_by_provider(ModelProvider::Anthropic)
            .into_iter()
            .map(|spec| spec.id)
            .collect();
        assert_eq!(
            anthropic,
            vec![
                AiModel::ClaudeSonnet35,
                AiModel::ClaudeSonnet37,
                AiModel::ClaudeSonnet37Thinking,
                AiModel::ClaudeSonnet4,
                AiModel::ClaudeSonnet45,
            ]
        );
        let grouped: usize = PROVIDERS
            .into_iter()
            .map(|provider| models_by_provider(provider).len())
            .sum();
        assert_eq!(grouped, all_models().len());
    }

    #[test]
    fn feature_filter_matches_tags() {
        let long_context: Vec<_> = models_by_feature("long-context")
            .into_iter()
            .map(|spec| spec.id)
            .collect();
        assert_eq!(long_context, vec![AiModel::Gemini25Pro]);
        assert!(models_by_feature("no-such-tag").is_empty());
        let fast = models_by_feature("fast-inference");
        assert_eq!(fast.first().map(|spec| spec.id), Some(AiModel::Gpt5Mini));
    }

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("xai".parse::<ModelProvider>(), Ok(ModelProvider::XAi));
        assert_eq!("OpenAI".parse::<ModelProvider>(), Ok(ModelProvider::OpenAI));
        assert!("Mistral".parse::<ModelProvider>().is_err());
    }

    #[test]
    fn available_models_lists_every_spec() {
        let options = available_models();
        assert_eq!(options.len(), 19);
        assert_eq!(options[0].label, "Codex");
        assert_eq!(options[18].provider, ModelProvider::XAi);
    }
}
