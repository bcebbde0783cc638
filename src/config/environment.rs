// ABOUTME: Environment configuration for the workout service
// ABOUTME: Parses network, LLM provider, generation, and post-processing settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration. Every tunable the pipeline uses is read
//! here once and passed down explicitly.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use fitflow_core::constants::{env_config, generation, network, post_processing};
use fitflow_core::errors::{AppError, AppResult, ErrorCode};
use fitflow_intelligence::PostProcessorConfig;
use tracing::info;

use super::types::LlmProviderType;

/// Upstream LLM connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Selected backend
    pub provider: LlmProviderType,
    /// Ollama server base URL
    pub ollama_base_url: String,
    /// Ollama model name
    pub ollama_model: String,
    /// `OpenAI`-compatible base URL
    pub local_base_url: String,
    /// `OpenAI`-compatible model name
    pub local_model: String,
    /// Optional bearer key for the `OpenAI`-compatible endpoint
    pub local_api_key: Option<String>,
    /// Remote workout endpoint for the `workout-api` provider
    pub workout_api_url: Option<String>,
    /// Model identifier for the `bedrock` provider
    pub bedrock_model_id: Option<String>,
    /// AWS region for the `bedrock` provider
    pub bedrock_region: String,
    /// Request timeout; `None` leaves the HTTP client default in place
    pub request_timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::default(),
            ollama_base_url: network::DEFAULT_OLLAMA_BASE_URL.to_owned(),
            ollama_model: generation::DEFAULT_MODEL.to_owned(),
            local_base_url: network::DEFAULT_OPENAI_COMPATIBLE_BASE_URL.to_owned(),
            local_model: generation::DEFAULT_MODEL.to_owned(),
            local_api_key: None,
            workout_api_url: None,
            bedrock_model_id: None,
            bedrock_region: network::DEFAULT_BEDROCK_REGION.to_owned(),
            request_timeout: None,
        }
    }
}

/// Prompt and sampling settings for workout generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Exercises requested when the prompt names no count
    pub default_exercise_count: u32,
    /// Floor for the completion token budget
    pub min_token_limit: u32,
    /// Budgeted tokens per requested exercise
    pub tokens_per_exercise: u32,
    /// Fixed token overhead for the workout envelope
    pub token_overhead: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_exercise_count: generation::DEFAULT_EXERCISE_COUNT,
            min_token_limit: generation::MIN_TOKEN_LIMIT,
            tokens_per_exercise: generation::TOKENS_PER_EXERCISE,
            token_overhead: generation::TOKEN_OVERHEAD,
            temperature: generation::DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationConfig {
    /// Completion token budget for a requested exercise count
    #[must_use]
    pub fn token_limit(&self, exercise_count: u32) -> u32 {
        exercise_count
            .saturating_mul(self.tokens_per_exercise)
            .saturating_add(self.token_overhead)
            .max(self.min_token_limit)
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Upstream LLM settings
    pub llm: LlmConfig,
    /// Prompt and sampling settings
    pub generation: GenerationConfig,
    /// Filtering and fallback settings
    pub post_processing: PostProcessorConfig,
    /// Optional muscle lexicon override file
    pub lexicon_path: Option<PathBuf>,
    /// Comma-separated allowed CORS origins, `*` for any
    pub cors_allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_HOST.to_owned(),
            http_port: network::DEFAULT_HTTP_PORT,
            llm: LlmConfig::default(),
            generation: GenerationConfig::default(),
            post_processing: PostProcessorConfig::default(),
            lexicon_path: None,
            cors_allowed_origins: "*".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or a value
    /// is outside its accepted range
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let defaults = Self::default();
        let config = Self {
            host: env_var_or(env_config::HOST, &defaults.host),
            http_port: env_parse(env_config::HTTP_PORT, defaults.http_port)?,
            llm: LlmConfig {
                provider: LlmProviderType::from_env(),
                ollama_base_url: env_var_or(
                    env_config::OLLAMA_BASE_URL,
                    &defaults.llm.ollama_base_url,
                ),
                ollama_model: env_var_or(env_config::OLLAMA_MODEL, &defaults.llm.ollama_model),
                local_base_url: env_var_or(
                    env_config::LOCAL_LLM_BASE_URL,
                    &defaults.llm.local_base_url,
                ),
                local_model: env_var_or(env_config::LOCAL_LLM_MODEL, &defaults.llm.local_model),
                local_api_key: env_var_opt(env_config::LOCAL_LLM_API_KEY),
                workout_api_url: env_var_opt(env_config::WORKOUT_API_URL),
                bedrock_model_id: env_var_opt(env_config::BEDROCK_MODEL_ID),
                bedrock_region: env_var_or(env_config::REGION, &defaults.llm.bedrock_region),
                request_timeout: env_var_opt(env_config::LLM_TIMEOUT_SECS)
                    .map(|raw| parse_value(env_config::LLM_TIMEOUT_SECS, &raw))
                    .transpose()?
                    .map(Duration::from_secs),
            },
            generation: GenerationConfig {
                default_exercise_count: env_parse(
                    env_config::DEFAULT_EXERCISE_COUNT,
                    defaults.generation.default_exercise_count,
                )?,
                temperature: env_parse(env_config::TEMPERATURE, defaults.generation.temperature)?,
                ..defaults.generation
            },
            post_processing: PostProcessorConfig {
                min_viable_exercises: env_parse(
                    env_config::MIN_EXERCISES,
                    defaults.post_processing.min_viable_exercises,
                )?,
                fallback_exercise_cap: env_parse(
                    env_config::FALLBACK_CAP,
                    defaults.post_processing.fallback_exercise_cap,
                )?,
            },
            lexicon_path: env_var_opt(env_config::LEXICON_PATH).map(PathBuf::from),
            cors_allowed_origins: env_var_or(
                env_config::CORS_ALLOWED_ORIGINS,
                &defaults.cors_allowed_origins,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for unusable values
    pub fn validate(&self) -> AppResult<()> {
        if self.post_processing.min_viable_exercises == 0 {
            return Err(out_of_range(env_config::MIN_EXERCISES, "must be at least 1"));
        }
        if self.post_processing.fallback_exercise_cap < self.post_processing.min_viable_exercises {
            return Err(out_of_range(
                env_config::FALLBACK_CAP,
                "must not be below the minimum exercise count",
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(out_of_range(env_config::TEMPERATURE, "must be between 0.0 and 2.0"));
        }
        if self.generation.default_exercise_count == 0 {
            return Err(out_of_range(
                env_config::DEFAULT_EXERCISE_COUNT,
                "must be at least 1",
            ));
        }
        if self.llm.provider == LlmProviderType::WorkoutApi && self.llm.workout_api_url.is_none() {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                format!(
                    "{} is required when {}=workout-api",
                    env_config::WORKOUT_API_URL,
                    LlmProviderType::ENV_VAR
                ),
            ));
        }
        if self.llm.provider == LlmProviderType::Bedrock && self.llm.bedrock_model_id.is_none() {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                format!(
                    "{} is required when {}=bedrock",
                    env_config::BEDROCK_MODEL_ID,
                    LlmProviderType::ENV_VAR
                ),
            ));
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env_var_opt(key).unwrap_or_else(|| default.to_owned())
}

fn env_var_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    env_var_opt(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| {
        AppError::config_invalid(format!("{key} has invalid value '{raw}': {e}"))
    })
}

fn out_of_range(key: &str, reason: &str) -> AppError {
    AppError::new(ErrorCode::ValueOutOfRange, format!("{key} {reason}"))
}
