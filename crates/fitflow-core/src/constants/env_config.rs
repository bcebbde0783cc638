// ABOUTME: Environment variable names read by the configuration layer
// ABOUTME: Centralized so docs, tests, and config parsing agree on spelling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bind address
pub const HOST: &str = "HOST";
/// HTTP port
pub const HTTP_PORT: &str = "FITFLOW_HTTP_PORT";
/// Provider selection: `ollama`, `local`, `workout-api`, or `bedrock`
pub const LLM_PROVIDER: &str = "FITFLOW_LLM_PROVIDER";
/// Optional upstream request timeout in seconds
pub const LLM_TIMEOUT_SECS: &str = "FITFLOW_LLM_TIMEOUT_SECS";
/// Ollama server base URL
pub const OLLAMA_BASE_URL: &str = "OLLAMA_BASE_URL";
/// Ollama model name
pub const OLLAMA_MODEL: &str = "OLLAMA_MODEL";
/// OpenAI-compatible endpoint base URL
pub const LOCAL_LLM_BASE_URL: &str = "LOCAL_LLM_BASE_URL";
/// OpenAI-compatible model name
pub const LOCAL_LLM_MODEL: &str = "LOCAL_LLM_MODEL";
/// Optional bearer key for the OpenAI-compatible endpoint
pub const LOCAL_LLM_API_KEY: &str = "LOCAL_LLM_API_KEY";
/// Remote workout endpoint for the `workout-api` provider
pub const WORKOUT_API_URL: &str = "WORKOUT_API_URL";
/// Bedrock model identifier for the `bedrock` provider
pub const BEDROCK_MODEL_ID: &str = "BEDROCK_MODEL_ID";
/// AWS region for the `bedrock` provider
pub const REGION: &str = "REGION";
/// Minimum viable exercise count
pub const MIN_EXERCISES: &str = "FITFLOW_MIN_EXERCISES";
/// Fallback workout exercise cap
pub const FALLBACK_CAP: &str = "FITFLOW_FALLBACK_CAP";
/// Exercise count when the prompt names none
pub const DEFAULT_EXERCISE_COUNT: &str = "FITFLOW_DEFAULT_EXERCISE_COUNT";
/// Sampling temperature
pub const TEMPERATURE: &str = "FITFLOW_TEMPERATURE";
/// Optional path to a muscle lexicon JSON file
pub const LEXICON_PATH: &str = "FITFLOW_LEXICON_PATH";
/// Comma-separated allowed CORS origins
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
