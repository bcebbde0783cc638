// ABOUTME: Test utilities shared by generator and route integration tests
// ABOUTME: Scripted LLM provider, exercise fixtures, and server resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fitflow::config::ServerConfig;
use fitflow::errors::AppError;
use fitflow::intelligence::Ruleset;
use fitflow::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use fitflow::models::ExerciseCandidate;
use fitflow::server::ServerResources;
use serde_json::{json, Value};

/// Canned answer returned by [`ScriptedProvider`]
#[derive(Clone)]
pub enum Script {
    /// Respond with this completion text
    Reply(String),
    /// Fail as if the upstream were unreachable
    Unavailable,
}

/// LLM provider returning a fixed answer and recording every request
pub struct ScriptedProvider {
    script: Script,
    capabilities: LlmCapabilities,
    healthy: bool,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn replying(content: impl Into<String>) -> Self {
        Self::new(Script::Reply(content.into()))
    }

    pub fn unavailable() -> Self {
        let mut provider = Self::new(Script::Unavailable);
        provider.healthy = false;
        provider
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            capabilities: LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE,
            healthy: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn with_capabilities(mut self, capabilities: LlmCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Script::Unavailable => Err(AppError::external_unavailable(
                "Scripted",
                "connection refused",
            )),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        if self.healthy {
            Ok(true)
        } else {
            Err(AppError::external_unavailable("Scripted", "connection refused"))
        }
    }
}

/// Exercise with neutral sets, reps, and weight
pub fn exercise(name: &str) -> ExerciseCandidate {
    ExerciseCandidate::new(name, 3, "10", "Moderate", "")
}

/// Model-style workout JSON with the given exercise names
pub fn workout_json(name: &str, muscles: &[&str], exercises: &[&str]) -> Value {
    json!({
        "name": name,
        "muscles": muscles,
        "exercises": exercises
            .iter()
            .map(|e| json!({
                "name": e,
                "sets": 3,
                "reps": "8-10",
                "weight": "Moderate",
                "description": "Controlled tempo"
            }))
            .collect::<Vec<_>>(),
        "description": "Model generated session"
    })
}

/// Builtin ruleset shared by tests
pub fn ruleset() -> Arc<Ruleset> {
    Arc::new(Ruleset::builtin().unwrap())
}

/// Server resources with default configuration around `provider`
#[allow(dead_code)]
pub fn resources_with(provider: Arc<dyn LlmProvider>) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_provider(
        ServerConfig::default(),
        ruleset(),
        provider,
    ))
}
