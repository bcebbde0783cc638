// ABOUTME: Builds chat requests for workout generation from a prompt and user preferences
// ABOUTME: Picks the system prompt by workout style and appends preference and count instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use fitflow_core::models::{MuscleGroup, Preferences, RequestedMuscleSet};
use fitflow_intelligence::RequestIntent;

use crate::config::GenerationConfig;
use crate::llm::prompts::system_prompt_for;
use crate::llm::{ChatMessage, ChatRequest, LlmCapabilities};

const LOW_IMPACT_INSTRUCTION: &str =
    "LOW IMPACT: avoid jumping, running, and explosive movements. Favour controlled, joint-friendly exercises.";

/// Assembles the chat request sent to the LLM for one workout prompt
#[derive(Debug, Clone, Copy)]
pub struct WorkoutPromptBuilder<'a> {
    generation: &'a GenerationConfig,
}

impl<'a> WorkoutPromptBuilder<'a> {
    /// Create a builder using the given generation settings
    #[must_use]
    pub const fn new(generation: &'a GenerationConfig) -> Self {
        Self { generation }
    }

    /// Build the request for a provider with the given capabilities
    ///
    /// Providers that return workout JSON themselves receive the raw prompt
    /// with preferences as metadata. Providers without system message support
    /// get the system prompt folded into the user message.
    #[must_use]
    pub fn build(
        &self,
        prompt: &str,
        preferences: &Preferences,
        intent: &RequestIntent,
        requested: &RequestedMuscleSet,
        capabilities: LlmCapabilities,
    ) -> ChatRequest {
        if capabilities.returns_workout_json() {
            let mut request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
            if !preferences.is_empty() {
                if let Ok(metadata) = serde_json::to_value(preferences) {
                    request = request.with_metadata(metadata);
                }
            }
            return request;
        }

        let system = self.system_prompt(preferences, intent);
        let user = user_message(prompt, requested);

        let messages = if capabilities.supports_system_messages() {
            vec![ChatMessage::system(system), ChatMessage::user(user)]
        } else {
            vec![ChatMessage::user(format!("{system}\n\n{user}"))]
        };

        let mut request = ChatRequest::new(messages)
            .with_temperature(self.generation.temperature)
            .with_max_tokens(self.generation.token_limit(intent.exercise_count));
        if capabilities.supports_json_mode() {
            request = request.with_json_mode();
        }
        request
    }

    /// System prompt for the detected style plus request-specific instructions
    #[must_use]
    pub fn system_prompt(&self, preferences: &Preferences, intent: &RequestIntent) -> String {
        let mut system = system_prompt_for(intent.style).trim_end().to_owned();

        let context = preference_context(preferences);
        if !context.is_empty() {
            system.push_str("\n\n");
            system.push_str(&context);
        }

        if intent.low_impact {
            system.push_str("\n\n");
            system.push_str(LOW_IMPACT_INSTRUCTION);
        }

        let _ = write!(
            system,
            "\n\nEXERCISE COUNT: provide exactly {} exercises.",
            intent.exercise_count
        );
        system
    }
}

/// Preference sections appended to the system prompt, empty when no preference is set
#[must_use]
pub fn preference_context(preferences: &Preferences) -> String {
    let mut sections = Vec::new();

    if !preferences.excluded_exercises.is_empty() {
        sections.push(format!(
            "EXCLUDED EXERCISES (never include these or their variations): {}",
            preferences.excluded_exercises.join(", ")
        ));
    }
    if !preferences.injuries.is_empty() {
        sections.push(format!(
            "INJURY LIMITATIONS (avoid anything that loads these areas): {}",
            preferences.injuries.join(", ")
        ));
    }
    if !preferences.available_equipment.is_empty() {
        sections.push(format!(
            "AVAILABLE EQUIPMENT (use only this equipment or bodyweight): {}",
            preferences.available_equipment.join(", ")
        ));
    }

    if sections.is_empty() {
        String::new()
    } else {
        format!("USER PREFERENCES:\n{}", sections.join("\n"))
    }
}

/// User message carrying the request and a muscle-focus reminder
#[must_use]
pub fn user_message(prompt: &str, requested: &RequestedMuscleSet) -> String {
    let reminder = if requested.is_empty() {
        "REMEMBER: only include exercises that match the request above.".to_owned()
    } else {
        let muscles: Vec<&str> = requested.iter().map(MuscleGroup::as_str).collect();
        format!(
            "REMEMBER: only include exercises for {}. No exercises for other muscle groups.",
            muscles.join(", ")
        )
    };
    format!("USER REQUEST: {}\n\n{reminder}", prompt.trim())
}
