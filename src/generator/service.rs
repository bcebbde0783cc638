// ABOUTME: Workout generation service tying the LLM call to post-processing and fallback
// ABOUTME: Never fails; upstream or parse errors degrade to a deterministic fallback workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use fitflow_core::errors::AppError;
use fitflow_core::models::{Preferences, Workout};
use fitflow_intelligence::{PostProcessorConfig, RequestIntent, Ruleset, WorkoutPostProcessor};
use tracing::{debug, instrument};

use super::prompt_builder::WorkoutPromptBuilder;
use super::response_parser::parse_workout_response;
use crate::config::GenerationConfig;
use crate::llm::LlmProvider;
use crate::logging::AppLogger;

/// Why the fallback generator produced the workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The provider could not be reached or answered with an error status
    UpstreamUnavailable,
    /// The provider answered, but no workout could be parsed from the output
    MalformedOutput,
    /// Filtering removed every exercise and top-up could not replace any
    EmptyAfterFiltering,
}

impl FallbackReason {
    /// Stable identifier used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::MalformedOutput => "malformed_output",
            Self::EmptyAfterFiltering => "empty_after_filtering",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a returned workout came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutSource {
    /// Model output after post-processing
    Generated,
    /// Static fallback table
    Fallback(FallbackReason),
}

impl WorkoutSource {
    /// Value of the `x-workout-source` response header
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Fallback(_) => "fallback",
        }
    }

    /// Whether the fallback generator produced the workout
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Result of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutOutcome {
    /// Final workout returned to the caller
    pub workout: Workout,
    /// Where it came from
    pub source: WorkoutSource,
}

/// Prompt in, workout out
///
/// One LLM call per request, no retries. Every failure mode ends in a
/// fallback workout rather than an error.
#[derive(Clone)]
pub struct WorkoutGenerator {
    provider: Arc<dyn LlmProvider>,
    ruleset: Arc<Ruleset>,
    generation: GenerationConfig,
    post_processing: PostProcessorConfig,
}

impl WorkoutGenerator {
    /// Create a generator
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        ruleset: Arc<Ruleset>,
        generation: GenerationConfig,
        post_processing: PostProcessorConfig,
    ) -> Self {
        Self {
            provider,
            ruleset,
            generation,
            post_processing,
        }
    }

    /// Upstream provider
    #[must_use]
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Ruleset used for filtering and fallback
    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Generate a workout for `prompt`
    #[instrument(skip(self, preferences), fields(provider = self.provider.name()))]
    pub async fn generate(&self, prompt: &str, preferences: &Preferences) -> WorkoutOutcome {
        let started = Instant::now();
        let processor = WorkoutPostProcessor::new(&self.ruleset, self.post_processing);

        let outcome = match self.request_workout(prompt, preferences).await {
            Ok(raw) => {
                let workout = processor.process(raw, prompt, preferences);
                if workout.exercises.is_empty() {
                    self.fallback(
                        &processor,
                        prompt,
                        preferences,
                        FallbackReason::EmptyAfterFiltering,
                        "no exercise survived filtering",
                    )
                } else {
                    WorkoutOutcome {
                        workout,
                        source: WorkoutSource::Generated,
                    }
                }
            }
            Err((reason, error)) => {
                self.fallback(&processor, prompt, preferences, reason, &error.to_string())
            }
        };

        AppLogger::log_workout_generated(
            outcome.source.as_str(),
            &outcome.workout.muscles,
            outcome.workout.exercise_count(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        outcome
    }

    async fn request_workout(
        &self,
        prompt: &str,
        preferences: &Preferences,
    ) -> Result<Workout, (FallbackReason, AppError)> {
        let intent = RequestIntent::analyze(prompt, self.generation.default_exercise_count);
        let requested = self.ruleset.classifier().classify(prompt);
        debug!(
            style = %intent.style,
            low_impact = intent.low_impact,
            exercise_count = intent.exercise_count,
            requested = ?requested.as_slice(),
            "Analyzed workout request"
        );

        let request = WorkoutPromptBuilder::new(&self.generation).build(
            prompt,
            preferences,
            &intent,
            &requested,
            self.provider.capabilities(),
        );

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| (FallbackReason::UpstreamUnavailable, e))?;

        parse_workout_response(&response.content).map_err(|e| (FallbackReason::MalformedOutput, e))
    }

    fn fallback(
        &self,
        processor: &WorkoutPostProcessor<'_>,
        prompt: &str,
        preferences: &Preferences,
        reason: FallbackReason,
        details: &str,
    ) -> WorkoutOutcome {
        AppLogger::log_fallback(reason.as_str(), self.provider.name(), details);
        WorkoutOutcome {
            workout: processor.fallback(prompt, preferences),
            source: WorkoutSource::Fallback(reason),
        }
    }
}
