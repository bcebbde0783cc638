// ABOUTME: System prompts for workout generation loaded at compile time
// ABOUTME: Selects the standard, rehabilitation, or stretching prompt by workout style
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

use fitflow_intelligence::WorkoutStyle;

/// Strength workout prompt restricting exercises to the requested muscles
pub const STANDARD_SYSTEM_PROMPT: &str = include_str!("standard.md");

/// Gentle rehabilitation prompt
pub const REHABILITATION_SYSTEM_PROMPT: &str = include_str!("rehabilitation.md");

/// Flexibility and mobility prompt
pub const STRETCHING_SYSTEM_PROMPT: &str = include_str!("stretching.md");

/// Get the system prompt for a workout style
#[must_use]
pub const fn system_prompt_for(style: WorkoutStyle) -> &'static str {
    match style {
        WorkoutStyle::Standard => STANDARD_SYSTEM_PROMPT,
        WorkoutStyle::Rehabilitation => REHABILITATION_SYSTEM_PROMPT,
        WorkoutStyle::Stretching => STRETCHING_SYSTEM_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prompt_requests_json() {
        for style in [
            WorkoutStyle::Standard,
            WorkoutStyle::Rehabilitation,
            WorkoutStyle::Stretching,
        ] {
            let prompt = system_prompt_for(style);
            assert!(prompt.contains("single JSON object"), "{style:?}");
            assert!(prompt.contains("chest, back, legs, shoulders, arms, core"));
        }
    }
}
