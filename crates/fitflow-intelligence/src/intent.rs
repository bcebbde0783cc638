// ABOUTME: Detects workout style and requested exercise count from a prompt
// ABOUTME: Drives system prompt selection and the completion token budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// First number directly followed by "exercise", e.g. "6 exercises"
static EXERCISE_COUNT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*exercise").ok());

const REHABILITATION_KEYWORDS: &[&str] = &["rehab", "recovery", "injury", "torn", "hurt", "pain"];
const STRETCHING_KEYWORDS: &[&str] = &["stretch", "flexibility", "mobility"];
const LOW_IMPACT_KEYWORDS: &[&str] = &["low impact", "low-impact", "gentle", "easy"];

/// Kind of session the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStyle {
    /// Regular strength session
    #[default]
    Standard,
    /// Injury rehabilitation or recovery work
    Rehabilitation,
    /// Stretching and mobility
    Stretching,
}

impl WorkoutStyle {
    /// Detect the style; rehabilitation wins over stretching
    #[must_use]
    pub fn detect(prompt: &str) -> Self {
        let prompt = prompt.to_lowercase();
        if contains_any(&prompt, REHABILITATION_KEYWORDS) {
            Self::Rehabilitation
        } else if contains_any(&prompt, STRETCHING_KEYWORDS) {
            Self::Stretching
        } else {
            Self::Standard
        }
    }

    /// Lowercase label for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Rehabilitation => "rehabilitation",
            Self::Stretching => "stretching",
        }
    }
}

impl fmt::Display for WorkoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the prompt says about the session besides muscle groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIntent {
    /// Session kind
    pub style: WorkoutStyle,
    /// Whether the user asked for low-impact work
    pub low_impact: bool,
    /// Number of exercises requested
    pub exercise_count: u32,
}

impl RequestIntent {
    /// Analyze a prompt, using `default_count` when no count is stated
    #[must_use]
    pub fn analyze(prompt: &str, default_count: u32) -> Self {
        Self {
            style: WorkoutStyle::detect(prompt),
            low_impact: contains_any(&prompt.to_lowercase(), LOW_IMPACT_KEYWORDS),
            exercise_count: requested_exercise_count(prompt).unwrap_or(default_count),
        }
    }
}

/// Exercise count stated in the prompt, if any
#[must_use]
pub fn requested_exercise_count(prompt: &str) -> Option<u32> {
    EXERCISE_COUNT_PATTERN
        .as_ref()?
        .captures(prompt)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_detection() {
        assert_eq!(WorkoutStyle::detect("Chest and back"), WorkoutStyle::Standard);
        assert_eq!(
            WorkoutStyle::detect("knee rehab routine"),
            WorkoutStyle::Rehabilitation
        );
        assert_eq!(
            WorkoutStyle::detect("Hip MOBILITY flow"),
            WorkoutStyle::Stretching
        );
    }

    #[test]
    fn test_rehabilitation_wins_over_stretching() {
        assert_eq!(
            WorkoutStyle::detect("stretching for shoulder pain"),
            WorkoutStyle::Rehabilitation
        );
    }

    #[test]
    fn test_exercise_count() {
        assert_eq!(requested_exercise_count("give me 6 exercises for legs"), Some(6));
        assert_eq!(requested_exercise_count("4exercise arm day"), Some(4));
        assert_eq!(requested_exercise_count("arm day"), None);
    }

    #[test]
    fn test_analyze_defaults_count() {
        let intent = RequestIntent::analyze("gentle back workout", 5);
        assert_eq!(intent.exercise_count, 5);
        assert!(intent.low_impact);
        assert_eq!(intent.style, WorkoutStyle::Standard);
    }
}
