// ABOUTME: Extracts a workout object from free-form LLM output
// ABOUTME: Strips markdown fences, isolates the JSON object, and decodes fields tolerantly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Model Output Parsing
//!
//! Models wrap JSON in code fences, prepend chatter, and write `"sets": "2-3"`
//! or `"reps": 12`. The parser accepts all of that and rejects only output
//! without a workout name or an exercises array.

use fitflow_core::errors::{AppError, AppResult};
use fitflow_core::models::{ExerciseCandidate, MuscleGroup, Workout};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Sets used when the model omits them or writes something unparseable
const DEFAULT_SETS: u32 = 3;

#[derive(Debug, Deserialize)]
struct RawWorkout {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    muscles: Option<Value>,
    #[serde(default)]
    exercises: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    sets: Option<Value>,
    #[serde(default)]
    reps: Option<Value>,
    #[serde(default)]
    weight: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    equipment: Option<Value>,
}

impl RawExercise {
    fn into_candidate(self) -> Option<ExerciseCandidate> {
        let name = self.name.as_ref().and_then(value_str)?;
        if name.is_empty() {
            return None;
        }
        Some(
            ExerciseCandidate::new(
                name,
                self.sets.as_ref().map_or(DEFAULT_SETS, parse_sets),
                self.reps.as_ref().map(value_text).unwrap_or_default(),
                self.weight.as_ref().map(value_text).unwrap_or_default(),
                self.description.as_ref().map(value_text).unwrap_or_default(),
            )
            .with_equipment(string_list(self.equipment.as_ref())),
        )
    }
}

/// Parse LLM output into a workout
///
/// # Errors
///
/// Returns an `InvalidFormat` error when no JSON object can be found, the
/// text is not a JSON object, the name is missing or blank, or the exercises
/// field is not an array
pub fn parse_workout_response(text: &str) -> AppResult<Workout> {
    let json = extract_json_object(text)
        .ok_or_else(|| AppError::invalid_format("Model response contains no JSON object"))?;

    let raw: RawWorkout = serde_json::from_str(json).map_err(|e| {
        AppError::invalid_format(format!("Model response is not a valid workout: {e}"))
    })?;

    let name = raw
        .name
        .as_ref()
        .and_then(value_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::invalid_format("Model workout has no name"))?
        .to_owned();

    let Some(Value::Array(entries)) = raw.exercises else {
        return Err(AppError::invalid_format(
            "Model workout has no exercises array",
        ));
    };
    let proposed = entries.len();
    let exercises: Vec<ExerciseCandidate> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawExercise>(entry).ok())
        .filter_map(RawExercise::into_candidate)
        .collect();

    let mut muscles: Vec<MuscleGroup> = Vec::new();
    for tag in string_list(raw.muscles.as_ref()) {
        match MuscleGroup::parse(&tag) {
            Some(muscle) if !muscles.contains(&muscle) => muscles.push(muscle),
            Some(_) => {}
            None => debug!(%tag, "Ignoring unknown muscle tag from model"),
        }
    }

    if exercises.len() < proposed {
        debug!(
            dropped = proposed - exercises.len(),
            "Dropped unusable exercises from model output"
        );
    }

    Ok(Workout {
        name,
        muscles,
        exercises,
        description: raw.description.as_ref().map(value_text).unwrap_or_default(),
    })
}

/// Slice from the first `{` to the last `}` after removing code fences
fn extract_json_object(text: &str) -> Option<&str> {
    let trimmed = strip_code_fences(text);
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Leading integer of a number or string such as "2-3"
fn parse_sets(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_SETS),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().unwrap_or(DEFAULT_SETS)
        }
        _ => DEFAULT_SETS,
    }
}

/// Trimmed text of a string value
fn value_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim)
}

/// Non-blank strings from an array or a lone string; anything else is empty
fn string_list(value: Option<&Value>) -> Vec<String> {
    let items: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single @ Value::String(_)) => vec![single],
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(value_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
