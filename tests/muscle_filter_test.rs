// ABOUTME: Integration tests for prompt classification and exercise relevance validation
// ABOUTME: Covers composite phrases, blacklist precedence, closed allowlists, and idempotent filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use fitflow::intelligence::RelevanceVerdict;
use fitflow::models::{ExerciseCandidate, MuscleGroup, RequestedMuscleSet};
use helpers::test_utils::{exercise, ruleset};

fn requested(muscles: &[MuscleGroup]) -> RequestedMuscleSet {
    muscles.iter().copied().collect()
}

fn names(exercises: &[ExerciseCandidate]) -> Vec<&str> {
    exercises.iter().map(|e| e.name.as_str()).collect()
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_chest_and_back_prompt() {
    let rules = ruleset();
    let set = rules.classifier().classify("Give me a chest and back workout");
    assert_eq!(set.as_slice(), &[MuscleGroup::Chest, MuscleGroup::Back]);
}

#[test]
fn test_upper_body_expands_without_legs() {
    let rules = ruleset();
    let set = rules.classifier().classify("upper body workout");
    for muscle in [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
    ] {
        assert!(set.contains(muscle), "missing {muscle}");
    }
    assert!(!set.contains(MuscleGroup::Legs));
    assert!(!set.contains(MuscleGroup::Core));
}

#[test]
fn test_lower_body_expands_to_legs_only() {
    let rules = ruleset();
    let set = rules.classifier().classify("LOWER BODY day");
    assert_eq!(set.as_slice(), &[MuscleGroup::Legs]);
}

#[test]
fn test_synonyms_trigger_groups() {
    let rules = ruleset();
    let classifier = rules.classifier();
    assert!(classifier.classify("pecs please").contains(MuscleGroup::Chest));
    assert!(classifier.classify("quads and hamstrings").contains(MuscleGroup::Legs));
    assert!(classifier.classify("rear delts").contains(MuscleGroup::Shoulders));
    assert!(classifier.classify("biceps").contains(MuscleGroup::Arms));
    assert!(classifier.classify("six pack abs").contains(MuscleGroup::Core));
}

#[test]
fn test_prompts_without_keywords_classify_empty() {
    let rules = ruleset();
    for prompt in ["surprise me", "something fun", "", "   "] {
        assert!(rules.classifier().classify(prompt).is_empty(), "{prompt:?}");
    }
}

#[test]
fn test_negation_is_not_interpreted() {
    let rules = ruleset();
    let set = rules.classifier().classify("no legs today, just chest");
    assert!(set.contains(MuscleGroup::Legs));
    assert!(set.contains(MuscleGroup::Chest));
}

#[test]
fn test_repeated_mentions_deduplicate() {
    let rules = ruleset();
    let set = rules.classifier().classify("chest, more chest, pecs and chest");
    assert_eq!(set.len(), 1);
}

// ============================================================================
// Relevance validation
// ============================================================================

#[test]
fn test_empty_request_accepts_everything() {
    let rules = ruleset();
    let validator = rules.validator();
    let empty = RequestedMuscleSet::new();
    for name in ["Leg Press", "Bench Press", "Underwater Basket Weaving"] {
        assert_eq!(
            validator.evaluate(&exercise(name), &empty),
            RelevanceVerdict::Unfiltered
        );
    }
}

#[test]
fn test_leg_press_rejected_and_bench_press_accepted_for_chest_and_back() {
    let rules = ruleset();
    let validator = rules.validator();
    let set = requested(&[MuscleGroup::Chest, MuscleGroup::Back]);

    assert!(matches!(
        validator.evaluate(&exercise("Leg Press"), &set),
        RelevanceVerdict::Blacklisted { .. }
    ));
    assert!(matches!(
        validator.evaluate(&exercise("Bench Press"), &set),
        RelevanceVerdict::Accepted {
            muscle: MuscleGroup::Chest,
            ..
        }
    ));
}

#[test]
fn test_blacklist_overrides_allowlist_of_another_group() {
    let rules = ruleset();
    let validator = rules.validator();
    // "Split Squat Row" is allowlisted for back (row) but blacklisted for chest (squat)
    let set = requested(&[MuscleGroup::Chest, MuscleGroup::Back]);
    assert!(!validator.is_relevant(&exercise("Split Squat Row"), &set));
}

#[test]
fn test_blacklist_terms_always_reject_their_group() {
    let rules = ruleset();
    let validator = rules.validator();
    for muscle in MuscleGroup::ALL {
        let set = requested(&[muscle]);
        for term in rules.lexicon().blacklist(muscle) {
            let candidate = exercise(&format!("Weighted {term}"));
            assert!(
                !validator.is_relevant(&candidate, &set),
                "{term} should be rejected for {muscle}"
            );
        }
    }
}

#[test]
fn test_allowlist_is_closed() {
    let rules = ruleset();
    let set = requested(&[MuscleGroup::Arms]);
    assert_eq!(
        rules.validator().evaluate(&exercise("Farmer Carry"), &set),
        RelevanceVerdict::NotAllowlisted
    );
}

#[test]
fn test_shoulders_allow_back_work() {
    let rules = ruleset();
    let set = requested(&[MuscleGroup::Shoulders]);
    assert!(rules.validator().is_relevant(&exercise("Face Pulls"), &set));
    assert!(!rules.validator().is_relevant(&exercise("Barbell Bench Press"), &set));
}

#[test]
fn test_matching_is_case_insensitive() {
    let rules = ruleset();
    let set = requested(&[MuscleGroup::Core]);
    assert!(rules.validator().is_relevant(&exercise("PLANK"), &set));
    assert!(rules.validator().is_relevant(&exercise("russian TWIST"), &set));
}

#[test]
fn test_filter_is_idempotent_and_order_preserving() {
    let rules = ruleset();
    let validator = rules.validator();
    let list: Vec<ExerciseCandidate> = [
        "Leg Press",
        "Incline Press",
        "Barbell Row",
        "Bulgarian Split Squat",
        "Lat Pulldown",
        "Hammer Curl",
    ]
    .into_iter()
    .map(exercise)
    .collect();

    for set in [
        requested(&[MuscleGroup::Chest, MuscleGroup::Back]),
        requested(&[MuscleGroup::Legs]),
        requested(&[MuscleGroup::Arms, MuscleGroup::Core]),
        RequestedMuscleSet::new(),
    ] {
        let once = validator.filter(list.clone(), &set);
        let twice = validator.filter(once.clone(), &set);
        assert_eq!(once, twice);
    }

    let chest_back = validator.filter(
        list,
        &requested(&[MuscleGroup::Chest, MuscleGroup::Back]),
    );
    assert_eq!(
        names(&chest_back),
        vec!["Incline Press", "Barbell Row", "Lat Pulldown"]
    );
}
