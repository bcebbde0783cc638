// ABOUTME: Integration tests for loading the filtering ruleset and lexicon overrides from disk
// ABOUTME: Verifies override semantics and the errors reported for malformed resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::io::Write;

use fitflow::errors::{AppError, ErrorCode};
use fitflow::intelligence::lexicon::BUILTIN_LEXICON_JSON as BUILTIN_LEXICON;
use fitflow::intelligence::{Ruleset, RulesetError};
use fitflow::models::MuscleGroup;
use tempfile::NamedTempFile;

fn write_lexicon(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_without_override_matches_builtin() {
    assert_eq!(Ruleset::load(None).unwrap(), Ruleset::builtin().unwrap());
}

#[test]
fn test_override_replaces_lexicon() {
    let patched = BUILTIN_LEXICON.replace(
        r#""triggers": ["chest", "pec"]"#,
        r#""triggers": ["chest", "pec", "bench day"]"#,
    );
    assert_ne!(patched, BUILTIN_LEXICON);
    let file = write_lexicon(&patched);

    let builtin = Ruleset::builtin().unwrap();
    assert!(builtin.classifier().classify("bench day").is_empty());

    let ruleset = Ruleset::load(Some(file.path())).unwrap();
    assert_eq!(
        ruleset.classifier().classify("bench day").as_slice(),
        &[MuscleGroup::Chest]
    );
}

#[test]
fn test_missing_override_file() {
    let err = Ruleset::load(Some(std::path::Path::new("/nonexistent/lexicon.json"))).unwrap_err();
    assert!(matches!(err, RulesetError::Io { .. }));
}

#[test]
fn test_unsupported_version() {
    let file = write_lexicon(&BUILTIN_LEXICON.replacen(r#""version": 1"#, r#""version": 7"#, 1));
    let err = Ruleset::load(Some(file.path())).unwrap_err();
    assert!(matches!(
        err,
        RulesetError::UnsupportedVersion { version: 7, .. }
    ));
}

#[test]
fn test_unknown_muscle_group_tag() {
    let file = write_lexicon(&BUILTIN_LEXICON.replacen(r#""core": {"#, r#""abs": {"#, 1));
    let err = Ruleset::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, RulesetError::UnknownMuscleGroup(tag) if tag == "abs"));
}

#[test]
fn test_malformed_json() {
    let file = write_lexicon("{ not json");
    let err = Ruleset::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, RulesetError::Parse { .. }));
}

#[test]
fn test_override_rejecting_fallback_exercise() {
    // Without "push-up" in the chest allowlist the builtin Push-ups entry is irrelevant
    let patched = BUILTIN_LEXICON.replacen(r#""bench press", "push-up", "#, r#""bench press", "#, 1);
    assert_ne!(patched, BUILTIN_LEXICON);
    let file = write_lexicon(&patched);

    let err = Ruleset::load(Some(file.path())).unwrap_err();
    assert!(matches!(
        err,
        RulesetError::IrrelevantFallback {
            muscle: MuscleGroup::Chest,
            ..
        }
    ));
}

#[test]
fn test_ruleset_errors_map_to_config_invalid() {
    let file = write_lexicon("[]");
    let err: AppError = Ruleset::load(Some(file.path())).unwrap_err().into();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.starts_with("Failed to parse muscle lexicon"));
}
