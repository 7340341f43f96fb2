//! Answer model for the intake form.
//!
//! - [`options`]: closed option catalogues (purpose, style, duration,
//!   budget, platforms) with wire ids and labels.
//! - [`fields`]: typed field identifiers and [`Choice`] values.
//! - [`answers`]: the [`AnswerSet`] with its write operations and pure
//!   visibility derivations.
//! - [`layout`]: section layout and the render primitives frontends use.
//!
//! Answers can also be loaded from a JSON file keyed by the wire keys. The
//! file is checked against the schema generated from [`AnswerSet`] before it
//! is deserialized, so typos in keys or option ids are reported with their
//! JSON path.

pub mod answers;
pub mod fields;
pub mod layout;
pub mod options;

pub use answers::{AnswerSet, is_email_address};
pub use fields::{Choice, ChoiceField, RequiredField, ScalarField};
pub use options::{BudgetTier, BudgetType, EditingStyle, Platform, VideoDuration, VideoPurpose};

use std::path::Path;

use tracing::debug;

/// JSON Schema for answers files.
pub fn answers_schema() -> Result<serde_json::Value, String> {
    let schema = schemars::schema_for!(AnswerSet);
    serde_json::to_value(schema).map_err(|e| format!("failed to build answers schema: {e}"))
}

/// Check `value` against `schema`, listing every violation with its path.
fn validate_against(schema: &serde_json::Value, value: &serde_json::Value) -> Result<(), String> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| format!("invalid answers schema: {e}"))?;
    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| format!("  - {}: {e}", e.instance_path()))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "answers do not match the form:\n{}",
            errors.join("\n")
        ))
    }
}

/// Parse an answers document, validating it against [`answers_schema`].
pub fn parse_answers(raw: &str) -> Result<AnswerSet, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("invalid JSON in answers: {e}"))?;
    validate_against(&answers_schema()?, &value)?;

    let mut answers: AnswerSet =
        serde_json::from_value(value).map_err(|e| format!("failed to read answers: {e}"))?;
    answers.normalize();
    Ok(answers)
}

/// Read and parse an answers file.
pub fn load_answers(path: &Path) -> Result<AnswerSet, String> {
    debug!("Loading answers from {}", path.display());
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_answers(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn schema_lists_wire_keys() {
        let schema = answers_schema().unwrap();
        let props = schema["properties"].as_object().unwrap();
        for key in ["fullName", "videoPurposeOther", "distribution", "budget"] {
            assert!(props.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn parse_full_answers() {
        let raw = r#"{
            "fullName": "A",
            "email": "a@b.com",
            "targetAudience": "x",
            "callToAction": "y",
            "videoPurpose": "Aumentar seguidores y alcance",
            "editingStyle": "portfolio",
            "finalVideoDuration": "15-30s",
            "distribution": ["TikTok"],
            "budgetType": "per-video",
            "budget": "<100"
        }"#;
        let answers = parse_answers(raw).unwrap();
        assert!(answers.missing_required().is_empty());
        assert_eq!(answers.budget(), Some(BudgetTier::Under100));
        assert!(answers.is_distributed_on(Platform::TikTok));
    }

    #[test]
    fn unknown_option_is_rejected_with_path() {
        let err = parse_answers(r#"{"editingStyle": "custom"}"#).unwrap_err();
        assert!(err.contains("answers do not match"), "{err}");
        assert!(err.contains("/editingStyle"), "{err}");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(parse_answers(r#"{"fullname": "A"}"#).is_err());
    }

    #[test]
    fn broken_schema_is_an_error() {
        let schema = serde_json::json!({"type": 12});
        let err = validate_against(&schema, &serde_json::json!({})).unwrap_err();
        assert!(err.starts_with("invalid answers schema"), "{err}");
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = parse_answers("{").unwrap_err();
        assert!(err.starts_with("invalid JSON"), "{err}");
    }

    #[test]
    fn load_answers_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"fullName": "Ana", "distribution": ["TikTok", "YouTube Shorts"]}}"#)
            .unwrap();
        let answers = load_answers(file.path()).unwrap();
        assert_eq!(answers.scalar(ScalarField::FullName), "Ana");
        assert_eq!(answers.distribution().len(), 2);
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_answers(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.contains("failed to read"), "{err}");
    }
}
