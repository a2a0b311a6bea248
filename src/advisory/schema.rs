//! Strict check of advisory responses.
//!
//! Every field is validated and all problems are collected, so a log line for
//! a rejected response names everything that was wrong with it.

use crate::errors::AdvisoryFailure;
use crate::recommend::{Recommendation, FALLBACK_DIFFICULTY};
use serde_json::{Map, Value};
use stillwater::{NonEmptyVec, Validation};

/// Validation result carrying every schema violation found.
pub type SchemaValidation<T> = Validation<T, NonEmptyVec<String>>;

/// Accept a raw advisory response as a recommendation, or explain why not.
pub fn parse_response(value: &Value) -> Result<Recommendation, AdvisoryFailure> {
    match validate_response(value) {
        Validation::Success(recommendation) => Ok(recommendation),
        Validation::Failure(errors) => Err(AdvisoryFailure::Malformed(errors.into_vec())),
    }
}

pub fn validate_response(value: &Value) -> SchemaValidation<Recommendation> {
    let Some(object) = value.as_object() else {
        return fail(format!("expected a JSON object, got {}", kind_of(value)));
    };

    let recommended = number_field(object, "recommendedScore");
    let warning = number_field(object, "warningScore");
    let difficulty = difficulty_field(object);
    let reasoning = string_field(object, "reasoning");
    let advice = advice_field(object);

    match (recommended, warning, difficulty, reasoning, advice) {
        (
            Validation::Success(recommended),
            Validation::Success(warning),
            Validation::Success(difficulty),
            Validation::Success(reasoning),
            Validation::Success(advice),
        ) => Validation::Success(Recommendation::new(
            recommended,
            warning,
            difficulty,
            reasoning,
            advice,
        )),
        (recommended, warning, difficulty, reasoning, advice) => {
            let mut errors = Vec::new();
            collect(recommended, &mut errors);
            collect(warning, &mut errors);
            collect(difficulty, &mut errors);
            collect(reasoning, &mut errors);
            collect(advice, &mut errors);
            match NonEmptyVec::from_vec(errors) {
                Some(errors) => Validation::Failure(errors),
                None => fail("response rejected".to_string()),
            }
        }
    }
}

fn collect<T>(validation: SchemaValidation<T>, errors: &mut Vec<String>) {
    if let Validation::Failure(found) = validation {
        errors.extend(found);
    }
}

fn fail<T>(message: String) -> SchemaValidation<T> {
    Validation::Failure(NonEmptyVec::new(message, Vec::new()))
}

fn number_field(object: &Map<String, Value>, name: &str) -> SchemaValidation<f64> {
    match object.get(name) {
        None => fail(format!("{name} is missing")),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() => Validation::Success(v),
            _ => fail(format!("{name} is not a finite number")),
        },
        Some(other) => fail(format!("{name} must be a number, got {}", kind_of(other))),
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> SchemaValidation<String> {
    match object.get(name) {
        None => fail(format!("{name} is missing")),
        Some(Value::String(s)) => Validation::Success(s.clone()),
        Some(other) => fail(format!("{name} must be a string, got {}", kind_of(other))),
    }
}

fn difficulty_field(object: &Map<String, Value>) -> SchemaValidation<String> {
    match string_field(object, "difficulty") {
        Validation::Success(label) if label.trim().is_empty() => {
            fail("difficulty must not be blank".to_string())
        }
        // The sentinel is reserved for degraded results.
        Validation::Success(label) if label.trim().eq_ignore_ascii_case(FALLBACK_DIFFICULTY) => {
            fail(format!("difficulty must not be '{FALLBACK_DIFFICULTY}'"))
        }
        other => other,
    }
}

fn advice_field(object: &Map<String, Value>) -> SchemaValidation<Vec<String>> {
    let items = match object.get("advice") {
        None => return fail("advice is missing".to_string()),
        Some(Value::Array(items)) if items.is_empty() => {
            return fail("advice must not be empty".to_string())
        }
        Some(Value::Array(items)) => items,
        Some(other) => return fail(format!("advice must be a list, got {}", kind_of(other))),
    };

    let mut advice = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => advice.push(s.clone()),
            other => errors.push(format!(
                "advice[{idx}] must be a string, got {}",
                kind_of(other)
            )),
        }
    }

    match NonEmptyVec::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(advice),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
