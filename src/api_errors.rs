//! Backend error-envelope inspection.
//!
//! The backend reports plan-limit violations as ordinary validation errors,
//! so message content is the only available signal for telling "you hit your
//! plan limit" apart from any other failure. All of that matching lives
//! behind [`extract_message`] and [`is_limit_error`]; if the backend ever
//! grows a structured reason code, only this module changes.

use serde_json::Value;
use thiserror::Error;

/// Shown when no usable message can be found in the envelope.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Generic envelope message that carries no information of its own.
const GENERIC_VALIDATION: &str = "Validation error";

/// Substrings that mark a validation message as plan-limit related.
const LIMIT_PHRASES: [&str; 3] = ["limit", "upgrade", "reached your limit"];

/// Tier names are matched as whole words; plain substring matching would
/// mistake "problem" for a mention of the pro tier.
const TIER_WORDS: [&str; 4] = ["free", "pro", "couple", "lifetime"];

/// Non-2xx API response with its raw body preserved, so classification can
/// inspect whatever shape the failure path produced.
#[derive(Debug, Error)]
#[error("{}", extract_message(.body))]
pub struct ApiError {
    pub status: u16,
    pub body: Value,
}

impl ApiError {
    pub fn message(&self) -> String {
        extract_message(&self.body)
    }

    pub fn is_plan_limit(&self) -> bool {
        is_limit_error(&self.body)
    }
}

/// Some transports wrap the backend body under a `response` key; resolve to
/// the inner object when one is present.
fn payload(error: &Value) -> &Value {
    match error.get("response") {
        Some(inner) if inner.is_object() => inner,
        _ => error,
    }
}

fn errors_array(error: &Value) -> Option<&Vec<Value>> {
    let non_empty = |entries: &&Vec<Value>| !entries.is_empty();
    payload(error)
        .get("errors")
        .and_then(Value::as_array)
        .filter(non_empty)
        .or_else(|| error.get("errors").and_then(Value::as_array).filter(non_empty))
}

fn entry_field(entry: &Value) -> Option<&str> {
    entry.get("field").and_then(Value::as_str)
}

fn entry_message(entry: &Value) -> Option<&str> {
    entry.get("message").and_then(Value::as_str)
}

fn contains_tier_word(lower: &str) -> bool {
    lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| TIER_WORDS.contains(&word))
}

fn mentions_plan_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    LIMIT_PHRASES.iter().any(|phrase| lower.contains(phrase)) || contains_tier_word(&lower)
}

/// Single human-readable message for an arbitrary backend error shape.
///
/// Resolution order, each step short-circuiting: a plain string verbatim; a
/// subscription/limit entry from the validation `errors` array; the array's
/// first entry; a nested `response.message`; a nested `error` field (string
/// or object); the top-level `message` unless it is the generic
/// "Validation error"; and finally [`FALLBACK_MESSAGE`].
pub fn extract_message(error: &Value) -> String {
    if let Some(text) = error.as_str() {
        return text.to_string();
    }

    if let Some(entries) = errors_array(error) {
        let subscription_entry = entries.iter().find_map(|entry| {
            let message = entry_message(entry)?;
            (entry_field(entry) == Some("subscription") || mentions_plan_limit(message))
                .then_some(message)
        });
        if let Some(message) = subscription_entry {
            return message.to_string();
        }
        if let Some(first) = entries.iter().find_map(entry_message) {
            return first.to_string();
        }
    }

    let inner = payload(error);
    let nested = !std::ptr::eq(inner, error);

    if nested {
        if let Some(message) = inner.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    match inner.get("error") {
        Some(Value::String(text)) => return text.clone(),
        Some(object) => {
            if let Some(message) = object.get("message").and_then(Value::as_str) {
                return message.to_string();
            }
        }
        None => {}
    }

    if let Some(message) = error.get("message").and_then(Value::as_str) {
        if message != GENERIC_VALIDATION {
            return message.to_string();
        }
        // Generic envelope: the errors array is the only place left to look.
        if let Some(first) = errors_array(error).and_then(|entries| {
            entries.iter().find_map(entry_message)
        }) {
            return first.to_string();
        }
    }

    FALLBACK_MESSAGE.to_string()
}

/// Whether the failure is specifically a plan-limit violation, routing the
/// user to an upgrade prompt instead of a generic error toast.
pub fn is_limit_error(error: &Value) -> bool {
    if let Some(entries) = errors_array(error) {
        let structural = entries.iter().any(|entry| {
            entry_field(entry) == Some("subscription")
                || entry_message(entry).is_some_and(|message| {
                    let lower = message.to_lowercase();
                    lower.contains("limit") || lower.contains("upgrade")
                })
        });
        if structural {
            return true;
        }
    }

    let lower = extract_message(error).to_lowercase();
    LIMIT_PHRASES.iter().any(|phrase| lower.contains(phrase))
        || lower.contains("unlimited access")
        || contains_tier_word(&lower)
}
