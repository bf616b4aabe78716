//! Response normalization.
//!
//! The tutoring service's payload shape varies by mode and server version:
//! newer servers return a structured `clues` array in step-by-step mode,
//! older ones return one object key per clue. Media always arrives under a
//! small set of reserved keys. This module folds every shape into one
//! ordered [`ResponseBundle`].

use crate::error::TutorError;
use crate::query::ResponseMode;
use crate::section::{ResponseBundle, Section, SectionPayload};
use serde_json::Value;

/// Reserved keys whose values are base64 image references, in merge order.
const IMAGE_KEYS: &[&str] = &["generate_image", "generate_graphic", "search_diagrams"];

/// Reserved keys whose values are video URLs.
const VIDEO_KEYS: &[&str] = &["search_video"];

/// Structured clue array key (newer servers, step-by-step only).
const CLUES_KEY: &str = "clues";

fn is_reserved(key: &str) -> bool {
    IMAGE_KEYS.contains(&key) || VIDEO_KEYS.contains(&key) || key == CLUES_KEY
}

/// Convert a raw service payload into the canonical bundle.
///
/// Fails with [`TutorError::MalformedResponse`] only when the payload is not
/// a JSON object at all; an object with no recognized content normalizes to
/// an empty bundle so the caller can render a "no content" state.
pub fn normalize(raw: &Value, mode: ResponseMode) -> Result<ResponseBundle, TutorError> {
    let obj = raw.as_object().ok_or_else(|| {
        TutorError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type_name(raw)
        ))
    })?;

    let mut sections = Vec::new();

    let clues = match (mode, obj.get(CLUES_KEY)) {
        (ResponseMode::StepByStep, Some(Value::Array(items))) => Some(items),
        _ => None,
    };

    if let Some(items) = clues {
        // Structured clue path: `order` decides position, ties broken by
        // array position. Non-clue generic keys are ignored here; flashcards
        // are still picked up below.
        let mut ordered: Vec<(i64, usize, &Value)> = items
            .iter()
            .enumerate()
            .map(|(pos, clue)| {
                let order = clue.get("order").and_then(Value::as_i64).unwrap_or(i64::MAX);
                (order, pos, clue)
            })
            .collect();
        ordered.sort_by_key(|(order, pos, _)| (*order, *pos));

        for (_, pos, clue) in ordered {
            let Some(content) = clue.get("content").and_then(Value::as_str) else {
                tracing::warn!(position = pos, "clue without content dropped");
                continue;
            };
            let title = clue
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Clue {}", pos + 1));
            sections.push(Section::text(title, content));
        }

        for (key, value) in obj {
            if let Some(card) = as_flashcard(key, value) {
                sections.push(card);
            }
        }
    } else {
        for (key, value) in obj {
            if is_reserved(key) || value.is_null() {
                continue;
            }
            if let Some(card) = as_flashcard(key, value) {
                sections.push(card);
                continue;
            }
            sections.push(Section::text(key.clone(), flatten_value(value)));
        }
    }

    let images = collect_strings(obj, IMAGE_KEYS);
    if !images.is_empty() {
        sections.push(Section {
            key: "images".to_string(),
            payload: SectionPayload::ImageSet { images },
        });
    }

    let urls = collect_strings(obj, VIDEO_KEYS);
    if !urls.is_empty() {
        sections.push(Section {
            key: "videos".to_string(),
            payload: SectionPayload::VideoSet { urls },
        });
    }

    Ok(ResponseBundle::new(sections))
}

/// Detect the study-card shape: an object value with string `front`/`back`.
fn as_flashcard(key: &str, value: &Value) -> Option<Section> {
    let front = value.get("front")?.as_str()?;
    let back = value.get("back")?.as_str()?;
    Some(Section {
        key: key.to_string(),
        payload: SectionPayload::Flashcard {
            front: front.to_string(),
            back: back.to_string(),
        },
    })
}

/// Gather string entries under the given reserved keys, in key order.
/// A bare string value counts as a one-element list.
fn collect_strings(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for key in keys {
        match obj.get(*key) {
            Some(Value::Array(items)) => {
                out.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
            }
            Some(Value::String(s)) => out.push(s.clone()),
            _ => {}
        }
    }
    out
}

/// Render a generic payload value as markdown-ish text. Older consolidated
/// responses nest structures (e.g. `example: {title, steps: [..]}`).
fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(|v| format!("- {}", flatten_value(v).replace('\n', " ")))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| match v {
                Value::Array(_) | Value::Object(_) => {
                    format!("**{}**\n{}", k, flatten_value(v))
                }
                _ => format!("**{}**: {}", k, flatten_value(v)),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
