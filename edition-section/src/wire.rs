//! JSON wire format for edition actions
//!
//! Each action travels as `{"type": ..., "payload": ..., "meta": ...}`:
//! - `payload` is omitted when the action has none or the value is absent
//! - `meta` is present only for debounced kinds, as `{"debounce": "keystroke"}`
//!
//! When decoding, an absent or `null` payload becomes `None` for kinds whose
//! value is optional. Incoming `meta` is ignored: debounce metadata follows
//! from the kind.

use std::io::BufRead;

use form_dispatch::{Action, ActionMeta};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::action::*;
use crate::error::WireError;

/// The untyped `{type, payload, meta?}` record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActionMeta>,
}

fn entity(option: EntityOption) -> Value {
    json!({ "value": option.value, "id": option.id })
}

/// Whole numbers go out as JSON integers (`250`, not `250.0`).
fn number(value: f64) -> Value {
    // Largest magnitude below which every whole f64 is an exact i64
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

impl From<EditionAction> for ActionEnvelope {
    fn from(action: EditionAction) -> Self {
        let kind = action.name().to_string();
        let meta = action.meta();

        let payload = match action {
            EditionAction::UpdateEditionGroup(option) | EditionAction::UpdatePublisher(option) => {
                Some(entity(option))
            }
            EditionAction::UpdateReleaseDate(date) => date.map(Value::from),
            EditionAction::UpdateLanguages(languages) => Some(Value::Array(
                languages
                    .into_iter()
                    .map(|l| json!({ "name": l.name, "id": l.id }))
                    .collect(),
            )),
            EditionAction::UpdateFormat(id) | EditionAction::UpdateStatus(id) => id.map(Value::from),
            EditionAction::UpdateWeight(v)
            | EditionAction::UpdatePages(v)
            | EditionAction::UpdateWidth(v)
            | EditionAction::UpdateHeight(v)
            | EditionAction::UpdateDepth(v) => v.map(number),
            EditionAction::ShowPhysical | EditionAction::ShowEditionGroup => None,
        };

        Self {
            kind,
            payload,
            meta,
        }
    }
}

fn required<T: DeserializeOwned>(kind: &'static str, payload: Option<Value>) -> Result<T, WireError> {
    let value = payload.ok_or(WireError::MissingPayload { kind })?;
    serde_json::from_value(value).map_err(|source| WireError::InvalidPayload { kind, source })
}

fn optional<T: DeserializeOwned>(
    kind: &'static str,
    payload: Option<Value>,
) -> Result<Option<T>, WireError> {
    payload
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|source| WireError::InvalidPayload { kind, source })
        })
        .transpose()
}

impl TryFrom<ActionEnvelope> for EditionAction {
    type Error = WireError;

    fn try_from(envelope: ActionEnvelope) -> Result<Self, Self::Error> {
        let ActionEnvelope { kind, payload, .. } = envelope;

        let action = match kind.as_str() {
            UPDATE_EDITION_GROUP => {
                EditionAction::UpdateEditionGroup(required(UPDATE_EDITION_GROUP, payload)?)
            }
            UPDATE_PUBLISHER => EditionAction::UpdatePublisher(required(UPDATE_PUBLISHER, payload)?),
            UPDATE_RELEASE_DATE => {
                EditionAction::UpdateReleaseDate(optional(UPDATE_RELEASE_DATE, payload)?)
            }
            UPDATE_FORMAT => EditionAction::UpdateFormat(optional(UPDATE_FORMAT, payload)?),
            UPDATE_LANGUAGES => {
                EditionAction::UpdateLanguages(required(UPDATE_LANGUAGES, payload)?)
            }
            UPDATE_STATUS => EditionAction::UpdateStatus(optional(UPDATE_STATUS, payload)?),
            UPDATE_WEIGHT => EditionAction::UpdateWeight(optional(UPDATE_WEIGHT, payload)?),
            UPDATE_PAGES => EditionAction::UpdatePages(optional(UPDATE_PAGES, payload)?),
            UPDATE_WIDTH => EditionAction::UpdateWidth(optional(UPDATE_WIDTH, payload)?),
            UPDATE_HEIGHT => EditionAction::UpdateHeight(optional(UPDATE_HEIGHT, payload)?),
            UPDATE_DEPTH => EditionAction::UpdateDepth(optional(UPDATE_DEPTH, payload)?),
            SHOW_PHYSICAL => EditionAction::ShowPhysical,
            SHOW_EDITION_GROUP => EditionAction::ShowEditionGroup,
            _ => return Err(WireError::UnknownType(kind)),
        };
        Ok(action)
    }
}

/// Encode an action as a JSON string.
pub fn to_json(action: &EditionAction) -> Result<String, WireError> {
    Ok(serde_json::to_string(action)?)
}

/// Decode a single action from JSON.
pub fn from_json(raw: &str) -> Result<EditionAction, WireError> {
    let envelope: ActionEnvelope = serde_json::from_str(raw)?;
    EditionAction::try_from(envelope)
}

/// Decode one line of a JSON-lines stream.
///
/// Blank lines yield `Ok(None)`. Errors carry the 1-based `line_no`.
pub fn decode_line(line_no: usize, line: &str) -> Result<Option<EditionAction>, WireError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    from_json(line).map(Some).map_err(|source| WireError::Line {
        line: line_no,
        source: Box::new(source),
    })
}

/// Decode a JSON-lines stream, one action per line.
pub fn decode_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<EditionAction, WireError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) => decode_line(i + 1, &line).transpose(),
            Err(e) => Some(Err(WireError::Io(e))),
        })
}
