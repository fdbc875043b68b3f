//! Edition section form state

use serde::{Deserialize, Serialize};

use crate::action::{EditionGroup, LanguageOption, Publisher};

/// Values of the edition section of the entity editor.
///
/// Serialises with camelCase keys, matching what the editor stores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditionSectionState {
    pub edition_group: Option<EditionGroup>,
    pub publisher: Option<Publisher>,
    pub release_date: Option<String>,
    pub format: Option<i64>,
    pub languages: Vec<LanguageOption>,
    pub status: Option<i64>,
    pub weight: Option<f64>,
    pub pages: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub physical_visible: bool,
    pub edition_group_visible: bool,
}

impl EditionSectionState {
    /// Show the physical properties when any of them already has a value.
    ///
    /// Used when loading an existing edition so filled-in dimensions are not
    /// hidden behind the "add physical details" toggle.
    pub fn with_physical_detection(mut self) -> Self {
        if self.has_physical() {
            self.physical_visible = true;
        }
        self
    }

    pub fn has_physical(&self) -> bool {
        self.weight.is_some()
            || self.pages.is_some()
            || self.width.is_some()
            || self.height.is_some()
            || self.depth.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_physical_detection() {
        let empty = EditionSectionState::default().with_physical_detection();
        assert!(!empty.physical_visible);

        let state = EditionSectionState {
            depth: Some(2.5),
            ..Default::default()
        }
        .with_physical_detection();
        assert!(state.physical_visible);
    }

    #[test]
    fn test_camel_case_keys() {
        let state = EditionSectionState {
            release_date: Some("2020-01-01".into()),
            edition_group_visible: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["releaseDate"], json!("2020-01-01"));
        assert_eq!(value["editionGroupVisible"], json!(true));
        assert_eq!(value["physicalVisible"], json!(false));
    }

    #[test]
    fn test_partial_state_deserialises() {
        let state: EditionSectionState =
            serde_json::from_value(json!({"pages": 300, "publisher": {"value": "Acme", "id": 4}}))
                .unwrap();
        assert_eq!(state.pages, Some(300.0));
        assert_eq!(state.publisher.unwrap().id, 4);
        assert!(state.languages.is_empty());
    }
}
