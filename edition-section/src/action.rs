//! Edition form actions
//!
//! One constructor per action kind. Constructors store their input verbatim:
//! no validation, clamping or coercion happens here. Free-text and numeric
//! entry fields are tagged for keystroke debouncing; the constructors only
//! mark that intent, timing is up to the dispatcher.

use form_dispatch::{Action as _, ActionSummary};
use serde::{Deserialize, Serialize};

pub const UPDATE_EDITION_GROUP: &str = "UPDATE_EDITION_GROUP";
pub const UPDATE_PUBLISHER: &str = "UPDATE_PUBLISHER";
pub const UPDATE_RELEASE_DATE: &str = "UPDATE_RELEASE_DATE";
pub const UPDATE_FORMAT: &str = "UPDATE_FORMAT";
pub const UPDATE_LANGUAGES: &str = "UPDATE_LANGUAGES";
pub const UPDATE_STATUS: &str = "UPDATE_STATUS";
pub const UPDATE_WEIGHT: &str = "UPDATE_WEIGHT";
pub const UPDATE_PAGES: &str = "UPDATE_PAGES";
pub const UPDATE_WIDTH: &str = "UPDATE_WIDTH";
pub const UPDATE_HEIGHT: &str = "UPDATE_HEIGHT";
pub const UPDATE_DEPTH: &str = "UPDATE_DEPTH";
pub const SHOW_PHYSICAL: &str = "SHOW_PHYSICAL";
pub const SHOW_EDITION_GROUP: &str = "SHOW_EDITION_GROUP";

/// A selected entity from a search-as-you-type field (publisher, edition group).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityOption {
    pub value: String,
    pub id: i64,
}

impl EntityOption {
    pub fn new(value: impl Into<String>, id: i64) -> Self {
        Self {
            value: value.into(),
            id,
        }
    }
}

pub type Publisher = EntityOption;
pub type EditionGroup = EntityOption;

/// A language picked in the languages multi-select.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageOption {
    pub name: String,
    pub id: i64,
}

impl LanguageOption {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Actions produced by the edition section of the entity editor.
///
/// The enum is the closed set of action kinds; each variant's payload type
/// is fixed by the kind. On the wire these become `{type, payload, meta?}`
/// records (see [`crate::wire`]).
#[derive(form_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(into = "crate::wire::ActionEnvelope", try_from = "crate::wire::ActionEnvelope")]
pub enum EditionAction {
    UpdateEditionGroup(EditionGroup),
    UpdatePublisher(Publisher),
    #[action(debounce = "keystroke")]
    UpdateReleaseDate(Option<String>),
    UpdateFormat(Option<i64>),
    UpdateLanguages(Vec<LanguageOption>),
    UpdateStatus(Option<i64>),
    #[action(debounce = "keystroke")]
    UpdateWeight(Option<f64>),
    #[action(debounce = "keystroke")]
    UpdatePages(Option<f64>),
    #[action(debounce = "keystroke")]
    UpdateWidth(Option<f64>),
    #[action(debounce = "keystroke")]
    UpdateHeight(Option<f64>),
    #[action(debounce = "keystroke")]
    UpdateDepth(Option<f64>),
    ShowPhysical,
    ShowEditionGroup,
}

impl EditionAction {
    /// Whether this action asks for debounced dispatch
    pub fn is_debounced(&self) -> bool {
        self.meta().is_some()
    }
}

impl ActionSummary for EditionAction {
    fn summary(&self) -> String {
        match self {
            EditionAction::UpdateLanguages(languages) => {
                let names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
                format!("{} [{}]", self.name(), names.join(", "))
            }
            EditionAction::UpdateEditionGroup(option) | EditionAction::UpdatePublisher(option) => {
                format!("{} {:?} (#{})", self.name(), option.value, option.id)
            }
            _ => format!("{:?}", self),
        }
    }
}

/// Set the edition status.
pub fn update_status(new_status_id: Option<i64>) -> EditionAction {
    EditionAction::UpdateStatus(new_status_id)
}

/// Set the edition format.
pub fn update_format(new_format_id: Option<i64>) -> EditionAction {
    EditionAction::UpdateFormat(new_format_id)
}

/// Set the release date; debounced per keystroke.
pub fn debounced_update_release_date(new_release_date: Option<String>) -> EditionAction {
    EditionAction::UpdateReleaseDate(new_release_date)
}

/// Replace the edition languages, keeping their order.
pub fn update_languages(new_languages: Vec<LanguageOption>) -> EditionAction {
    EditionAction::UpdateLanguages(new_languages)
}

/// Reveal the physical properties part of the form.
pub fn show_physical() -> EditionAction {
    EditionAction::ShowPhysical
}

/// Reveal the edition group part of the form.
pub fn show_edition_group() -> EditionAction {
    EditionAction::ShowEditionGroup
}

/// Set the publisher.
pub fn update_publisher(new_publisher: Publisher) -> EditionAction {
    EditionAction::UpdatePublisher(new_publisher)
}

/// Set the edition group.
pub fn update_edition_group(new_edition_group: EditionGroup) -> EditionAction {
    EditionAction::UpdateEditionGroup(new_edition_group)
}

/// Set the weight; debounced per keystroke.
pub fn debounced_update_weight(value: Option<f64>) -> EditionAction {
    EditionAction::UpdateWeight(value)
}

/// Set the number of pages; debounced per keystroke.
pub fn debounced_update_pages(value: Option<f64>) -> EditionAction {
    EditionAction::UpdatePages(value)
}

/// Set the width; debounced per keystroke.
pub fn debounced_update_width(value: Option<f64>) -> EditionAction {
    EditionAction::UpdateWidth(value)
}

/// Set the height; debounced per keystroke.
pub fn debounced_update_height(value: Option<f64>) -> EditionAction {
    EditionAction::UpdateHeight(value)
}

/// Set the depth; debounced per keystroke.
pub fn debounced_update_depth(value: Option<f64>) -> EditionAction {
    EditionAction::UpdateDepth(value)
}
