//! Reducer for the edition section
//!
//! - `fn(&mut EditionSectionState, EditionAction) -> bool`
//! - Returns true if the state changed
//! - Stores values as given, no validation

use crate::action::EditionAction;
use crate::state::EditionSectionState;

/// Replace `slot` with `value`, reporting whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

pub fn reducer(state: &mut EditionSectionState, action: EditionAction) -> bool {
    match action {
        // ===== Entity pickers =====
        EditionAction::UpdateEditionGroup(group) => replace(&mut state.edition_group, Some(group)),
        EditionAction::UpdatePublisher(publisher) => replace(&mut state.publisher, Some(publisher)),
        EditionAction::UpdateLanguages(languages) => replace(&mut state.languages, languages),

        // ===== Selects =====
        EditionAction::UpdateFormat(format) => replace(&mut state.format, format),
        EditionAction::UpdateStatus(status) => replace(&mut state.status, status),

        // ===== Typed fields =====
        EditionAction::UpdateReleaseDate(date) => replace(&mut state.release_date, date),
        EditionAction::UpdateWeight(weight) => replace(&mut state.weight, weight),
        EditionAction::UpdatePages(pages) => replace(&mut state.pages, pages),
        EditionAction::UpdateWidth(width) => replace(&mut state.width, width),
        EditionAction::UpdateHeight(height) => replace(&mut state.height, height),
        EditionAction::UpdateDepth(depth) => replace(&mut state.depth, depth),

        // ===== Visibility =====
        EditionAction::ShowPhysical => replace(&mut state.physical_visible, true),
        EditionAction::ShowEditionGroup => replace(&mut state.edition_group_visible, true),
    }
}
