//! Form state machine for the point-creation workflow.
//!
//! The whole form lives in one immutable [`FormState`] value advanced by the
//! pure [`reduce`] function, so transitions are unit-testable without a UI
//! harness. Effects (fetches, submission) are sequenced by the controller;
//! their outcomes re-enter the machine as actions.
//!
//! Phases: `Idle → Editing → Submitting → Submitted`, with an explicit
//! `Failed` phase that recovers to `Editing` on the next edit.

use std::collections::BTreeSet;

use crate::api::{CatalogItem, CreatePointRequest};

/// Sentinel option value meaning "no region/subregion selected".
pub const SELECTION_SENTINEL: &str = "0";

/// Coordinate used until the device reports a location, and as the initial
/// map selection.
pub const FALLBACK_POSITION: Position = Position {
    latitude: -27.209_205_2,
    longitude: -49.640_109_2,
};

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Lifecycle phase of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Nothing touched yet.
    #[default]
    Idle,
    /// At least one field edited.
    Editing,
    /// A create request is in flight.
    Submitting,
    /// The create request succeeded; terminal, triggers navigation away.
    Submitted,
    /// The create request failed; entered fields are preserved.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

/// Everything the form holds.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub phase: FormPhase,
    /// Contact name field.
    pub name: String,
    /// Contact email field.
    pub email: String,
    /// Device-reported location, used to centre the map.
    pub device_position: Position,
    /// Map coordinate chosen by the user.
    pub selected_position: Position,
    /// Selected region code, or the sentinel.
    pub region: String,
    /// Selected subregion name, or the sentinel.
    pub subregion: String,
    /// Identifiers of the selected item categories.
    pub selected_items: BTreeSet<i32>,
    /// Catalog entries, populated once.
    pub catalog: Vec<CatalogItem>,
    /// Region codes, sorted ascending.
    pub regions: Vec<String>,
    /// Subregion names for the selected region, sorted ascending.
    pub subregions: Vec<String>,
}

impl Default for Position {
    fn default() -> Self {
        FALLBACK_POSITION
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Fresh form: idle, fallback coordinates, sentinel selections.
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Idle,
            name: String::new(),
            email: String::new(),
            device_position: FALLBACK_POSITION,
            selected_position: FALLBACK_POSITION,
            region: SELECTION_SENTINEL.to_owned(),
            subregion: SELECTION_SENTINEL.to_owned(),
            selected_items: BTreeSet::new(),
            catalog: Vec::new(),
            regions: Vec::new(),
            subregions: Vec::new(),
        }
    }

    /// Package the entered fields into one create request.
    ///
    /// Permissive: an empty item selection is packaged as an empty list.
    pub fn submission(&self) -> CreatePointRequest {
        CreatePointRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            latitude: self.selected_position.latitude,
            longitude: self.selected_position.longitude,
            city: self.subregion.clone(),
            uf: self.region.clone(),
            items: self.selected_items.iter().copied().collect(),
        }
    }
}

/// Returns whether selecting `code` should trigger a subregion fetch.
pub fn region_requires_subregion_fetch(code: &str) -> bool {
    code != SELECTION_SENTINEL
}

/// Everything that can happen to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Catalog fetch completed.
    CatalogLoaded(Vec<CatalogItem>),
    /// Region-list fetch completed.
    RegionsLoaded(Vec<String>),
    /// Subregion-list fetch completed for the current region.
    SubregionsLoaded(Vec<String>),
    /// Device geolocation resolved (or fell back).
    DevicePositionResolved(Position),
    /// Contact name edited.
    NameChanged(String),
    /// Contact email edited.
    EmailChanged(String),
    /// Map clicked at a coordinate.
    MapClicked(Position),
    /// Region option chosen.
    RegionSelected(String),
    /// Subregion option chosen.
    SubregionSelected(String),
    /// Item tile clicked: adds when absent, removes when present.
    ItemToggled(i32),
    /// Create request dispatched.
    SubmitStarted,
    /// Create request succeeded.
    SubmitSucceeded,
    /// Create request failed.
    SubmitFailed(String),
}

/// Phase after a user edit: in-flight and terminal phases are sticky,
/// everything else (including `Failed`) becomes `Editing`.
fn edited(phase: FormPhase) -> FormPhase {
    match phase {
        FormPhase::Submitting => FormPhase::Submitting,
        FormPhase::Submitted => FormPhase::Submitted,
        FormPhase::Idle | FormPhase::Editing | FormPhase::Failed { .. } => FormPhase::Editing,
    }
}

/// Advance the form by one action. Pure: no I/O, no clocks.
pub fn reduce(state: FormState, action: FormAction) -> FormState {
    let mut next = state;
    match action {
        FormAction::CatalogLoaded(catalog) => {
            next.catalog = catalog;
        }
        FormAction::RegionsLoaded(mut regions) => {
            regions.sort();
            next.regions = regions;
        }
        FormAction::SubregionsLoaded(mut subregions) => {
            subregions.sort();
            next.subregions = subregions;
        }
        FormAction::DevicePositionResolved(position) => {
            next.device_position = position;
        }
        FormAction::NameChanged(name) => {
            next.name = name;
            next.phase = edited(next.phase);
        }
        FormAction::EmailChanged(email) => {
            next.email = email;
            next.phase = edited(next.phase);
        }
        FormAction::MapClicked(position) => {
            next.selected_position = position;
            next.phase = edited(next.phase);
        }
        FormAction::RegionSelected(region) => {
            // A region change invalidates the previous subregion choice; the
            // sentinel additionally clears the stale subregion list.
            if region == SELECTION_SENTINEL {
                next.subregions.clear();
            }
            next.region = region;
            next.subregion = SELECTION_SENTINEL.to_owned();
            next.phase = edited(next.phase);
        }
        FormAction::SubregionSelected(subregion) => {
            next.subregion = subregion;
            next.phase = edited(next.phase);
        }
        FormAction::ItemToggled(id) => {
            if !next.selected_items.remove(&id) {
                let _ = next.selected_items.insert(id);
            }
            next.phase = edited(next.phase);
        }
        FormAction::SubmitStarted => {
            next.phase = FormPhase::Submitting;
        }
        FormAction::SubmitSucceeded => {
            next.phase = FormPhase::Submitted;
        }
        FormAction::SubmitFailed(reason) => {
            next.phase = FormPhase::Failed { reason };
        }
    }
    next
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the reducer laws.
    use super::*;
    use rstest::rstest;

    fn editing_state() -> FormState {
        reduce(
            FormState::new(),
            FormAction::NameChanged("Acme".to_owned()),
        )
    }

    #[rstest]
    fn new_form_starts_idle_with_sentinels_and_fallback() {
        let state = FormState::new();
        assert_eq!(state.phase, FormPhase::Idle);
        assert_eq!(state.region, SELECTION_SENTINEL);
        assert_eq!(state.subregion, SELECTION_SENTINEL);
        assert_eq!(state.selected_position, FALLBACK_POSITION);
        assert_eq!(state.device_position, FALLBACK_POSITION);
        assert!(state.selected_items.is_empty());
    }

    #[rstest]
    fn first_edit_moves_idle_to_editing() {
        assert_eq!(editing_state().phase, FormPhase::Editing);
    }

    #[rstest]
    #[case::present_then_absent(true)]
    #[case::absent_stays_absent(false)]
    fn toggling_twice_restores_membership(#[case] preselected: bool) {
        let mut state = FormState::new();
        if preselected {
            state = reduce(state, FormAction::ItemToggled(5));
        }
        let before = state.selected_items.contains(&5);

        let state = reduce(state, FormAction::ItemToggled(5));
        let state = reduce(state, FormAction::ItemToggled(5));

        assert_eq!(state.selected_items.contains(&5), before);
    }

    #[rstest]
    fn region_lists_are_stored_sorted() {
        let state = reduce(
            FormState::new(),
            FormAction::RegionsLoaded(vec!["SP".to_owned(), "AC".to_owned(), "SC".to_owned()]),
        );
        assert_eq!(state.regions, vec!["AC", "SC", "SP"]);

        let state = reduce(
            state,
            FormAction::SubregionsLoaded(vec!["Itajaí".to_owned(), "Blumenau".to_owned()]),
        );
        assert_eq!(state.subregions, vec!["Blumenau", "Itajaí"]);
    }

    #[rstest]
    fn region_change_resets_subregion_selection() {
        let state = reduce(editing_state(), FormAction::RegionSelected("SC".to_owned()));
        let state = reduce(state, FormAction::SubregionSelected("Blumenau".to_owned()));
        let state = reduce(state, FormAction::RegionSelected("SP".to_owned()));
        assert_eq!(state.subregion, SELECTION_SENTINEL);
    }

    #[rstest]
    fn sentinel_region_clears_subregion_list_and_requires_no_fetch() {
        let state = reduce(editing_state(), FormAction::RegionSelected("SC".to_owned()));
        let state = reduce(
            state,
            FormAction::SubregionsLoaded(vec!["Blumenau".to_owned()]),
        );
        let state = reduce(state, FormAction::RegionSelected(SELECTION_SENTINEL.to_owned()));

        assert!(state.subregions.is_empty());
        assert!(!region_requires_subregion_fetch(SELECTION_SENTINEL));
        assert!(region_requires_subregion_fetch("SC"));
    }

    #[rstest]
    fn submit_lifecycle_reaches_submitted() {
        let state = reduce(editing_state(), FormAction::SubmitStarted);
        assert_eq!(state.phase, FormPhase::Submitting);
        let state = reduce(state, FormAction::SubmitSucceeded);
        assert_eq!(state.phase, FormPhase::Submitted);
    }

    #[rstest]
    fn failed_submit_preserves_fields_and_recovers_on_edit() {
        let state = reduce(editing_state(), FormAction::SubmitStarted);
        let state = reduce(state, FormAction::SubmitFailed("boom".to_owned()));

        assert_eq!(
            state.phase,
            FormPhase::Failed {
                reason: "boom".to_owned()
            }
        );
        assert_eq!(state.name, "Acme");

        let state = reduce(state, FormAction::EmailChanged("a@b.com".to_owned()));
        assert_eq!(state.phase, FormPhase::Editing);
        assert_eq!(state.name, "Acme");
    }

    #[rstest]
    fn submission_packages_selected_coordinate_and_items() {
        let state = reduce(editing_state(), FormAction::EmailChanged("a@b.com".to_owned()));
        let state = reduce(state, FormAction::RegionSelected("SC".to_owned()));
        let state = reduce(state, FormAction::SubregionSelected("Blumenau".to_owned()));
        let state = reduce(
            state,
            FormAction::MapClicked(Position {
                latitude: -27.2,
                longitude: -49.6,
            }),
        );
        let state = reduce(state, FormAction::ItemToggled(2));
        let state = reduce(state, FormAction::ItemToggled(1));

        let request = state.submission();
        assert_eq!(request.name, "Acme");
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.latitude, -27.2);
        assert_eq!(request.longitude, -49.6);
        assert_eq!(request.city, "Blumenau");
        assert_eq!(request.uf, "SC");
        assert_eq!(request.items, vec![1, 2]);
    }

    #[rstest]
    fn empty_selection_still_packages_a_request() {
        let request = editing_state().submission();
        assert!(request.items.is_empty());
    }
}
