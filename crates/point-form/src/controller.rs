//! Controller sequencing the form's effects around the pure reducer.
//!
//! The controller owns the [`FormState`] and the outbound clients. Fetch
//! outcomes and submission results re-enter the machine as actions; callers
//! observe the resulting state and navigate away once it reaches
//! `Submitted`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ApiError, PointsApi};
use crate::geography::{GeographyError, GeographySource};
use crate::state::{
    FALLBACK_POSITION, FormAction, FormState, Position, reduce, region_requires_subregion_fetch,
};

/// Errors surfaced by controller effects. No retries; the form state records
/// submission failures separately so entered fields survive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Geography provider call failed.
    #[error(transparent)]
    Geography(#[from] GeographyError),
}

/// Port for device-reported geolocation. `None` means unavailable or still
/// pending; the controller then falls back to the fixed coordinate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Resolve the device position, if the platform can provide one.
    async fn current_position(&self) -> Option<Position>;
}

/// Fixture implementation for platforms without geolocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePositionSource;

#[async_trait]
impl PositionSource for FixturePositionSource {
    async fn current_position(&self) -> Option<Position> {
        None
    }
}

/// Drives one point-creation form.
pub struct PointFormController {
    api: Arc<dyn PointsApi>,
    geography: Arc<dyn GeographySource>,
    position: Arc<dyn PositionSource>,
    state: FormState,
}

impl PointFormController {
    /// Create a controller over the given clients with a fresh form.
    pub fn new(
        api: Arc<dyn PointsApi>,
        geography: Arc<dyn GeographySource>,
        position: Arc<dyn PositionSource>,
    ) -> Self {
        Self {
            api,
            geography,
            position,
            state: FormState::new(),
        }
    }

    /// Current form state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    fn dispatch(&mut self, action: FormAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Run the load-time effects: the catalog fetch, the region fetch, and
    /// device-position resolution run concurrently with no ordering
    /// guarantee between them.
    ///
    /// # Errors
    ///
    /// Propagates the first fetch failure after applying whatever succeeded.
    pub async fn load(&mut self) -> Result<(), ControllerError> {
        let (catalog, regions, position) = tokio::join!(
            self.api.list_items(),
            self.geography.regions(),
            self.position.current_position(),
        );

        self.dispatch(FormAction::DevicePositionResolved(
            position.unwrap_or(FALLBACK_POSITION),
        ));

        let catalog = catalog?;
        debug!(items = catalog.len(), "catalog loaded");
        self.dispatch(FormAction::CatalogLoaded(catalog));

        self.dispatch(FormAction::RegionsLoaded(regions?));
        Ok(())
    }

    /// Edit the contact name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.dispatch(FormAction::NameChanged(name.into()));
    }

    /// Edit the contact email.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.dispatch(FormAction::EmailChanged(email.into()));
    }

    /// Record a map click.
    pub fn click_map(&mut self, position: Position) {
        self.dispatch(FormAction::MapClicked(position));
    }

    /// Toggle an item category in the selection.
    pub fn toggle_item(&mut self, id: i32) {
        self.dispatch(FormAction::ItemToggled(id));
    }

    /// Choose a subregion.
    pub fn select_subregion(&mut self, subregion: impl Into<String>) {
        self.dispatch(FormAction::SubregionSelected(subregion.into()));
    }

    /// Choose a region. Non-sentinel codes trigger a subregion fetch keyed
    /// by the new code; the sentinel clears the list and fetches nothing.
    ///
    /// # Errors
    ///
    /// Propagates a failed subregion fetch; the region selection itself is
    /// already applied.
    pub async fn select_region(
        &mut self,
        code: impl Into<String>,
    ) -> Result<(), ControllerError> {
        let code = code.into();
        self.dispatch(FormAction::RegionSelected(code.clone()));

        if region_requires_subregion_fetch(&code) {
            let subregions = self.geography.subregions(&code).await?;
            self.dispatch(FormAction::SubregionsLoaded(subregions));
        }
        Ok(())
    }

    /// Submit the form. On success the machine reaches `Submitted` (the
    /// caller's cue to navigate away) and the created identifier is
    /// returned; on failure it records `Failed` with the fields preserved.
    ///
    /// # Errors
    ///
    /// Propagates the backend failure after recording it in the form state.
    pub async fn submit(&mut self) -> Result<i32, ControllerError> {
        self.dispatch(FormAction::SubmitStarted);
        let request = self.state.submission();

        let api = Arc::clone(&self.api);
        match api.create_point(request).await {
            Ok(created) => {
                self.dispatch(FormAction::SubmitSucceeded);
                Ok(created.id)
            }
            Err(err) => {
                self.dispatch(FormAction::SubmitFailed(err.to_string()));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for effect sequencing.
    use rstest::rstest;

    use super::*;
    use crate::api::{CatalogItem, CreatedPoint, MockPointsApi};
    use crate::geography::MockGeographySource;
    use crate::state::{FormPhase, SELECTION_SENTINEL};

    fn catalog() -> Vec<CatalogItem> {
        vec![CatalogItem {
            id: 1,
            title: "Lâmpadas".to_owned(),
            image_url: "http://localhost:3333/uploads/lampadas.svg".to_owned(),
        }]
    }

    fn controller(
        api: MockPointsApi,
        geography: MockGeographySource,
        position: MockPositionSource,
    ) -> PointFormController {
        PointFormController::new(Arc::new(api), Arc::new(geography), Arc::new(position))
    }

    fn quiet_position() -> MockPositionSource {
        let mut position = MockPositionSource::new();
        position.expect_current_position().returning(|| None);
        position
    }

    #[rstest]
    #[tokio::test]
    async fn load_populates_catalog_and_sorted_regions() {
        let mut api = MockPointsApi::new();
        api.expect_list_items().return_once(|| Ok(catalog()));
        let mut geography = MockGeographySource::new();
        geography
            .expect_regions()
            .return_once(|| Ok(vec!["SP".to_owned(), "SC".to_owned()]));

        let mut controller = controller(api, geography, quiet_position());
        controller.load().await.expect("load succeeds");

        let state = controller.state();
        assert_eq!(state.catalog, catalog());
        assert_eq!(state.regions, vec!["SC", "SP"]);
        assert_eq!(state.device_position, FALLBACK_POSITION);
    }

    #[rstest]
    #[tokio::test]
    async fn load_prefers_device_reported_position() {
        let mut api = MockPointsApi::new();
        api.expect_list_items().return_once(|| Ok(Vec::new()));
        let mut geography = MockGeographySource::new();
        geography.expect_regions().return_once(|| Ok(Vec::new()));
        let reported = Position {
            latitude: -23.55,
            longitude: -46.63,
        };
        let mut position = MockPositionSource::new();
        position
            .expect_current_position()
            .returning(move || Some(reported));

        let mut controller = controller(api, geography, position);
        controller.load().await.expect("load succeeds");

        assert_eq!(controller.state().device_position, reported);
    }

    #[rstest]
    #[tokio::test]
    async fn select_region_fetches_subregions_keyed_by_code() {
        let mut geography = MockGeographySource::new();
        geography
            .expect_subregions()
            .withf(|code| code == "SC")
            .times(1)
            .return_once(|_| Ok(vec!["Itajaí".to_owned(), "Blumenau".to_owned()]));

        let mut controller =
            controller(MockPointsApi::new(), geography, quiet_position());
        controller
            .select_region("SC")
            .await
            .expect("region selection succeeds");

        let state = controller.state();
        assert_eq!(state.region, "SC");
        assert_eq!(state.subregions, vec!["Blumenau", "Itajaí"]);
    }

    #[rstest]
    #[tokio::test]
    async fn sentinel_region_issues_no_subregion_fetch() {
        let mut geography = MockGeographySource::new();
        // Exactly one fetch: the initial "SC" selection. Re-selecting the
        // sentinel must not fetch for "0".
        geography
            .expect_subregions()
            .withf(|code| code == "SC")
            .times(1)
            .return_once(|_| Ok(vec!["Blumenau".to_owned()]));

        let mut controller =
            controller(MockPointsApi::new(), geography, quiet_position());
        controller.select_region("SC").await.expect("first selection");
        controller
            .select_region(SELECTION_SENTINEL)
            .await
            .expect("sentinel selection");

        let state = controller.state();
        assert_eq!(state.region, SELECTION_SENTINEL);
        assert!(state.subregions.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn submit_success_reaches_submitted_and_returns_id() {
        let mut api = MockPointsApi::new();
        api.expect_create_point()
            .withf(|request| {
                request.name == "Acme" && request.uf == "SC" && request.items == vec![1]
            })
            .return_once(|request| {
                Ok(CreatedPoint {
                    id: 7,
                    image: "image-fake".to_owned(),
                    name: request.name,
                    email: request.email,
                    latitude: request.latitude,
                    longitude: request.longitude,
                    city: request.city,
                    uf: request.uf,
                })
            });
        let mut geography = MockGeographySource::new();
        geography
            .expect_subregions()
            .return_once(|_| Ok(vec!["Blumenau".to_owned()]));

        let mut controller = controller(api, geography, quiet_position());
        controller.set_name("Acme");
        controller.set_email("a@b.com");
        controller.select_region("SC").await.expect("region selection");
        controller.select_subregion("Blumenau");
        controller.toggle_item(1);

        let id = controller.submit().await.expect("submission succeeds");
        assert_eq!(id, 7);
        assert_eq!(controller.state().phase, FormPhase::Submitted);
    }

    #[rstest]
    #[tokio::test]
    async fn submit_failure_records_failed_phase_and_preserves_fields() {
        let mut api = MockPointsApi::new();
        api.expect_create_point()
            .return_once(|_| Err(ApiError::transport("connection reset")));

        let mut controller =
            controller(api, MockGeographySource::new(), quiet_position());
        controller.set_name("Acme");

        let error = controller.submit().await.expect_err("submission fails");
        assert!(matches!(error, ControllerError::Api(_)));

        let state = controller.state();
        assert!(matches!(state.phase, FormPhase::Failed { .. }));
        assert_eq!(state.name, "Acme", "entered fields survive a failure");
    }
}
