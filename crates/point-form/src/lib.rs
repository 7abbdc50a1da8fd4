//! Point-creation form workflow for the Ecopoint registry.
//!
//! The form is modelled as an immutable state value plus a pure reducer
//! (`state`), with side effects sequenced by a controller (`controller`)
//! over two outbound clients: the backend API (`api`) and the external
//! geography provider (`geography`).

pub mod api;
pub mod controller;
pub mod geography;
pub mod state;

pub use controller::{ControllerError, PointFormController};
pub use state::{FormAction, FormPhase, FormState, Position, reduce};
