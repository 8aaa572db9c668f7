//! # Galley Core
//!
//! Domain types for the galley kitchen layout optimization engine.
//!
//! This crate defines the data model shared between the optimization engine
//! and external collaborators (CLI, serialization, catalog loading):
//!
//! - **Kitchen description**: [`Kitchen`], [`KitchenShape`], [`RestaurantType`]
//! - **Zones**: [`ZoneKind`], [`Zone`], target [`RatioBand`]s per restaurant type
//! - **Equipment catalog**: [`Catalog`], [`EquipmentSpec`], adjacency rules
//! - **Constraints**: [`Violation`], [`ConstraintKind`], [`Severity`], [`Limits`]
//! - **Scoring**: [`Score`] with fixed sub-score weights
//! - **Results**: [`LayoutResult`] matching the external JSON contract
//! - **Configuration**: [`SolverConfig`]
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod catalog;
pub mod constraint;
pub mod error;
pub mod kitchen;
pub mod placement;
pub mod result;
pub mod score;
pub mod solver;
pub mod zone;

// Re-exports
pub use catalog::{
    AdjacencyKind, AdjacencyRule, Catalog, Clearances, CountRule, EquipmentId, EquipmentSpec,
    Requirement,
};
pub use constraint::{ConstraintKind, Limits, Severity, Violation};
pub use error::{Error, Result};
pub use kitchen::{Kitchen, KitchenShape, RestaurantType};
pub use placement::{Placement, Rotation};
pub use result::{LayoutResult, PlacementReport, ZoneReport};
pub use score::{Score, WEIGHTS};
pub use solver::SolverConfig;
pub use zone::{ratio_band, ratio_bands, RatioBand, Zone, ZoneKind, WORKFLOW_ORDER};
