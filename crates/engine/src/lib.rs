//! # Galley Engine
//!
//! Kitchen layout optimization: partitions a footprint into functional
//! zones, places the required equipment, validates clearance and adjacency
//! constraints, scores the result, and improves it by seeded hill climbing.
//!
//! ## Pipeline
//!
//! 1. [`partition`] splits the footprint into storage, preparation,
//!    cooking and washing strips along the workflow direction.
//! 2. [`placement::PlacementEngine`] places each required instance by
//!    first-fit grid scan.
//! 3. [`validate::validate_layout`] reports every constraint breach as a
//!    hard or soft violation.
//! 4. [`scoring::Scorer`] grades workflow, space use, safety and
//!    accessibility into one overall score.
//! 5. [`optimizer::Optimizer`] iterates random moves, keeping strict
//!    improvements; restarts run in parallel via rayon.
//!
//! ## Example
//!
//! ```no_run
//! use galley_core::{Catalog, Kitchen, RestaurantType, SolverConfig};
//! use galley_engine::Optimizer;
//!
//! # fn main() -> galley_core::Result<()> {
//! let kitchen = Kitchen::rectangle(10.0, 8.0, RestaurantType::Casual, 50);
//! let catalog = Catalog::builtin();
//! let config = SolverConfig::new().with_seed(42);
//!
//! let result = Optimizer::new(&kitchen, &catalog, config).optimize()?;
//! println!("score {:.1}, success: {}", result.scores.overall, result.success);
//! # Ok(())
//! # }
//! ```

pub mod geometry;
pub mod optimizer;
pub mod partition;
pub mod placement;
pub mod scoring;
pub mod validate;

pub use optimizer::Optimizer;
pub use partition::{partition, partition_with_offsets};
pub use placement::PlacementEngine;
pub use scoring::Scorer;
pub use validate::validate_layout;
