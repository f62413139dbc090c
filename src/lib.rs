#![warn(missing_docs)]

//! # `glyphweave`
//!
//! A seeded procedural generator and solvability verifier for glyph-pair grid puzzle levels.
//! A level is a rectangular grid holding glyph pairs (two placements sharing a positive pair id)
//! and obstacles; a level is solvable when every pair has a connecting path that avoids the
//! obstacles. Begin with a [`GenerationOrchestrator`]: give it base [`GenerationParameters`], a
//! [`TemplateProvider`](template::TemplateProvider), a
//! [`PathfindingAdapter`](pathfind::PathfindingAdapter) and a [`LevelStore`](store::LevelStore),
//! then call
//! [`generate_and_record_level`](GenerationOrchestrator::generate_and_record_level) with the
//! player's [`PlayerProgression`].
//!
//! # Internals
//! Generation runs as an explicit retry loop. Base parameters are scaled once per request by
//! [`scaler::scale_parameters`]. Each attempt draws a fresh seed, selects a
//! [`LevelTemplate`](template::LevelTemplate) for one of the allowed puzzle kinds, and lets it
//! place glyph pairs and obstacles using a seeded [`RandomProvider`](random::RandomProvider);
//! the same seed and parameters always reproduce the same layout. The
//! [`validator`] then asks the pathfinding adapter for a path per pair; the default adapter runs
//! A* over an undirected [`petgraph`] grid graph with one node per open cell, so obstacles are
//! encoded structurally rather than checked during the search. A layout with an unsolved pair is
//! discarded and the loop retries under a new seed, up to [`MAX_GENERATION_RETRIES`] attempts.
//! A verified level is promoted to a [`StoredGeneratedLevel`] carrying its reproduction data
//! (seed, parameters, solutions) and handed to the store before the level is returned.

pub use error::GenerationError;
pub use level::{
    GeneratedLevelData, GlyphPlacement, ObstacleKind, ObstaclePlacement, PairId, SolutionPath,
    StoredGeneratedLevel,
};
pub use location::{Coord, Dimension, GridDimensions, Point};
pub use orchestrator::{CancelToken, GenerationOrchestrator, MAX_GENERATION_RETRIES};
pub use params::{GenerationParameters, ParameterViolation, PlayerProgression, PuzzleKind};
pub use pathfind::{AStarPathfinder, PathfindingError};
pub use random::{RandomError, RandomProvider, SeededRandom};
pub use store::StoreError;

pub mod error;
pub mod generator;
pub mod level;
pub mod location;
pub mod orchestrator;
pub mod params;
pub mod pathfind;
pub mod random;
pub mod scaler;
pub mod store;
pub mod template;
mod tests;
pub mod validator;
