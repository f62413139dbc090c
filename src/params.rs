use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::VariantArray;
use thiserror::Error;

use crate::location::GridDimensions;

/// The puzzle variants a level may be generated as.
///
/// Each kind maps to one [`LevelTemplate`](crate::template::LevelTemplate) implementation with its
/// own placement strategy; see the [`template`](crate::template) module.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, Serialize, Deserialize)]
pub enum PuzzleKind {
    /// Free-form pair scatter.
    Path,
    /// Glyph types assigned in a fixed cycle, endpoints spread apart.
    Sequence,
    /// Glyph types drawn at random per pair, so colors may repeat.
    ColorMatch,
}

/// Ways a [`GenerationParameters`] value can violate its own invariants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ParameterViolation {
    /// `glyph_type_count` must be positive.
    #[error("at least one glyph type is required")]
    ZeroGlyphTypes,
    /// `min_glyph_pairs` must be positive.
    #[error("at least one glyph pair is required")]
    ZeroMinPairs,
    /// `max_glyph_pairs` must be at least `min_glyph_pairs`.
    #[error("pair bounds inverted: min {min} > max {max}")]
    PairBoundsInverted {
        /// The offending lower bound.
        min: usize,
        /// The offending upper bound.
        max: usize,
    },
    /// `allowed_puzzle_kinds` must not be empty.
    #[error("no puzzle kinds allowed")]
    EmptyPuzzleKinds,
}

/// One generation attempt's parameter set.
///
/// Produced fresh per request by [`scale_parameters`](crate::scaler::scale_parameters) and treated
/// as immutable from then on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// The extents of the level grid.
    pub grid: GridDimensions,
    /// How many distinct glyph types templates may place.
    pub glyph_type_count: usize,
    /// The fewest glyph pairs a template may place.
    pub min_glyph_pairs: usize,
    /// The most glyph pairs a template may place.
    pub max_glyph_pairs: usize,
    /// The most obstacles a template may place.
    pub max_obstacles: usize,
    /// The puzzle kinds a level may be generated as.
    pub allowed_puzzle_kinds: BTreeSet<PuzzleKind>,
    /// Coarse difficulty tier, informational to downstream consumers.
    pub difficulty_tier: u32,
}

impl GenerationParameters {
    /// Check every invariant on this parameter set, reporting the first violation found.
    pub fn validate(&self) -> Result<(), ParameterViolation> {
        if self.glyph_type_count == 0 {
            return Err(ParameterViolation::ZeroGlyphTypes);
        }
        if self.min_glyph_pairs == 0 {
            return Err(ParameterViolation::ZeroMinPairs);
        }
        if self.max_glyph_pairs < self.min_glyph_pairs {
            return Err(ParameterViolation::PairBoundsInverted {
                min: self.min_glyph_pairs,
                max: self.max_glyph_pairs,
            });
        }
        if self.allowed_puzzle_kinds.is_empty() {
            return Err(ParameterViolation::EmptyPuzzleKinds);
        }

        Ok(())
    }
}

/// Player progression data driving difficulty scaling.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgression {
    /// The zone the player has reached.
    pub current_zone: u32,
    /// How many procedurally generated levels the player has completed.
    pub procedural_levels_completed: u32,
}
