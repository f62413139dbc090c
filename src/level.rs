use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Write};
use std::num::NonZero;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use strum::VariantArray;
use unordered_pair::UnorderedPair;
use uuid::Uuid;

use crate::location::{GridDimensions, Point};
use crate::params::GenerationParameters;

/// Identifies a glyph pair. `0` marks an unpaired glyph; any positive id must occur on exactly
/// two placements to form a valid pair, which the validator checks rather than assumes.
pub type PairId = usize;

/// One glyph placed on the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GlyphPlacement {
    /// Index of the glyph type, in `[0, glyph_type_count)`.
    pub glyph_type: usize,
    /// The cell this glyph occupies.
    pub position: Point,
    /// The pair this glyph belongs to, or `0` if unpaired.
    pub pair_id: PairId,
}

/// The obstacle variants templates may place.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// A fixed wall segment.
    Wall,
    /// A boulder blocking a single cell.
    Boulder,
}

/// One obstacle placed on the grid. Obstacles occupy their cell exclusively.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// The obstacle variant.
    pub kind: ObstacleKind,
    /// The cell this obstacle occupies.
    pub position: Point,
}

/// A verified connection between the two glyphs of one pair.
///
/// The first and last point equal the two glyph positions of the pair, in either order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SolutionPath {
    /// The pair this path connects.
    pub pair_id: NonZero<PairId>,
    /// The cells of the path, endpoints included, at least two long.
    pub points: Vec<Point>,
}

impl SolutionPath {
    /// The two endpoints of this path as an order-agnostic pair.
    pub fn endpoints(&self) -> UnorderedPair<Point> {
        // points.len() >= 2 is upheld by the validator
        UnorderedPair(self.points[0], self.points[self.points.len() - 1])
    }
}

/// The result of one generation attempt.
///
/// Owned exclusively by the orchestrator for the attempt's lifetime: discarded on validation
/// failure, promoted to a [`StoredGeneratedLevel`] on success.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLevelData {
    /// The extents of the level grid.
    pub grid: GridDimensions,
    /// Every glyph placed by the template.
    pub glyphs: Vec<GlyphPlacement>,
    /// Every obstacle placed by the template.
    pub obstacles: Vec<ObstaclePlacement>,
    /// Verified solution paths; empty until validation succeeds.
    pub solutions: Vec<SolutionPath>,
    /// The seed this layout was generated from.
    pub seed: String,
    /// The parameter set this layout was generated under.
    pub parameters: GenerationParameters,
}

impl GeneratedLevelData {
    /// The distinct positive pair ids present among the glyph placements.
    pub fn required_pair_ids(&self) -> BTreeSet<NonZero<PairId>> {
        self.glyphs
            .iter()
            .filter_map(|glyph| NonZero::new(glyph.pair_id))
            .collect()
    }
}

fn pair_display(pair_id: PairId) -> char {
    match NonZero::new(pair_id) {
        // letters repeat past 26 pairs; the render is for humans, not round-tripping
        Some(id) => (b'A' + ((id.get() - 1) % 26) as u8) as char,
        None => '*',
    }
}

impl Display for GeneratedLevelData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut cells = Array2::from_elem(
            (self.grid.rows.get(), self.grid.columns.get()),
            '.',
        );

        for obstacle in &self.obstacles {
            cells[obstacle.position.as_index()] = '#';
        }
        for glyph in &self.glyphs {
            cells[glyph.position.as_index()] = pair_display(glyph.pair_id);
        }

        for row in cells.rows() {
            for cell in row {
                f.write_char(*cell)?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}

/// The persistent record of a successfully generated level: its reproduction data.
///
/// Constructed by this crate, owned by the persistence collaborator afterwards. Never mutated
/// except an optional version bump on re-persist, and never deleted by this crate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredGeneratedLevel {
    /// Globally unique level identifier.
    pub level_id: String,
    /// The seed that reproduces the layout.
    pub seed: String,
    /// The parameter set that reproduces the layout.
    pub parameters: GenerationParameters,
    /// The verified solution paths.
    pub solutions: Vec<SolutionPath>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// Record version, starting at 1.
    pub version: u32,
}

impl StoredGeneratedLevel {
    /// Promote a fully verified level to its persistent record.
    ///
    /// Uses `level_id` when the caller supplied one, otherwise generates a fresh UUID.
    pub fn promote(level: &GeneratedLevelData, level_id: Option<String>) -> Self {
        Self {
            level_id: level_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            seed: level.seed.clone(),
            parameters: level.parameters.clone(),
            solutions: level.solutions.clone(),
            created_at: Utc::now(),
            version: 1,
        }
    }
}
