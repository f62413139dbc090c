//! Pure parameter scaling from player progression.

use crate::params::{GenerationParameters, PlayerProgression};

/// Hard cap on scaled `glyph_type_count`.
pub const GLYPH_TYPE_CAP: usize = 10;
/// Hard cap on scaled `min_glyph_pairs`.
pub const MIN_PAIR_CAP: usize = 8;
/// Hard cap on scaled `max_glyph_pairs`.
pub const MAX_PAIR_CAP: usize = 12;
/// Hard cap on scaled `max_obstacles`.
pub const OBSTACLE_CAP: usize = 15;
/// Hard cap on scaled `difficulty_tier`.
pub const TIER_CAP: u32 = 5;

/// Scale `base` parameters by player progression.
///
/// Scaling is monotonic in the progression inputs and capped per field; `grid` and
/// `allowed_puzzle_kinds` pass through unchanged. The scaled lower pair bound is clamped to the
/// scaled upper bound, so a valid `base` always scales to a valid parameter set. This function
/// never fails.
pub fn scale_parameters(
    base: &GenerationParameters,
    progression: &PlayerProgression,
) -> GenerationParameters {
    let zone = progression.current_zone as usize;
    let completed = progression.procedural_levels_completed as usize;

    let max_glyph_pairs = (base.max_glyph_pairs + zone).min(MAX_PAIR_CAP);
    let min_glyph_pairs = (base.min_glyph_pairs + zone / 2)
        .min(MIN_PAIR_CAP)
        .min(max_glyph_pairs);

    GenerationParameters {
        grid: base.grid,
        glyph_type_count: (base.glyph_type_count + zone / 2).min(GLYPH_TYPE_CAP),
        min_glyph_pairs,
        max_glyph_pairs,
        max_obstacles: (base.max_obstacles + completed / 5).min(OBSTACLE_CAP),
        allowed_puzzle_kinds: base.allowed_puzzle_kinds.clone(),
        difficulty_tier: (base.difficulty_tier + completed as u32 / 10).min(TIER_CAP),
    }
}
