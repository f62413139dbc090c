//! Runs one template against one seed and parameter set.

use log::debug;

use crate::error::GenerationError;
use crate::level::GeneratedLevelData;
use crate::params::GenerationParameters;
use crate::random::RandomProvider;
use crate::template::LevelTemplate;

/// Produce one unverified layout from `(parameters, seed, template)`.
///
/// Re-seeds `random` at entry, so the output is fully determined by its arguments: two calls with
/// identical inputs yield identical glyph and obstacle placements. The returned level carries no
/// solution paths; verification is a separate phase
/// (see [`find_solution_paths`](crate::validator::find_solution_paths)).
pub fn generate<T: LevelTemplate, R: RandomProvider>(
    parameters: &GenerationParameters,
    seed: &str,
    template: &T,
    random: &mut R,
) -> Result<GeneratedLevelData, GenerationError> {
    parameters.validate()?;
    if seed.is_empty() {
        return Err(GenerationError::InvalidSeed);
    }

    random.initialize(seed);
    let state = template.initialize_grid(parameters.grid, parameters, random)?;

    debug!(
        "generated {:?} layout from seed {:?}: {} glyphs, {} obstacles on {}",
        template.kind(),
        seed,
        state.glyphs.len(),
        state.obstacles.len(),
        parameters.grid,
    );

    Ok(GeneratedLevelData {
        grid: parameters.grid,
        glyphs: state.glyphs,
        obstacles: state.obstacles,
        solutions: Vec::new(),
        seed: seed.to_owned(),
        parameters: parameters.clone(),
    })
}
