use crate::level::{GlyphPlacement, ObstacleKind, ObstaclePlacement, PairId};
use crate::location::{GridDimensions, Point};
use crate::params::{GenerationParameters, PuzzleKind};
use crate::random::{RandomError, RandomProvider};
use strum::VariantArray;

/// The glyph and obstacle placements a template produced on an empty grid.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InitialGridState {
    /// Every glyph placed.
    pub glyphs: Vec<GlyphPlacement>,
    /// Every obstacle placed.
    pub obstacles: Vec<ObstaclePlacement>,
}

/// A placement strategy for one puzzle kind.
///
/// Implementations must place between `min_glyph_pairs` and `max_glyph_pairs` pairs, respect
/// `glyph_type_count` and `max_obstacles`, and never put two placements on one cell. They may
/// legitimately produce layouts that turn out unsolvable; the validator and orchestrator handle
/// that, not the template.
pub trait LevelTemplate {
    /// The puzzle kind this template realizes.
    fn kind(&self) -> PuzzleKind;

    /// Place glyphs and obstacles on an empty grid of the given dimensions.
    fn initialize_grid<R: RandomProvider>(
        &self,
        grid: GridDimensions,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<InitialGridState, RandomError>;
}

fn shuffled_cells<R: RandomProvider>(
    grid: GridDimensions,
    random: &mut R,
) -> Result<Vec<Point>, RandomError> {
    let mut cells: Vec<Point> = grid.points().collect();
    random.shuffle(&mut cells)?;
    Ok(cells)
}

/// Draw a pair count within the configured bounds, clamped so the grid can host both endpoints
/// of every pair.
fn draw_pair_count<R: RandomProvider>(
    parameters: &GenerationParameters,
    free_cells: usize,
    random: &mut R,
) -> Result<usize, RandomError> {
    let drawn = random.next_int(
        parameters.min_glyph_pairs as i64,
        parameters.max_glyph_pairs as i64 + 1,
    )? as usize;

    Ok(drawn.min(free_cells / 2))
}

fn draw_obstacle_kind<R: RandomProvider>(random: &mut R) -> Result<ObstacleKind, RandomError> {
    let index = random.next_int(0, ObstacleKind::VARIANTS.len() as i64)? as usize;
    Ok(ObstacleKind::VARIANTS[index])
}

fn draw_obstacles<R: RandomProvider>(
    cells: &mut Vec<Point>,
    budget: usize,
    random: &mut R,
) -> Result<Vec<ObstaclePlacement>, RandomError> {
    let budget = budget.min(cells.len());
    let count = random.next_int(0, budget as i64 + 1)? as usize;

    let mut obstacles = Vec::with_capacity(count);
    for _ in 0..count {
        let kind = draw_obstacle_kind(random)?;
        // len() >= count is guaranteed by the budget clamp above
        let position = cells.pop().unwrap();
        obstacles.push(ObstaclePlacement { kind, position });
    }

    Ok(obstacles)
}

/// Free-form scatter: each pair gets a random glyph type and two arbitrary free cells, then
/// obstacles fill the full configured budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathPuzzle;

impl LevelTemplate for PathPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Path
    }

    fn initialize_grid<R: RandomProvider>(
        &self,
        grid: GridDimensions,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<InitialGridState, RandomError> {
        let mut cells = shuffled_cells(grid, random)?;
        let pair_count = draw_pair_count(parameters, cells.len(), random)?;

        let mut glyphs = Vec::with_capacity(pair_count * 2);
        for pair_id in 1..=pair_count as PairId {
            let glyph_type = random.next_int(0, parameters.glyph_type_count as i64)? as usize;
            for _ in 0..2 {
                glyphs.push(GlyphPlacement {
                    glyph_type,
                    position: cells.pop().unwrap(),
                    pair_id,
                });
            }
        }

        let obstacles = draw_obstacles(&mut cells, parameters.max_obstacles, random)?;

        Ok(InitialGridState { glyphs, obstacles })
    }
}

/// Ordered placement: glyph types cycle in a fixed sequence and pair endpoints are kept at
/// Manhattan distance two or more when the grid allows, so consecutive glyphs read as a chain.
/// Obstacles use half the configured budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequencePuzzle;

impl LevelTemplate for SequencePuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Sequence
    }

    fn initialize_grid<R: RandomProvider>(
        &self,
        grid: GridDimensions,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<InitialGridState, RandomError> {
        let mut cells = shuffled_cells(grid, random)?;
        let pair_count = draw_pair_count(parameters, cells.len(), random)?;

        let mut glyphs = Vec::with_capacity(pair_count * 2);
        for pair_id in 1..=pair_count as PairId {
            let glyph_type = (pair_id - 1) % parameters.glyph_type_count;

            let first = cells.pop().unwrap();
            // prefer a partner at least two steps away; fall back to the next free cell
            let second = match cells.iter().rposition(|c| first.manhattan_distance(*c) >= 2) {
                Some(index) => cells.swap_remove(index),
                None => cells.pop().unwrap(),
            };

            for position in [first, second] {
                glyphs.push(GlyphPlacement {
                    glyph_type,
                    position,
                    pair_id,
                });
            }
        }

        let obstacles = draw_obstacles(&mut cells, parameters.max_obstacles / 2, random)?;

        Ok(InitialGridState { glyphs, obstacles })
    }
}

/// Color-matching scatter: glyph types are drawn independently per pair so two pairs may share a
/// color, and obstacles stay off the border ring to keep edge lanes open.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorMatchPuzzle;

impl LevelTemplate for ColorMatchPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::ColorMatch
    }

    fn initialize_grid<R: RandomProvider>(
        &self,
        grid: GridDimensions,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<InitialGridState, RandomError> {
        let mut cells = shuffled_cells(grid, random)?;
        let pair_count = draw_pair_count(parameters, cells.len(), random)?;

        let mut glyphs = Vec::with_capacity(pair_count * 2);
        for pair_id in 1..=pair_count as PairId {
            let glyph_type = random.next_int(0, parameters.glyph_type_count as i64)? as usize;
            for _ in 0..2 {
                glyphs.push(GlyphPlacement {
                    glyph_type,
                    position: cells.pop().unwrap(),
                    pair_id,
                });
            }
        }

        let (columns, rows) = (grid.columns.get(), grid.rows.get());
        let mut interior: Vec<Point> = cells
            .into_iter()
            .filter(|p| p.0 > 0 && p.1 > 0 && p.0 < columns - 1 && p.1 < rows - 1)
            .collect();
        let obstacles = draw_obstacles(&mut interior, parameters.max_obstacles, random)?;

        Ok(InitialGridState { glyphs, obstacles })
    }
}

/// Dispatch over the built-in templates, selected by [`PuzzleKind`].
#[derive(Clone, Copy, Debug)]
pub enum StockTemplate {
    /// See [`PathPuzzle`].
    Path(PathPuzzle),
    /// See [`SequencePuzzle`].
    Sequence(SequencePuzzle),
    /// See [`ColorMatchPuzzle`].
    ColorMatch(ColorMatchPuzzle),
}

impl StockTemplate {
    /// The built-in template realizing `kind`.
    pub fn for_kind(kind: PuzzleKind) -> Self {
        match kind {
            PuzzleKind::Path => Self::Path(PathPuzzle),
            PuzzleKind::Sequence => Self::Sequence(SequencePuzzle),
            PuzzleKind::ColorMatch => Self::ColorMatch(ColorMatchPuzzle),
        }
    }
}

/// Selects the template for one generation attempt.
///
/// The orchestrator holds one of these so tests can substitute a fixed or misbehaving template
/// without touching the retry loop.
pub trait TemplateProvider {
    /// The template type this provider yields.
    type Template: LevelTemplate;

    /// Pick a template for the given parameter set, drawing any choice from `random` so the
    /// selection is reproducible per seed.
    fn select<R: RandomProvider>(
        &self,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<Self::Template, RandomError>;
}

/// The default [`TemplateProvider`]: draws a kind uniformly from `allowed_puzzle_kinds` and
/// returns the matching built-in template.
#[derive(Clone, Copy, Debug, Default)]
pub struct StockTemplates;

impl TemplateProvider for StockTemplates {
    type Template = StockTemplate;

    fn select<R: RandomProvider>(
        &self,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<StockTemplate, RandomError> {
        // BTreeSet iteration order makes the index -> kind mapping stable
        let kinds: Vec<PuzzleKind> = parameters.allowed_puzzle_kinds.iter().copied().collect();
        let index = random.next_int(0, kinds.len() as i64)? as usize;

        Ok(StockTemplate::for_kind(kinds[index]))
    }
}

impl LevelTemplate for StockTemplate {
    fn kind(&self) -> PuzzleKind {
        match self {
            Self::Path(t) => t.kind(),
            Self::Sequence(t) => t.kind(),
            Self::ColorMatch(t) => t.kind(),
        }
    }

    fn initialize_grid<R: RandomProvider>(
        &self,
        grid: GridDimensions,
        parameters: &GenerationParameters,
        random: &mut R,
    ) -> Result<InitialGridState, RandomError> {
        match self {
            Self::Path(t) => t.initialize_grid(grid, parameters, random),
            Self::Sequence(t) => t.initialize_grid(grid, parameters, random),
            Self::ColorMatch(t) => t.initialize_grid(grid, parameters, random),
        }
    }
}
