//! Derives glyph pairs from a layout and verifies each has a connecting path.

use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZero;

use log::{debug, warn};

use crate::level::{GeneratedLevelData, PairId, SolutionPath};
use crate::location::Point;
use crate::pathfind::{GridData, PathConstraints, PathfindingAdapter, PathfindingError};

fn pair_groups(level: &GeneratedLevelData) -> BTreeMap<NonZero<PairId>, Vec<Point>> {
    let mut groups: BTreeMap<NonZero<PairId>, Vec<Point>> = BTreeMap::new();
    for glyph in &level.glyphs {
        // unpaired glyphs (pair id 0) are decoration and never require a path
        if let Some(pair_id) = NonZero::new(glyph.pair_id) {
            groups.entry(pair_id).or_default().push(glyph.position);
        }
    }

    groups
}

/// Find a connecting path for every well-formed glyph pair of `level` under `constraints`.
///
/// Pairs are processed in ascending pair id order. Malformed groups (a positive pair id on any
/// number of placements other than two) are skipped with a warning; pairs with no path under the
/// obstacle layout are simply absent from the result. Absence is the failure signal, not an error.
pub fn find_solution_paths_with<P: PathfindingAdapter>(
    level: &GeneratedLevelData,
    pathfinder: &P,
    constraints: &PathConstraints,
) -> Result<Vec<SolutionPath>, PathfindingError> {
    let grid = GridData::from_level(level);

    let mut solutions = Vec::new();
    for (pair_id, positions) in pair_groups(level) {
        if positions.len() != 2 {
            warn!(
                "pair {} is malformed: {} placements instead of 2",
                pair_id,
                positions.len()
            );
            continue;
        }

        match pathfinder.find_path(positions[0], positions[1], &grid, constraints)? {
            Some(points) if points.len() >= 2 => {
                solutions.push(SolutionPath { pair_id, points });
            }
            _ => {
                debug!("no path connects pair {} at {} and {}", pair_id, positions[0], positions[1]);
            }
        }
    }

    Ok(solutions)
}

/// [`find_solution_paths_with`] under the default constraints: no diagonal movement, no
/// corner-cutting.
pub fn find_solution_paths<P: PathfindingAdapter>(
    level: &GeneratedLevelData,
    pathfinder: &P,
) -> Result<Vec<SolutionPath>, PathfindingError> {
    find_solution_paths_with(level, pathfinder, &PathConstraints::default())
}

/// Whether every required glyph pair of `level` has a connecting path.
///
/// A layout with zero glyph pairs is trivially solvable. A malformed pair group counts as
/// required but can never be solved, so its presence makes the layout unsolvable.
pub fn is_solvable<P: PathfindingAdapter>(
    level: &GeneratedLevelData,
    pathfinder: &P,
) -> Result<bool, PathfindingError> {
    let required = level.required_pair_ids();
    if required.is_empty() {
        return Ok(true);
    }

    let solved: BTreeSet<NonZero<PairId>> = find_solution_paths(level, pathfinder)?
        .iter()
        .map(|solution| solution.pair_id)
        .collect();

    Ok(solved == required)
}
