use std::collections::HashSet;

use petgraph::algo::astar;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use thiserror::Error;

use crate::level::GeneratedLevelData;
use crate::location::{GridDimensions, Point};

/// The four cardinal steps on a square grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub(crate) enum SquareStep {
    Up,
    Down,
    Left,
    Right,
}

impl SquareStep {
    pub(crate) fn attempt_from(&self, point: Point) -> Point {
        match self {
            Self::Up => point.offset_by((0, -1)),
            Self::Down => point.offset_by((0, 1)),
            Self::Left => point.offset_by((-1, 0)),
            Self::Right => point.offset_by((1, 0)),
        }
    }

    // stepping down and to the right from each cell covers every edge exactly once
    pub(crate) const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];
}

/// A level's traversable area: grid extents plus blocked cells.
///
/// Built by the caller from level data; pathfinding never mutates it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridData {
    /// The extents of the grid.
    pub dims: GridDimensions,
    /// Every blocked cell. Coordinates outside the grid are ignored.
    pub obstacles: HashSet<Point>,
}

impl GridData {
    /// Build grid data from a level's dimensions and obstacle placements.
    pub fn from_level(level: &GeneratedLevelData) -> Self {
        Self {
            dims: level.grid,
            obstacles: level
                .obstacles
                .iter()
                .map(|obstacle| obstacle.position)
                .collect(),
        }
    }

    /// Whether `point` is on the grid and not blocked.
    pub fn is_open(&self, point: Point) -> bool {
        self.dims.contains(point) && !self.obstacles.contains(&point)
    }
}

/// Movement rules for a pathfinding request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathConstraints {
    /// Whether diagonal steps are allowed.
    pub allow_diagonal: bool,
    /// When diagonal steps are allowed, forbid cutting past an obstacle corner: a diagonal step
    /// requires both orthogonal neighbors it passes to be open.
    pub dont_cross_corners: bool,
}

impl Default for PathConstraints {
    fn default() -> Self {
        Self {
            allow_diagonal: false,
            dont_cross_corners: true,
        }
    }
}

/// Ways a pathfinding request can be malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum PathfindingError {
    /// A path was requested from or to a cell outside the grid. This indicates a template bug,
    /// not a merely unsolvable layout.
    #[error("endpoint {point} outside the {dims} grid")]
    InvalidEndpoint {
        /// The offending endpoint.
        point: Point,
        /// The extents of the grid the request was made against.
        dims: GridDimensions,
    },
}

/// Computes a path between two grid cells while avoiding obstacles.
///
/// Implementations must be deterministic (identical inputs yield identical paths), side-effect
/// free with respect to the caller's grid data, and must report blocked or unreachable targets as
/// `Ok(None)` rather than an error. Only an out-of-grid `start` or `end` is an error.
pub trait PathfindingAdapter {
    /// Find a path from `start` to `end`, endpoints included, or `None` if no path exists.
    fn find_path(
        &self,
        start: Point,
        end: Point,
        grid: &GridData,
        constraints: &PathConstraints,
    ) -> Result<Option<Vec<Point>>, PathfindingError>;
}

/// The standard [`PathfindingAdapter`]: A* over an undirected grid graph.
///
/// The graph holds one node per open cell and one edge per legal step, so obstacles and corner
/// rules are encoded structurally and the search itself stays a plain shortest-path query.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathfinder;

impl AStarPathfinder {
    fn build_graph(grid: &GridData, constraints: &PathConstraints) -> UnGraphMap<Point, ()> {
        let (columns, rows) = (grid.dims.columns.get(), grid.dims.rows.get());

        let mut graph = UnGraphMap::with_capacity(
            grid.dims.cell_count(),
            // a complete grid of this size, which usually isn't too far off
            (columns - 1) * rows + (rows - 1) * columns,
        );

        for point in grid.dims.points() {
            if !grid.is_open(point) {
                continue;
            }
            graph.add_node(point);

            for step in SquareStep::FORWARD_VARIANTS {
                let neighbor = step.attempt_from(point);
                if grid.is_open(neighbor) {
                    graph.add_edge(point, neighbor, ());
                }
            }

            if constraints.allow_diagonal {
                for offset in [(1isize, 1isize), (-1, 1)] {
                    let neighbor = point.offset_by(offset);
                    if !grid.is_open(neighbor) {
                        continue;
                    }
                    if constraints.dont_cross_corners {
                        let across = point.offset_by((offset.0, 0));
                        let down = point.offset_by((0, offset.1));
                        if !grid.is_open(across) || !grid.is_open(down) {
                            continue;
                        }
                    }
                    graph.add_edge(point, neighbor, ());
                }
            }
        }

        graph
    }
}

impl PathfindingAdapter for AStarPathfinder {
    fn find_path(
        &self,
        start: Point,
        end: Point,
        grid: &GridData,
        constraints: &PathConstraints,
    ) -> Result<Option<Vec<Point>>, PathfindingError> {
        for endpoint in [start, end] {
            if !grid.dims.contains(endpoint) {
                return Err(PathfindingError::InvalidEndpoint {
                    point: endpoint,
                    dims: grid.dims,
                });
            }
        }

        if !grid.is_open(start) || !grid.is_open(end) {
            return Ok(None);
        }

        let graph = Self::build_graph(grid, constraints);

        let heuristic = |point: Point| {
            if constraints.allow_diagonal {
                // Chebyshev stays admissible once diagonal steps cost 1
                point.0.abs_diff(end.0).max(point.1.abs_diff(end.1))
            } else {
                point.manhattan_distance(end)
            }
        };

        Ok(astar(&graph, start, |node| node == end, |_| 1usize, heuristic).map(|(_, path)| path))
    }
}
