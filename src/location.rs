use std::fmt::{Display, Formatter};
use std::num::NonZero;

use itertools::Itertools;
use ndarray::Ix;
use serde::{Deserialize, Serialize};

/// The scalar type of grid coordinates.
pub type Coord = usize;
/// A nonzero grid extent along one axis.
pub type Dimension = NonZero<Coord>;

/// A cell `(x, y)` on a grid. The top left corner is `Point(0, 0)`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct Point(pub Coord, pub Coord);

impl Point {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// The Manhattan distance between `self` and `other`.
    pub fn manhattan_distance(&self, other: Point) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }
}

impl From<(Ix, Ix)> for Point {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The extents of a rectangular level grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Number of columns, i.e. the width of the grid.
    pub columns: Dimension,
    /// Number of rows, i.e. the height of the grid.
    pub rows: Dimension,
}

impl GridDimensions {
    /// Construct dimensions from a `(columns, rows)` pair.
    ///
    /// Returns [`None`] if either extent is zero.
    pub fn new(columns: Coord, rows: Coord) -> Option<Self> {
        Some(Self {
            columns: NonZero::new(columns)?,
            rows: NonZero::new(rows)?,
        })
    }

    /// The total number of cells on a grid of these dimensions.
    pub fn cell_count(&self) -> usize {
        self.columns.get() * self.rows.get()
    }

    /// Whether `point` lies within `[0, columns) x [0, rows)`.
    pub fn contains(&self, point: Point) -> bool {
        point.0 < self.columns.get() && point.1 < self.rows.get()
    }

    /// Iterate every cell of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        (0..self.rows.get())
            .cartesian_product(0..self.columns.get())
            .map(|(y, x)| Point(x, y))
    }
}

impl Display for GridDimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}
