use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One of the nine goal-plane cells shared by accuracy scoring and the
/// penalty shootout's keeper logic. Row 0 is the top of the goal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GridCell {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl GridCell {
    pub const ALL: [GridCell; 9] = [
        GridCell::TopLeft,
        GridCell::TopCenter,
        GridCell::TopRight,
        GridCell::MiddleLeft,
        GridCell::MiddleCenter,
        GridCell::MiddleRight,
        GridCell::BottomLeft,
        GridCell::BottomCenter,
        GridCell::BottomRight,
    ];

    /// (column, row), each 0..=2.
    pub const fn coords(self) -> (i32, i32) {
        match self {
            GridCell::TopLeft => (0, 0),
            GridCell::TopCenter => (1, 0),
            GridCell::TopRight => (2, 0),
            GridCell::MiddleLeft => (0, 1),
            GridCell::MiddleCenter => (1, 1),
            GridCell::MiddleRight => (2, 1),
            GridCell::BottomLeft => (0, 2),
            GridCell::BottomCenter => (1, 2),
            GridCell::BottomRight => (2, 2),
        }
    }

    fn from_coords(column: i32, row: i32) -> Self {
        Self::ALL[(row * 3 + column) as usize]
    }

    pub fn chebyshev_distance(self, other: GridCell) -> i32 {
        let (ax, ay) = self.coords();
        let (bx, by) = other.coords();
        (ax - bx).abs().max((ay - by).abs())
    }

    pub fn is_corner(self) -> bool {
        matches!(self, GridCell::TopLeft | GridCell::TopRight | GridCell::BottomLeft | GridCell::BottomRight)
    }

    pub fn is_center(self) -> bool {
        matches!(self, GridCell::MiddleCenter)
    }

    /// Accuracy-challenge position multiplier: corners 3x, edges 2x, center 1x.
    pub fn position_multiplier(self) -> f32 {
        if self.is_corner() {
            3.0
        } else if self.is_center() {
            1.0
        } else {
            2.0
        }
    }
}

/// Projects a (roughly forward) kick/head direction onto the 3x3 goal
/// grid by splitting its horizontal (x) and vertical (y) components into
/// thirds. Shared by accuracy scoring and the goalkeeper's dive prediction
/// so both see the same cell for the same shot.
pub fn project_direction_to_cell(direction: Vector3<f32>) -> GridCell {
    let column = if direction.x < -1.0 / 3.0 {
        0
    } else if direction.x > 1.0 / 3.0 {
        2
    } else {
        1
    };
    let row = if direction.y > 1.0 / 3.0 {
        0
    } else if direction.y < -1.0 / 3.0 {
        2
    } else {
        1
    };
    GridCell::from_coords(column, row)
}
