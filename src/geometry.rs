use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::board::{Cell, SPACES_PER_SIDE};

/// A point in board space: origin top-left, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotation in screen convention, so positive angles turn clockwise on screen.
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: [Point; 4],
}

impl Polygon {
    pub fn centroid(&self) -> Point {
        let sum = self
            .vertices
            .iter()
            .fold(Point::default(), |acc, vertex| acc + *vertex);
        Point::new(sum.x / 4.0, sum.y / 4.0)
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..4).map(move |i| (self.vertices[i], self.vertices[(i + 1) % 4]))
    }
}

/// Placement of one cell: rotate the canonical bottom side about the board
/// center, then translate along the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTransform {
    pub translation: Point,
    pub rotation: f64,
    pub pivot: Point,
}

impl CellTransform {
    pub fn apply(&self, local: Point) -> Point {
        let on_bottom_edge = local + self.translation;
        (on_bottom_edge - self.pivot).rotate(self.rotation) + self.pivot
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    #[error("board size must be positive, got {0}")]
    NonPositiveSize(f64),
    #[error("band ratio must lie strictly between 0 and 0.5, got {0}")]
    BandRatioOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    pub size: f64,
    pub band_ratio: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            size: 960.0,
            band_ratio: 0.125,
        }
    }
}

impl BoardLayout {
    pub fn new(size: f64, band_ratio: f64) -> Result<Self, LayoutError> {
        let layout = Self { size, band_ratio };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.size > 0.0) {
            return Err(LayoutError::NonPositiveSize(self.size));
        }
        if !(self.band_ratio > 0.0 && self.band_ratio < 0.5) {
            return Err(LayoutError::BandRatioOutOfRange(self.band_ratio));
        }
        Ok(())
    }

    /// Thickness of every edge band; also the side of a corner square.
    pub fn band(&self) -> f64 {
        self.band_ratio * self.size
    }

    pub fn cell_width(&self) -> f64 {
        (self.size - 2.0 * self.band()) / (SPACES_PER_SIDE - 1) as f64
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    /// Width and height of the cell before rotation.
    pub fn cell_extent(&self, cell: Cell) -> (f64, f64) {
        if cell.is_corner() {
            (self.band(), self.band())
        } else {
            (self.cell_width(), self.band())
        }
    }

    pub fn cell_transform(&self, cell: Cell) -> CellTransform {
        let offset = cell.offset() as f64;
        let x = self.size - (self.band() + self.cell_width() * offset);
        let y = self.size - self.band();
        CellTransform {
            translation: Point::new(x, y),
            rotation: cell.side() as f64 * FRAC_PI_2,
            pivot: self.center(),
        }
    }

    pub fn cell_polygon(&self, cell: Cell) -> Polygon {
        let transform = self.cell_transform(cell);
        let (width, height) = self.cell_extent(cell);
        let local = [
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ];
        Polygon {
            vertices: local.map(|corner| transform.apply(corner)),
        }
    }

    /// Inverse of [`BoardLayout::cell_polygon`]: which cell lies under a
    /// board-space point. Corner squares fall to the band on which they are
    /// offset zero; the interior and anything off the board yields `None`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Cell> {
        if !(0.0..=self.size).contains(&x) || !(0.0..=self.size).contains(&y) {
            return None;
        }
        let band = self.band();
        let top = y <= band;
        let bottom = y >= self.size - band;
        let left = x <= band;
        let right = x >= self.size - band;

        let (side, along_edge) = if bottom && !left {
            (0, self.size - x)
        } else if left && !top {
            (1, self.size - y)
        } else if top && !right {
            (2, x)
        } else if right && !bottom {
            (3, y)
        } else {
            return None;
        };

        let position = (along_edge + self.cell_width() - band).max(0.0);
        let offset = (position / self.cell_width()).floor() as usize;
        Cell::from_side_offset(side, offset.min(SPACES_PER_SIDE - 1))
    }
}
