//! Perspective projection for page turns.
//!
//! A page turn is a rotation of the content plane about one of its axes, seen through a pinhole
//! camera placed behind the plane. The projection is a 3×3 homogeneous matrix acting on 2-D
//! points, in the same row layout canvas APIs use for perspective concat.

use core::ops::Mul;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use pageflip::Orientation;

/// Canvas units per inch of camera distance.
pub const PIXELS_PER_INCH: f64 = 72.0;

/// A row-major 3×3 homogeneous 2-D transform.
///
/// Rows are `[scale_x, skew_x, trans_x]`, `[skew_y, scale_y, trans_y]` and
/// `[persp_0, persp_1, persp_2]`. A point `(x, y)` maps to `(X / W, Y / W)` where
/// `(X, Y, W) = M · (x, y, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    pub rows: [[f64; 3]; 3],
}

impl Perspective {
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[must_use]
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            rows: [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation by `degrees` about the horizontal (x) axis through the origin, projected from a
    /// camera `distance` units in front of the plane.
    ///
    /// Positive angles bring points below the axis toward the camera.
    #[must_use]
    pub fn rotate_x(degrees: f64, distance: f64) -> Self {
        let (s, c) = sin_cos(degrees);
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, c, 0.0], [0.0, -s / distance, 1.0]],
        }
    }

    /// Rotation by `degrees` about the vertical (y) axis through the origin, projected from a
    /// camera `distance` units in front of the plane.
    ///
    /// Positive angles send points right of the axis away from the camera.
    #[must_use]
    pub fn rotate_y(degrees: f64, distance: f64) -> Self {
        let (s, c) = sin_cos(degrees);
        Self {
            rows: [[c, 0.0, 0.0], [0.0, 1.0, 0.0], [s / distance, 0.0, 1.0]],
        }
    }

    /// The same transform, but pivoting about `pivot` instead of the origin.
    #[must_use]
    pub fn pivoted(self, pivot: Point) -> Self {
        Self::translate(pivot.x, pivot.y) * self * Self::translate(-pivot.x, -pivot.y)
    }

    /// Maps a point, including the perspective divide.
    #[must_use]
    pub fn map_point(&self, p: Point) -> Point {
        let r = &self.rows;
        let x = r[0][0] * p.x + r[0][1] * p.y + r[0][2];
        let y = r[1][0] * p.x + r[1][1] * p.y + r[1][2];
        let w = r[2][0] * p.x + r[2][1] * p.y + r[2][2];
        Point::new(x / w, y / w)
    }

    /// `true` when the bottom row is `[0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.rows[2] == [0.0, 0.0, 1.0]
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Perspective {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.rows;
        let b = &rhs.rows;
        let mut out = [[0.0_f64; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Self { rows: out }
    }
}

/// A pinhole camera behind the content plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Camera z position in inches. Negative: behind the plane, looking at it.
    z: f64,
}

impl Camera {
    pub fn new(z: f64) -> Self {
        Self { z }
    }

    /// Distance from the camera to the plane in canvas units.
    pub fn distance(&self) -> f64 {
        -self.z * PIXELS_PER_INCH
    }

    /// The page-turn projection for `degree`, hinged at `pivot`.
    ///
    /// Vertical pagers turn about the horizontal axis by `degree`; horizontal pagers turn about
    /// the vertical axis by `-degree`. The axes rotate in opposite senses, so on both the turning
    /// half swings out toward the viewer and grows past its flat size.
    pub fn flip_matrix(&self, orientation: Orientation, degree: i32, pivot: Point) -> Perspective {
        let rotation = match orientation {
            Orientation::Vertical => Perspective::rotate_x(degree as f64, self.distance()),
            Orientation::Horizontal => Perspective::rotate_y(-degree as f64, self.distance()),
        };
        rotation.pivoted(pivot)
    }
}

fn sin_cos(degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    #[cfg(feature = "std")]
    let (s, c) = radians.sin_cos();
    #[cfg(not(feature = "std"))]
    let (s, c) = (radians.sin(), radians.cos());
    (s, c)
}
