#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use pageflip::{Error, Result, ScrollVector};

const GRAVITY_EARTH: f64 = 9.80665; // m/s^2
const INCHES_PER_METER: f64 = 39.37;
const INFLEXION: f64 = 0.35;
const PHYSICAL_SCALE: f64 = 0.84;

/// `ln(0.78) / ln(0.9)`, the exponent of the spline deceleration.
fn deceleration_rate() -> f64 {
    0.78_f64.ln() / 0.9_f64.ln()
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingOptions {
    /// Display density relative to 160 dpi.
    pub density: f64,
    /// Scroll friction.
    pub friction: f64,
}

impl FlingOptions {
    pub fn new() -> Self {
        Self {
            density: 1.0,
            friction: 0.015,
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(Error::InvalidOption {
                name: "density",
                reason: "must be finite and positive",
            });
        }
        if !self.friction.is_finite() || self.friction <= 0.0 {
            return Err(Error::InvalidOption {
                name: "friction",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}

impl Default for FlingOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Projects how far a fling would travel if left to decelerate on its own.
///
/// The distance follows a spline fit of a friction-decelerated scroll: it grows sub-linearly with
/// velocity, scaled by the display's physical pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingModel {
    friction: f64,
    physical_coeff: f64,
}

impl FlingModel {
    pub fn new(options: FlingOptions) -> Result<Self> {
        options.validate()?;
        let ppi = options.density * 160.0;
        Ok(Self {
            friction: options.friction,
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * ppi * PHYSICAL_SCALE,
        })
    }

    /// Total travel in pixels for a fling at `velocity` px/s (sign ignored).
    pub fn total_distance(&self, velocity: f64) -> f64 {
        let speed = velocity.abs();
        if speed == 0.0 || !speed.is_finite() {
            return 0.0;
        }
        let scale = self.friction * self.physical_coeff;
        let l = (INFLEXION * speed / scale).ln();
        let rate = deceleration_rate();
        scale * (rate / (rate - 1.0) * l).exp()
    }

    /// Signed travel on each axis for a fling at `(vx, vy)` px/s.
    ///
    /// The total distance is projected from the combined speed and shared across the axes by
    /// their part of the velocity.
    pub fn distance(&self, vx: f64, vy: f64) -> ScrollVector {
        let speed = vx.hypot(vy);
        if speed == 0.0 || !speed.is_finite() {
            return ScrollVector::ZERO;
        }
        let total = self.total_distance(speed);
        ScrollVector {
            dx: (total * vx / speed).round() as i32,
            dy: (total * vy / speed).round() as i32,
        }
    }
}
