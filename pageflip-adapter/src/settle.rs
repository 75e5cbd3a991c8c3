#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use pageflip::{Error, PageHost, Pager, Result, ScrollVector};

/// Share of a decelerating scroll's duration spent covering the same distance linearly.
const DECELERATION_TIME_RATIO: f64 = 0.3356;

/// The settle curve: `1 - (1 - t)^3`, fast at first, easing into the page.
pub fn decelerate(t: f64) -> f64 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

/// Timing for settles.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleOptions {
    /// Linear scroll speed, in milliseconds per pixel.
    pub ms_per_px: f64,
    /// Upper bound for a settle's duration, however far it goes.
    pub max_duration_ms: u64,
    /// Flings slower than this (px/s on both axes) do not snap.
    pub min_fling_velocity: f64,
}

impl SettleOptions {
    pub fn new() -> Self {
        Self {
            ms_per_px: 25.0 / 160.0,
            max_duration_ms: 250,
            min_fling_velocity: 50.0,
        }
    }

    /// Scales the scroll speed for a display density (`25 / dpi` ms per pixel) and the minimum
    /// fling velocity with it.
    pub fn with_density_dpi(mut self, dpi: f64) -> Self {
        self.ms_per_px = 25.0 / dpi;
        self.min_fling_velocity = 50.0 * dpi / 160.0;
        self
    }

    pub fn with_max_duration_ms(mut self, max_duration_ms: u64) -> Self {
        self.max_duration_ms = max_duration_ms;
        self
    }

    pub fn with_min_fling_velocity(mut self, min_fling_velocity: f64) -> Self {
        self.min_fling_velocity = min_fling_velocity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.ms_per_px.is_finite() || self.ms_per_px <= 0.0 {
            return Err(Error::InvalidOption {
                name: "ms_per_px",
                reason: "must be finite and positive",
            });
        }
        if self.max_duration_ms == 0 {
            return Err(Error::InvalidOption {
                name: "max_duration_ms",
                reason: "must be positive",
            });
        }
        if !self.min_fling_velocity.is_finite() || self.min_fling_velocity < 0.0 {
            return Err(Error::InvalidOption {
                name: "min_fling_velocity",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// How long a decelerating settle over `distance` pixels takes. `0` for no distance.
    pub fn duration_for(&self, distance: i32) -> u64 {
        if distance == 0 {
            return 0;
        }
        let linear = (distance.unsigned_abs() as f64 * self.ms_per_px).ceil();
        let decelerating = (linear / DECELERATION_TIME_RATIO).ceil() as u64;
        decelerating.clamp(1, self.max_duration_ms)
    }
}

impl Default for SettleOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The animation a settle starts with: scroll by `(dx, dy)` over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleAction {
    pub dx: i32,
    pub dy: i32,
    pub duration_ms: u64,
}

/// The outcome of one settle frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleStep {
    /// Scroll consumed by the pager this frame, on the pager's axis.
    pub consumed: ScrollVector,
    /// Distance still left to the target page after this frame.
    pub remaining: i32,
    pub finished: bool,
}

/// Animates a pager onto a whole page.
///
/// Every frame re-measures the distance to the target page from the pager's live geometry, so
/// resizes or external scrolls during the animation are absorbed rather than overshot. All
/// movement goes through [`Pager::scroll_by`]; dropping a settler mid-flight leaves nothing to
/// clean up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothSettler {
    target: usize,
    start_ms: u64,
    duration_ms: u64,
    progress: f64,
}

impl SmoothSettler {
    /// Starts settling onto `target` (clamped to the last page).
    ///
    /// Returns `None` when there is nothing to animate: no items, or the pager already rests on
    /// the target.
    pub fn start(
        pager: &Pager,
        target: usize,
        now_ms: u64,
        options: &SettleOptions,
    ) -> Option<(Self, SettleAction)> {
        let count = pager.item_count();
        if count == 0 {
            return None;
        }
        let target = target.min(count - 1);
        let distance = pager.distance_to_settle(target);
        let duration_ms = options.duration_for(distance);
        if duration_ms == 0 {
            return None;
        }

        let v = ScrollVector::along(pager.orientation(), distance);
        let action = SettleAction {
            dx: v.dx,
            dy: v.dy,
            duration_ms,
        };
        let settler = Self {
            target,
            start_ms: now_ms,
            duration_ms,
            progress: 0.0,
        };
        Some((settler, action))
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Advances the settle to `now_ms`, scrolling `pager` by this frame's share of the remaining
    /// distance.
    pub fn step<H: PageHost + ?Sized>(
        &mut self,
        pager: &mut Pager,
        host: &mut H,
        now_ms: u64,
    ) -> Result<SettleStep> {
        let orientation = pager.orientation();
        let count = pager.item_count();
        if count == 0 {
            return Ok(SettleStep {
                consumed: ScrollVector::ZERO,
                remaining: 0,
                finished: true,
            });
        }

        let target = self.target.min(count - 1);
        let remaining = pager.distance_to_settle(target);
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f64 / self.duration_ms as f64).min(1.0);
        let eased = decelerate(t);

        let delta = if t >= 1.0 || self.progress >= 1.0 {
            remaining
        } else {
            let share = (eased - self.progress) / (1.0 - self.progress);
            (remaining as f64 * share).round() as i32
        };
        self.progress = eased;

        let consumed = if delta == 0 {
            0
        } else {
            pager.scroll_by(delta, host)?
        };
        let left = remaining - consumed;
        // A blocked scroll (e.g. the target vanished past an edge) ends the settle too.
        let finished = left == 0 || t >= 1.0 || (delta != 0 && consumed == 0);

        Ok(SettleStep {
            consumed: ScrollVector::along(orientation, consumed),
            remaining: left,
            finished,
        })
    }
}
