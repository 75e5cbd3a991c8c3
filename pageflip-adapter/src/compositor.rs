use kurbo::Rect;
use pageflip::{Error, Orientation, PageState, Result};

use crate::{Camera, Perspective};

/// The canvas primitives the compositor draws with.
///
/// `save`/`restore` must scope both clip and transform state.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    /// Intersects the current clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: Rect);
    /// Pre-concatenates `matrix` onto the current transform.
    fn concat(&mut self, matrix: &Perspective);
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
}

/// Page content that can draw itself without the flip applied.
///
/// The compositor draws a turning page twice, once per half, so drawing raw must not recurse
/// back into the compositor.
pub trait RawDraw<C: ?Sized> {
    fn draw_raw(&mut self, canvas: &mut C);
}

impl<C: ?Sized, F: FnMut(&mut C)> RawDraw<C> for F {
    fn draw_raw(&mut self, canvas: &mut C) {
        self(canvas);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn black(a: u8) -> Self {
        Self { r: 0, g: 0, b: 0, a }
    }
}

/// Which half of a page turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipSide {
    /// Leading (left) half of a horizontal page.
    Start,
    /// Trailing (right) half of a horizontal page.
    End,
    Top,
    Bottom,
}

impl FlipSide {
    /// The turning half for `degree`: negative degrees turn the top/leading half (the previous
    /// page is coming in), positive the bottom/trailing half. `None` at rest.
    pub fn for_degree(orientation: Orientation, degree: i32) -> Option<Self> {
        if degree == 0 {
            return None;
        }
        let side = match (orientation, degree < 0) {
            (Orientation::Vertical, true) => Self::Top,
            (Orientation::Vertical, false) => Self::Bottom,
            (Orientation::Horizontal, true) => Self::Start,
            (Orientation::Horizontal, false) => Self::End,
        };
        Some(side)
    }

    /// Splits `bounds` at its center into `(turning, static)` halves.
    pub fn split(self, bounds: Rect) -> (Rect, Rect) {
        let c = bounds.center();
        let left = Rect::new(bounds.x0, bounds.y0, c.x, bounds.y1);
        let right = Rect::new(c.x, bounds.y0, bounds.x1, bounds.y1);
        let top = Rect::new(bounds.x0, bounds.y0, bounds.x1, c.y);
        let bottom = Rect::new(bounds.x0, c.y, bounds.x1, bounds.y1);
        match self {
            Self::Start => (left, right),
            Self::End => (right, left),
            Self::Top => (top, bottom),
            Self::Bottom => (bottom, top),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipOptions {
    /// Camera z position in inches; must be negative (behind the content plane).
    pub camera_z: f64,
    /// Shade alpha at 90°. The shade scales linearly with `|degree| / 90`.
    pub max_shade_alpha: u8,
}

impl FlipOptions {
    pub fn new() -> Self {
        Self {
            camera_z: -40.0,
            max_shade_alpha: 0x99,
        }
    }

    pub fn with_camera_z(mut self, camera_z: f64) -> Self {
        self.camera_z = camera_z;
        self
    }

    pub fn with_max_shade_alpha(mut self, max_shade_alpha: u8) -> Self {
        self.max_shade_alpha = max_shade_alpha;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.camera_z.is_finite() || self.camera_z >= 0.0 {
            return Err(Error::InvalidOption {
                name: "camera_z",
                reason: "must be finite and negative",
            });
        }
        Ok(())
    }
}

impl Default for FlipOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to draw one turning page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipPlan {
    pub side: FlipSide,
    /// The full page bounds; the shade covers them in turned coordinates.
    pub bounds: Rect,
    pub turning_clip: Rect,
    pub static_clip: Rect,
    /// Projection concatenated before drawing the turning half, hinged at the bounds' center.
    pub matrix: Perspective,
    pub shade: Rgba8,
}

/// Draws a page turned by a flip degree.
///
/// A turning page is drawn in two clipped passes: the turning half through the camera
/// projection with a darkening shade over it, then the static half as-is. Each pass runs in its
/// own save/restore scope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipCompositor {
    options: FlipOptions,
    camera: Camera,
}

impl FlipCompositor {
    pub fn new(options: FlipOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            camera: Camera::new(options.camera_z),
            options,
        })
    }

    pub fn options(&self) -> &FlipOptions {
        &self.options
    }

    /// Shade alpha for `degree`, from transparent at 0° to `max_shade_alpha` at 90°.
    pub fn shade_alpha(&self, degree: i32) -> u8 {
        let ratio = (degree.unsigned_abs().min(90)) as f64 / 90.0;
        (self.options.max_shade_alpha as f64 * ratio) as u8
    }

    /// Plans the turn, or `None` when the page is at rest.
    pub fn plan(&self, bounds: Rect, degree: i32, orientation: Orientation) -> Option<FlipPlan> {
        let side = FlipSide::for_degree(orientation, degree)?;
        debug_assert!(
            degree.abs() < 90,
            "flip degree must stay within (-90, 90), got {degree}"
        );
        let (turning_clip, static_clip) = side.split(bounds);
        Some(FlipPlan {
            side,
            bounds,
            turning_clip,
            static_clip,
            matrix: self.camera.flip_matrix(orientation, degree, bounds.center()),
            shade: Rgba8::black(self.shade_alpha(degree)),
        })
    }

    /// Draws `page` into `canvas` turned by `degree`.
    ///
    /// At 0° this is a plain raw draw. Returns the turning side, if any.
    pub fn render<C, P>(
        &self,
        canvas: &mut C,
        bounds: Rect,
        degree: i32,
        orientation: Orientation,
        page: &mut P,
    ) -> Option<FlipSide>
    where
        C: Canvas + ?Sized,
        P: RawDraw<C> + ?Sized,
    {
        let Some(plan) = self.plan(bounds, degree, orientation) else {
            page.draw_raw(canvas);
            return None;
        };

        canvas.save();
        canvas.clip_rect(plan.turning_clip);
        canvas.concat(&plan.matrix);
        page.draw_raw(canvas);
        canvas.fill_rect(plan.bounds, plan.shade);
        canvas.restore();

        canvas.save();
        canvas.clip_rect(plan.static_clip);
        page.draw_raw(canvas);
        canvas.restore();

        Some(plan.side)
    }

    /// [`Self::render`] driven by a pager's [`PageState`]. Invisible pages are not drawn.
    pub fn render_page<C, P>(
        &self,
        canvas: &mut C,
        bounds: Rect,
        state: PageState,
        page: &mut P,
    ) -> Option<FlipSide>
    where
        C: Canvas + ?Sized,
        P: RawDraw<C> + ?Sized,
    {
        if !state.visible {
            return None;
        }
        self.render(canvas, bounds, state.degree, state.orientation, page)
    }
}

/// Converts pager bounds into canvas coordinates.
pub fn page_rect(bounds: pageflip::PageBounds) -> Rect {
    Rect::new(
        bounds.left as f64,
        bounds.top as f64,
        bounds.right as f64,
        bounds.bottom as f64,
    )
}
