/// The scroll axis of a pager. Fixed for the pager's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Picks the component of `(x, y)` that lies on this axis.
    pub fn main<T>(self, x: T, y: T) -> T {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }
}

/// A pixel rectangle in host coordinates (`right`/`bottom` exclusive).
///
/// The pager hands the padded content rect of its host to every page it lays out; pages always
/// fill the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PageBounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds of a `width` x `height` viewport inset by padding.
    pub fn from_size_with_padding(width: i32, height: i32, padding: [i32; 4]) -> Self {
        let [start, top, end, bottom] = padding;
        Self::new(start, top, width - end, height - bottom)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top).max(0) as u32
    }

    /// Extent along `orientation`'s axis.
    pub fn length(&self, orientation: Orientation) -> u32 {
        orientation.main(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// A signed scroll vector in pixels. Only the component on the pager's axis is ever non-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollVector {
    pub dx: i32,
    pub dy: i32,
}

impl ScrollVector {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Places `distance` on `orientation`'s axis.
    pub fn along(orientation: Orientation, distance: i32) -> Self {
        match orientation {
            Orientation::Horizontal => Self { dx: distance, dy: 0 },
            Orientation::Vertical => Self { dx: 0, dy: distance },
        }
    }

    pub fn main(&self, orientation: Orientation) -> i32 {
        orientation.main(self.dx, self.dy)
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// What the host should apply to one attached page before it draws.
///
/// Only the resting page ever carries a non-zero `degree`; neighbors only toggle `visible`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageState {
    pub index: usize,
    /// Flip rotation in degrees, always within `(-90, 90)`.
    pub degree: i32,
    pub orientation: Orientation,
    pub visible: bool,
}

/// The in-memory scroll position of a pager, for hosts that rebuild it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerSnapshot {
    pub page: usize,
    pub offset: i32,
}
