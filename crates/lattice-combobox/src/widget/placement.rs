//! Placement of the popover relative to the input.
//!
//! The popover prefers to open below the input, aligned with its left edge.
//! It flips above when it does not fit below and there is more room above,
//! and aligns with the input's right edge when it would overflow the right
//! side of the viewport.

use crate::geometry::{Point, Rect, Size};

/// Which side of the anchor the popover opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Side {
    /// Above the anchor, growing upward.
    Top,
    /// Below the anchor, growing downward.
    #[default]
    Bottom,
}

/// Which anchor edge the popover lines up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Align {
    /// Left edges aligned.
    #[default]
    Start,
    /// Right edges aligned.
    End,
}

/// Structured placement of a popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Placement {
    pub side: Side,
    pub align: Align,
}

impl Placement {
    /// Below the anchor, left-aligned.
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Align::Start);
    /// Below the anchor, right-aligned.
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Align::End);
    /// Above the anchor, left-aligned.
    pub const TOP_START: Self = Self::new(Side::Top, Align::Start);
    /// Above the anchor, right-aligned.
    pub const TOP_END: Self = Self::new(Side::Top, Align::End);

    /// Create a placement.
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// Frame anchoring flags for this placement.
    pub fn frame(self) -> PopoverFrame {
        PopoverFrame {
            top_anchor: self.side == Side::Bottom,
            right_anchor: self.align == Align::End,
        }
    }
}

/// Which corner the popover frame is pinned to, for open/close transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopoverFrame {
    /// The frame hangs from its top edge (it opened downward).
    pub top_anchor: bool,
    /// The frame is pinned at its right edge.
    pub right_anchor: bool,
}

/// Result of placing a popover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    pub placement: Placement,
    /// Top-left corner of the popover.
    pub origin: Point,
    /// Room available on the chosen side, the popover's height cap.
    pub max_height: f32,
}

impl PlacementResult {
    /// The popover rectangle for a given height.
    pub fn rect(&self, width: f32, height: f32) -> Rect {
        Rect::from_origin_size(self.origin, Size::new(width, height))
    }
}

/// Place a popover of `popover_size` next to `anchor` inside `viewport`.
///
/// `gutter` is the gap kept between anchor and popover. The returned height
/// cap is never negative; a popover taller than the cap is expected to be
/// clipped to it and scroll.
pub fn place(anchor: Rect, popover_size: Size, viewport: Rect, gutter: f32) -> PlacementResult {
    let space_below = (viewport.bottom() - anchor.bottom() - gutter).max(0.0);
    let space_above = (anchor.top() - gutter - viewport.top()).max(0.0);

    let side = if popover_size.height <= space_below || space_below >= space_above {
        Side::Bottom
    } else {
        Side::Top
    };
    let max_height = match side {
        Side::Bottom => space_below,
        Side::Top => space_above,
    };
    let height = popover_size.height.min(max_height);

    let y = match side {
        Side::Bottom => anchor.bottom() + gutter,
        Side::Top => anchor.top() - gutter - height,
    };

    let overflows_right = anchor.left() + popover_size.width > viewport.right();
    let fits_end_aligned = anchor.right() - popover_size.width >= viewport.left();
    let align = if overflows_right && fits_end_aligned {
        Align::End
    } else {
        Align::Start
    };

    let mut x = match align {
        Align::Start => anchor.left(),
        Align::End => anchor.right() - popover_size.width,
    };
    // Shift to stay within the viewport horizontally.
    if x + popover_size.width > viewport.right() {
        x = viewport.right() - popover_size.width;
    }
    if x < viewport.left() {
        x = viewport.left();
    }

    PlacementResult {
        placement: Placement::new(side, align),
        origin: Point::new(x, y),
        max_height,
    }
}
