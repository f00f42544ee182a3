//! Anchor placement rules for toasts.
//!
//! Each anchor maps (parent size, toast size, accumulated stack offset) to a
//! rest position, and a rest position to the off-screen point the toast
//! slides in from. The top and bottom rows stack away from their edge; the
//! center row always centers and accepts overlap.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default gap between a toast and the parent edge.
pub const DEFAULT_MARGIN: f64 = 24.0;
/// Default gap between stacked toasts.
pub const DEFAULT_SPACING: f64 = 16.0;

/// The nine screen-relative placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    CenterLeft,
    CenterCenter,
    CenterRight,
}

impl Anchor {
    /// Every anchor, for registries and tests.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
        Anchor::CenterLeft,
        Anchor::CenterCenter,
        Anchor::CenterRight,
    ];

    /// Canonical kebab-case name, e.g. `"top-right"`.
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
            Anchor::CenterLeft => "center-left",
            Anchor::CenterCenter => "center-center",
            Anchor::CenterRight => "center-right",
        }
    }

    /// Parse a canonical name back into an anchor.
    pub fn from_name(name: &str) -> Option<Anchor> {
        Anchor::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Whether toasts at this anchor stack; the center row overlaps instead.
    pub fn stacks(self) -> bool {
        !matches!(
            self,
            Anchor::CenterLeft | Anchor::CenterCenter | Anchor::CenterRight
        )
    }

    /// Rest position for a toast of `size` inside `parent`.
    ///
    /// `stacked` is the accumulated height (plus spacing) of every
    /// earlier-arrived toast at this anchor; the center row ignores it.
    pub fn rest_position(self, parent: Size, size: Size, stacked: f64, margin: f64) -> Point {
        let left = margin;
        let center_x = (parent.width - size.width) / 2.0;
        let right = parent.width - size.width - margin;
        let top = margin + stacked;
        let middle = (parent.height - size.height) / 2.0;
        let bottom = parent.height - size.height - margin - stacked;

        match self {
            Anchor::TopLeft => Point::new(left, top),
            Anchor::TopCenter => Point::new(center_x, top),
            Anchor::TopRight => Point::new(right, top),
            Anchor::BottomLeft => Point::new(left, bottom),
            Anchor::BottomCenter => Point::new(center_x, bottom),
            Anchor::BottomRight => Point::new(right, bottom),
            Anchor::CenterLeft => Point::new(left, middle),
            Anchor::CenterCenter => Point::new(center_x, middle),
            Anchor::CenterRight => Point::new(right, middle),
        }
    }

    /// Off-screen point the toast slides in from toward `rest`.
    ///
    /// Left anchors enter from beyond the left edge, right anchors from the
    /// right edge, the vertical-center columns drop in from above. The
    /// bottom-center anchor keeps its historical sideways nudge.
    pub fn slide_start(self, parent: Size, size: Size, rest: Point, spacing: f64) -> Point {
        match self {
            Anchor::TopLeft | Anchor::BottomLeft | Anchor::CenterLeft => {
                Point::new(-size.width, rest.y)
            }
            Anchor::TopRight | Anchor::BottomRight | Anchor::CenterRight => {
                Point::new(parent.width, rest.y)
            }
            Anchor::TopCenter | Anchor::CenterCenter => Point::new(rest.x, -size.height),
            Anchor::BottomCenter => Point::new(rest.x + spacing, rest.y),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: Size = Size::new(800.0, 600.0);
    const TOAST: Size = Size::new(304.0, 40.0);

    #[test]
    fn test_names_round_trip() {
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::from_name(anchor.name()), Some(anchor));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(Anchor::from_name("top-middle"), None);
        assert_eq!(Anchor::from_name(""), None);
    }

    #[test]
    fn test_serde_names_match_canonical_names() {
        for anchor in Anchor::ALL {
            let json = serde_json::to_string(&anchor).unwrap();
            assert_eq!(json, format!("\"{}\"", anchor.name()));
            let parsed: Anchor = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, anchor);
        }
    }

    #[test]
    fn test_top_right_stacks_downward() {
        let rest = Anchor::TopRight.rest_position(PARENT, TOAST, 0.0, DEFAULT_MARGIN);
        assert_eq!(rest, Point::new(800.0 - 304.0 - 24.0, 24.0));

        let stacked = Anchor::TopRight.rest_position(PARENT, TOAST, 56.0, DEFAULT_MARGIN);
        assert_eq!(stacked.y, 24.0 + 56.0);
    }

    #[test]
    fn test_bottom_left_stacks_upward() {
        let rest = Anchor::BottomLeft.rest_position(PARENT, TOAST, 0.0, DEFAULT_MARGIN);
        assert_eq!(rest, Point::new(24.0, 600.0 - 40.0 - 24.0));

        let stacked = Anchor::BottomLeft.rest_position(PARENT, TOAST, 56.0, DEFAULT_MARGIN);
        assert_eq!(stacked.y, 600.0 - 40.0 - 24.0 - 56.0);
    }

    #[test]
    fn test_center_row_ignores_stacking() {
        for anchor in [Anchor::CenterLeft, Anchor::CenterCenter, Anchor::CenterRight] {
            assert!(!anchor.stacks());
            let alone = anchor.rest_position(PARENT, TOAST, 0.0, DEFAULT_MARGIN);
            let stacked = anchor.rest_position(PARENT, TOAST, 120.0, DEFAULT_MARGIN);
            assert_eq!(alone, stacked);
        }
    }

    #[test]
    fn test_center_center_rests_centered() {
        let rest = Anchor::CenterCenter.rest_position(PARENT, TOAST, 0.0, DEFAULT_MARGIN);
        assert_eq!(rest, Point::new((800.0 - 304.0) / 2.0, (600.0 - 40.0) / 2.0));
    }

    #[test]
    fn test_slide_starts_off_screen() {
        let margin = DEFAULT_MARGIN;
        let spacing = DEFAULT_SPACING;

        let rest = Anchor::TopLeft.rest_position(PARENT, TOAST, 0.0, margin);
        let start = Anchor::TopLeft.slide_start(PARENT, TOAST, rest, spacing);
        assert_eq!(start, Point::new(-304.0, rest.y));

        let rest = Anchor::TopRight.rest_position(PARENT, TOAST, 0.0, margin);
        let start = Anchor::TopRight.slide_start(PARENT, TOAST, rest, spacing);
        assert_eq!(start, Point::new(800.0, rest.y));

        let rest = Anchor::TopCenter.rest_position(PARENT, TOAST, 0.0, margin);
        let start = Anchor::TopCenter.slide_start(PARENT, TOAST, rest, spacing);
        assert_eq!(start, Point::new(rest.x, -40.0));
    }

    #[test]
    fn test_bottom_center_keeps_sideways_nudge() {
        let rest = Anchor::BottomCenter.rest_position(PARENT, TOAST, 0.0, DEFAULT_MARGIN);
        let start = Anchor::BottomCenter.slide_start(PARENT, TOAST, rest, DEFAULT_SPACING);
        assert_eq!(start, Point::new(rest.x + DEFAULT_SPACING, rest.y));
    }
}
