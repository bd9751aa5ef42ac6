//! Rectangle helpers on top of smithay's logical geometry types.

use smithay::utils::{Logical, Point, Rectangle, Size};

pub type Rect = Rectangle<i32, Logical>;

pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
    Rectangle::new(Point::from((x, y)), Size::from((w, h)))
}

/// Zero or negative area. Such rectangles have no visible effect.
pub fn is_degenerate(r: &Rect) -> bool {
    r.size.w <= 0 || r.size.h <= 0
}

/// Clip `r` to `bounds`, `None` when nothing of it remains.
pub fn clip(r: Rect, bounds: Rect) -> Option<Rect> {
    if is_degenerate(&r) || is_degenerate(&bounds) {
        return None;
    }
    r.intersection(bounds).filter(|r| !is_degenerate(r))
}

pub fn right(r: &Rect) -> i32 {
    r.loc.x + r.size.w
}

pub fn bottom(r: &Rect) -> i32 {
    r.loc.y + r.size.h
}

/// True when `outer` covers the full horizontal extent of `inner`.
pub fn spans_horizontally(outer: &Rect, inner: &Rect) -> bool {
    outer.loc.x <= inner.loc.x && right(outer) >= right(inner)
}

/// Full-width rectangle glued to the bottom edge of `screen` without
/// covering all of it. Dialogs are laid out this way.
pub fn is_bottom_dialog(r: &Rect, screen: &Rect) -> bool {
    r.loc.x == screen.loc.x
        && r.size.w == screen.size.w
        && bottom(r) == bottom(screen)
        && r.loc.y > screen.loc.y
}

/// Swap width and height, keeping the origin.
pub fn transposed(r: Rect) -> Rect {
    rect(r.loc.x, r.loc.y, r.size.h, r.size.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_drops_offscreen() {
        let screen = rect(0, 0, 800, 480);
        assert_eq!(clip(rect(900, 0, 10, 10), screen), None);
        assert_eq!(clip(rect(-10, -10, 20, 20), screen), Some(rect(0, 0, 10, 10)));
        assert_eq!(clip(rect(10, 10, 0, 40), screen), None);
    }

    #[test]
    fn dialog_signature() {
        let screen = rect(0, 0, 800, 480);
        assert!(is_bottom_dialog(&rect(0, 200, 800, 280), &screen));
        assert!(!is_bottom_dialog(&rect(0, 0, 800, 480), &screen));
        assert!(!is_bottom_dialog(&rect(10, 200, 790, 280), &screen));
        assert!(!is_bottom_dialog(&rect(0, 200, 800, 200), &screen));
    }
}
