//! Collision tests for axis-aligned boxes
//!
//! Letters, rocks and the paddle are all plain rectangles in screen space
//! (y grows downward). Letter sprites carry transparent padding below the
//! parachute, so the paddle test trims the letter's bottom edge by a
//! configurable tolerance.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Letter-vs-paddle test with the bottom edge pulled up by `touch_offset`
pub fn letter_touches_paddle(letter: &Rect, paddle: &Rect, touch_offset: f32) -> bool {
    letter.bottom() - touch_offset > paddle.top()
        && letter.top() < paddle.bottom()
        && letter.right() > paddle.left()
        && letter.left() < paddle.right()
}

/// Whether a box's bottom edge is below the waterline
#[inline]
pub fn below_waterline(rect: &Rect, waterline_y: f32) -> bool {
    rect.bottom() > waterline_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touch_offset_shrinks_gap() {
        let paddle = Rect::new(100.0, 446.0, 100.0, 20.0);
        // Bottom edge at 470: overlaps the paddle box by 24px
        let letter = Rect::new(50.0, 340.0, 160.0, 130.0);
        assert!(letter.overlaps(&paddle));
        // ...but not once the 35px padding is discounted
        assert!(!letter_touches_paddle(&letter, &paddle, 35.0));

        let letter = Rect::new(50.0, 352.0, 160.0, 130.0);
        assert!(letter_touches_paddle(&letter, &paddle, 35.0));
    }

    #[test]
    fn test_touch_requires_horizontal_overlap() {
        let paddle = Rect::new(500.0, 446.0, 100.0, 20.0);
        let letter = Rect::new(100.0, 400.0, 160.0, 130.0);
        assert!(!letter_touches_paddle(&letter, &paddle, 35.0));
    }

    #[test]
    fn test_waterline() {
        let r = Rect::new(0.0, 430.0, 160.0, 130.0);
        assert!(!below_waterline(&r, 560.0));
        let r = Rect::new(0.0, 430.5, 160.0, 130.0);
        assert!(below_waterline(&r, 560.0));
    }
}
