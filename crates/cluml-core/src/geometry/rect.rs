use serde::{Deserialize, Serialize};

use super::{Line, Vector};

/// Axis-aligned rectangle stored as edges.
///
/// The rectangle is not normalized automatically: `left` may exceed `right`
/// (or `top` exceed `bottom`) until [`Rect::normalize`] is called. Canvas
/// coordinates grow downward, so a normalized rectangle has `top <= bottom`.
///
/// Perimeter positions are expressed as a "side" value in `[0, 4)`: the
/// integer part selects the side (0 top, 1 right, 2 bottom, 3 left) and the
/// fractional part is the position along it, walking the perimeter
/// clockwise starting at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle centered on `center` with the given size.
    pub fn centered(center: Vector, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    /// Smallest normalized rectangle containing both points.
    pub fn from_points(a: Vector, b: Vector) -> Self {
        Self::new(a.x, a.y, b.x, b.y).normalize()
    }

    /// Returns a copy with `left <= right` and `top <= bottom`.
    pub fn normalize(self) -> Self {
        Self::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).abs()
    }

    pub fn center(&self) -> Vector {
        Vector::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// A zero-area rectangle; used for components that are not on the canvas.
    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    /// Point containment, edges inclusive. Assumes a normalized rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn contains_point(&self, p: Vector) -> bool {
        self.contains(p.x, p.y)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return other.normalize();
        }
        if other.is_empty() {
            return self.normalize();
        }
        let a = self.normalize();
        let b = other.normalize();
        Rect::new(
            a.left.min(b.left),
            a.top.min(b.top),
            a.right.max(b.right),
            a.bottom.max(b.bottom),
        )
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Corner by index: 0 top-left, 1 top-right, 2 bottom-right, 3 bottom-left.
    pub fn corner(&self, index: usize) -> Vector {
        let r = self.normalize();
        match index % 4 {
            0 => Vector::new(r.left, r.top),
            1 => Vector::new(r.right, r.top),
            2 => Vector::new(r.right, r.bottom),
            _ => Vector::new(r.left, r.bottom),
        }
    }

    /// The side as a segment running clockwise.
    pub fn side(&self, index: usize) -> Line {
        Line::new(self.corner(index), self.corner(index + 1))
    }

    /// Outward unit normal of the side containing perimeter value `t`.
    pub fn side_normal(&self, t: f64) -> Vector {
        match (wrap_side(t).floor() as usize) % 4 {
            0 => Vector::new(0.0, -1.0),
            1 => Vector::new(1.0, 0.0),
            2 => Vector::new(0.0, 1.0),
            _ => Vector::new(-1.0, 0.0),
        }
    }

    /// Point on the perimeter for side value `t` (wrapped into `[0, 4)`).
    pub fn point_on_side(&self, t: f64) -> Vector {
        let t = wrap_side(t);
        let side = (t.floor() as usize).min(3);
        self.side(side).point_at(t - side as f64)
    }

    /// Side value and distance of the perimeter point closest to `p`.
    pub fn closest_side_t(&self, p: Vector) -> (f64, f64) {
        let mut best = (0.0, f64::INFINITY);
        for side in 0..4 {
            let (q, frac) = self.side(side).closest_point(p);
            let d = q.distance(p);
            if d < best.1 {
                best = (side as f64 + frac, d);
            }
        }
        (wrap_side(best.0), best.1)
    }
}

/// Wraps a side value into `[0, 4)`.
pub fn wrap_side(t: f64) -> f64 {
    let w = t.rem_euclid(4.0);
    if w >= 4.0 {
        0.0
    } else {
        w
    }
}
