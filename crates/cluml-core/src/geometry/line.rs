use serde::{Deserialize, Serialize};

use super::{Rect, Vector};

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Vector,
    pub p2: Vector,
}

impl Line {
    pub fn new(p1: Vector, p2: Vector) -> Self {
        Self { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Unit direction from `p1` to `p2`.
    pub fn direction(&self) -> Vector {
        (self.p2 - self.p1).normalize()
    }

    pub fn midpoint(&self) -> Vector {
        (self.p1 + self.p2).scale(0.5)
    }

    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    /// Point at parameter `t` (0 at `p1`, 1 at `p2`).
    pub fn point_at(&self, t: f64) -> Vector {
        self.p1 + (self.p2 - self.p1).scale(t)
    }

    /// Closest point on the segment to `p`, with its clamped parameter.
    pub fn closest_point(&self, p: Vector) -> (Vector, f64) {
        let d = self.p2 - self.p1;
        let l2 = d.length_squared();
        if l2 == 0.0 {
            return (self.p1, 0.0);
        }
        let t = ((p - self.p1).dot(d) / l2).clamp(0.0, 1.0);
        (self.point_at(t), t)
    }

    pub fn distance_to(&self, p: Vector) -> f64 {
        self.closest_point(p).0.distance(p)
    }

    /// Intersection point of two segments, if they cross.
    pub fn intersect(&self, other: &Line) -> Option<Vector> {
        let r = self.p2 - self.p1;
        let s = other.p2 - other.p1;
        let denom = r.cross(s);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let qp = other.p1 - self.p1;
        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.point_at(t))
        } else {
            None
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }
}
